//! Network-scoped second-factor policy.

pub mod mfa;
pub mod network;
