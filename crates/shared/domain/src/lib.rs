//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O, parsing or policy logic, just data and simple helpers.

pub mod form;
pub mod registry;
pub mod totp;
pub mod user;
