//! Kernel utilities shared across authentication modules.
//! Keep this crate lightweight: typed property parsing, configuration sources, and the
//! network policy deciding when a second factor is required.
//!
//! ## Declaring and reading properties
//! ```rust
//! use gate_kernel::prelude::*;
//! use std::collections::HashMap;
//!
//! const PERIOD: IntegerProperty = Property::integer("totp-period");
//!
//! let source = HashMap::from([("totp-period".to_owned(), "60".to_owned())]);
//! assert_eq!(source.property_or(&PERIOD, 30).unwrap(), 60);
//! ```
//!
//! ## Deciding on a second factor
//! ```rust
//! use gate_kernel::security::network::{HostPolicy, NetworkRange};
//!
//! let bypass: NetworkRange = "10.0.0.0/8".parse().unwrap();
//! let policy = HostPolicy::new(vec![bypass], Vec::new());
//! assert!(!policy.requires_second_factor("10.1.2.3".parse().unwrap()));
//! ```

pub mod config;
pub mod prelude;
pub mod property;
pub mod security;

pub use gate_domain as domain;
