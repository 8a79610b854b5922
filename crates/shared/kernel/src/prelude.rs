//! Commonly used kernel items.

pub use crate::config::{ConfigError, ConfigSource, ConfigSourceExt, Properties};
pub use crate::property::{
    EnumProperty, IntegerProperty, LongProperty, NetworkRangeProperty, Property, PropertyError,
    PropertyKind, StringProperty,
};
pub use crate::security::mfa::{Outcome, SecondFactor, VerificationError};
pub use crate::security::network::{HostPolicy, NetworkRange};
