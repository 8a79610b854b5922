use crate::config::ConfigError;
use std::borrow::Cow;

/// Errors raised while reading a typed property.
///
/// Every variant names the property; parse failures also carry the offending raw text.
#[gate_derive::gate_error]
pub enum PropertyError {
    /// The raw value does not satisfy the property's type or range rule.
    #[error("Property \"{name}\" {message}, got \"{raw}\"{}", format_context(.context))]
    Invalid {
        name: &'static str,
        raw: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A required property has no value.
    #[error("Property \"{name}\" is required but not set{}", format_context(.context))]
    Missing { name: &'static str, context: Option<Cow<'static, str>> },

    /// The raw value is not an IP address or CIDR subnet.
    #[error(
        "Property \"{name}\" contains a malformed network range \"{raw}\"{}: {message}",
        format_context(.context)
    )]
    MalformedNetworkRange {
        name: &'static str,
        raw: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The configuration source itself could not be read.
    #[error("Property source error{}: {source}", format_context(.context))]
    Source { source: ConfigError, context: Option<Cow<'static, str>> },
}

impl PropertyError {
    /// Name of the property the error is about, when known.
    #[must_use]
    pub const fn property_name(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { name, .. }
            | Self::Missing { name, .. }
            | Self::MalformedNetworkRange { name, .. } => Some(*name),
            Self::Source { .. } => None,
        }
    }
}
