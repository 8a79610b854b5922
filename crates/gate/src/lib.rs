//! Facade crate for the second-factor providers.
//! Re-exports domain/kernel primitives and aggregates provider initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `gate` with the desired feature flags (`totp`/`duo`).
//! - Call [`init`] with a configuration source to get every enabled provider.

pub use gate_domain as domain;
pub use gate_kernel as kernel;

use gate_kernel::domain::registry::InitializedProvider;
use gate_kernel::prelude::ConfigSource;
use std::borrow::Cow;
use tracing::info;

/// Provider registry for runtime introspection.
pub mod features {
    #[cfg(feature = "duo")]
    pub use gate_duo as duo;
    #[cfg(feature = "totp")]
    pub use gate_totp as totp;

    /// Build-time enabled providers (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "totp")]
        "totp",
        #[cfg(feature = "duo")]
        "duo",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// A specialized [`GateError`] enum of this crate.
#[gate_derive::gate_error]
pub enum GateError {
    #[cfg(feature = "totp")]
    #[error("TOTP provider failed to initialize{}: {source}", format_context(.context))]
    Totp { source: gate_totp::TotpError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "duo")]
    #[error("Duo provider failed to initialize{}: {source}", format_context(.context))]
    Duo { source: gate_duo::DuoError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal gate error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Initialize every enabled provider from `source`, in [`features::ENABLED`] order.
///
/// # Errors
/// Returns the first provider's configuration error; no partial registry is returned.
pub fn init<S: ConfigSource + ?Sized>(source: &S) -> Result<Vec<InitializedProvider>, GateError> {
    #[allow(unused_mut)]
    let mut providers = Vec::new();

    #[cfg(feature = "totp")]
    providers.push(features::totp::init(source)?);

    #[cfg(feature = "duo")]
    providers.push(features::duo::init(source)?);

    info!(count = providers.len(), "Second-factor providers initialized");
    Ok(providers)
}
