use gate_kernel::prelude::{PropertyError, VerificationError};
use std::borrow::Cow;

/// A specialized [`DuoError`] enum of this crate.
#[gate_derive::gate_error]
pub enum DuoError {
    /// A `duo-*` property is missing or invalid.
    #[error("Duo config error{}: {source}", format_context(.context))]
    Property { source: PropertyError, context: Option<Cow<'static, str>> },
    /// Duo did not approve the login.
    #[error("Duo verification failed{}: {source}", format_context(.context))]
    Verification { source: VerificationError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal Duo error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
