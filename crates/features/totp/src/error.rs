use gate_kernel::prelude::{PropertyError, VerificationError};
use std::borrow::Cow;

/// A specialized [`TotpError`] enum of this crate.
#[gate_derive::gate_error]
pub enum TotpError {
    /// A `totp-*` property is invalid.
    #[error("TOTP config error{}: {source}", format_context(.context))]
    Property { source: PropertyError, context: Option<Cow<'static, str>> },
    /// The user failed or could not complete code verification.
    #[error("TOTP verification failed{}: {source}", format_context(.context))]
    Verification { source: VerificationError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal TOTP error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
