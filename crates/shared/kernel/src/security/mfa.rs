//! Second-factor gate shared by the authentication modules.
//!
//! The actual verification (TOTP code check, remote push approval) is an opaque
//! [`SecondFactor`] service. This module only decides whether to call it.

use crate::domain::user::AuthenticatedUser;
use crate::security::network::HostPolicy;
use std::borrow::Cow;
use tracing::{debug, info};

#[gate_derive::gate_error]
pub enum VerificationError {
    /// The user did not satisfy the second factor.
    #[error("Second factor rejected for \"{username}\"{}: {message}", format_context(.context))]
    Rejected {
        username: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The verification service could not be reached or answered nonsense.
    #[error("Second factor service unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal verification error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// An opaque second-factor verification service.
pub trait SecondFactor: Send + Sync {
    /// Verifies `user`, returning `Ok(())` only if the second factor was satisfied.
    ///
    /// # Errors
    /// Any [`VerificationError`]; the login attempt must then be denied.
    fn verify(&self, user: &AuthenticatedUser) -> Result<(), VerificationError>;
}

impl<F> SecondFactor for F
where
    F: Fn(&AuthenticatedUser) -> Result<(), VerificationError> + Send + Sync,
{
    fn verify(&self, user: &AuthenticatedUser) -> Result<(), VerificationError> {
        self(user)
    }
}

/// What the gate did with a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No second factor was required.
    Skipped,
    /// The second factor was required and satisfied.
    Verified,
}

/// Runs `verifier` for `user` if, and only if, `policy` requires a second factor.
///
/// Anonymous users are never prompted.
///
/// # Errors
/// The verifier's error, unchanged.
pub fn gate<V>(
    policy: &HostPolicy,
    user: &AuthenticatedUser,
    verifier: &V,
) -> Result<Outcome, VerificationError>
where
    V: SecondFactor + ?Sized,
{
    if user.is_anonymous() {
        debug!("Anonymous user, second factor skipped");
        return Ok(Outcome::Skipped);
    }

    if !policy.requires_second_factor(user.remote_address) {
        info!(
            username = %user.username,
            address = %user.remote_address,
            "Second factor not required for this host"
        );
        return Ok(Outcome::Skipped);
    }

    verifier.verify(user)?;
    debug!(username = %user.username, "Second factor verified");
    Ok(Outcome::Verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn user(name: &str, address: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(name, address.parse().unwrap())
    }

    #[test]
    fn verifier_runs_only_when_required() {
        let calls = AtomicUsize::new(0);
        let verifier = |_: &AuthenticatedUser| -> Result<(), VerificationError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };
        let policy = HostPolicy::new(vec!["10.0.0.0/8".parse().unwrap()], Vec::new());

        assert_eq!(
            gate(&policy, &user("alice", "10.2.3.4"), &verifier).unwrap(),
            Outcome::Skipped
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            gate(&policy, &user("alice", "192.168.1.1"), &verifier).unwrap(),
            Outcome::Verified
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn anonymous_users_are_never_prompted() {
        let verifier = |_: &AuthenticatedUser| -> Result<(), VerificationError> {
            Err("should not be called".into())
        };
        let outcome = gate(&HostPolicy::default(), &user("anonymous", "8.8.8.8"), &verifier);
        assert_eq!(outcome.unwrap(), Outcome::Skipped);
    }

    #[test]
    fn verifier_errors_are_propagated() {
        let verifier = |u: &AuthenticatedUser| -> Result<(), VerificationError> {
            Err(VerificationError::Rejected {
                username: u.username.clone(),
                message: "wrong code".into(),
                context: None,
            })
        };
        let err = gate(&HostPolicy::default(), &user("bob", "8.8.8.8"), &verifier).unwrap_err();
        assert_eq!(err.to_string(), "Second factor rejected for \"bob\": wrong code");
    }
}
