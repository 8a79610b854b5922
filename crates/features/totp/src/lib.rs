//! TOTP second-factor provider.
//!
//! Resolves the `totp-*` properties once, at initialization, and gates a caller-supplied code
//! check through the configured host policy. Generating and checking codes is the verifier's
//! business, this crate only hands it the tunables and decides whether to call it.

pub mod config;
mod error;

pub use crate::config::TotpConfig;
pub use crate::error::{TotpError, TotpErrorExt};

use gate_domain::totp::TotpSettings;
use gate_domain::user::AuthenticatedUser;
use gate_kernel::domain::registry::InitializedProvider;
use gate_kernel::prelude::*;
use gate_kernel::security::mfa;
use tracing::{info, warn};

/// Initialized TOTP provider state.
#[gate_derive::gate_provider(id = "totp")]
pub struct TotpProvider {
    settings: TotpSettings,
    policy: HostPolicy,
}

impl TotpProvider {
    /// Reads and validates the TOTP configuration.
    ///
    /// # Errors
    /// Returns [`TotpError::Property`] for the first invalid property.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, TotpError> {
        let config = TotpConfig::new(source);
        let settings = config.settings().context("Failed to resolve TOTP settings")?;
        let policy = config.host_policy().context("Failed to resolve TOTP host lists")?;

        for warning in policy.warnings() {
            warn!(provider = Self::IDENTIFIER, "{warning}");
        }

        Ok(Self::new(TotpProviderInner { settings, policy }))
    }

    #[must_use]
    pub fn settings(&self) -> &TotpSettings {
        &self.settings
    }

    #[must_use]
    pub fn policy(&self) -> &HostPolicy {
        &self.policy
    }

    /// Asks `user` for a code through `verifier` if their address requires it.
    ///
    /// # Errors
    /// Returns [`TotpError::Verification`] if the verifier rejects the user.
    pub fn verify_authenticated_user<V>(
        &self,
        user: &AuthenticatedUser,
        verifier: &V,
    ) -> Result<Outcome, TotpError>
    where
        V: SecondFactor + ?Sized,
    {
        Ok(mfa::gate(&self.policy, user, verifier)?)
    }
}

/// Initialize the TOTP provider from `source`.
///
/// # Errors
/// Returns [`TotpError::Property`] if any `totp-*` property is invalid.
pub fn init<S: ConfigSource + ?Sized>(source: &S) -> Result<InitializedProvider, TotpError> {
    let provider = TotpProvider::from_source(source)?;
    info!(
        bypass = provider.policy().bypass().len(),
        enforce = provider.policy().enforce().len(),
        "TOTP provider initialized"
    );
    Ok(InitializedProvider::new(provider))
}
