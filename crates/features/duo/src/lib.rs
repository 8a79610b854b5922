//! Duo second-factor provider.
//!
//! Users who already passed primary authentication are sent through a Duo prompt, unless the
//! configured host lists exempt their address. The Duo round trip itself is an opaque
//! [`SecondFactor`] supplied by the caller.

pub mod config;
mod error;

pub use crate::config::{ClientSecret, DuoConfig};
pub use crate::error::{DuoError, DuoErrorExt};

use gate_domain::user::AuthenticatedUser;
use gate_kernel::domain::registry::InitializedProvider;
use gate_kernel::prelude::*;
use gate_kernel::security::mfa;
use std::time::Duration;
use tracing::{info, warn};

/// Initialized Duo provider state.
#[gate_derive::gate_provider(id = "duo")]
pub struct DuoProvider {
    api_hostname: String,
    client_id: String,
    client_secret: ClientSecret,
    redirect_uri: String,
    auth_timeout: Duration,
    policy: HostPolicy,
}

impl DuoProvider {
    /// Reads and validates the Duo configuration. All four client properties are required.
    ///
    /// # Errors
    /// Returns [`DuoError::Property`] for the first missing or invalid property.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, DuoError> {
        let config = DuoConfig::new(source);
        let inner = DuoProviderInner {
            api_hostname: config.api_hostname()?,
            client_id: config.client_id()?,
            client_secret: config.client_secret()?,
            redirect_uri: config.redirect_uri()?,
            auth_timeout: config.auth_timeout()?,
            policy: config.host_policy().context("Failed to resolve Duo host lists")?,
        };

        for warning in inner.policy.warnings() {
            warn!(provider = Self::IDENTIFIER, "{warning}");
        }

        Ok(Self::new(inner))
    }

    #[must_use]
    pub fn api_hostname(&self) -> &str {
        &self.api_hostname
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    #[must_use]
    pub fn auth_timeout(&self) -> Duration {
        self.auth_timeout
    }

    #[must_use]
    pub fn policy(&self) -> &HostPolicy {
        &self.policy
    }

    /// Sends `user` through Duo via `verifier` if the host policy requires it.
    ///
    /// # Errors
    /// Returns [`DuoError::Verification`] if Duo does not approve the login.
    pub fn verify_authenticated_user<V>(
        &self,
        user: &AuthenticatedUser,
        verifier: &V,
    ) -> Result<Outcome, DuoError>
    where
        V: SecondFactor + ?Sized,
    {
        mfa::gate(&self.policy, user, verifier)
            .context(format!("Duo prompt via {} failed", self.api_hostname))
    }
}

/// Initialize the Duo provider from `source`.
///
/// # Errors
/// Returns [`DuoError::Property`] if a required `duo-*` property is missing or any is invalid.
pub fn init<S: ConfigSource + ?Sized>(source: &S) -> Result<InitializedProvider, DuoError> {
    let provider = DuoProvider::from_source(source)?;
    info!(
        api_hostname = provider.api_hostname(),
        client_id = provider.client_id(),
        timeout_secs = provider.auth_timeout().as_secs(),
        "Duo provider initialized"
    );
    Ok(InitializedProvider::new(provider))
}
