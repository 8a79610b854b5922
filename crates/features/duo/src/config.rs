//! Typed access to the `duo-*` properties.

use crate::error::DuoError;
use gate_kernel::prelude::*;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Hostname of the Duo API endpoint, as given by the Duo admin panel.
pub const DUO_API_HOSTNAME: StringProperty = Property::string("duo-api-hostname");
/// Client ID of the Duo application.
pub const DUO_CLIENT_ID: StringProperty = Property::string("duo-client-id");
/// Client secret of the Duo application.
pub const DUO_CLIENT_SECRET: StringProperty = Property::string("duo-client-secret");
/// Where Duo sends the user back after the prompt.
pub const DUO_REDIRECT_URI: StringProperty = Property::string("duo-redirect-uri");
/// Minutes a user has to complete the Duo prompt.
pub const DUO_AUTH_TIMEOUT: IntegerProperty = Property::integer("duo-auth-timeout");
/// Hosts that never go through Duo.
pub const DUO_BYPASS_HOSTS: NetworkRangeProperty = Property::network("duo-bypass-hosts");
/// Hosts that always go through Duo.
pub const DUO_ENFORCE_HOSTS: NetworkRangeProperty = Property::network("duo-enforce-hosts");

pub const DEFAULT_AUTH_TIMEOUT: i32 = 5;

/// The Duo client secret. Wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for signing requests to Duo.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(***)")
    }
}

/// Reads the Duo configuration from a [`ConfigSource`].
#[derive(Debug, Clone, Copy)]
pub struct DuoConfig<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: ConfigSource + ?Sized> DuoConfig<'a, S> {
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// # Errors
    /// [`PropertyError::Missing`] if not configured.
    pub fn api_hostname(&self) -> Result<String, DuoError> {
        Ok(self.source.required_property(&DUO_API_HOSTNAME)?)
    }

    /// # Errors
    /// [`PropertyError::Missing`] if not configured.
    pub fn client_id(&self) -> Result<String, DuoError> {
        Ok(self.source.required_property(&DUO_CLIENT_ID)?)
    }

    /// # Errors
    /// [`PropertyError::Missing`] if not configured.
    pub fn client_secret(&self) -> Result<ClientSecret, DuoError> {
        Ok(ClientSecret(self.source.required_property(&DUO_CLIENT_SECRET)?))
    }

    /// # Errors
    /// [`PropertyError::Missing`] if not configured.
    pub fn redirect_uri(&self) -> Result<String, DuoError> {
        Ok(self.source.required_property(&DUO_REDIRECT_URI)?)
    }

    /// # Errors
    /// [`PropertyError::Invalid`] unless a positive number of minutes.
    pub fn auth_timeout(&self) -> Result<Duration, DuoError> {
        let minutes = self.source.property_or(&DUO_AUTH_TIMEOUT, DEFAULT_AUTH_TIMEOUT)?;
        let minutes = DUO_AUTH_TIMEOUT.check_range(
            minutes,
            1..=i32::MAX,
            "must be a positive number of minutes",
        )?;
        Ok(Duration::from_secs(u64::from(minutes.unsigned_abs()) * 60))
    }

    /// # Errors
    /// [`PropertyError::MalformedNetworkRange`] for a bad entry.
    pub fn bypass_hosts(&self) -> Result<Vec<NetworkRange>, DuoError> {
        Ok(self.source.property_list_or(&DUO_BYPASS_HOSTS, Vec::new())?)
    }

    /// # Errors
    /// [`PropertyError::MalformedNetworkRange`] for a bad entry.
    pub fn enforce_hosts(&self) -> Result<Vec<NetworkRange>, DuoError> {
        Ok(self.source.property_list_or(&DUO_ENFORCE_HOSTS, Vec::new())?)
    }

    /// # Errors
    /// [`PropertyError::MalformedNetworkRange`] for a bad entry in either list.
    pub fn host_policy(&self) -> Result<HostPolicy, DuoError> {
        Ok(HostPolicy::new(self.bypass_hosts()?, self.enforce_hosts()?))
    }

    /// # Errors
    /// [`PropertyError::MalformedNetworkRange`] for a bad entry in either list.
    pub fn requires_second_factor(&self, address: IpAddr) -> Result<bool, DuoError> {
        Ok(self.host_policy()?.requires_second_factor(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn secrets_are_redacted() {
        let secret = ClientSecret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "ClientSecret(***)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn timeout_defaults_to_five_minutes() {
        let source: BTreeMap<String, String> = BTreeMap::new();
        let config = DuoConfig::new(&source);
        assert_eq!(config.auth_timeout().unwrap(), Duration::from_secs(300));
    }

    #[test]
    fn timeout_must_be_positive() {
        let source = BTreeMap::from([("duo-auth-timeout".to_owned(), "-1".to_owned())]);
        assert!(DuoConfig::new(&source).auth_timeout().is_err());
    }

    #[test]
    fn required_values_report_their_name() {
        let source: BTreeMap<String, String> = BTreeMap::new();
        let err = DuoConfig::new(&source).api_hostname().unwrap_err();
        assert!(matches!(
            err,
            DuoError::Property { source: PropertyError::Missing { name: "duo-api-hostname", .. }, .. }
        ));
    }
}
