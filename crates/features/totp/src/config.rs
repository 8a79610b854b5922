//! Typed access to the `totp-*` properties.

use crate::error::{TotpError, TotpErrorExt};
use gate_domain::totp::{
    DEFAULT_DIGITS, DEFAULT_ISSUER, DEFAULT_PERIOD, MAX_DIGITS, MIN_DIGITS, TotpMode, TotpSettings,
};
use gate_kernel::prelude::*;
use std::net::IpAddr;
use tracing::debug;

/// Issuer shown in authenticator apps.
pub const TOTP_ISSUER: StringProperty = Property::string("totp-issuer");
/// Number of digits per code, between 6 and 8.
pub const TOTP_DIGITS: IntegerProperty = Property::integer("totp-digits");
/// Seconds each code stays valid.
pub const TOTP_PERIOD: IntegerProperty = Property::integer("totp-period");
/// Hash algorithm used to generate codes.
pub const TOTP_MODE: EnumProperty<TotpMode> = Property::symbol("totp-mode");
/// Hosts that never have to enter a code.
pub const TOTP_BYPASS_HOSTS: NetworkRangeProperty = Property::network("totp-bypass-hosts");
/// Hosts that always have to enter a code.
pub const TOTP_ENFORCE_HOSTS: NetworkRangeProperty = Property::network("totp-enforce-hosts");

const DIGITS_MESSAGE: &str =
    "TOTP codes may have no fewer than 6 digits and no more than 8 digits";

/// Reads the TOTP configuration from a [`ConfigSource`].
///
/// Every accessor re-reads its property, so a live source is always reflected.
#[derive(Debug, Clone, Copy)]
pub struct TotpConfig<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: ConfigSource + ?Sized> TotpConfig<'a, S> {
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if the source cannot be read.
    pub fn issuer(&self) -> Result<String, TotpError> {
        Ok(self.source.property_or(&TOTP_ISSUER, DEFAULT_ISSUER.to_owned())?)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if the value is not an integer between 6 and 8.
    pub fn digits(&self) -> Result<i32, TotpError> {
        let digits = self.source.property_or(&TOTP_DIGITS, DEFAULT_DIGITS)?;
        Ok(TOTP_DIGITS.check_range(digits, MIN_DIGITS..=MAX_DIGITS, DIGITS_MESSAGE)?)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if the value is not a positive integer.
    pub fn period(&self) -> Result<i32, TotpError> {
        let period = self.source.property_or(&TOTP_PERIOD, DEFAULT_PERIOD)?;
        Ok(TOTP_PERIOD.check_range(period, 1..=i32::MAX, "must be a positive number of seconds")?)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if the value is not one of the supported symbols.
    pub fn mode(&self) -> Result<TotpMode, TotpError> {
        Ok(self.source.property_or(&TOTP_MODE, TotpMode::default())?)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if any entry is not an address or subnet.
    pub fn bypass_hosts(&self) -> Result<Vec<NetworkRange>, TotpError> {
        Ok(self.source.property_list_or(&TOTP_BYPASS_HOSTS, Vec::new())?)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if any entry is not an address or subnet.
    pub fn enforce_hosts(&self) -> Result<Vec<NetworkRange>, TotpError> {
        Ok(self.source.property_list_or(&TOTP_ENFORCE_HOSTS, Vec::new())?)
    }

    /// Resolves every tunable of the code generator.
    ///
    /// # Errors
    /// The first invalid property, in declaration order.
    pub fn settings(&self) -> Result<TotpSettings, TotpError> {
        let settings = TotpSettings {
            issuer: self.issuer()?,
            digits: self.digits()?,
            period: self.period()?,
            mode: self.mode()?,
        };
        debug!(
            issuer = %settings.issuer,
            digits = settings.digits,
            period = settings.period,
            mode = %settings.mode,
            "Resolved TOTP settings"
        );
        Ok(settings)
    }

    /// # Errors
    /// Returns [`TotpError::Property`] if either host list is malformed.
    pub fn host_policy(&self) -> Result<HostPolicy, TotpError> {
        Ok(HostPolicy::new(self.bypass_hosts()?, self.enforce_hosts()?))
    }

    /// Returns whether a user logging in from `address` must enter a code.
    ///
    /// # Errors
    /// Returns [`TotpError::Property`] if either host list is malformed.
    pub fn requires_second_factor(&self, address: IpAddr) -> Result<bool, TotpError> {
        self.host_policy()
            .map(|policy| policy.requires_second_factor(address))
            .context("Failed to evaluate TOTP host policy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let source = source(&[]);
        let config = TotpConfig::new(&source);
        assert_eq!(config.settings().unwrap(), TotpSettings::default());
        assert_eq!(config.host_policy().unwrap(), HostPolicy::default());
    }

    #[test]
    fn digits_accept_six_through_eight() {
        for digits in ["6", "7", "8"] {
            let source = source(&[("totp-digits", digits)]);
            assert_eq!(TotpConfig::new(&source).digits().unwrap().to_string(), digits);
        }
    }

    #[test]
    fn digits_outside_range_are_rejected() {
        for digits in ["5", "9"] {
            let source = source(&[("totp-digits", digits)]);
            let err = TotpConfig::new(&source).digits().unwrap_err();
            assert!(err.to_string().contains(DIGITS_MESSAGE), "{err}");
            assert!(matches!(
                err,
                TotpError::Property { source: PropertyError::Invalid { name: "totp-digits", .. }, .. }
            ));
        }
    }

    #[test]
    fn non_positive_periods_are_rejected() {
        let source = source(&[("totp-period", "0")]);
        assert!(TotpConfig::new(&source).period().is_err());
    }

    #[test]
    fn invalid_mode_is_an_error_not_a_default() {
        let source = source(&[("totp-mode", "md5")]);
        assert!(TotpConfig::new(&source).settings().is_err());
    }

    #[test]
    fn requires_second_factor_follows_bypass_list() {
        let source = source(&[("totp-bypass-hosts", "10.0.0.0/8")]);
        let config = TotpConfig::new(&source);
        assert!(!config.requires_second_factor("10.4.4.4".parse().unwrap()).unwrap());
        assert!(config.requires_second_factor("172.16.0.1".parse().unwrap()).unwrap());
    }
}
