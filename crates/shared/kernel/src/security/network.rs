//! # Host Policy
//!
//! Decides whether a login attempt must complete a second factor, based on the requester's
//! address and two independently configured lists of [`NetworkRange`]s:
//!
//! * **bypass**: requesters matching an entry skip the second factor, everyone else gets it.
//! * **enforce**: requesters matching an entry get the second factor, everyone else skips it.
//! * **neither configured**: everyone gets the second factor.
//!
//! Deployments are expected to configure at most one list. When both are populated the
//! decision stays conservative (see [`HostPolicy::requires_second_factor`]) and
//! [`HostPolicy::warnings`] reports the ambiguity.

use ipnetwork::{IpNetwork, IpNetworkError};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::trace;

/// A single IP address or a CIDR subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange(IpNetwork);

impl NetworkRange {
    /// Returns `true` if `address` equals this range's single address or lies in its subnet.
    ///
    /// IPv4 ranges never contain IPv6 addresses and vice versa.
    #[must_use]
    pub fn contains(&self, address: IpAddr) -> bool {
        self.0.contains(address)
    }

    /// Returns `true` if this range is a single address rather than a subnet.
    #[must_use]
    pub fn is_single_address(&self) -> bool {
        match self.0 {
            IpNetwork::V4(net) => net.prefix() == 32,
            IpNetwork::V6(net) => net.prefix() == 128,
        }
    }

    #[must_use]
    pub const fn network(&self) -> IpNetwork {
        self.0
    }
}

impl FromStr for NetworkRange {
    type Err = IpNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpNetwork::from_str(s).map(Self)
    }
}

impl From<IpAddr> for NetworkRange {
    fn from(address: IpAddr) -> Self {
        Self(IpNetwork::from(address))
    }
}

impl From<IpNetwork> for NetworkRange {
    fn from(network: IpNetwork) -> Self {
        Self(network)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_address() { write!(f, "{}", self.0.ip()) } else { write!(f, "{}", self.0) }
    }
}

/// Something worth telling the operator about a policy, without rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyWarning {
    /// Both lists are populated; their interaction is not a supported deployment.
    BothListsPopulated { bypass: usize, enforce: usize },
}

impl fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothListsPopulated { bypass, enforce } => write!(
                f,
                "both bypass ({bypass} entries) and enforce ({enforce} entries) host lists are \
                 set; configure only one of them"
            ),
        }
    }
}

/// The bypass and enforce host lists of one authentication module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPolicy {
    bypass: Vec<NetworkRange>,
    enforce: Vec<NetworkRange>,
}

impl HostPolicy {
    #[must_use]
    pub const fn new(bypass: Vec<NetworkRange>, enforce: Vec<NetworkRange>) -> Self {
        Self { bypass, enforce }
    }

    #[must_use]
    pub fn bypass(&self) -> &[NetworkRange] {
        &self.bypass
    }

    #[must_use]
    pub fn enforce(&self) -> &[NetworkRange] {
        &self.enforce
    }

    /// Decides whether a requester at `address` must complete a second factor.
    ///
    /// With a single list configured, the list's documented meaning applies; with none, the
    /// answer is always `true`. With both configured:
    /// 1. a match in `enforce` requires the second factor,
    /// 2. otherwise a match in `bypass` skips it,
    /// 3. otherwise it is required.
    #[must_use]
    pub fn requires_second_factor(&self, address: IpAddr) -> bool {
        let required = if Self::matches(&self.enforce, address) {
            true
        } else if Self::matches(&self.bypass, address) {
            false
        } else {
            self.enforce.is_empty() || !self.bypass.is_empty()
        };

        trace!(%address, required, "Evaluated second-factor host policy");
        required
    }

    /// Returns the configuration problems of this policy; empty for a well-formed one.
    #[must_use]
    pub fn warnings(&self) -> Vec<PolicyWarning> {
        let mut warnings = Vec::new();
        if !self.bypass.is_empty() && !self.enforce.is_empty() {
            warnings.push(PolicyWarning::BothListsPopulated {
                bypass: self.bypass.len(),
                enforce: self.enforce.len(),
            });
        }
        warnings
    }

    fn matches(ranges: &[NetworkRange], address: IpAddr) -> bool {
        ranges.iter().any(|range| range.contains(address))
    }
}
