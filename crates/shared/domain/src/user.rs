use std::net::IpAddr;

/// Username the gateway assigns to unauthenticated sessions.
pub const ANONYMOUS_USERNAME: &str = "anonymous";

/// A user who passed primary authentication, as seen by second-factor providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    /// The single, already-resolved client address of the login attempt.
    pub remote_address: IpAddr,
}

impl AuthenticatedUser {
    pub fn new(username: impl Into<String>, remote_address: IpAddr) -> Self {
        Self { username: username.into(), remote_address }
    }

    /// Anonymous sessions never have a second factor to satisfy.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() || self.username == ANONYMOUS_USERNAME
    }
}
