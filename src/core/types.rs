//! Domain types shared by the fetcher, the Rancher client and the scheduler.

use std::fmt;

use zeroize::Zeroizing;

use crate::core::constants::REGISTRY_USERNAME;

/// A registry hostname without scheme (e.g. `123.dkr.ecr.us-east-1.amazonaws.com`).
pub type RegistryHost = String;

/// A short-lived registry credential fetched from ECR.
///
/// Built fresh every cycle and dropped at the end of it; the password buffer
/// is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredential {
    pub host: RegistryHost,
    pub password: Zeroizing<String>,
}

impl RegistryCredential {
    pub fn new(host: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username paired with the password. ECR always issues tokens for `AWS`.
    pub fn username(&self) -> &'static str {
        REGISTRY_USERNAME
    }
}

impl fmt::Debug for RegistryCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredential")
            .field("host", &self.host)
            .field("username", &self.username())
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a successful cycle did to the Rancher credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No credential referenced the host; a new one was created.
    Created,
    /// An existing credential's password was replaced.
    Updated,
}
