//! Job configuration.
//!
//! Everything the job needs is read once at startup into an immutable
//! [`Config`] that components borrow when they are constructed.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::core::constants::*;
use crate::core::dotenv;
use crate::error::{ConfigError, Result};

/// Sleep intervals between reconcile cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Delay after a failed cycle.
    pub retry: Duration,
    /// Delay after a successful cycle.
    pub refresh: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            retry: RETRY_INTERVAL,
            refresh: REFRESH_INTERVAL,
        }
    }
}

/// Immutable job configuration.
#[derive(Clone)]
pub struct Config {
    pub aws_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: Zeroizing<String>,
    pub rancher_access_key: String,
    pub rancher_secret_key: Zeroizing<String>,
    /// Base URL without a trailing slash.
    pub rancher_url: String,
    pub rancher_project: String,
    pub schedule: Schedule,
}

impl Config {
    /// Load configuration from the process environment, falling back to a
    /// `.env` file in the working directory for unset variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` naming the first required variable
    /// that is unset or empty.
    pub fn from_env() -> Result<Self> {
        let file = dotenv::read(Path::new(ENV_FILE));
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| file.get(name).cloned())
        })
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Required variables are checked in a fixed order and the first absent
    /// one is reported. Empty values count as absent.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, or `None` if unset
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` naming the first required variable
    /// that is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name).into())
        };

        let aws_region = required(ENV_AWS_REGION)?;
        let aws_access_key_id = required(ENV_AWS_ACCESS_KEY_ID)?;
        let aws_secret_access_key = Zeroizing::new(required(ENV_AWS_SECRET_ACCESS_KEY)?);
        let rancher_access_key = required(ENV_RANCHER_ACCESS_KEY)?;
        let rancher_secret_key = Zeroizing::new(required(ENV_RANCHER_SECRET_KEY)?);
        let rancher_url = required(ENV_RANCHER_URL)?.trim_end_matches('/').to_string();

        let rancher_project = lookup(ENV_RANCHER_PROJECT)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());

        Ok(Self {
            aws_region,
            aws_access_key_id,
            aws_secret_access_key,
            rancher_access_key,
            rancher_secret_key,
            rancher_url,
            rancher_project,
            schedule: Schedule::default(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("aws_region", &self.aws_region)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &"<redacted>")
            .field("rancher_access_key", &self.rancher_access_key)
            .field("rancher_secret_key", &"<redacted>")
            .field("rancher_url", &self.rancher_url)
            .field("rancher_project", &self.rancher_project)
            .field("schedule", &self.schedule)
            .finish()
    }
}
