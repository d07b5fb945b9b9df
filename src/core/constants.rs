//! Constants used throughout rancher-ecr-sync.
//!
//! Centralizes environment variable names, wire-level literals and the
//! retry schedule.

use std::time::Duration;

/// AWS region of the ECR registry.
pub const ENV_AWS_REGION: &str = "AWS_REGION";

/// AWS access key id used for `GetAuthorizationToken`.
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// AWS secret access key.
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Rancher API access key (Basic auth user).
pub const ENV_RANCHER_ACCESS_KEY: &str = "RANCHER_ACCESS_KEY";

/// Rancher API secret key (Basic auth password).
pub const ENV_RANCHER_SECRET_KEY: &str = "RANCHER_SECRET_KEY";

/// Rancher API base URL, e.g. `https://rancher.example.com/v2-beta`.
pub const ENV_RANCHER_URL: &str = "RANCHER_URL";

/// Optional Rancher project name.
pub const ENV_RANCHER_PROJECT: &str = "RANCHER_PROJECT";

/// Log filter override (EnvFilter syntax).
pub const ENV_LOG: &str = "RANCHER_ECR_SYNC_LOG";

/// Project used when `RANCHER_PROJECT` is unset.
pub const DEFAULT_PROJECT: &str = "Default";

/// Dotenv file read from the working directory at startup.
pub const ENV_FILE: &str = ".env";

/// Username ECR expects alongside the temporary password.
pub const REGISTRY_USERNAME: &str = "AWS";

/// Name given to a newly created Rancher registry credential.
pub const CREDENTIAL_NAME: &str = "ecr-registry";

/// Rancher resource type of a registry credential.
pub const CREDENTIAL_TYPE: &str = "dockerCredential";

/// Placeholder namespace Rancher accepts for project-scoped credentials.
pub const TEMP_NAMESPACE: &str = "__TEMP__";

/// Delay before retrying after a failed cycle.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Delay before the next rotation after a successful cycle.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Per-request timeout for Rancher calls.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
