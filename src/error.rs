//! Error types for rancher-ecr-sync.
//!
//! Each concern gets its own enum; [`Error`] wraps them so the whole
//! pipeline can use `?` and the scheduler can log any failure uniformly.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ecr(#[from] EcrError),

    #[error(transparent)]
    Rancher(#[from] RancherError),
}

/// Startup configuration errors. Always fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} env variable not present")]
    MissingVar(&'static str),
}

/// Errors from the ECR authorization call and token decoding.
#[derive(Error, Debug)]
pub enum EcrError {
    #[error("ECR authorization request failed: {0}")]
    Request(String),

    #[error("ECR returned no authorization data")]
    NoAuthorizationData,

    #[error("ECR authorization data is missing {0}")]
    MissingField(&'static str),

    #[error("invalid ECR authorization token: {0}")]
    InvalidToken(String),
}

/// Errors talking to the Rancher API.
#[derive(Error, Debug)]
pub enum RancherError {
    #[error("rancher request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to {action} (status {status})")]
    UnexpectedStatus {
        action: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("malformed response while trying to {action}: {reason}")]
    MalformedResponse {
        action: &'static str,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
