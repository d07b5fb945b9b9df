//! AWS ECR credential fetcher.
//!
//! Calls `GetAuthorizationToken` and turns the first authorization entry
//! into a [`RegistryCredential`]. The SDK call sits behind
//! [`AuthorizationSource`] so the decoding rules can be exercised without AWS.

use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, trace};

use crate::core::config::Config;
use crate::core::types::RegistryCredential;
use crate::error::{EcrError, Result};

/// One entry of the `authorizationData` list returned by ECR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationEntry {
    /// Registry URL, usually with an `https://` prefix.
    pub proxy_endpoint: Option<String>,
    /// Base64 of `AWS:<password>`.
    pub authorization_token: Option<String>,
}

/// Source of ECR authorization data.
///
/// Implemented by [`EcrSource`] for the real service and by fakes in tests.
#[async_trait]
pub trait AuthorizationSource: Send + Sync {
    async fn authorization_data(&self) -> Result<Vec<AuthorizationEntry>>;
}

/// ECR client configured from the job's explicit AWS settings.
#[derive(Debug, Clone)]
pub struct EcrSource {
    client: aws_sdk_ecr::Client,
}

impl EcrSource {
    /// Build an ECR client from the region and static keys in `config`.
    ///
    /// The ambient AWS credential chain is not consulted.
    pub async fn from_config(config: &Config) -> Self {
        let credentials = aws_sdk_ecr::config::Credentials::new(
            config.aws_access_key_id.clone(),
            config.aws_secret_access_key.to_string(),
            None,
            None,
            "rancher-ecr-sync",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_ecr::config::Region::new(config.aws_region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self {
            client: aws_sdk_ecr::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl AuthorizationSource for EcrSource {
    async fn authorization_data(&self) -> Result<Vec<AuthorizationEntry>> {
        trace!("requesting ECR authorization token");

        let output = self
            .client
            .get_authorization_token()
            .send()
            .await
            .map_err(|e| {
                EcrError::Request(aws_sdk_ecr::error::DisplayErrorContext(&e).to_string())
            })?;

        Ok(output
            .authorization_data()
            .iter()
            .map(|data| AuthorizationEntry {
                proxy_endpoint: data.proxy_endpoint().map(str::to_string),
                authorization_token: data.authorization_token().map(str::to_string),
            })
            .collect())
    }
}

/// Fetch the current registry credential from `source`.
///
/// # Arguments
///
/// * `source` - Where the authorization entries come from
///
/// # Errors
///
/// Returns `EcrError::Request` if the provider call fails, or any error
/// from [`credential_from_entries`].
pub async fn fetch_credential<S>(source: &S) -> Result<RegistryCredential>
where
    S: AuthorizationSource + ?Sized,
{
    let entries = source.authorization_data().await?;
    let credential = credential_from_entries(&entries)?;
    debug!(host = %credential.host, "fetched ECR credential");
    Ok(credential)
}

/// Build a credential from the first authorization entry.
///
/// # Errors
///
/// Returns `EcrError::NoAuthorizationData` for an empty list,
/// `EcrError::MissingField` if the first entry lacks its endpoint or token,
/// and `EcrError::InvalidToken` if the token does not decode.
pub fn credential_from_entries(entries: &[AuthorizationEntry]) -> Result<RegistryCredential> {
    let entry = entries.first().ok_or(EcrError::NoAuthorizationData)?;

    let endpoint = entry
        .proxy_endpoint
        .as_deref()
        .ok_or(EcrError::MissingField("proxyEndpoint"))?;
    let token = entry
        .authorization_token
        .as_deref()
        .ok_or(EcrError::MissingField("authorizationToken"))?;

    let password = decode_password(token)?;
    Ok(RegistryCredential::new(strip_scheme(endpoint), password))
}

/// Remove everything up to and including the first `//`.
///
/// `https://123.dkr.ecr.us-east-1.amazonaws.com` becomes
/// `123.dkr.ecr.us-east-1.amazonaws.com`; a bare host is returned as is.
pub fn strip_scheme(endpoint: &str) -> &str {
    match endpoint.split_once("//") {
        Some((_, rest)) => rest,
        None => endpoint,
    }
}

/// Decode a base64 `username:password` token and return the password.
///
/// The password is everything after the first colon, so passwords that
/// themselves contain colons survive intact.
///
/// # Errors
///
/// Returns `EcrError::InvalidToken` if the token is not base64, not UTF-8,
/// or has no `:` separator.
pub fn decode_password(token: &str) -> Result<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(token.trim())
        .map_err(|e| EcrError::InvalidToken(format!("invalid base64: {}", e)))?;

    let decoded = String::from_utf8(bytes)
        .map_err(|e| EcrError::InvalidToken(format!("UTF-8 error: {}", e)))?;

    match decoded.split_once(':') {
        Some((_, password)) => Ok(password.to_string()),
        None => Err(EcrError::InvalidToken("missing ':' separator".into()).into()),
    }
}
