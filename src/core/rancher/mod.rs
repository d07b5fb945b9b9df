//! Rancher API client.
//!
//! Covers the four calls the job needs: list projects, list a project's
//! docker credentials, create one, and update one. Every request carries
//! the same Basic auth header derived from the Rancher key pair.

pub mod types;

use base64::Engine;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::core::config::Config;
use crate::core::constants::HTTP_TIMEOUT;
use crate::core::types::RegistryCredential;
use crate::error::{RancherError, Result};

pub use types::{
    Collection, DockerCredential, NewDockerCredential, Project, RegistryEntry, RegistryRecord,
    RegistryUpdate, Registries,
};

const FETCH_PROJECTS: &str = "fetch projects from rancher";
const FETCH_CREDENTIALS: &str = "fetch docker credentials from rancher";
const CREATE_CREDENTIAL: &str = "create registry on rancher";
const UPDATE_CREDENTIAL: &str = "update registry on rancher";

/// Client for a single Rancher endpoint.
#[derive(Clone)]
pub struct RancherClient {
    base_url: String,
    auth_header: String,
    client: reqwest::Client,
}

impl RancherClient {
    /// Create a client for the URL and key pair in `config`.
    ///
    /// # Errors
    ///
    /// Returns `RancherError::Http` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(RancherError::from)?;

        Ok(Self {
            base_url: config.rancher_url.clone(),
            auth_header: basic_auth(&config.rancher_access_key, &config.rancher_secret_key),
            client,
        })
    }

    /// Find the first project whose name matches exactly.
    ///
    /// Only the matching project has to carry a `dockerCredentials` link;
    /// the rest of the list is not inspected beyond its `name`.
    ///
    /// # Arguments
    ///
    /// * `name` - Project name, compared case-sensitively
    ///
    /// # Errors
    ///
    /// Returns `RancherError::UnexpectedStatus` for a non-2xx response,
    /// `RancherError::ProjectNotFound` if no project has that name, and
    /// `RancherError::MalformedResponse` if the body or the matching project
    /// does not decode.
    pub async fn resolve_project(&self, name: &str) -> Result<Project> {
        let url = format!("{}/projects", self.base_url);
        let projects: Collection<Value> = self.get_json(&url, FETCH_PROJECTS).await?;

        let project = projects
            .data
            .into_iter()
            .find(|project| project.get("name").and_then(Value::as_str) == Some(name))
            .ok_or_else(|| RancherError::ProjectNotFound(name.to_string()))?;

        decode(project, FETCH_PROJECTS)
    }

    /// Find the first credential in `project` that references `host`.
    ///
    /// `Ok(None)` means the project has no credential for the host yet.
    /// Records that do not reference `host` are skipped without being
    /// decoded.
    ///
    /// # Arguments
    ///
    /// * `project` - Project whose credential collection is searched
    /// * `host` - Registry host to look for
    ///
    /// # Errors
    ///
    /// Returns `RancherError::UnexpectedStatus` for a non-2xx response and
    /// `RancherError::MalformedResponse` if the body does not decode or the
    /// matching record lacks an update link.
    pub async fn find_registry(
        &self,
        project: &Project,
        host: &str,
    ) -> Result<Option<RegistryRecord>> {
        let credentials: Collection<Value> = self
            .get_json(&project.links.docker_credentials, FETCH_CREDENTIALS)
            .await?;

        let Some(record) = credentials.data.into_iter().find(|record| {
            record
                .get("registries")
                .and_then(Value::as_object)
                .is_some_and(|registries| registries.contains_key(host))
        }) else {
            return Ok(None);
        };

        let record: DockerCredential = decode(record, FETCH_CREDENTIALS)?;

        let update_url = record
            .links
            .update
            .ok_or_else(|| RancherError::MalformedResponse {
                action: FETCH_CREDENTIALS,
                reason: format!("credential for {} has no update link", host),
            })?;

        Ok(Some(RegistryRecord {
            update_url,
            registries: record.registries,
        }))
    }

    /// Create a new credential in `project` holding only `credential`.
    ///
    /// # Errors
    ///
    /// Returns `RancherError::Http` on transport failure and
    /// `RancherError::UnexpectedStatus` for anything but `201 Created`.
    pub async fn create_registry(
        &self,
        project: &Project,
        credential: &RegistryCredential,
    ) -> Result<()> {
        let body = NewDockerCredential::for_credential(credential);
        self.send_json(
            Method::POST,
            &project.links.docker_credentials,
            &body,
            StatusCode::CREATED,
            CREATE_CREDENTIAL,
        )
        .await
    }

    /// Replace the password for `credential.host` on an existing record.
    ///
    /// The record is not modified; a copy of its mapping is sent.
    ///
    /// # Errors
    ///
    /// Returns `RancherError::Http` on transport failure and
    /// `RancherError::UnexpectedStatus` for anything but `200 OK`.
    pub async fn update_registry(
        &self,
        record: &RegistryRecord,
        credential: &RegistryCredential,
    ) -> Result<()> {
        let body = RegistryUpdate {
            registries: record.with_password(credential),
        };
        self.send_json(
            Method::PUT,
            &record.update_url,
            &body,
            StatusCode::OK,
            UPDATE_CREDENTIAL,
        )
        .await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, action: &'static str) -> Result<T> {
        debug!(%url, "GET");
        let response = self.request(Method::GET, url).send().await.map_err(RancherError::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RancherError::UnexpectedStatus { action, status }.into());
        }
        let body = response.text().await.map_err(RancherError::from)?;

        serde_json::from_str(&body).map_err(|e| {
            RancherError::MalformedResponse {
                action,
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        expected: StatusCode,
        action: &'static str,
    ) -> Result<()> {
        debug!(%method, %url, "sending");
        let response = self
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(RancherError::from)?;
        expect_status(&response, expected, action)
    }
}

impl std::fmt::Debug for RancherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RancherClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(value: Value, action: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        RancherError::MalformedResponse {
            action,
            reason: e.to_string(),
        }
        .into()
    })
}

fn expect_status(response: &Response, expected: StatusCode, action: &'static str) -> Result<()> {
    let status = response.status();
    if status != expected {
        return Err(RancherError::UnexpectedStatus { action, status }.into());
    }
    Ok(())
}

/// `Basic base64(access:secret)` header value.
pub fn basic_auth(access_key: &str, secret_key: &str) -> String {
    let token =
        base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", access_key, secret_key));
    format!("Basic {}", token)
}
