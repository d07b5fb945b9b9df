//! Wire schemas for the Rancher endpoints the job touches.
//!
//! Only the fields the job reads are declared; everything else in Rancher's
//! responses is ignored. Collections are decoded loosely and only the
//! selected element is checked against its schema, so an odd record the job
//! never touches cannot fail a cycle. Registry entries keep unknown fields so
//! a mapping can be sent back without losing anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::constants::{CREDENTIAL_NAME, CREDENTIAL_TYPE, TEMP_NAMESPACE};
use crate::core::types::{RegistryCredential, RegistryHost};

/// Host → entry mapping stored on a Rancher docker credential.
pub type Registries = BTreeMap<RegistryHost, RegistryEntry>;

/// Envelope of every Rancher collection response.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    pub docker_credentials: String,
}

/// A stored registry credential object.
#[derive(Debug, Clone, Deserialize)]
pub struct DockerCredential {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub registries: Registries,
    #[serde(default)]
    pub links: CredentialLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialLinks {
    #[serde(default)]
    pub update: Option<String>,
}

/// Credentials for one registry host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistryEntry {
    pub fn from_credential(credential: &RegistryCredential) -> Self {
        Self {
            username: Some(credential.username().to_string()),
            password: Some(credential.password.to_string()),
            extra: Map::new(),
        }
    }
}

/// A located credential record: where to send updates and what it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryRecord {
    pub update_url: String,
    pub registries: Registries,
}

impl RegistryRecord {
    /// Copy of this record's mapping with the credential's password applied.
    ///
    /// Other hosts are left untouched. If the host entry is somehow absent it
    /// is added with the fixed username.
    pub fn with_password(&self, credential: &RegistryCredential) -> Registries {
        let mut registries = self.registries.clone();
        registries
            .entry(credential.host.clone())
            .and_modify(|entry| entry.password = Some(credential.password.to_string()))
            .or_insert_with(|| RegistryEntry::from_credential(credential));
        registries
    }
}

/// Body of the create (POST) request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDockerCredential {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub namespace_id: String,
    pub registries: Registries,
}

impl NewDockerCredential {
    /// A credential holding exactly one entry, for the fetched host.
    pub fn for_credential(credential: &RegistryCredential) -> Self {
        let mut registries = Registries::new();
        registries.insert(
            credential.host.clone(),
            RegistryEntry::from_credential(credential),
        );

        Self {
            name: CREDENTIAL_NAME.to_string(),
            kind: CREDENTIAL_TYPE.to_string(),
            namespace_id: TEMP_NAMESPACE.to_string(),
            registries,
        }
    }
}

/// Body of the update (PUT) request.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryUpdate {
    pub registries: Registries,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Registries, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Registries>::deserialize(deserializer)?.unwrap_or_default())
}
