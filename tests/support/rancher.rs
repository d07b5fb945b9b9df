//! Mock Rancher server helpers.

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{json, Value};

use super::fixtures::auth_header;

/// Path of the fixture project's docker credential collection.
pub const CREDENTIALS_PATH: &str = "/projects/1a5/dockercredentials";

/// Path of the fixture credential's update link.
pub const UPDATE_PATH: &str = "/projects/1a5/dockercredentials/1c3";

/// A mock Rancher API.
pub struct MockRancher {
    pub server: ServerGuard,
}

impl MockRancher {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    pub fn credentials_url(&self) -> String {
        format!("{}{}", self.url(), CREDENTIALS_PATH)
    }

    pub fn update_url(&self) -> String {
        format!("{}{}", self.url(), UPDATE_PATH)
    }

    /// Project JSON whose credential link points at this server.
    pub fn project(&self, name: &str) -> Value {
        json!({
            "id": "1a5",
            "type": "project",
            "name": name,
            "links": {
                "self": format!("{}/projects/1a5", self.url()),
                "dockerCredentials": self.credentials_url(),
            }
        })
    }

    /// Credential record JSON whose update link points at this server.
    pub fn credential(&self, registries: Value) -> Value {
        json!({
            "id": "1c3",
            "type": "dockerCredential",
            "name": "ecr-registry",
            "registries": registries,
            "links": {
                "self": self.update_url(),
                "update": self.update_url(),
            }
        })
    }

    /// `GET /projects` answering with `projects`.
    pub async fn projects(&mut self, projects: Vec<Value>) -> Mock {
        self.server
            .mock("GET", "/projects")
            .match_header("authorization", auth_header().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "type": "collection", "data": projects }).to_string())
            .create_async()
            .await
    }

    /// `GET` on the credential collection answering with `records`.
    pub async fn credentials(&mut self, records: Vec<Value>) -> Mock {
        self.server
            .mock("GET", CREDENTIALS_PATH)
            .match_header("authorization", auth_header().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "type": "collection", "data": records }).to_string())
            .create_async()
            .await
    }

    /// `POST` on the credential collection expecting exactly `body`.
    pub async fn create(&mut self, body: Value, status: usize) -> Mock {
        self.server
            .mock("POST", CREDENTIALS_PATH)
            .match_header("authorization", auth_header().as_str())
            .match_body(Matcher::Json(body))
            .with_status(status)
            .with_body("{}")
            .create_async()
            .await
    }

    /// `PUT` on the update link expecting exactly `body`.
    pub async fn update(&mut self, body: Value, status: usize) -> Mock {
        self.server
            .mock("PUT", UPDATE_PATH)
            .match_header("authorization", auth_header().as_str())
            .match_body(Matcher::Json(body))
            .with_status(status)
            .with_body("{}")
            .create_async()
            .await
    }

    /// A mock that must never be hit.
    pub async fn forbid(&mut self, method: &str, path: &str) -> Mock {
        self.server
            .mock(method, path)
            .expect(0)
            .create_async()
            .await
    }
}
