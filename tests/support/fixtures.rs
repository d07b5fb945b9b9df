//! Test fixtures and constants.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;

use rancher_ecr_sync::core::ecr::{AuthorizationEntry, AuthorizationSource};
use rancher_ecr_sync::{Config, Result, Sleeper};

/// Registry host ECR reports in the fixtures.
pub const HOST: &str = "123.dkr.ecr.us-east-1.amazonaws.com";

/// Proxy endpoint as ECR returns it, scheme included.
pub const ENDPOINT: &str = "https://123.dkr.ecr.us-east-1.amazonaws.com";

/// Password inside the fixture token.
pub const PASSWORD: &str = "secret123";

pub const RANCHER_ACCESS_KEY: &str = "rancher-ak";
pub const RANCHER_SECRET_KEY: &str = "rancher-sk";

/// Base64 of `AWS:<password>`, the shape ECR uses.
pub fn ecr_token(password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("AWS:{}", password))
}

/// Expected Basic auth header for the fixture key pair.
pub fn auth_header() -> String {
    let raw = format!("{}:{}", RANCHER_ACCESS_KEY, RANCHER_SECRET_KEY);
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(raw)
    )
}

/// Config pointing at `rancher_url`, with an optional project override.
pub fn test_config(rancher_url: &str, project: Option<&str>) -> Config {
    let mut env: HashMap<&str, String> = HashMap::from([
        ("AWS_REGION", "us-east-1".to_string()),
        ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE".to_string()),
        ("AWS_SECRET_ACCESS_KEY", "aws-secret".to_string()),
        ("RANCHER_ACCESS_KEY", RANCHER_ACCESS_KEY.to_string()),
        ("RANCHER_SECRET_KEY", RANCHER_SECRET_KEY.to_string()),
        ("RANCHER_URL", rancher_url.to_string()),
    ]);
    if let Some(project) = project {
        env.insert("RANCHER_PROJECT", project.to_string());
    }

    Config::from_lookup(|name| env.get(name).cloned()).expect("fixture config is complete")
}

/// ECR source that returns canned entries and counts calls.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    entries: Vec<AuthorizationEntry>,
    pub calls: Arc<Mutex<usize>>,
}

impl StaticSource {
    pub fn new(endpoint: &str, password: &str) -> Self {
        Self {
            entries: vec![AuthorizationEntry {
                proxy_endpoint: Some(endpoint.to_string()),
                authorization_token: Some(ecr_token(password)),
            }],
            calls: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl AuthorizationSource for StaticSource {
    async fn authorization_data(&self) -> Result<Vec<AuthorizationEntry>> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.entries.clone())
    }
}

/// Sleeper that returns immediately and records every requested delay.
#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper {
    pub slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
