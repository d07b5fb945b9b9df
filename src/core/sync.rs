//! One reconcile pass: fetch the ECR credential and push it into Rancher.

use async_trait::async_trait;
use tracing::info;

use crate::core::config::Config;
use crate::core::ecr::{self, AuthorizationSource};
use crate::core::rancher::RancherClient;
use crate::core::types::SyncOutcome;
use crate::error::Result;

/// A unit of work the scheduler runs each cycle.
#[async_trait]
pub trait Reconcile: Send + Sync {
    async fn reconcile(&self) -> Result<SyncOutcome>;
}

/// Keeps one Rancher project's ECR credential in step with ECR.
#[derive(Debug)]
pub struct Reconciler<S> {
    source: S,
    rancher: RancherClient,
    project: String,
}

impl<S: AuthorizationSource> Reconciler<S> {
    pub fn new(config: &Config, source: S) -> Result<Self> {
        Ok(Self {
            source,
            rancher: RancherClient::new(config)?,
            project: config.rancher_project.clone(),
        })
    }
}

#[async_trait]
impl<S: AuthorizationSource> Reconcile for Reconciler<S> {
    async fn reconcile(&self) -> Result<SyncOutcome> {
        let credential = ecr::fetch_credential(&self.source).await?;

        let project = self.rancher.resolve_project(&self.project).await?;

        match self.rancher.find_registry(&project, &credential.host).await? {
            Some(record) => {
                self.rancher.update_registry(&record, &credential).await?;
                info!(host = %credential.host, "registry password updated");
                Ok(SyncOutcome::Updated)
            }
            None => {
                self.rancher.create_registry(&project, &credential).await?;
                info!(host = %credential.host, "registry created with new password");
                Ok(SyncOutcome::Created)
            }
        }
    }
}
