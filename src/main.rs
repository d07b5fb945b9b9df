//! rancher-ecr-sync - rotates a Rancher project's ECR registry credential.

use std::io::IsTerminal;

use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rancher_ecr_sync::core::constants::ENV_LOG;
use rancher_ecr_sync::core::ecr::EcrSource;
use rancher_ecr_sync::{Config, Reconciler, Scheduler, TokioSleeper};

fn main() {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new("rancher_ecr_sync=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(ChronoLocal::rfc_3339())
                .with_ansi(std::io::stdout().is_terminal()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Everything after startup runs sequentially on one thread.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        info!(
            project = %config.rancher_project,
            rancher = %config.rancher_url,
            region = %config.aws_region,
            "starting rancher-ecr-sync"
        );

        let source = EcrSource::from_config(&config).await;
        let reconciler = match Reconciler::new(&config, source) {
            Ok(reconciler) => reconciler,
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        };

        Scheduler::new(reconciler, TokioSleeper, config.schedule)
            .run()
            .await;
    });
}
