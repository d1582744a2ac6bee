mod cli;

use crate::cli::CLI;
use anyhow::Context;
use burrow_core::Shortener;
use burrow_gateway::{App, AppState};
use burrow_registry::{Autosave, AutosaveSettings, Registry, RegistrySettings};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    burrow_telemetry::init(config.log_format)?;

    let registry = Arc::new(Registry::new(
        RegistrySettings::builder().ttl(config.ttl).build(),
    ));
    let restored = registry
        .restore_if_present(&config.snapshot_path)
        .context("refusing to start over an unusable snapshot")?;
    info!(records = restored, "registry ready");

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "starting gateway server");

    let autosave = Autosave::spawn(
        Arc::clone(&registry),
        AutosaveSettings::builder()
            .path(config.snapshot_path.clone())
            .interval(config.save_interval.unsigned_abs())
            .sweep_before_save(config.sweep_before_save)
            .build(),
    );

    let shortener: Arc<dyn Shortener> = registry.clone();
    let state = AppState::new(shortener, config.public_base_url);

    let served = axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("gateway stopped, saving registry");
    let saved = autosave.shutdown().await;
    match served {
        Ok(()) => saved.context("final snapshot failed"),
        Err(e) => {
            if let Err(e) = saved {
                error!(error = %e, "final snapshot failed");
            }
            Err(e).context("gateway server failed")
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
