//! # CampusBay Server
//!
//! Entry point: `serve` runs the HTTP API, `seed` and `clear` manage
//! development data.

use anyhow::Context;
use campusbay_config::{AppConfig, ConfigLoader};
use campusbay_repository::{create_pool, DatabasePoolInterface};
use campusbay_rest::create_router;
use campusbay_server::{
    cli::{Cli, Command},
    di::{build_app_module, AppContainer},
    startup::{init_logging, print_startup_info, shutdown_signal},
};
use campusbay_service::SeedService;
use clap::Parser;
use shaku::HasComponent;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::new(&cli.config_dir) {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    info!("Starting CampusBay {}...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli.command(), config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    let pool = create_pool(&config.database)
        .await
        .context("failed to open database")?;
    let container = build_app_module(&config, pool.clone()).context("failed to build module")?;

    let result = match command {
        Command::Serve => serve(&config, container).await,
        Command::Seed => {
            let seed: Arc<dyn SeedService> = container.module.resolve();
            let report = seed.seed().await.context("seeding failed")?;
            info!(users = report.users, items = report.items, "Sample data loaded");
            Ok(())
        }
        Command::Clear => {
            let seed: Arc<dyn SeedService> = container.module.resolve();
            let report = seed.clear().await.context("clearing failed")?;
            info!(?report, "All data cleared");
            Ok(())
        }
    };

    pool.close().await;
    result
}

async fn serve(config: &AppConfig, container: AppContainer) -> anyhow::Result<()> {
    let router = create_router(
        container.module.as_ref(),
        &config.server,
        container.health_checks,
    );

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    print_startup_info(config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}
