use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fintan_gateway::repository::fs_repository;
use fintan_gateway::service::{PipelineRegistry, ProcessDispatcher};
use fintan_gateway::{AppState, Config, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintan_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fintan Gateway...");

    let config = Config::parse();
    config.validate()?;

    for dir in [&config.pipelines_dir, &config.data_dir, &config.uploads_dir] {
        fs_repository::ensure_dir(dir)
            .await
            .with_context(|| format!("Failed to prepare directory {}", dir.display()))?;
    }

    let registry = PipelineRegistry::load(&config.pipelines_dir)
        .context("Failed to load pipeline registry")?;

    let command = config
        .backend_command()
        .context("Failed to resolve backend command")?;
    tracing::info!(
        "Backend: {} {:?} (cwd: {})",
        command.program.display(),
        command.args,
        config.working_dir().display()
    );
    if config.strict_exit_status {
        tracing::info!("Strict exit status enabled: failing runs answer 502");
    }

    let dispatcher = ProcessDispatcher::new(command, config.working_dir());
    let addr = config.bind_addr.clone();

    // Build router with all API endpoints
    let app = create_router(AppState::new(config, registry, Arc::new(dispatcher)));

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
