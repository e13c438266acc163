// Team Doodle - Web Server

use anyhow::{Context, Result};
use team_doodle::server::{build_router, AppState};
use team_doodle::Config;

#[tokio::main]
async fn main() -> Result<()> {
    team_doodle::init_tracing();

    let config = Config::from_env();
    let directory = config.load_directory()?;
    tracing::info!(teams = directory.len(), "team directory ready");

    let state = AppState::from_config(&config, directory);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, public_url = %config.public_url, "server running");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
