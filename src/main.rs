// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::script_loader::SdkScriptService;
use crate::infrastructure::catalog::{load_bundled_catalog, load_site_content};
use crate::infrastructure::config::load_site_config;
use crate::infrastructure::provider_http::{build_client, HttpScriptLoader, RemoteVizFactory};
use crate::infrastructure::templates::build_environment;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_site_config().context("Failed to load site configuration")?;

    // Static content (infrastructure layer)
    let registry = load_bundled_catalog()?;
    let site = load_site_content()?;
    let templates = build_environment().context("Failed to compile templates")?;
    tracing::info!("Loaded {} dashboards", registry.len());

    // Provider adapters
    let client = build_client(config.embed.probe_timeout())?;
    let sdk = Arc::new(SdkScriptService::new(
        Arc::new(HttpScriptLoader::new(client.clone())),
        config.embed.sdk_script_url.clone(),
    ));
    let viz_factory = Arc::new(RemoteVizFactory::new(client));

    // Create application state
    let state = Arc::new(AppState::new(
        registry,
        site,
        templates,
        sdk,
        viz_factory,
        config.embed.timings(),
    ));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting portfolio site on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
