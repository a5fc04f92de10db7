//! # storefront
//!
//! Axum host that server-renders the Leptos storefront and serves its
//! hydration bundle.

#![recursion_limit = "256"]

mod config;
mod error;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::error::HostError;

#[tokio::main]
async fn main() {
    // `.env` is optional.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "storefront failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HostError> {
    let config = HostConfig::from_env()?;
    let app = routes::app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| HostError::Bind { addr: config.addr, source })?;

    let addr = config.addr;
    tracing::info!(%addr, site_root = %config.site_root, "storefront listening");
    axum::serve(listener, app).await.map_err(HostError::Serve)
}
