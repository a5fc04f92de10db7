//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host has no API of its own: the storefront talks to the remote REST
//! API directly from the browser. This router server-renders the Leptos app,
//! serves the hydration bundle under `/pkg`, and answers `/healthz`.

use std::path::{Path, PathBuf};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list, render_app_to_stream};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;
use crate::error::HostError;

/// Full application router.
///
/// # Errors
///
/// Returns `HostError::Leptos` if the Leptos configuration cannot be loaded.
pub fn app(config: &HostConfig) -> Result<Router, HostError> {
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    leptos_options.site_root = config.site_root.as_str().into();
    leptos_options.site_addr = config.addr;
    let routes = generate_route_list(client::app::App);

    // Unknown paths still render the app so its not-found page shows.
    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .fallback(render_app_to_stream({
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        }))
        .with_state(leptos_options);

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .nest_service("/pkg", ServeDir::new(pkg_dir(Path::new(&config.site_root))))
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

/// Location of the built WASM/JS/CSS bundle under the site root.
pub fn pkg_dir(site_root: &Path) -> PathBuf {
    site_root.join("pkg")
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
