mod config;
mod errors;
mod export;
mod fonts;
mod layout;
mod models;
mod roster;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MockStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roster API v{}", env!("CARGO_PKG_VERSION"));

    // The font is read lazily on the first export; only check that it is there.
    if tokio::fs::metadata(&config.font_path).await.is_err() {
        warn!(
            "Font file {} not found; PDF export will fail until it exists",
            config.font_path.display()
        );
    }

    let store = MockStore::seeded();
    info!(
        "Mock store seeded ({} departments, {} employees)",
        store.departments.len(),
        store.employees.len()
    );

    let state = AppState::new(&config, store.into_shared());
    info!(
        "PDF layout: {}x{}pt, {} rows per page",
        state.layout.page_width,
        state.layout.page_height,
        state.layout.rows_per_page()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
