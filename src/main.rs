mod catalog;
mod config;
mod creation;
mod error;
mod filter;
mod models;
mod routes;
mod store;
mod templates;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::Gateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: Gateway,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/movies/add-form", get(routes::add_form).post(routes::add_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,mongodb=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let gateway = store::connect(&config.mongodb_uri, &config.database).await;
    if !gateway.is_connected() {
        tracing::warn!("serving without a database; every request will report it");
    }

    let state = Arc::new(AppState { config: config.clone(), gateway });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, variant = ?config.variant, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
