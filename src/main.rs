mod fal;
mod models;
mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use routes::{generate, index, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{fmt, EnvFilter};

use crate::fal::FalClient;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let api_key = match std::env::var("FAL_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            tracing::error!("API key not found. Set FAL_KEY in the environment or a .env file.");
            std::process::exit(1);
        }
    };
    tracing::info!("Using API key: {}...", &api_key[..std::cmp::min(6, api_key.len())]);

    let state = AppState {
        fal: Arc::new(FalClient::new(api_key)),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/api/generate", post(generate))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app).await.unwrap();
}
