//! Sales prediction web application.
//!
//! Serves the sales data views and the OLS prediction form behind a
//! session-based login. The fitted model is cached per session; see the
//! `sales_model` crate for the pipeline itself.

mod auth;
mod error;
mod handlers;
mod state;
mod views;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sales_web=info")),
        )
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config));

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    let app = Router::new()
        .route("/", get(handlers::home))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/sales", get(handlers::sales_data))
        .route("/summary", get(handlers::model_summary))
        .route("/predict", get(handlers::predict_page).post(handlers::predict))
        .layer(session_layer)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
