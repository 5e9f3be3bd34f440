mod analytics;
mod config;
mod domain;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::domain::normalizer::ItemNormalizer;
use crate::services::advisor::OpenAiAdvisor;
use crate::state::SharedState;
use axum::{routing::get_service, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, services::ServeFile, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;

    if config.advisor.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, AI advice will be reported as unavailable");
    }
    tracing::info!(
        "Suggestion policy: {}, advisor model: {}, timeout: {}s",
        config.suggestion_policy.name,
        config.advisor.model,
        config.advisor.timeout.as_secs()
    );

    let shared: SharedState = Arc::new(state::AppState {
        normalizer: Arc::new(ItemNormalizer::new(config.suggestion_policy)),
        thresholds: config.thresholds,
        advisor: Arc::new(OpenAiAdvisor::new(config.advisor.clone())),
    });

    let static_dir = Path::new(&config.static_dir);
    let static_handler =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    let app = Router::new()
        .merge(web::routes(shared))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback_service(get_service(static_handler))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
