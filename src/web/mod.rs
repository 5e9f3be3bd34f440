pub mod exercises;
pub mod workouts;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(exercises::router())
        .nest("/api/workouts", workouts::router(state))
}
