use crate::domain::catalog::{catalog, ExerciseCatalog};
use axum::{routing::get, Json, Router};

pub fn router() -> Router {
    Router::new().route("/api/exercises", get(list_exercises))
}

async fn list_exercises() -> Json<ExerciseCatalog> {
    Json(catalog())
}
