use crate::analytics::training_metrics::calculate_training_metrics;
use crate::domain::models::{NormalizedItem, RawExerciseItem, SkippedEntry, TrainingMetrics};
use crate::domain::normalizer::validate_batch;
use crate::services::advisor::{advise, AdviceOutcome};
use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct AnalyzePayload {
    items: Vec<RawExerciseItem>,
    #[serde(default)]
    include_advice: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    items: Vec<NormalizedItem>,
    skipped: Vec<SkippedEntry>,
    metrics: TrainingMetrics,
    advice: Option<AdviceOutcome>,
    analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct SubmissionErrorResponse {
    error: String,
    items: Vec<NormalizedItem>,
    skipped: Vec<SkippedEntry>,
}

async fn analyze(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzePayload>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<SubmissionErrorResponse>)> {
    let batch = state.normalizer.normalize(&payload.items);
    tracing::info!(
        "Received {} items: {} normalized, {} skipped",
        payload.items.len(),
        batch.items.len(),
        batch.skipped.len()
    );

    if let Err(e) = validate_batch(&batch) {
        tracing::info!("Rejecting submission: {}", e);
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SubmissionErrorResponse {
                error: e.to_string(),
                items: batch.items,
                skipped: batch.skipped,
            }),
        ));
    }

    let metrics = calculate_training_metrics(&batch.items, &state.thresholds);

    let advice = if payload.include_advice {
        Some(advise(state.advisor.as_ref(), &batch.items, &metrics).await)
    } else {
        None
    };

    Ok(Json(AnalyzeResponse {
        items: batch.items,
        skipped: batch.skipped,
        metrics,
        advice,
        analyzed_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::analytics::training_metrics::AnalysisThresholds;
    use crate::domain::models::{NormalizedItem, TrainingMetrics};
    use crate::domain::normalizer::ItemNormalizer;
    use crate::domain::suggestion::SuggestionPolicy;
    use crate::services::advisor::{AdjustedItem, Advisor, AdvisorError, Recommendation};
    use crate::state::AppState;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubAdvisor {
        fail: bool,
    }

    #[async_trait]
    impl Advisor for StubAdvisor {
        async fn recommend(
            &self,
            items: &[NormalizedItem],
            _metrics: &TrainingMetrics,
        ) -> Result<Recommendation, AdvisorError> {
            if self.fail {
                return Err(AdvisorError::Timeout(30));
            }
            Ok(Recommendation {
                adjusted_items: items
                    .iter()
                    .map(|i| AdjustedItem {
                        category: i.category.clone(),
                        action: i.action.clone(),
                        aerobic: i.kind.is_aerobic(),
                        sets: None,
                        reps: None,
                        weight: None,
                        minutes: Some("20".to_string()),
                        rating: Some("6".to_string()),
                    })
                    .collect(),
                explanation: "Ease off.".to_string(),
            })
        }
    }

    fn app(fail: bool) -> axum::Router {
        let state = Arc::new(AppState {
            normalizer: Arc::new(ItemNormalizer::new(SuggestionPolicy::FOUR_TIER)),
            thresholds: AnalysisThresholds::default(),
            advisor: Arc::new(StubAdvisor { fail }),
        });
        crate::web::routes(state)
    }

    async fn post_analyze(fail: bool, body: Value) -> (StatusCode, Value) {
        let response = app(fail)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/workouts/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_analyze_returns_metrics() {
        let body = json!({
            "items": [
                {"category": "Aerobic", "action": "Treadmill", "minutes": "10", "rating": "8"},
                {"category": "Aerobic", "action": "Treadmill", "minutes": "10", "rating": "8"},
                {"category": "Lower-body power", "action": "other", "custom_action": "Bounding",
                 "sets": "3", "reps": "8", "minutes": "10", "rating": "8"},
                {"category": "", "action": "Treadmill", "minutes": "40"}
            ]
        });
        let (status, json) = post_analyze(false, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metrics"]["training_load"], 240.0);
        assert_eq!(json["metrics"]["weekly_workout_summary"], 80.0);
        assert_eq!(json["metrics"]["training_monotony"], 0.0);
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["items"][2]["action"], "Bounding");
        assert_eq!(json["items"][2]["sets"], 3);
        assert_eq!(json["skipped"][0]["index"], 4);
        assert_eq!(json["skipped"][0]["raw"]["minutes"], "40");
        assert!(json["advice"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_rejects_incomplete_submission() {
        let body = json!({ "items": [{"category": "Aerobic"}, {}] });
        let (status, json) = post_analyze(false, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "Please fill in at least one complete item.");
        assert_eq!(json["skipped"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_analyze_rejects_items_without_load() {
        let body = json!({
            "items": [{"category": "Aerobic", "action": "Swimming", "minutes": "30", "rating": "11"}]
        });
        let (status, json) = post_analyze(false, body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json["error"],
            "Please enter minutes and an RPE rating for at least one item."
        );
        assert_eq!(json["items"][0]["suggestion"], "RPE must be between 1 and 10");
    }

    #[tokio::test]
    async fn test_implausible_minutes_never_produce_null_metrics() {
        let body = json!({
            "items": [
                {"category": "Aerobic", "action": "Treadmill", "minutes": "1e306", "rating": "10"},
                {"category": "Aerobic", "action": "Swimming", "minutes": "30", "rating": "6"}
            ]
        });
        let (status, json) = post_analyze(false, body).await;
        assert_eq!(status, StatusCode::OK);
        for key in ["training_load", "weekly_workout_summary", "training_monotony", "training_strain"] {
            assert!(json["metrics"][key].is_number(), "{key} is not a number");
        }
        assert_eq!(json["metrics"]["training_load"], 180.0);
        assert!(json["items"][0]["minutes"].is_null());

        let only_huge = json!({
            "items": [{"category": "Aerobic", "action": "Treadmill", "minutes": "1e306", "rating": "10"}]
        });
        let (status, _) = post_analyze(false, only_huge).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_advice_included_on_request() {
        let body = json!({
            "include_advice": true,
            "items": [{"category": "Aerobic", "action": "Treadmill", "minutes": "30", "rating": "9"}]
        });
        let (status, json) = post_analyze(false, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["advice"]["explanation"], "Ease off.");
        assert_eq!(json["advice"]["suggestions"][0]["minutes"], "20");
        assert!(json["advice"]["error"].is_null());
    }

    #[tokio::test]
    async fn test_advisor_failure_keeps_metrics() {
        let body = json!({
            "include_advice": true,
            "items": [{"category": "Aerobic", "action": "Treadmill", "minutes": "30", "rating": "9"}]
        });
        let (status, json) = post_analyze(true, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metrics"]["training_load"], 270.0);
        assert_eq!(json["advice"]["suggestions"].as_array().unwrap().len(), 0);
        assert_eq!(json["advice"]["error"], "AI advisor timed out after 30 seconds");
    }

    #[tokio::test]
    async fn test_health_and_catalog() {
        let response = app(false)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(false)
            .oneshot(Request::builder().uri("/api/exercises").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["aerobic_category"], "Aerobic");
        assert_eq!(json["custom_action"], "other");
        assert_eq!(json["categories"].as_array().unwrap().len(), 5);
    }
}
