use crate::analytics::training_metrics::AnalysisThresholds;
use crate::domain::normalizer::ItemNormalizer;
use crate::services::advisor::Advisor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub normalizer: Arc<ItemNormalizer>,
    pub thresholds: AnalysisThresholds,
    pub advisor: Arc<dyn Advisor>,
}

pub type SharedState = Arc<AppState>;
