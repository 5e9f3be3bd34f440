use crate::domain::models::{lenient_text, NormalizedItem, TrainingMetrics};
use crate::services::prompt::{build_adjustment_prompt, format_minutes, SYSTEM_PROMPT};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("AI advisor is not configured (missing API key)")]
    NotConfigured,
    #[error("AI advisor timed out after {0} seconds")]
    Timeout(u64),
    #[error("AI advisor request failed: {0}")]
    Request(String),
    #[error("AI advisor returned an empty reply")]
    EmptyReply,
    #[error("AI advisor reply could not be understood: {0}")]
    Malformed(String),
}

/// Adjusted entry proposed by the advisor. Values are display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedItem {
    pub category: String,
    pub action: String,
    pub aerobic: bool,
    #[serde(deserialize_with = "lenient_text")]
    pub sets: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub reps: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub minutes: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub rating: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub adjusted_items: Vec<AdjustedItem>,
    pub explanation: String,
}

/// What the page gets back: suggestions on success, an error string otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdviceOutcome {
    pub suggestions: Vec<AdjustedItem>,
    pub explanation: Option<String>,
    pub error: Option<String>,
}

impl From<Result<Recommendation, AdvisorError>> for AdviceOutcome {
    fn from(result: Result<Recommendation, AdvisorError>) -> Self {
        match result {
            Ok(rec) => AdviceOutcome {
                suggestions: rec.adjusted_items,
                explanation: Some(rec.explanation),
                error: None,
            },
            Err(err) => AdviceOutcome {
                suggestions: Vec::new(),
                explanation: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn recommend(
        &self,
        items: &[NormalizedItem],
        metrics: &TrainingMetrics,
    ) -> Result<Recommendation, AdvisorError>;
}

#[derive(Clone)]
pub struct OpenAiAdvisor {
    client: Option<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl OpenAiAdvisor {
    pub fn new(config: AdvisorConfig) -> Self {
        let client = config.api_key.map(|key| {
            let mut openai = OpenAIConfig::new().with_api_key(key);
            if let Some(base) = config.api_base {
                openai = openai.with_api_base(base);
            }
            Client::with_config(openai)
        });
        Self {
            client,
            model: config.model,
            timeout: config.timeout,
        }
    }
}

#[async_trait]
impl Advisor for OpenAiAdvisor {
    async fn recommend(
        &self,
        items: &[NormalizedItem],
        metrics: &TrainingMetrics,
    ) -> Result<Recommendation, AdvisorError> {
        let client = self.client.as_ref().ok_or(AdvisorError::NotConfigured)?;

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()
                .map_err(|e| AdvisorError::Request(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_adjustment_prompt(items, metrics))
                .build()
                .map_err(|e| AdvisorError::Request(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .temperature(0.4)
            .build()
            .map_err(|e| AdvisorError::Request(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, client.chat().create(request))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| AdvisorError::Request(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let recommendation = parse_recommendation(&content)?;
        Ok(annotate_changes(items, recommendation))
    }
}

/// Runs the advisor and folds any failure into the outcome. Never fails.
pub async fn advise(
    advisor: &dyn Advisor,
    items: &[NormalizedItem],
    metrics: &TrainingMetrics,
) -> AdviceOutcome {
    let result = advisor.recommend(items, metrics).await;
    match &result {
        Ok(rec) => tracing::info!(
            "Advisor returned {} adjusted items",
            rec.adjusted_items.len()
        ),
        Err(e) => tracing::warn!("Advisor unavailable: {}", e),
    }
    AdviceOutcome::from(result)
}

/// Parses the model reply. Tolerates markdown fences and text around the object.
pub fn parse_recommendation(content: &str) -> Result<Recommendation, AdvisorError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AdvisorError::EmptyReply);
    }
    let (start, end) = match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return Err(AdvisorError::Malformed("no JSON object in reply".to_string())),
    };
    serde_json::from_str::<Recommendation>(&trimmed[start..=end])
        .map_err(|e| AdvisorError::Malformed(e.to_string()))
}

/// Appends "(was: <old>)" to values that differ from the matching submitted item.
pub fn annotate_changes(items: &[NormalizedItem], mut rec: Recommendation) -> Recommendation {
    for adjusted in rec.adjusted_items.iter_mut() {
        let Some(original) = items
            .iter()
            .find(|i| i.category == adjusted.category && i.action == adjusted.action)
        else {
            continue;
        };
        annotate(&mut adjusted.sets, original.sets.map(|v| v.to_string()));
        annotate(&mut adjusted.reps, original.reps.map(|v| v.to_string()));
        annotate(&mut adjusted.weight, original.weight.clone());
        annotate(&mut adjusted.minutes, original.minutes.map(format_minutes));
        annotate(&mut adjusted.rating, original.rating.map(|v| v.to_string()));
    }
    rec
}

fn annotate(value: &mut Option<String>, old: Option<String>) {
    if let (Some(new), Some(old)) = (value.as_mut(), old) {
        if !same_value(new, &old) && !new.contains("(was:") {
            *new = format!("{new} (was: {old})");
        }
    }
}

/// Numbers compare by value, so "30.0" matches 30; other text compares trimmed.
fn same_value(new: &str, old: &str) -> bool {
    let (new, old) = (new.trim(), old.trim());
    match (new.parse::<f64>(), old.parse::<f64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => new == old,
    }
}
