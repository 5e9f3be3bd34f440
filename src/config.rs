use crate::analytics::training_metrics::AnalysisThresholds;
use crate::domain::suggestion::SuggestionPolicy;
use crate::services::advisor::AdvisorConfig;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: String,
    pub advisor: AdvisorConfig,
    pub suggestion_policy: SuggestionPolicy,
    pub thresholds: AnalysisThresholds,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| {
            let port = get("PORT").unwrap_or_else(|| "3000".to_string());
            format!("0.0.0.0:{}", port)
        });

        let timeout_secs = match get("ADVISOR_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    key: "ADVISOR_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let suggestion_policy = match get("SUGGESTION_POLICY") {
            Some(raw) => SuggestionPolicy::try_from(raw.as_str()).map_err(|_| {
                ConfigError::Invalid {
                    key: "SUGGESTION_POLICY",
                    value: raw.clone(),
                }
            })?,
            None => SuggestionPolicy::default(),
        };

        let defaults = AnalysisThresholds::default();
        let threshold = |key: &'static str, fallback: f64| -> Result<f64, ConfigError> {
            match get(key) {
                Some(raw) => raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(ConfigError::Invalid { key, value: raw }),
                None => Ok(fallback),
            }
        };
        let thresholds = AnalysisThresholds {
            summary_high: threshold("ANALYSIS_SUMMARY_HIGH", defaults.summary_high)?,
            summary_low: threshold("ANALYSIS_SUMMARY_LOW", defaults.summary_low)?,
            monotony_good: threshold("ANALYSIS_MONOTONY_GOOD", defaults.monotony_good)?,
            monotony_bad: threshold("ANALYSIS_MONOTONY_BAD", defaults.monotony_bad)?,
            strain_high: threshold("ANALYSIS_STRAIN_HIGH", defaults.strain_high)?,
            strain_low: threshold("ANALYSIS_STRAIN_LOW", defaults.strain_low)?,
        };

        Ok(Self {
            bind_addr,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            advisor: AdvisorConfig {
                api_key: get("OPENAI_API_KEY"),
                api_base: get("OPENAI_API_BASE"),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            suggestion_policy,
            thresholds,
        })
    }
}
