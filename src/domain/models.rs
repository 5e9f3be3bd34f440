use serde::{Deserialize, Deserializer, Serialize};

/// One form row as submitted. Every value is raw text; parsing happens in the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExerciseItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub custom_action: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sets: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reps: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub minutes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Aerobic,
    Anaerobic,
}

impl ExerciseKind {
    pub fn is_aerobic(&self) -> bool {
        matches!(self, ExerciseKind::Aerobic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    /// 1-based position in the submitted batch.
    pub index: usize,
    pub category: String,
    pub action: String,
    pub kind: ExerciseKind,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight: Option<String>,
    pub minutes: Option<f64>,
    pub rating: Option<u8>,
    pub item_load: Option<f64>,
    pub suggestion: String,
}

impl NormalizedItem {
    /// Whether this item feeds the aggregate statistics.
    pub fn contributes_load(&self) -> bool {
        self.rating.is_some()
            && self
                .item_load
                .map(|load| load.is_finite() && load > 0.0)
                .unwrap_or(false)
    }
}

/// Placeholder for a row that was dropped, so the client can repopulate its form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub index: usize,
    pub raw: RawExerciseItem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBatch {
    pub items: Vec<NormalizedItem>,
    pub skipped: Vec<SkippedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub weekly_workout_summary: f64,
    pub training_load: f64,
    pub training_monotony: f64,
    pub training_strain: f64,
    pub analysis: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

/// Accepts a string, number, bool or null and yields trimmed text; blank becomes `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value
        .map(|v| match v {
            TextOrNumber::Text(s) => s.trim().to_string(),
            TextOrNumber::Number(n) => n.to_string(),
            TextOrNumber::Flag(b) => b.to_string(),
        })
        .filter(|s| !s.is_empty()))
}
