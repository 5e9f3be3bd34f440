//! Item normalization: turns raw form rows into classified items with a per-item load.
use crate::domain::catalog::{AEROBIC_CATEGORY, CUSTOM_ACTION};
use crate::domain::models::{
    ExerciseKind, NormalizedBatch, NormalizedItem, RawExerciseItem, SkippedEntry,
};
use crate::domain::suggestion::{
    SuggestionPolicy, NO_RATING_SUGGESTION, OUT_OF_RANGE_SUGGESTION, RATING_MAX, RATING_MIN,
};

/// One week. Anything longer is treated as a typo, not a session.
pub const MAX_MINUTES: f64 = 7.0 * 24.0 * 60.0;

/// Batch-level rejections. These go back to the user as a single message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please fill in at least one complete item.")]
    NoCompleteItem,
    #[error("Please enter minutes and an RPE rating for at least one item.")]
    NoLoadData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RatingField {
    Missing,
    OutOfRange,
    Valid(u8),
}

pub struct ItemNormalizer {
    policy: SuggestionPolicy,
}

impl ItemNormalizer {
    pub fn new(policy: SuggestionPolicy) -> Self {
        Self { policy }
    }

    pub fn normalize(&self, raw_items: &[RawExerciseItem]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for (pos, raw) in raw_items.iter().enumerate() {
            let index = pos + 1;
            match self.normalize_item(index, raw) {
                Some(item) => batch.items.push(item),
                None => {
                    tracing::debug!("Skipping item {} without category or action", index);
                    batch.skipped.push(SkippedEntry {
                        index,
                        raw: raw.clone(),
                    });
                }
            }
        }

        batch
    }

    fn normalize_item(&self, index: usize, raw: &RawExerciseItem) -> Option<NormalizedItem> {
        let category = non_empty(raw.category.as_deref())?.to_string();
        let action = resolve_action(raw)?;

        let kind = if category == AEROBIC_CATEGORY {
            ExerciseKind::Aerobic
        } else {
            ExerciseKind::Anaerobic
        };

        let (sets, reps, weight) = if kind.is_aerobic() {
            (None, None, None)
        } else {
            (
                parse_count(raw.sets.as_deref()),
                parse_count(raw.reps.as_deref()),
                non_empty(raw.weight.as_deref()).map(str::to_string),
            )
        };
        let minutes = parse_minutes(raw.minutes.as_deref());

        let (rating, suggestion) = match parse_rating(raw.rating.as_deref()) {
            RatingField::Valid(r) => (Some(r), self.policy.label_for(r)),
            RatingField::OutOfRange => (None, OUT_OF_RANGE_SUGGESTION),
            RatingField::Missing => (None, NO_RATING_SUGGESTION),
        };

        let item_load = match (minutes, rating) {
            (Some(m), Some(r)) => Some(m * f64::from(r)),
            _ => None,
        };

        Some(NormalizedItem {
            index,
            category,
            action,
            kind,
            sets,
            reps,
            weight,
            minutes,
            rating,
            item_load,
            suggestion: suggestion.to_string(),
        })
    }
}

/// Rejects batches the user has to fix before any statistics make sense.
pub fn validate_batch(batch: &NormalizedBatch) -> Result<(), SubmissionError> {
    if batch.items.is_empty() {
        return Err(SubmissionError::NoCompleteItem);
    }
    if !batch.items.iter().any(NormalizedItem::contributes_load) {
        return Err(SubmissionError::NoLoadData);
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_action(raw: &RawExerciseItem) -> Option<String> {
    let selector = non_empty(raw.action.as_deref())?;
    if selector == CUSTOM_ACTION {
        if let Some(custom) = non_empty(raw.custom_action.as_deref()) {
            return Some(custom.to_string());
        }
    }
    Some(selector.to_string())
}

fn digits_only(value: Option<&str>) -> Option<&str> {
    non_empty(value).filter(|v| v.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    digits_only(value)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| *n > 0)
}

fn parse_minutes(value: Option<&str>) -> Option<f64> {
    non_empty(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|m| m.is_finite() && (0.0..=MAX_MINUTES).contains(m))
}

fn parse_rating(value: Option<&str>) -> RatingField {
    let Some(text) = non_empty(value) else {
        return RatingField::Missing;
    };
    let Some(digits) = digits_only(Some(text)) else {
        return RatingField::Missing;
    };
    match digits.parse::<u32>() {
        Ok(r) if (u32::from(RATING_MIN)..=u32::from(RATING_MAX)).contains(&r) => {
            RatingField::Valid(r as u8)
        }
        Ok(_) => RatingField::OutOfRange,
        // Too many digits for u32 is still "a number outside 1..=10".
        Err(_) => RatingField::OutOfRange,
    }
}
