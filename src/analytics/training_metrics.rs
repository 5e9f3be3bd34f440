use crate::domain::models::{NormalizedItem, TrainingMetrics};
use serde::{Deserialize, Serialize};

pub const NO_VALID_DATA: &str = "No valid data to analyze.";
pub const ON_TRACK: &str = "Training data looks normal, you are on track.";

/// Cut-offs for the analysis sentences. Tuned for minutes x RPE loads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisThresholds {
    pub summary_high: f64,
    pub summary_low: f64,
    pub monotony_good: f64,
    pub monotony_bad: f64,
    pub strain_high: f64,
    pub strain_low: f64,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            summary_high: 300.0,
            summary_low: 150.0,
            monotony_good: 0.5,
            monotony_bad: 1.0,
            strain_high: 1000.0,
            strain_low: 200.0,
        }
    }
}

pub fn calculate_training_metrics(
    items: &[NormalizedItem],
    thresholds: &AnalysisThresholds,
) -> TrainingMetrics {
    let valid: Vec<(f64, f64)> = items
        .iter()
        .filter(|item| item.contributes_load())
        .filter_map(|item| Some((item.item_load?, f64::from(item.rating?))))
        .collect();

    if valid.is_empty() {
        return TrainingMetrics {
            weekly_workout_summary: 0.0,
            training_load: 0.0,
            training_monotony: 0.0,
            training_strain: 0.0,
            analysis: NO_VALID_DATA.to_string(),
        };
    }

    let training_load: f64 = valid.iter().map(|(load, _)| load).sum();
    let weekly_workout_summary = training_load / valid.len() as f64;

    let ratings: Vec<f64> = valid.iter().map(|(_, rating)| *rating).collect();
    let training_monotony = monotony(&ratings);
    let training_strain = training_load * training_monotony;

    let analysis = analyze(
        weekly_workout_summary,
        training_monotony,
        training_strain,
        thresholds,
    );

    TrainingMetrics {
        weekly_workout_summary: round2(weekly_workout_summary),
        training_load: round2(training_load),
        training_monotony: round2(training_monotony),
        training_strain: round2(training_strain),
        analysis,
    }
}

/// Population standard deviation over the mean; zero when the mean is zero.
fn monotony(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

fn analyze(summary: f64, monotony: f64, strain: f64, t: &AnalysisThresholds) -> String {
    let mut sentences = Vec::new();

    if summary > t.summary_high {
        sentences.push("Weekly workout summary shows you are progressing well, keep it up.");
    } else if summary < t.summary_low {
        sentences.push("Weekly workout summary is low, increase intensity or frequency.");
    }

    if monotony < t.monotony_good {
        sentences.push("Training monotony is stable, the plan is well executed.");
    } else if monotony > t.monotony_bad {
        sentences.push("Training monotony is high, increase variety in the plan.");
    }

    if strain > t.strain_high {
        sentences.push("Training strain is high, risk of overtraining, add rest.");
    } else if strain < t.strain_low {
        sentences.push("Training strain is low, consider increasing volume.");
    }

    if sentences.is_empty() {
        ON_TRACK.to_string()
    } else {
        sentences.join(" ")
    }
}

/// Values too large to scale are returned as is.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
