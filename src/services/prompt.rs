use crate::domain::models::{NormalizedItem, TrainingMetrics};

pub const SYSTEM_PROMPT: &str = "You are a strength and conditioning coach. \
You receive a training log and its load statistics and return an adjusted plan. \
Reply with JSON only, no prose outside the JSON object.";

/// Shortest exact form: 30.0 prints as "30", 12.25 stays "12.25".
pub fn format_minutes(minutes: f64) -> String {
    minutes.to_string()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One line per item, in submission order.
pub fn format_training_log(items: &[NormalizedItem]) -> String {
    items
        .iter()
        .map(|item| {
            let mut line = format!(
                "- {} / {}: total minutes {}, RPE {}, load {}",
                item.category,
                item.action,
                item.minutes.map(format_minutes).unwrap_or_else(|| "-".to_string()),
                or_dash(item.rating),
                item.item_load.map(format_minutes).unwrap_or_else(|| "-".to_string()),
            );
            if !item.kind.is_aerobic() {
                line.push_str(&format!(
                    ", sets {}, reps {}, weight {}",
                    or_dash(item.sets),
                    or_dash(item.reps),
                    item.weight.as_deref().unwrap_or("-"),
                ));
            }
            line.push('\n');
            line
        })
        .collect::<Vec<_>>()
        .join("")
}

pub fn build_adjustment_prompt(items: &[NormalizedItem], metrics: &TrainingMetrics) -> String {
    format!(
        r#"TRAINING LOG:
{}
STATISTICS:
- Weekly workout summary: {:.2}
- Training load: {:.2}
- Training monotony: {:.2}
- Training strain: {:.2}
- Rule-based analysis: {}

RULES:
1. Keep the same exercises, one adjusted entry per logged entry, in the same order
2. Lower the volume or RPE of entries rated 9-10, raise entries rated 4 or lower
3. Aerobic entries use minutes; strength entries use sets, reps and weight
4. Use null for any field that has no meaningful value

OUTPUT FORMAT:
Return ONLY a JSON object with this exact structure:
{{
    "adjusted_items": [
        {{
            "category": "Aerobic",
            "action": "Treadmill",
            "aerobic": true,
            "sets": null,
            "reps": null,
            "weight": null,
            "minutes": "35",
            "rating": "6"
        }}
    ],
    "explanation": "Why the plan was adjusted"
}}"#,
        format_training_log(items),
        metrics.weekly_workout_summary,
        metrics.training_load,
        metrics.training_monotony,
        metrics.training_strain,
        metrics.analysis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExerciseKind;

    fn strength() -> NormalizedItem {
        NormalizedItem {
            index: 1,
            category: "Lower-body strength".to_string(),
            action: "Barbell deadlift".to_string(),
            kind: ExerciseKind::Anaerobic,
            sets: Some(5),
            reps: Some(3),
            weight: Some("120kg".to_string()),
            minutes: Some(20.0),
            rating: Some(8),
            item_load: Some(160.0),
            suggestion: "high intensity".to_string(),
        }
    }

    fn cardio() -> NormalizedItem {
        NormalizedItem {
            index: 2,
            category: "Aerobic".to_string(),
            action: "Swimming".to_string(),
            kind: ExerciseKind::Aerobic,
            sets: None,
            reps: None,
            weight: None,
            minutes: Some(32.5),
            rating: None,
            item_load: None,
            suggestion: String::new(),
        }
    }

    #[test]
    fn test_log_lines() {
        let log = format_training_log(&[strength(), cardio()]);
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(
            lines[0],
            "- Lower-body strength / Barbell deadlift: total minutes 20, RPE 8, load 160, sets 5, reps 3, weight 120kg"
        );
        assert_eq!(lines[1], "- Aerobic / Swimming: total minutes 32.5, RPE -, load -");
    }

    #[test]
    fn test_format_minutes_keeps_precision() {
        assert_eq!(format_minutes(30.0), "30");
        assert_eq!(format_minutes(12.25), "12.25");
        assert_eq!(format_minutes(0.125), "0.125");
    }

    #[test]
    fn test_prompt_embeds_log_and_stats() {
        let metrics = TrainingMetrics {
            weekly_workout_summary: 160.0,
            training_load: 160.0,
            training_monotony: 0.0,
            training_strain: 0.0,
            analysis: "Training strain is low, consider increasing volume.".to_string(),
        };
        let prompt = build_adjustment_prompt(&[strength()], &metrics);
        assert!(prompt.contains("Barbell deadlift"));
        assert!(prompt.contains("- Training load: 160.00"));
        assert!(prompt.contains("\"adjusted_items\""));
    }
}
