use serde::Serialize;

/// Category name that marks an item as aerobic. Matched exactly.
pub const AEROBIC_CATEGORY: &str = "Aerobic";

/// Action selector value meaning "use the custom text instead".
pub const CUSTOM_ACTION: &str = "other";

pub const DEFAULT_FORM_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseCategory {
    UpperBodyStrength,
    UpperBodyPower,
    LowerBodyStrength,
    LowerBodyPower,
    Aerobic,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 5] = [
        Self::UpperBodyStrength,
        Self::UpperBodyPower,
        Self::LowerBodyStrength,
        Self::LowerBodyPower,
        Self::Aerobic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpperBodyStrength => "Upper-body strength",
            Self::UpperBodyPower => "Upper-body power",
            Self::LowerBodyStrength => "Lower-body strength",
            Self::LowerBodyPower => "Lower-body power",
            Self::Aerobic => AEROBIC_CATEGORY,
        }
    }

    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            Self::UpperBodyStrength => &[
                "Dumbbell bench press",
                "Dumbbell shoulder press",
                "Dumbbell row",
            ],
            Self::UpperBodyPower => &[
                "Dumbbell push press",
                "Dumbbell speed shoulder press",
                "Medicine ball slam",
            ],
            Self::LowerBodyStrength => &[
                "Dumbbell goblet squat",
                "Dumbbell deadlift",
                "Barbell deadlift",
            ],
            Self::LowerBodyPower => &["Squat jump", "Box jump", "Snatch jump"],
            Self::Aerobic => &["Treadmill", "Stationary bike", "Swimming"],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub name: &'static str,
    pub aerobic: bool,
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RpeBand {
    pub range: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseCatalog {
    pub categories: Vec<CategoryEntry>,
    pub aerobic_category: &'static str,
    pub custom_action: &'static str,
    pub default_rows: usize,
    pub rpe_guide: Vec<RpeBand>,
}

pub fn catalog() -> ExerciseCatalog {
    ExerciseCatalog {
        categories: ExerciseCategory::ALL
            .iter()
            .map(|c| CategoryEntry {
                name: c.label(),
                aerobic: matches!(c, ExerciseCategory::Aerobic),
                actions: c.actions().to_vec(),
            })
            .collect(),
        aerobic_category: AEROBIC_CATEGORY,
        custom_action: CUSTOM_ACTION,
        default_rows: DEFAULT_FORM_ROWS,
        rpe_guide: vec![
            RpeBand { range: "1-2", description: "Very easy, can hold a conversation" },
            RpeBand { range: "3-4", description: "Noticeable effort, still easy to talk" },
            RpeBand { range: "5-6", description: "Moderate, talking gets harder" },
            RpeBand { range: "7-8", description: "Hard, talking is a struggle" },
            RpeBand { range: "9-10", description: "Maximal, cannot talk" },
        ],
    }
}
