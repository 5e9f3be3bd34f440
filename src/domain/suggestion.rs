pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;

/// Suggestion for a rating that was present but outside 1..=10.
pub const OUT_OF_RANGE_SUGGESTION: &str = "RPE must be between 1 and 10";
pub const NO_RATING_SUGGESTION: &str = "";

/// Rating-to-label table. Tiers are checked top-down; the first tier whose
/// `min_rating` is <= the rating wins, so tiers must be sorted descending and
/// the last tier must start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionPolicy {
    pub name: &'static str,
    pub tiers: &'static [(u8, &'static str)],
}

impl SuggestionPolicy {
    pub const FOUR_TIER: SuggestionPolicy = SuggestionPolicy {
        name: "four_tier",
        tiers: &[
            (9, "very high intensity, prioritize recovery"),
            (7, "high intensity"),
            (5, "moderate intensity"),
            (1, "low intensity, consider increasing"),
        ],
    };

    pub const TWO_TIER: SuggestionPolicy = SuggestionPolicy {
        name: "two_tier",
        tiers: &[
            (9, "reduce load or rest"),
            (7, "adequate"),
            (1, "increase intensity"),
        ],
    };

    pub fn label_for(&self, rating: u8) -> &'static str {
        self.tiers
            .iter()
            .find(|(min, _)| rating >= *min)
            .map(|(_, label)| *label)
            .unwrap_or(NO_RATING_SUGGESTION)
    }
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self::FOUR_TIER
    }
}

impl TryFrom<&str> for SuggestionPolicy {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "four_tier" | "four-tier" | "4" => Ok(Self::FOUR_TIER),
            "two_tier" | "two-tier" | "2" => Ok(Self::TWO_TIER),
            _ => Err(()),
        }
    }
}
