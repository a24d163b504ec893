use serde::{Deserialize, Serialize};

/// Optional overrides for the scoring service's tuning knobs.
///
/// Unset knobs are left to the service's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub importance_weight: Option<i64>,
    pub quick_win_bonus: Option<i64>,
    pub high_effort_penalty: Option<i64>,
    pub dependency_bonus: Option<i64>,
    pub overdue_bonus: Option<i64>,
    pub due_soon_bonus: Option<i64>,
    pub due_week_bonus: Option<i64>,
    pub low_urgency_bonus: Option<i64>,
}

impl ScoringWeights {
    /// `(name, value)` pairs for every knob that is set, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("importance_weight", self.importance_weight),
            ("quick_win_bonus", self.quick_win_bonus),
            ("high_effort_penalty", self.high_effort_penalty),
            ("dependency_bonus", self.dependency_bonus),
            ("overdue_bonus", self.overdue_bonus),
            ("due_soon_bonus", self.due_soon_bonus),
            ("due_week_bonus", self.due_week_bonus),
            ("low_urgency_bonus", self.low_urgency_bonus),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value.to_string())))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}
