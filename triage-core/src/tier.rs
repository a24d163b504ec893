use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Scores at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 120.0;
/// Scores at or above this (and below [`HIGH_THRESHOLD`]) are `Medium`.
pub const MEDIUM_THRESHOLD: f64 = 80.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}
