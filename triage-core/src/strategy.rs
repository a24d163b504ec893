use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Highest service-assigned score first.
    #[default]
    Smart,
    /// Smallest effort first.
    Fastest,
    /// Highest importance first.
    Impact,
    /// Earliest due date first.
    Deadline,
}

impl Strategy {
    pub const VARIANTS: [Self; 4] = [Self::Smart, Self::Fastest, Self::Impact, Self::Deadline];

    /// Like `str::parse`, but anything unrecognized selects [`Strategy::Smart`].
    pub fn parse_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }
}
