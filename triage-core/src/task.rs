use chrono::NaiveDate;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task as entered by the user, in the shape the scoring service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub title: String,
    pub due_date: NaiveDate,
    pub importance: i64,
    pub estimated_hours: f64,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        if !self.estimated_hours.is_finite() {
            return Err(ValidationError::InvalidHours(self.estimated_hours.to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("due date is required")]
    MissingDueDate,
    #[error("due date {0:?} is not a YYYY-MM-DD date")]
    InvalidDueDate(String),
    #[error("importance {0:?} is not a whole number")]
    InvalidImportance(String),
    #[error("estimated hours {0:?} is not a number")]
    InvalidHours(String),
}

/// Raw, unvalidated input for a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub importance: String,
    pub estimated_hours: String,
    pub dependencies: String,
}

impl TaskForm {
    pub fn validate(&self) -> Result<TaskRecord, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let due_date = self.due_date.trim();
        if due_date.is_empty() {
            return Err(ValidationError::MissingDueDate);
        }
        let due_date = NaiveDate::parse_from_str(due_date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDueDate(due_date.to_string()))?;

        let importance = self.importance.trim();
        let importance = importance
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidImportance(importance.to_string()))?;

        let hours = self.estimated_hours.trim();
        let estimated_hours = match hours.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => return Err(ValidationError::InvalidHours(hours.to_string())),
        };

        Ok(TaskRecord {
            title: title.to_string(),
            due_date,
            importance,
            estimated_hours,
            dependencies: parse_dependencies(&self.dependencies),
        })
    }
}

/// Splits a comma-separated list of task titles, dropping blank entries.
pub fn parse_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// A task as returned by the scoring service.
///
/// Every field is optional because the service echoes back whatever it was
/// given, including records it rejected (`valid == Some(false)`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyzedTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub importance: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub estimated_hours: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub priority_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<u64>,
}

impl AnalyzedTask {
    pub fn score(&self) -> f64 {
        self.priority_score.unwrap_or(0.0)
    }

    pub fn hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(0.0)
    }

    pub fn importance(&self) -> i64 {
        self.importance.unwrap_or(0)
    }

    /// Parsed due date; `None` when missing or not a calendar date.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())
    }

    pub fn is_valid(&self) -> bool {
        self.valid.unwrap_or(true)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber<T> {
    Number(T),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts numbers sent as numbers or numeric strings; anything else is `None`.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    Ok(
        match Option::<LenientNumber<T>>::deserialize(deserializer)? {
            Some(LenientNumber::Number(value)) => Some(value),
            Some(LenientNumber::Text(text)) => text.trim().parse().ok(),
            Some(LenientNumber::Other(_)) | None => None,
        },
    )
}

impl From<TaskRecord> for AnalyzedTask {
    fn from(record: TaskRecord) -> Self {
        Self {
            title: Some(record.title),
            due_date: Some(record.due_date.format(DATE_FORMAT).to_string()),
            importance: Some(record.importance),
            estimated_hours: Some(record.estimated_hours),
            dependencies: record.dependencies,
            ..Default::default()
        }
    }
}
