//! Submission results and the errors they carry

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationErrors;

use super::book::BookField;

/// Operational error reported by a submission action.
/// Absent values default to `{ code: 0, message: "" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// Per-field validation messages, always iterated in form field order
/// (title, author, year) however they were collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<BookField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: BookField, message: impl Into<String>) {
        self.0.insert(field, message.into());
        self.0.sort_keys();
    }

    pub fn get(&self, field: BookField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BookField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<IndexMap<BookField, String>> for FieldErrors {
    fn from(mut errors: IndexMap<BookField, String>) -> Self {
        errors.sort_keys();
        Self(errors)
    }
}

impl FromIterator<(BookField, String)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (BookField, String)>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<IndexMap<_, _>>())
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IndexMap::<BookField, String>::deserialize(deserializer).map(Self::from)
    }
}

/// Keeps the first message of every field the schema rejected
impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        errors
            .field_errors()
            .into_iter()
            .filter_map(|(name, list)| {
                let field = name.parse::<BookField>().ok()?;
                let message = list
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field.label()));
                Some((field, message))
            })
            .collect()
    }
}

/// Latest outcome of a submission action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Idle,
    Loading,
    Success { message: String },
    Error(ApiError),
    ValidationFailed(FieldErrors),
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        SubmissionResult::Success {
            message: message.into(),
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        SubmissionResult::Error(ApiError::new(code, message))
    }
}
