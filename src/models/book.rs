//! Book record and form field types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Book record as exchanged with the backend and edited in the form.
///
/// `year` holds the raw text of the numeric input; the schema validator
/// decides whether it is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Book {
    /// Empty for a record that was never saved
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[serde(deserialize_with = "year_from_string_or_number")]
    #[validate(custom(function = "validate_year"))]
    pub year: String,
}

impl Book {
    /// True when the record has been persisted and carries an id
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Read one field by its input name
    pub fn get(&self, field: BookField) -> &str {
        match field {
            BookField::Id => &self.id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
        }
    }

    pub(crate) fn set(&mut self, field: BookField, value: String) {
        match field {
            BookField::Id => self.id = value,
            BookField::Title => self.title = value,
            BookField::Author => self.author = value,
            BookField::Year => self.year = value,
        }
    }
}

fn validate_year(year: &str) -> Result<(), ValidationError> {
    let trimmed = year.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("required").with_message("Year is required".into()));
    }
    match trimmed.parse::<i32>() {
        Ok(value) if value >= 1 => Ok(()),
        Ok(_) => Err(ValidationError::new("range").with_message("Year must be at least 1".into())),
        Err(_) => Err(ValidationError::new("number").with_message("Year must be a number".into())),
    }
}

/// Backends may send the year as a JSON number or as text.
fn year_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

/// Editable field, keyed by the name of its input element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookField {
    Id,
    Title,
    Author,
    Year,
}

impl BookField {
    /// Fields shown to the user, in display order
    pub const VISIBLE: [BookField; 3] = [BookField::Title, BookField::Author, BookField::Year];

    pub fn name(&self) -> &'static str {
        match self {
            BookField::Id => "id",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookField::Id => "Id",
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BookField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(BookField::Id),
            "title" => Ok(BookField::Title),
            "author" => Ok(BookField::Author),
            "year" => Ok(BookField::Year),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}

/// Which submission flow a form drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// Edit mode exactly when an existing record was supplied
    pub fn for_record(record: Option<&Book>) -> Self {
        match record {
            Some(_) => FormMode::Edit,
            None => FormMode::Create,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            FormMode::Create => "Form Add Book",
            FormMode::Edit => "Form Edit Book",
        }
    }
}
