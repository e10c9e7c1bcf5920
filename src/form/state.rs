//! Form state holder: the locally edited copy of a book record

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookField, FormMode},
};

/// Current field values of one mounted form.
///
/// Seeded from the record the parent supplies (if any) and re-seeded only when
/// the parent hands over a different record reference.
#[derive(Debug, Clone)]
pub struct FormState {
    values: Book,
    source: Option<Arc<Book>>,
}

impl FormState {
    pub fn new(record: Option<Arc<Book>>) -> Self {
        let values = record.as_deref().cloned().unwrap_or_default();
        Self {
            values,
            source: record,
        }
    }

    pub fn values(&self) -> &Book {
        &self.values
    }

    pub fn get(&self, field: BookField) -> &str {
        self.values.get(field)
    }

    /// Record the form was seeded from
    pub fn record(&self) -> Option<&Arc<Book>> {
        self.source.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        FormMode::for_record(self.source.as_deref())
    }

    /// Apply one edit, keyed by the input element name.
    ///
    /// Only the named field changes. A create form has no `id` input, and an
    /// edit form's id cannot be changed once assigned.
    pub fn on_field_change(&mut self, name: &str, value: impl Into<String>) -> AppResult<()> {
        let field: BookField = name.parse()?;
        let value = value.into();

        if field == BookField::Id {
            if self.source.is_none() {
                return Err(AppError::UnknownField(name.to_string()));
            }
            if self.values.has_id() && value != self.values.id {
                return Err(AppError::ImmutableId);
            }
        }

        tracing::trace!("Field {} changed", field);
        self.values.set(field, value);
        Ok(())
    }

    /// Handle a record handed over by the parent view.
    ///
    /// Returns `true` when the fields were re-seeded. The same reference, or no
    /// record at all, leaves in-progress edits alone.
    pub fn on_record_changed(&mut self, record: Option<Arc<Book>>) -> bool {
        let Some(record) = record else {
            return false;
        };
        if self
            .source
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &record))
        {
            return false;
        }

        tracing::debug!("Re-seeding form from book id={}", record.id);
        self.values = (*record).clone();
        self.source = Some(record);
        true
    }
}
