//! Feedback presenter: success dialog, error notification, loading overlay

use std::time::Duration;

use super::coordinator::Transition;
use crate::models::{ApiError, BookField, FieldErrors};

pub const SAVE_LABEL: &str = "Save";
pub const LOADING_LABEL: &str = "Loading...";

/// Modal shown once a submission succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessDialog {
    pub open: bool,
    pub message: String,
}

/// Dismissible error toast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorNotification {
    pub open: bool,
    pub error: ApiError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: &'static str,
}

/// Visual feedback of one form. The three elements are independent and may
/// be visible at the same time.
#[derive(Debug, Clone, Default)]
pub struct FeedbackPresenter {
    loading: bool,
    success: SuccessDialog,
    notification: ErrorNotification,
    field_errors: FieldErrors,
    reload_after: Option<Duration>,
}

impl FeedbackPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Submitting => {
                self.loading = true;
                self.field_errors = FieldErrors::new();
            }
            Transition::Succeeded {
                message,
                reload_after,
            } => {
                self.loading = false;
                self.success = SuccessDialog {
                    open: true,
                    message,
                };
                self.reload_after = Some(reload_after);
            }
            Transition::Failed(error) => {
                self.loading = false;
                self.notification = ErrorNotification { open: true, error };
            }
            Transition::Invalid(field_errors) => {
                self.loading = false;
                self.field_errors = field_errors;
            }
            Transition::Settled => self.loading = false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The overlay mirrors the loading flag exactly
    pub fn overlay_visible(&self) -> bool {
        self.loading
    }

    pub fn submit_button(&self) -> SubmitButton {
        SubmitButton {
            disabled: self.loading,
            label: if self.loading { LOADING_LABEL } else { SAVE_LABEL },
        }
    }

    pub fn success_dialog(&self) -> &SuccessDialog {
        &self.success
    }

    pub fn notification(&self) -> &ErrorNotification {
        &self.notification
    }

    /// Close the error notification; the captured error stays for the next render
    pub fn dismiss_notification(&mut self) {
        self.notification.open = false;
    }

    /// Inline hint shown next to `field`
    pub fn field_error(&self, field: BookField) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Delay before the hard reset, once a submission succeeded
    pub fn scheduled_reload(&self) -> Option<Duration> {
        self.reload_after
    }
}
