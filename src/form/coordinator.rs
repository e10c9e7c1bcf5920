//! Submission coordinator: drives the active action slot through its states

use std::time::Duration;

use crate::models::{ApiError, FieldErrors, FormMode, SubmissionResult};

/// State of the action slot selected by the form mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        message: String,
    },
    Failed {
        api_error: Option<ApiError>,
        field_errors: FieldErrors,
    },
}

/// What the presenter has to render after a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Loading flag set, overlay shown
    Submitting,
    /// Loading cleared, success dialog opened, hard reset due after `reload_after`
    Succeeded { message: String, reload_after: Duration },
    /// Loading cleared, notification opened
    Failed(ApiError),
    /// Loading cleared, inline hints only
    Invalid(FieldErrors),
    /// Loading cleared, nothing else
    Settled,
}

#[derive(Debug, Clone)]
pub struct SubmissionCoordinator {
    mode: FormMode,
    state: SubmissionState,
    reload_delay: Duration,
}

impl SubmissionCoordinator {
    pub fn new(mode: FormMode, reload_delay: Duration) -> Self {
        Self {
            mode,
            state: SubmissionState::Idle,
            reload_delay,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The slot follows the record the form was last seeded with
    pub(crate) fn set_mode(&mut self, mode: FormMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    /// Success is terminal; nothing moves the slot afterwards
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SubmissionState::Succeeded { .. })
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            SubmissionState::Failed { field_errors, .. } if !field_errors.is_empty() => {
                Some(field_errors)
            }
            _ => None,
        }
    }

    pub fn begin(&mut self) -> Option<Transition> {
        if self.is_finished() {
            tracing::warn!("Ignoring submission after success");
            return None;
        }

        tracing::info!("Submitting book ({:?})", self.mode);
        self.state = SubmissionState::Submitting;
        Some(Transition::Submitting)
    }

    /// Apply the latest result of the active action
    pub fn complete(&mut self, result: SubmissionResult) -> Option<Transition> {
        if self.is_finished() {
            tracing::warn!("Ignoring result after success: {:?}", result);
            return None;
        }

        let transition = match result {
            SubmissionResult::Loading => return None,
            SubmissionResult::Idle => {
                self.state = SubmissionState::Idle;
                Transition::Settled
            }
            SubmissionResult::Success { message } => {
                tracing::info!("Submission succeeded: {}", message);
                self.state = SubmissionState::Succeeded {
                    message: message.clone(),
                };
                Transition::Succeeded {
                    message,
                    reload_after: self.reload_delay,
                }
            }
            SubmissionResult::Error(api_error) => {
                tracing::warn!("Submission failed with {}", api_error);
                self.state = SubmissionState::Failed {
                    api_error: Some(api_error.clone()),
                    field_errors: FieldErrors::new(),
                };
                Transition::Failed(api_error)
            }
            SubmissionResult::ValidationFailed(field_errors) => {
                tracing::debug!("Submission rejected by schema");
                self.state = SubmissionState::Failed {
                    api_error: None,
                    field_errors: field_errors.clone(),
                };
                Transition::Invalid(field_errors)
            }
        };

        Some(transition)
    }
}
