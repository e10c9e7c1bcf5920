//! Add/edit book form component
//!
//! A [`BookForm`] is one mounted form instance. It owns the edited field
//! values ([`state`]), the submission slot ([`coordinator`]), the visual
//! feedback ([`feedback`]) and the cancel confirmation ([`guard`]). All
//! methods run on the caller's task; the only suspension point is the
//! create/update action inside [`BookForm::submit`].

pub mod coordinator;
pub mod feedback;
pub mod guard;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::FormConfig,
    error::AppResult,
    models::{Book, FormMode, SubmissionResult},
    services::BookActions,
};

pub use coordinator::{SubmissionCoordinator, SubmissionState, Transition};
pub use feedback::{ErrorNotification, FeedbackPresenter, SubmitButton, SuccessDialog};
pub use guard::{CancelEvent, CancelOutcome, Confirm, NavigationGuard};
pub use state::FormState;

pub struct BookForm {
    state: FormState,
    coordinator: SubmissionCoordinator,
    feedback: FeedbackPresenter,
    guard: NavigationGuard,
    actions: Arc<dyn BookActions>,
}

impl BookForm {
    /// Mount a form for `record`, or an empty create form when `None`
    pub fn mount(
        record: Option<Arc<Book>>,
        actions: Arc<dyn BookActions>,
        settings: &FormConfig,
    ) -> Self {
        let state = FormState::new(record);
        tracing::debug!("Mounting book form ({:?})", state.mode());
        Self {
            coordinator: SubmissionCoordinator::new(state.mode(), settings.reload_delay()),
            feedback: FeedbackPresenter::new(),
            guard: NavigationGuard::new(settings.cancel_prompt.clone()),
            state,
            actions,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.coordinator.mode()
    }

    pub fn heading(&self) -> &'static str {
        self.mode().heading()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &Book {
        self.state.values()
    }

    pub fn feedback(&self) -> &FeedbackPresenter {
        &self.feedback
    }

    pub fn submission(&self) -> &SubmissionState {
        self.coordinator.state()
    }

    pub fn is_loading(&self) -> bool {
        self.feedback.is_loading()
    }

    pub fn on_field_change(&mut self, name: &str, value: impl Into<String>) -> AppResult<()> {
        self.state.on_field_change(name, value)
    }

    /// Parent supplied a (possibly new) record reference
    pub fn on_record_changed(&mut self, record: Option<Arc<Book>>) -> bool {
        let reseeded = self.state.on_record_changed(record);
        if reseeded {
            self.coordinator.set_mode(self.state.mode());
        }
        reseeded
    }

    /// Enter the submitting state and hand out the values to send.
    ///
    /// Returns `None` once the form has already succeeded.
    pub fn begin_submit(&mut self) -> Option<(FormMode, Book)> {
        let transition = self.coordinator.begin()?;
        self.feedback.apply(transition);
        Some((self.coordinator.mode(), self.state.values().clone()))
    }

    /// Feed the action's result back into the form
    pub fn finish_submit(&mut self, result: SubmissionResult) {
        if let Some(transition) = self.coordinator.complete(result) {
            self.feedback.apply(transition);
        }
    }

    /// Submit the current values through the action matching the form mode.
    ///
    /// Ignored while the submit button is disabled. Returns whether an action ran.
    pub async fn submit(&mut self) -> bool {
        if self.feedback.submit_button().disabled {
            tracing::warn!("Submit ignored: a submission is already in flight");
            return false;
        }
        let Some((mode, values)) = self.begin_submit() else {
            return false;
        };

        let result = match mode {
            FormMode::Create => self.actions.create(values).await,
            FormMode::Edit => self.actions.update(values).await,
        };
        self.finish_submit(result);
        true
    }

    /// Ask before leaving; on confirmation `set_form_visible(false)` is called once
    pub fn cancel(
        &self,
        event: &mut CancelEvent,
        confirm: &mut dyn Confirm,
        set_form_visible: &mut dyn FnMut(bool),
    ) -> CancelOutcome {
        self.guard.cancel(event, confirm, set_form_visible)
    }

    pub fn dismiss_notification(&mut self) {
        self.feedback.dismiss_notification();
    }

    pub fn scheduled_reload(&self) -> Option<Duration> {
        self.feedback.scheduled_reload()
    }
}
