//! Navigation guard for the form's cancel button

/// The click that triggered a cancel
#[derive(Debug, Default)]
pub struct CancelEvent {
    default_prevented: bool,
}

impl CancelEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the click from submitting the surrounding form
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Yes/no question put to the user
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The user confirmed and the parent was told to hide the form
    Left,
    /// The user declined; the form stays open untouched
    Stayed,
}

#[derive(Debug, Clone)]
pub struct NavigationGuard {
    prompt: String,
}

impl NavigationGuard {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    pub fn cancel(
        &self,
        event: &mut CancelEvent,
        confirm: &mut dyn Confirm,
        set_form_visible: &mut dyn FnMut(bool),
    ) -> CancelOutcome {
        event.prevent_default();

        if confirm.confirm(&self.prompt) {
            tracing::debug!("Leaving form");
            set_form_visible(false);
            CancelOutcome::Left
        } else {
            CancelOutcome::Stayed
        }
    }
}
