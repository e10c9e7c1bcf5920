//! Book page: the record list and the form it mounts
//!
//! The page is the parent view of [`BookForm`]. It hands the form an
//! `Arc<Book>` taken from its list, so choosing the same book twice hands over
//! the same reference and does not clobber edits. After a successful
//! submission the page performs the hard reset: the form is dropped and the
//! list is fetched again from the repository.

use std::sync::Arc;

use crate::{
    config::FormConfig,
    error::{AppError, AppResult},
    form::{BookForm, CancelEvent, CancelOutcome, Confirm},
    models::Book,
    repository::BookRepository,
    services::BookActions,
};

pub struct BookPage {
    repository: Arc<dyn BookRepository>,
    actions: Arc<dyn BookActions>,
    settings: FormConfig,
    books: Vec<Arc<Book>>,
    form: Option<BookForm>,
}

impl BookPage {
    /// Build the page and fetch the initial list
    pub async fn load(
        repository: Arc<dyn BookRepository>,
        actions: Arc<dyn BookActions>,
        settings: FormConfig,
    ) -> AppResult<Self> {
        let mut page = Self {
            repository,
            actions,
            settings,
            books: Vec::new(),
            form: None,
        };
        page.reload().await?;
        Ok(page)
    }

    pub fn books(&self) -> &[Arc<Book>] {
        &self.books
    }

    pub fn form(&self) -> Option<&BookForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut BookForm> {
        self.form.as_mut()
    }

    pub fn is_form_visible(&self) -> bool {
        self.form.is_some()
    }

    /// Show an empty create form, replacing whatever form was open
    pub fn open_create(&mut self) -> &mut BookForm {
        let form = BookForm::mount(None, self.actions.clone(), &self.settings);
        self.form.insert(form)
    }

    /// Show the edit form for the listed book `id`.
    ///
    /// An open edit form is re-seeded rather than remounted.
    pub fn open_edit(&mut self, id: &str) -> AppResult<&mut BookForm> {
        let record = self
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        match self.form.take() {
            Some(mut form) if form.state().record().is_some() => {
                form.on_record_changed(Some(record));
                Ok(self.form.insert(form))
            }
            _ => {
                let form = BookForm::mount(Some(record), self.actions.clone(), &self.settings);
                Ok(self.form.insert(form))
            }
        }
    }

    /// Visibility callback handed to the form; hiding unmounts it
    pub fn set_form_visible(&mut self, visible: bool) {
        if visible {
            if self.form.is_none() {
                self.open_create();
            }
        } else if self.form.take().is_some() {
            tracing::debug!("Form hidden");
        }
    }

    /// Run the form's cancel flow; a confirmed cancel unmounts the form
    pub fn cancel_form(&mut self, confirm: &mut dyn Confirm) -> Option<CancelOutcome> {
        let form = self.form.as_ref()?;
        let mut hide = false;
        let outcome = form.cancel(&mut CancelEvent::new(), confirm, &mut |visible: bool| {
            hide = !visible;
        });
        if hide {
            self.set_form_visible(false);
        }
        Some(outcome)
    }

    /// Hard reset: fetch the list again, then drop the form and its state.
    ///
    /// A failed fetch leaves the form and the previous list in place.
    pub async fn reload(&mut self) -> AppResult<()> {
        self.replace_books().await?;
        self.form = None;
        Ok(())
    }

    /// Fetch the list again without closing an open form.
    ///
    /// A form whose submission already succeeded is dropped, finishing a
    /// reset that could not complete earlier.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.replace_books().await?;
        if self.form.as_ref().and_then(BookForm::scheduled_reload).is_some() {
            self.form = None;
        }
        Ok(())
    }

    async fn replace_books(&mut self) -> AppResult<()> {
        let books = self.repository.list_books().await?;
        tracing::info!("Loaded {} book(s)", books.len());
        self.books = books.into_iter().map(Arc::new).collect();
        Ok(())
    }

    /// Wait out the delay the form scheduled after a success, then reset.
    ///
    /// Returns `false` when no reset was scheduled.
    pub async fn await_scheduled_reload(&mut self) -> AppResult<bool> {
        let Some(delay) = self.form.as_ref().and_then(BookForm::scheduled_reload) else {
            return Ok(false);
        };

        tracing::debug!("Reloading in {:?}", delay);
        tokio::time::sleep(delay).await;
        self.reload().await?;
        Ok(true)
    }
}
