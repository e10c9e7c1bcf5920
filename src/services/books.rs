//! Create and update actions invoked by the book form
//!
//! Each action validates the submitted values against the book schema first
//! and only reaches the repository when they pass. Every outcome, including
//! transport failures, is folded into a [`SubmissionResult`].

use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::AppError,
    models::{Book, FieldErrors, SubmissionResult},
    repository::{BookRepository, SavedBook},
};

pub const CREATED_MESSAGE: &str = "Book created successfully";
pub const UPDATED_MESSAGE: &str = "Book updated successfully";

/// The two asynchronous submission actions a form can invoke
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookActions: Send + Sync {
    async fn create(&self, values: Book) -> SubmissionResult;

    async fn update(&self, values: Book) -> SubmissionResult;
}

#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    fn check(values: &Book) -> Option<SubmissionResult> {
        match values.validate() {
            Ok(()) => None,
            Err(errors) => {
                let errors = FieldErrors::from(&errors);
                tracing::debug!("Schema rejected {} field(s)", errors.len());
                Some(SubmissionResult::ValidationFailed(errors))
            }
        }
    }

    fn outcome(saved: Result<SavedBook, AppError>, default_message: &str) -> SubmissionResult {
        match saved {
            Ok(saved) => {
                tracing::info!("Saved book id={}", saved.book.id);
                SubmissionResult::success(saved.message.unwrap_or_else(|| default_message.to_string()))
            }
            Err(AppError::Validation(errors)) => SubmissionResult::ValidationFailed(errors),
            Err(e) => {
                tracing::warn!("Book submission failed: {}", e);
                SubmissionResult::Error(e.into())
            }
        }
    }
}

#[async_trait]
impl BookActions for BookService {
    async fn create(&self, mut values: Book) -> SubmissionResult {
        if let Some(rejected) = Self::check(&values) {
            return rejected;
        }
        values.id.clear();
        Self::outcome(self.repository.create_book(&values).await, CREATED_MESSAGE)
    }

    async fn update(&self, values: Book) -> SubmissionResult {
        if !values.has_id() {
            return SubmissionResult::Error(
                AppError::BadRequest("Cannot update a book without id".into()).into(),
            );
        }
        if let Some(rejected) = Self::check(&values) {
            return rejected;
        }
        Self::outcome(self.repository.update_book(&values).await, UPDATED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiError, BookField};
    use crate::repository::MockBookRepository;

    fn values(id: &str, title: &str) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            author: "Ursula K. Le Guin".into(),
            year: "1969".into(),
        }
    }

    #[tokio::test]
    async fn test_create_validates_before_repository() {
        let mut repo = MockBookRepository::new();
        repo.expect_create_book().never();
        let service = BookService::new(Arc::new(repo));

        let result = service.create(values("", "")).await;
        match result {
            SubmissionResult::ValidationFailed(errors) => {
                assert_eq!(errors.get(BookField::Title), Some("Title is required"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_uses_default_message() {
        let mut repo = MockBookRepository::new();
        repo.expect_create_book()
            .withf(|book| book.id.is_empty() && book.title == "The Left Hand of Darkness")
            .times(1)
            .returning(|book| {
                Ok(SavedBook {
                    book: Book {
                        id: "b-1".into(),
                        ..book.clone()
                    },
                    message: None,
                })
            });
        let service = BookService::new(Arc::new(repo));

        let result = service.create(values("", "The Left Hand of Darkness")).await;
        assert_eq!(result, SubmissionResult::success(CREATED_MESSAGE));
    }

    #[tokio::test]
    async fn test_update_prefers_backend_message() {
        let mut repo = MockBookRepository::new();
        repo.expect_update_book().times(1).returning(|book| {
            Ok(SavedBook {
                book: book.clone(),
                message: Some("Book saved".into()),
            })
        });
        let service = BookService::new(Arc::new(repo));

        let result = service.update(values("b-1", "Earthsea")).await;
        assert_eq!(result, SubmissionResult::success("Book saved"));
    }

    #[tokio::test]
    async fn test_update_conflict_becomes_error() {
        let mut repo = MockBookRepository::new();
        repo.expect_update_book()
            .returning(|_| Err(AppError::Conflict("Conflict".into())));
        let service = BookService::new(Arc::new(repo));

        let result = service.update(values("b-1", "Earthsea")).await;
        assert_eq!(result, SubmissionResult::Error(ApiError::new(409, "Conflict")));
    }

    #[tokio::test]
    async fn test_backend_validation_is_not_an_error() {
        let mut repo = MockBookRepository::new();
        repo.expect_create_book().returning(|_| {
            let mut errors = FieldErrors::new();
            errors.insert(BookField::Year, "Year is in the future");
            Err(AppError::Validation(errors))
        });
        let service = BookService::new(Arc::new(repo));

        let result = service.create(values("", "Earthsea")).await;
        assert!(matches!(result, SubmissionResult::ValidationFailed(e) if e.get(BookField::Year).is_some()));
    }

    #[tokio::test]
    async fn test_update_without_id() {
        let service = BookService::new(Arc::new(MockBookRepository::new()));
        let result = service.update(values("", "Earthsea")).await;
        assert!(matches!(result, SubmissionResult::Error(ApiError { code: 400, .. })));
    }
}
