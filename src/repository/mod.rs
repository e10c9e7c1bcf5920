//! Repository layer: the source of truth behind the submission actions

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::{error::AppResult, models::Book};

pub use http::HttpBookRepository;
pub use memory::InMemoryBookRepository;

/// Record returned by a successful write, with the backend's own message if it sent one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedBook {
    pub book: Book,
    pub message: Option<String>,
}

/// Book storage as seen from the client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, in the order the backend lists them
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn get_book(&self, id: &str) -> AppResult<Book>;

    /// Persist a new record; the backend assigns the id
    async fn create_book(&self, book: &Book) -> AppResult<SavedBook>;

    /// Overwrite the record identified by `book.id`
    async fn update_book(&self, book: &Book) -> AppResult<SavedBook>;
}
