//! In-memory book repository

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookRepository, SavedBook};
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Keeps books in insertion order. Titles are unique per author.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<IndexMap<String, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-filled with `books`; missing ids are generated
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books
            .into_iter()
            .map(|mut book| {
                if !book.has_id() {
                    book.id = Uuid::new_v4().to_string();
                }
                (book.id.clone(), book)
            })
            .collect();
        Self {
            books: RwLock::new(books),
        }
    }

    fn find_duplicate<'a>(books: &'a IndexMap<String, Book>, book: &Book) -> Option<&'a Book> {
        books.values().find(|existing| {
            existing.id != book.id
                && existing.title.trim().eq_ignore_ascii_case(book.title.trim())
                && existing.author.trim().eq_ignore_ascii_case(book.author.trim())
        })
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.books
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn create_book(&self, book: &Book) -> AppResult<SavedBook> {
        let mut books = self.books.write().await;

        if let Some(dup) = Self::find_duplicate(&books, book) {
            tracing::info!("Rejecting duplicate of book id={}", dup.id);
            return Err(AppError::Conflict(format!(
                "\"{}\" by {} already exists",
                dup.title, dup.author
            )));
        }

        let mut created = book.clone();
        created.id = Uuid::new_v4().to_string();
        books.insert(created.id.clone(), created.clone());
        tracing::debug!("Stored book id={}", created.id);

        Ok(SavedBook {
            book: created,
            message: None,
        })
    }

    async fn update_book(&self, book: &Book) -> AppResult<SavedBook> {
        let mut books = self.books.write().await;

        if !books.contains_key(&book.id) {
            return Err(AppError::NotFound(format!("Book {} not found", book.id)));
        }
        if let Some(dup) = Self::find_duplicate(&books, book) {
            return Err(AppError::Conflict(format!(
                "\"{}\" by {} already exists",
                dup.title, dup.author
            )));
        }

        books.insert(book.id.clone(), book.clone());
        tracing::debug!("Updated book id={}", book.id);

        Ok(SavedBook {
            book: book.clone(),
            message: None,
        })
    }
}
