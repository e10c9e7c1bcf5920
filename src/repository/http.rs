//! JSON REST client for a remote book backend
//!
//! Resource layout:
//! - `GET  {base}/books`       -> `{ "data": [Book] }`
//! - `GET  {base}/books/{id}`  -> `{ "data": Book }`
//! - `POST {base}/books`       -> `{ "message": "...", "data": Book }`
//! - `PUT  {base}/books/{id}`  -> `{ "message": "...", "data": Book }`
//!
//! Failures carry `{ "code": u16, "message": "..." }`. A `422` may instead
//! carry `{ "errors": { "<field>": "<message>" } }`, which becomes a
//! validation failure rather than an operational error. Entries of `errors`
//! that do not name a form field (or whose message is not a string) are
//! ignored, so the rest of the body still counts.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use super::{BookRepository, SavedBook};
use crate::{
    config::BackendConfig,
    error::{AppError, AppResult},
    models::{ApiError, Book, BookField, FieldErrors},
};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<u16>,
    message: Option<String>,
    errors: Option<IndexMap<String, Value>>,
}

impl ErrorBody {
    fn field_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .flatten()
            .filter_map(|(name, message)| {
                let field = name.parse::<BookField>().ok()?;
                Some((field, message.as_str()?.to_string()))
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct HttpBookRepository {
    client: Client,
    base_url: Url,
}

impl HttpBookRepository {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::BadRequest(format!("Invalid backend URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::BadRequest(format!(
                "Invalid backend URL {}: not a base URL",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &BackendConfig) -> AppResult<Self> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the path is always editable
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn books_url(&self) -> Url {
        self.url_for(&["books"])
    }

    fn book_url(&self, id: &str) -> Url {
        self.url_for(&["books", id])
    }

    async fn read<T: DeserializeOwned>(response: Response) -> AppResult<Envelope<T>> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        tracing::debug!("Backend answered {}: {}", status, body);
        Err(error_from_body(status, &body))
    }
}

fn error_from_body(status: StatusCode, body: &str) -> AppError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let errors = parsed.field_errors();
        if !errors.is_empty() {
            return AppError::Validation(errors);
        }
    }

    AppError::Api(ApiError {
        code: parsed.code.unwrap_or(status.as_u16()),
        message: parsed
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string()),
    })
}

#[async_trait]
impl BookRepository for HttpBookRepository {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let response = self.client.get(self.books_url()).send().await?;
        Ok(Self::read::<Vec<Book>>(response).await?.data)
    }

    async fn get_book(&self, id: &str) -> AppResult<Book> {
        let response = self.client.get(self.book_url(id)).send().await?;
        Ok(Self::read::<Book>(response).await?.data)
    }

    async fn create_book(&self, book: &Book) -> AppResult<SavedBook> {
        tracing::debug!("POST {}", self.books_url());
        let response = self.client.post(self.books_url()).json(book).send().await?;
        let envelope = Self::read::<Book>(response).await?;
        Ok(SavedBook {
            book: envelope.data,
            message: envelope.message,
        })
    }

    async fn update_book(&self, book: &Book) -> AppResult<SavedBook> {
        if !book.has_id() {
            return Err(AppError::BadRequest("Cannot update a book without id".into()));
        }

        tracing::debug!("PUT {}", self.book_url(&book.id));
        let response = self.client.put(self.book_url(&book.id)).json(book).send().await?;
        let envelope = Self::read::<Book>(response).await?;
        Ok(SavedBook {
            book: envelope.data,
            message: envelope.message,
        })
    }
}
