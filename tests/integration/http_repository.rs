//! HTTP repository against an in-process REST backend

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use book_form::{
    models::{ApiError, Book, BookField, SubmissionResult},
    repository::{BookRepository, HttpBookRepository},
    services::{BookActions, BookService},
    AppError,
};

type Shelf = Arc<Mutex<Vec<Book>>>;

async fn list(State(shelf): State<Shelf>) -> Json<Value> {
    let books = shelf.lock().unwrap().clone();
    Json(json!({ "data": books }))
}

async fn fetch(State(shelf): State<Shelf>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    match shelf.lock().unwrap().iter().find(|b| b.id == id) {
        Some(book) => (StatusCode::OK, Json(json!({ "data": book }))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 404, "message": "Book not found" })),
        ),
    }
}

async fn create(State(shelf): State<Shelf>, Json(mut book): Json<Book>) -> (StatusCode, Json<Value>) {
    if book.title == "Conflict" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "code": 409, "message": "Conflict" })),
        );
    }
    if book.year.starts_with('3') {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "errors": { "year": "Year is in the future" } })),
        );
    }

    let mut shelf = shelf.lock().unwrap();
    book.id = format!("srv-{}", shelf.len() + 1);
    shelf.push(book.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Book saved", "data": book })),
    )
}

async fn update(
    State(shelf): State<Shelf>,
    Path(id): Path<String>,
    Json(book): Json<Book>,
) -> (StatusCode, Json<Value>) {
    let mut shelf = shelf.lock().unwrap();
    match shelf.iter_mut().find(|b| b.id == id) {
        Some(slot) => {
            *slot = book.clone();
            // Year goes back as a number, the way some backends store it
            let year: i64 = book.year.parse().unwrap_or_default();
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Book updated",
                    "data": { "id": book.id, "title": book.title, "author": book.author, "year": year }
                })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 404, "message": "Book not found" })),
        ),
    }
}

async fn serve(books: Vec<Book>) -> (String, Shelf) {
    let shelf: Shelf = Arc::new(Mutex::new(books));
    let app = Router::new()
        .route("/api/books", get(list).post(create))
        .route("/api/books/:id", put(update).get(fetch))
        .with_state(shelf.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api", addr), shelf)
}

fn book(id: &str, title: &str, year: &str) -> Book {
    Book {
        id: id.into(),
        title: title.into(),
        author: "N. K. Jemisin".into(),
        year: year.into(),
    }
}

fn client(base_url: &str) -> HttpBookRepository {
    HttpBookRepository::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_and_get() {
    let (url, _) = serve(vec![book("srv-1", "The Fifth Season", "2015")]).await;
    let repo = client(&url);

    let books = repo.list_books().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Fifth Season");

    assert_eq!(repo.get_book("srv-1").await.unwrap().year, "2015");

    let err = repo.get_book("srv-9").await.unwrap_err();
    assert!(matches!(err, AppError::Api(api) if api == ApiError::new(404, "Book not found")));
}

#[tokio::test]
async fn test_create_returns_backend_message() {
    let (url, shelf) = serve(Vec::new()).await;
    let service = BookService::new(Arc::new(client(&url)));

    let result = service.create(book("", "The Obelisk Gate", "2016")).await;
    assert_eq!(result, SubmissionResult::success("Book saved"));
    assert_eq!(shelf.lock().unwrap()[0].id, "srv-1");
}

#[tokio::test]
async fn test_update_accepts_numeric_year() {
    let (url, _) = serve(vec![book("srv-1", "The Stone Sky", "2017")]).await;
    let repo = client(&url);

    let saved = repo.update_book(&book("srv-1", "The Stone Sky", "2018")).await.unwrap();
    assert_eq!(saved.book.year, "2018");
    assert_eq!(saved.message.as_deref(), Some("Book updated"));
}

#[tokio::test]
async fn test_conflict_surfaces_code_and_message() {
    let (url, _) = serve(Vec::new()).await;
    let service = BookService::new(Arc::new(client(&url)));

    let result = service.create(book("", "Conflict", "2020")).await;
    assert_eq!(result, SubmissionResult::error(409, "Conflict"));
}

#[tokio::test]
async fn test_backend_field_errors() {
    let (url, _) = serve(Vec::new()).await;
    let service = BookService::new(Arc::new(client(&url)));

    match service.create(book("", "The City We Became", "3020")).await {
        SubmissionResult::ValidationFailed(errors) => {
            assert_eq!(errors.get(BookField::Year), Some("Year is in the future"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error_result() {
    // Bind and drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = BookService::new(Arc::new(client(&format!("http://{}/api", addr))));
    match service.create(book("", "The Fifth Season", "2015")).await {
        SubmissionResult::Error(api) => assert_eq!(api.code, 503),
        other => panic!("unexpected result: {other:?}"),
    }
}
