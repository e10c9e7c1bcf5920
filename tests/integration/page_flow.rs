//! End-to-end page flows over the in-memory repository

use std::sync::Arc;
use std::time::Duration;

use book_form::{
    cli,
    config::FormConfig,
    form::{CancelOutcome, SubmissionState},
    models::{ApiError, Book, BookField, FormMode},
    repository::{BookRepository, InMemoryBookRepository},
    services::BookService,
    BookPage,
};

fn book(title: &str, author: &str, year: &str) -> Book {
    Book {
        id: String::new(),
        title: title.into(),
        author: author.into(),
        year: year.into(),
    }
}

async fn page_with(settings: FormConfig) -> (BookPage, Arc<InMemoryBookRepository>) {
    let repo = Arc::new(InMemoryBookRepository::with_books([
        book("Laskar Pelangi", "Andrea Hirata", "2005"),
        book("Bumi Manusia", "Pramoedya Ananta Toer", "1980"),
    ]));
    let dyn_repo: Arc<dyn BookRepository> = repo.clone();
    let actions = Arc::new(BookService::new(dyn_repo.clone()));
    let page = BookPage::load(dyn_repo, actions, settings).await.unwrap();
    (page, repo)
}

#[tokio::test(start_paused = true)]
async fn test_edit_then_reset() {
    let (mut page, repo) = page_with(FormConfig::default()).await;
    let id = page.books()[1].id.clone();

    let form = page.open_edit(&id).unwrap();
    assert_eq!(form.mode(), FormMode::Edit);
    form.on_field_change("title", "Bumi Manusia (Tetralogi Buru #1)").unwrap();
    assert!(form.submit().await);
    assert_eq!(
        form.submission(),
        &SubmissionState::Succeeded {
            message: "Book updated successfully".into()
        }
    );
    assert!(cli::render_form(form).starts_with("=== Book updated successfully ==="));

    assert!(page.await_scheduled_reload().await.unwrap());
    assert!(!page.is_form_visible());
    assert_eq!(page.books()[1].title, "Bumi Manusia (Tetralogi Buru #1)");
    assert_eq!(repo.get_book(&id).await.unwrap().title, page.books()[1].title);
}

#[tokio::test]
async fn test_duplicate_create_keeps_form_open() {
    let (mut page, _) = page_with(FormConfig::default()).await;

    let form = page.open_create();
    form.on_field_change("title", "Laskar Pelangi").unwrap();
    form.on_field_change("author", "Andrea Hirata").unwrap();
    form.on_field_change("year", "2008").unwrap();
    form.submit().await;

    let notification = form.feedback().notification();
    assert!(notification.open);
    assert_eq!(notification.error.code, 409);
    assert!(!form.is_loading());
    assert_eq!(form.values().year, "2008");

    let rendered = cli::render_form(form);
    assert!(rendered.contains("[error 409]"));
    assert!(rendered.contains("[Save]"));

    assert!(!page.await_scheduled_reload().await.unwrap());
    assert_eq!(page.books().len(), 2);
}

#[tokio::test]
async fn test_invalid_create_shows_inline_hints() {
    let (mut page, _) = page_with(FormConfig::default()).await;

    let form = page.open_create();
    form.on_field_change("year", "abc").unwrap();
    form.submit().await;

    let feedback = form.feedback();
    assert_eq!(feedback.field_error(BookField::Title), Some("Title is required"));
    assert_eq!(feedback.field_error(BookField::Author), Some("Author is required"));
    assert_eq!(feedback.field_error(BookField::Year), Some("Year must be a number"));
    assert!(!feedback.notification().open);
    assert_eq!(feedback.notification().error, ApiError::default());

    // Fix the fields and resubmit from the same form
    form.on_field_change("title", "Ronggeng Dukuh Paruk").unwrap();
    form.on_field_change("author", "Ahmad Tohari").unwrap();
    form.on_field_change("year", "1982").unwrap();
    form.submit().await;
    assert!(form.feedback().success_dialog().open);
    assert!(form.feedback().field_errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_configured_reload_delay() {
    let settings = FormConfig {
        reload_delay_ms: 500,
        ..FormConfig::default()
    };
    let (mut page, _) = page_with(settings).await;

    let form = page.open_create();
    for (name, value) in [("title", "Saman"), ("author", "Ayu Utami"), ("year", "1998")] {
        form.on_field_change(name, value).unwrap();
    }
    form.submit().await;
    assert_eq!(form.scheduled_reload(), Some(Duration::from_millis(500)));

    let start = tokio::time::Instant::now();
    page.await_scheduled_reload().await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(500));
    assert_eq!(page.books().len(), 3);
}

#[tokio::test]
async fn test_cancel_uses_configured_prompt() {
    let settings = FormConfig {
        cancel_prompt: "Leave without saving?".into(),
        ..FormConfig::default()
    };
    let (mut page, _) = page_with(settings).await;
    page.open_create();

    let mut asked = None;
    let outcome = page.cancel_form(&mut |prompt: &str| {
        asked = Some(prompt.to_string());
        true
    });

    assert_eq!(outcome, Some(CancelOutcome::Left));
    assert_eq!(asked.as_deref(), Some("Leave without saving?"));
    assert!(!page.is_form_visible());
}
