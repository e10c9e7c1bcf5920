//! Book form - terminal client for the Book Management System

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use book_form::{
    cli::{self, Command},
    config::{AppConfig, BackendKind},
    models::Book,
    repository::{BookRepository, HttpBookRepository, InMemoryBookRepository},
    services::BookService,
    BookPage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config);

    tracing::info!("Starting book-form v{}", env!("CARGO_PKG_VERSION"));

    let repository: Arc<dyn BookRepository> = match config.backend.kind {
        BackendKind::Memory => Arc::new(InMemoryBookRepository::with_books(sample_books())),
        BackendKind::Http => {
            tracing::info!("Using backend at {}", config.backend.base_url);
            Arc::new(HttpBookRepository::from_config(&config.backend)?)
        }
    };
    let actions = Arc::new(BookService::new(repository.clone()));
    let mut page = BookPage::load(repository, actions, config.form.clone()).await?;

    println!("{}", cli::render_list(page.books()));
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", cli::HELP),
            Command::List => {
                if let Err(e) = page.refresh().await {
                    tracing::warn!("Failed to refresh book list: {}", e);
                    println!("Could not refresh the list ({}). Showing the last loaded books.", e);
                }
                println!("{}", cli::render_list(page.books()));
            }
            Command::Add => println!("{}", cli::render_form(page.open_create())),
            Command::Edit(id) => match page.open_edit(&id) {
                Ok(form) => println!("{}", cli::render_form(form)),
                Err(e) => println!("{}", e),
            },
            Command::Set { field, value } => match page.form_mut() {
                Some(form) => match form.on_field_change(&field, value) {
                    Ok(()) => println!("{}", cli::render_form(form)),
                    Err(e) => println!("{}", e),
                },
                None => println!("No form open. Type `add` or `edit <id>`."),
            },
            Command::Save => {
                let Some(form) = page.form_mut() else {
                    println!("No form open.");
                    continue;
                };
                form.submit().await;
                println!("{}", cli::render_form(form));

                match page.await_scheduled_reload().await {
                    Ok(true) => println!("{}", cli::render_list(page.books())),
                    Ok(false) => {}
                    Err(e) => {
                        tracing::error!("Reload after save failed: {}", e);
                        println!("Saved, but the list could not be reloaded ({}). Type `list` to retry.", e);
                    }
                }
            }
            Command::Cancel => {
                let outcome = page.cancel_form(&mut cli::confirm_on_terminal);
                match outcome {
                    Some(_) if !page.is_form_visible() => {
                        println!("{}", cli::render_list(page.books()))
                    }
                    Some(_) => {}
                    None => println!("No form open."),
                }
            }
            Command::Dismiss => {
                if let Some(form) = page.form_mut() {
                    form.dismiss_notification();
                    println!("{}", cli::render_form(form));
                }
            }
            Command::Show => match page.form() {
                Some(form) => println!("{}", cli::render_form(form)),
                None => println!("{}", cli::render_list(page.books())),
            },
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("book_form={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn sample_books() -> Vec<Book> {
    [
        ("Laskar Pelangi", "Andrea Hirata", "2005"),
        ("Bumi Manusia", "Pramoedya Ananta Toer", "1980"),
        ("Cantik Itu Luka", "Eka Kurniawan", "2002"),
    ]
    .into_iter()
    .map(|(title, author, year)| Book {
        id: String::new(),
        title: title.to_string(),
        author: author.to_string(),
        year: year.to_string(),
    })
    .collect()
}
