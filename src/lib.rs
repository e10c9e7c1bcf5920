//! Book Management System form client
//!
//! A headless implementation of the add/edit book form: field state, the
//! create/update submission flows, success/error feedback and the cancel
//! guard, plus the list page that mounts the form and resets after a save.

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod page;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use form::BookForm;
pub use page::BookPage;
