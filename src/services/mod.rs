//! Business logic services

pub mod books;

pub use books::{BookActions, BookService};
