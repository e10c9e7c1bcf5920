//! Data models for the book form

pub mod book;
pub mod submission;

// Re-export commonly used types
pub use book::{Book, BookField, FormMode};
pub use submission::{ApiError, FieldErrors, SubmissionResult};
