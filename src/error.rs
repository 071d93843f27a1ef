//! Error types for the Biblio core

use thiserror::Error;

/// Main application error type.
///
/// Business-rule rejections each get their own variant so callers can match
/// on the rule that fired; the `Display` text is the human-readable reason
/// handed to the presentation shell.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("member {0} not found")]
    MemberNotFound(i32),

    #[error("document {0} not found")]
    DocumentNotFound(i32),

    #[error("document {0} is not a book")]
    NotABook(i32),

    #[error("book {0} is not available")]
    BookUnavailable(i32),

    #[error("loan {0} not found")]
    LoanNotFound(i32),

    #[error("loan {0} already returned")]
    LoanAlreadyReturned(i32),

    #[error("member '{first} {last}' is already registered")]
    MemberAlreadyRegistered { last: String, first: String },

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
