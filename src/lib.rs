//! Biblio Library Management Core
//!
//! A small lending-library engine: catalogued documents, members and loans,
//! persisted to flat record files between runs. Presentation shells (CLI,
//! GUI) are external collaborators that drive the [`Library`] aggregate
//! through its public operations.

pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod repository;
pub mod validate;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use library::{Library, LibraryStats, LoanFilter};
