//! Data models for Biblio

pub mod document;
pub mod loan;
pub mod member;
pub mod sequence;

// Re-export commonly used types
pub use document::{Document, DocumentKind};
pub use loan::{Loan, DEFAULT_OVERDUE_THRESHOLD_DAYS};
pub use member::Member;
pub use sequence::IdSequence;
