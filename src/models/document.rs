//! Catalog item model.
//!
//! The catalog is a closed set of document variants sharing an identity and
//! title; variant payloads live in [`DocumentKind`] and persistence/display
//! dispatch on the tag, never on open-ended subtyping.

use chrono::NaiveDate;
use std::fmt;

use crate::validate::{safe_date, safe_text, UNKNOWN};

/// A catalogued item.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i32,
    pub title: String,
    pub kind: DocumentKind,
}

/// Variant-specific payload of a catalog item.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    Book {
        author: String,
        /// True iff no open loan currently references this book.
        available: bool,
    },
    Comic {
        writer: String,
        illustrator: String,
    },
    Dictionary {
        language: String,
    },
    Periodical {
        issued_on: NaiveDate,
    },
}

impl DocumentKind {
    /// Persistence tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::Book { .. } => "Book",
            DocumentKind::Comic { .. } => "Comic",
            DocumentKind::Dictionary { .. } => "Dictionary",
            DocumentKind::Periodical { .. } => "Periodical",
        }
    }
}

impl Document {
    /// Construct a book. Garbage input degrades to sentinel values; the
    /// constructor always succeeds.
    pub fn book(id: i32, title: &str, author: &str) -> Self {
        Self {
            id,
            title: safe_text(Some(title), UNKNOWN),
            kind: DocumentKind::Book {
                author: safe_text(Some(author), UNKNOWN),
                available: true,
            },
        }
    }

    pub fn comic(id: i32, title: &str, writer: &str, illustrator: &str) -> Self {
        Self {
            id,
            title: safe_text(Some(title), UNKNOWN),
            kind: DocumentKind::Comic {
                writer: safe_text(Some(writer), UNKNOWN),
                illustrator: safe_text(Some(illustrator), UNKNOWN),
            },
        }
    }

    pub fn dictionary(id: i32, title: &str, language: &str) -> Self {
        Self {
            id,
            title: safe_text(Some(title), UNKNOWN),
            kind: DocumentKind::Dictionary {
                language: safe_text(Some(language), UNKNOWN),
            },
        }
    }

    /// Construct a periodical. An absent or unparseable issue date defaults
    /// to the creation day.
    pub fn periodical(id: i32, title: &str, issued_on: Option<&str>) -> Self {
        Self {
            id,
            title: safe_text(Some(title), UNKNOWN),
            kind: DocumentKind::Periodical {
                issued_on: safe_date(issued_on, None),
            },
        }
    }

    /// Whether this document is a book.
    pub fn is_book(&self) -> bool {
        matches!(self.kind, DocumentKind::Book { .. })
    }

    /// Availability of a book; non-books are never borrowable.
    pub fn is_available_book(&self) -> bool {
        matches!(
            self.kind,
            DocumentKind::Book {
                available: true,
                ..
            }
        )
    }

    /// Set the availability flag. No-op on non-books.
    pub fn set_available(&mut self, value: bool) {
        if let DocumentKind::Book { available, .. } = &mut self.kind {
            *available = value;
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DocumentKind::Book { author, available } => {
                let status = if *available { "available" } else { "on loan" };
                write!(
                    f,
                    "[Book #{}] '{}' by {} ({})",
                    self.id, self.title, author, status
                )
            }
            DocumentKind::Comic { writer, illustrator } => write!(
                f,
                "[Comic #{}] '{}' written by {}, drawn by {}",
                self.id, self.title, writer, illustrator
            ),
            DocumentKind::Dictionary { language } => write!(
                f,
                "[Dictionary #{}] '{}' ({})",
                self.id, self.title, language
            ),
            DocumentKind::Periodical { issued_on } => write!(
                f,
                "[Periodical #{}] '{}' issued {}",
                self.id, self.title, issued_on
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::today;

    #[test]
    fn book_defaults_to_available() {
        let book = Document::book(1, "Dune", "Frank Herbert");
        assert!(book.is_book());
        assert!(book.is_available_book());
    }

    #[test]
    fn blank_fields_degrade_to_sentinel() {
        let book = Document::book(1, "   ", "");
        assert_eq!(book.title, UNKNOWN);
        assert!(matches!(book.kind, DocumentKind::Book { ref author, .. } if author == UNKNOWN));
    }

    #[test]
    fn periodical_defaults_issue_date_to_today() {
        let journal = Document::periodical(2, "Le Monde", Some("not a date"));
        assert!(
            matches!(journal.kind, DocumentKind::Periodical { issued_on } if issued_on == today())
        );
    }

    #[test]
    fn set_available_ignores_non_books() {
        let mut dict = Document::dictionary(3, "Larousse", "French");
        dict.set_available(true);
        assert!(!dict.is_available_book());
    }
}
