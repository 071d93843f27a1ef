//! Document table: `Tag,id,title,variant fields…`
//!
//! Tags are `Book`, `Comic`, `Dictionary` and `Periodical`; unknown tags are
//! skipped on load. Book availability is not persisted, it is derived from
//! the open loans after loading.

use std::path::PathBuf;

use crate::error::AppResult;
use crate::models::{Document, DocumentKind};
use crate::validate::DATE_FORMAT;

#[derive(Debug, Clone)]
pub struct DocumentsTable {
    path: PathBuf,
}

impl DocumentsTable {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save<'a>(&self, rows: impl IntoIterator<Item = &'a Document>) -> AppResult<()> {
        super::save_table(&self.path, rows, encode)
    }

    pub fn load(&self) -> AppResult<Vec<Document>> {
        super::load_table(&self.path, decode)
    }
}

/// Render one document as a table line.
pub fn encode(doc: &Document) -> String {
    let tag = doc.kind.tag();
    match &doc.kind {
        DocumentKind::Book { author, .. } => {
            format!("{},{},{},{}", tag, doc.id, doc.title, author)
        }
        DocumentKind::Comic { writer, illustrator } => {
            format!("{},{},{},{},{}", tag, doc.id, doc.title, writer, illustrator)
        }
        DocumentKind::Dictionary { language } => {
            format!("{},{},{},{}", tag, doc.id, doc.title, language)
        }
        DocumentKind::Periodical { issued_on } => {
            format!(
                "{},{},{},{}",
                tag,
                doc.id,
                doc.title,
                issued_on.format(DATE_FORMAT)
            )
        }
    }
}

/// Parse one table line. Unknown tags, short lines and unparseable IDs yield
/// `None`; text and date payloads degrade through the document constructors.
pub fn decode(line: &str) -> Option<Document> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 4 {
        return None;
    }
    let id: i32 = parts[1].trim().parse().ok()?;
    let title = parts[2];
    match parts[0].trim() {
        "Book" => Some(Document::book(id, title, parts[3])),
        "Comic" => {
            if parts.len() < 5 {
                return None;
            }
            Some(Document::comic(id, title, parts[3], parts[4]))
        }
        "Dictionary" => Some(Document::dictionary(id, title, parts[3])),
        "Periodical" => Some(Document::periodical(id, title, Some(parts[3]))),
        _ => None,
    }
}
