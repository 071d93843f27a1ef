//! Repository layer: line-oriented record tables on disk.
//!
//! One comma-delimited table per entity kind, written whole on save and read
//! line by line on load. Loading is tolerant (malformed lines are skipped
//! with a warning, a missing file is an empty table); saving goes through a
//! temporary sibling file and an atomic rename so a failed save never leaves
//! a half-written table.

pub mod documents;
pub mod loans;
pub mod members;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

pub const DOCUMENTS_FILE: &str = "documents.csv";
pub const MEMBERS_FILE: &str = "members.csv";
pub const LOANS_FILE: &str = "loans.csv";

/// Main repository struct bundling the three record tables
#[derive(Debug, Clone)]
pub struct Repository {
    pub documents: documents::DocumentsTable,
    pub members: members::MembersTable,
    pub loans: loans::LoansTable,
}

impl Repository {
    /// Create a repository rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            documents: documents::DocumentsTable::new(data_dir.join(DOCUMENTS_FILE)),
            members: members::MembersTable::new(data_dir.join(MEMBERS_FILE)),
            loans: loans::LoansTable::new(data_dir.join(LOANS_FILE)),
        }
    }
}

/// Read a whole table. A missing file is "no records", not an error.
pub(crate) fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Overwrite a table via a temporary sibling and an atomic rename.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

/// Decode every non-blank line of a table, skipping lines `decode` rejects.
pub(crate) fn load_table<T>(
    path: &Path,
    decode: impl Fn(&str) -> Option<T>,
) -> AppResult<Vec<T>> {
    let mut rows = Vec::new();
    for (lineno, line) in read_lines(path)?.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Some(row) => rows.push(row),
            None => tracing::warn!(
                file = %path.display(),
                line = lineno + 1,
                "skipping malformed record"
            ),
        }
    }
    Ok(rows)
}

/// Encode every row and overwrite the table.
pub(crate) fn save_table<T>(
    path: &Path,
    rows: impl IntoIterator<Item = T>,
    encode: impl Fn(T) -> String,
) -> AppResult<()> {
    let mut contents = String::new();
    for row in rows {
        contents.push_str(&encode(row));
        contents.push('\n');
    }
    write_atomic(path, &contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let lines = read_lines(&dir.path().join("absent.csv")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn write_atomic_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_atomic(&path, "one\ntwo\n").unwrap();
        write_atomic(&path, "three\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "three\n");
        assert!(!path.with_extension("tmp").exists());
    }
}
