//! Member table: `id,lastName,firstName,contact,registrationDate`
//!
//! The contact field may be empty. The borrowed set is not persisted; the
//! aggregate rebuilds it from the open loans after loading.

use std::path::PathBuf;

use crate::error::AppResult;
use crate::models::Member;
use crate::validate::{safe_date, DATE_FORMAT};

#[derive(Debug, Clone)]
pub struct MembersTable {
    path: PathBuf,
}

impl MembersTable {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save<'a>(&self, rows: impl IntoIterator<Item = &'a Member>) -> AppResult<()> {
        super::save_table(&self.path, rows, encode)
    }

    pub fn load(&self) -> AppResult<Vec<Member>> {
        super::load_table(&self.path, decode)
    }
}

pub fn encode(member: &Member) -> String {
    format!(
        "{},{},{},{},{}",
        member.id,
        member.last_name,
        member.first_name,
        member.contact.as_deref().unwrap_or(""),
        member.registered_on.format(DATE_FORMAT)
    )
}

/// Parse one member line. The ID must parse; a missing or malformed
/// registration date degrades to today.
pub fn decode(line: &str) -> Option<Member> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 3 {
        return None;
    }
    let id: i32 = parts[0].trim().parse().ok()?;
    let registered_on = safe_date(parts.get(4).copied(), None);
    Some(Member::from_record(
        id,
        parts[1],
        parts[2],
        parts.get(3).copied(),
        registered_on,
    ))
}
