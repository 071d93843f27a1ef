//! Library member model.

use chrono::NaiveDate;
use indexmap::IndexSet;
use std::fmt;

use crate::validate::today;

/// A registered library patron and the set of items they currently have out.
///
/// The borrowed set mirrors the open loans referencing this member; it is
/// maintained by the aggregate and rebuilt from the loans table on load.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub contact: Option<String>,
    pub registered_on: NaiveDate,
    borrowed: IndexSet<i32>,
}

impl Member {
    /// Construct a member. Empty names are tolerated but flagged, since the
    /// record is degraded for duplicate detection and display.
    pub fn new(id: i32, last_name: &str, first_name: &str, contact: Option<&str>) -> Self {
        let last_name = last_name.trim().to_string();
        let first_name = first_name.trim().to_string();
        if last_name.is_empty() || first_name.is_empty() {
            tracing::warn!(id, "member registered with an empty name");
        }
        Self {
            id,
            last_name,
            first_name,
            contact: contact
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            registered_on: today(),
            borrowed: IndexSet::new(),
        }
    }

    /// Rebuild a member from a persisted record, keeping its stored identity
    /// and registration date.
    pub fn from_record(
        id: i32,
        last_name: &str,
        first_name: &str,
        contact: Option<&str>,
        registered_on: NaiveDate,
    ) -> Self {
        let mut member = Self::new(id, last_name, first_name, contact);
        member.registered_on = registered_on;
        member
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Add an item to the open-loan set. Idempotent.
    pub fn record_loan(&mut self, item_id: i32) {
        self.borrowed.insert(item_id);
    }

    /// Remove an item from the open-loan set. Removing an absent ID is a
    /// no-op.
    pub fn release_loan(&mut self, item_id: i32) {
        self.borrowed.shift_remove(&item_id);
    }

    pub fn has_on_loan(&self, item_id: i32) -> bool {
        self.borrowed.contains(&item_id)
    }

    pub fn open_loan_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Same-person check used for duplicate registration: case-sensitive
    /// exact match on (last name, first name).
    pub fn same_name(&self, last_name: &str, first_name: &str) -> bool {
        self.last_name == last_name && self.first_name == first_name
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Member #{}] {} ({} on loan)",
            self.id,
            self.full_name(),
            self.open_loan_count()
        )
    }
}
