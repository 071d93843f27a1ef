//! The library aggregate.
//!
//! Owns the three entity collections and the ID sequences, enforces every
//! cross-entity rule (book availability, member borrow sets, loan lifecycle)
//! and drives the persistence round trip. Entities reference each other by
//! ID only; every lookup goes through the aggregate at the time of use.

use indexmap::IndexMap;

use crate::error::{AppError, AppResult};
use crate::models::{Document, IdSequence, Loan, Member};
use crate::repository::Repository;

/// Which loans to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanFilter {
    All,
    Open,
    Closed,
}

/// Headline counts for the whole library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStats {
    pub documents: usize,
    pub members: usize,
    pub open_loans: usize,
    pub overdue_loans: usize,
}

pub struct Library {
    name: String,
    documents: IndexMap<i32, Document>,
    members: IndexMap<i32, Member>,
    loans: IndexMap<i32, Loan>,
    document_ids: IdSequence,
    member_ids: IdSequence,
    loan_ids: IdSequence,
    repository: Repository,
}

impl Library {
    /// Create an empty library persisting into `repository`.
    pub fn new(name: &str, repository: Repository) -> Self {
        Self {
            name: name.to_string(),
            documents: IndexMap::new(),
            members: IndexMap::new(),
            loans: IndexMap::new(),
            document_ids: IdSequence::new(),
            member_ids: IdSequence::new(),
            loan_ids: IdSequence::new(),
            repository,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ── Document management ──────────────────────────────────────────

    pub fn add_book(&mut self, title: &str, author: &str) -> i32 {
        let id = self.document_ids.next_id();
        self.documents.insert(id, Document::book(id, title, author));
        id
    }

    pub fn add_comic(&mut self, title: &str, writer: &str, illustrator: &str) -> i32 {
        let id = self.document_ids.next_id();
        self.documents
            .insert(id, Document::comic(id, title, writer, illustrator));
        id
    }

    pub fn add_dictionary(&mut self, title: &str, language: &str) -> i32 {
        let id = self.document_ids.next_id();
        self.documents
            .insert(id, Document::dictionary(id, title, language));
        id
    }

    pub fn add_periodical(&mut self, title: &str, issued_on: Option<&str>) -> i32 {
        let id = self.document_ids.next_id();
        self.documents
            .insert(id, Document::periodical(id, title, issued_on));
        id
    }

    /// Remove a document. Does not cascade: a loan referencing the removed
    /// document keeps its dangling ID.
    pub fn remove_document(&mut self, id: i32) -> bool {
        self.documents.shift_remove(&id).is_some()
    }

    pub fn find_document(&self, id: i32) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Books currently on the shelf.
    pub fn available_books(&self) -> Vec<&Document> {
        self.documents
            .values()
            .filter(|doc| doc.is_available_book())
            .collect()
    }

    // ── Member management ────────────────────────────────────────────

    /// Register a member. Two members may never share the exact
    /// (last name, first name) pair.
    pub fn register_member(
        &mut self,
        last_name: &str,
        first_name: &str,
        contact: Option<&str>,
    ) -> AppResult<i32> {
        let last = last_name.trim();
        let first = first_name.trim();
        if self.members.values().any(|m| m.same_name(last, first)) {
            return Err(AppError::MemberAlreadyRegistered {
                last: last.to_string(),
                first: first.to_string(),
            });
        }
        let id = self.member_ids.next_id();
        self.members.insert(id, Member::new(id, last, first, contact));
        Ok(id)
    }

    /// Remove a member. No cascade, as for documents.
    pub fn remove_member(&mut self, id: i32) -> bool {
        self.members.shift_remove(&id).is_some()
    }

    pub fn find_member(&self, id: i32) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    // ── Loan management ──────────────────────────────────────────────

    /// Open a loan of `item_id` to `member_id`.
    ///
    /// Checks run in a fixed order and the first failure is the reported
    /// reason: member exists, document exists, document is a book, book is
    /// available. A rejected loan leaves all state untouched.
    pub fn create_loan(&mut self, member_id: i32, item_id: i32) -> AppResult<i32> {
        if !self.members.contains_key(&member_id) {
            return Err(AppError::MemberNotFound(member_id));
        }
        let document = self
            .documents
            .get(&item_id)
            .ok_or(AppError::DocumentNotFound(item_id))?;
        if !document.is_book() {
            return Err(AppError::NotABook(item_id));
        }
        if !document.is_available_book() {
            return Err(AppError::BookUnavailable(item_id));
        }

        let id = self.loan_ids.next_id();
        self.loans.insert(id, Loan::new(id, member_id, item_id));
        if let Some(document) = self.documents.get_mut(&item_id) {
            document.set_available(false);
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.record_loan(item_id);
        }
        Ok(id)
    }

    /// Close a loan and put the book back on the shelf.
    ///
    /// The book and the member may have been removed in the meantime; the
    /// return still succeeds, touching whichever side is still present.
    pub fn return_loan(&mut self, loan_id: i32) -> AppResult<()> {
        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(AppError::LoanNotFound(loan_id))?;
        loan.close()?;
        let (member_id, item_id) = (loan.member_id, loan.item_id);

        if let Some(document) = self.documents.get_mut(&item_id) {
            document.set_available(true);
        }
        if let Some(member) = self.members.get_mut(&member_id) {
            member.release_loan(item_id);
        }
        Ok(())
    }

    pub fn find_loan(&self, id: i32) -> Option<&Loan> {
        self.loans.get(&id)
    }

    pub fn loans(&self, filter: LoanFilter) -> Vec<&Loan> {
        self.loans
            .values()
            .filter(|loan| match filter {
                LoanFilter::All => true,
                LoanFilter::Open => loan.is_open(),
                LoanFilter::Closed => !loan.is_open(),
            })
            .collect()
    }

    pub fn overdue_loans(&self, threshold_days: i64) -> Vec<&Loan> {
        self.loans
            .values()
            .filter(|loan| loan.is_overdue(threshold_days))
            .collect()
    }

    /// Headline counts for the stats display.
    pub fn stats(&self, overdue_threshold_days: i64) -> LibraryStats {
        LibraryStats {
            documents: self.documents.len(),
            members: self.members.len(),
            open_loans: self.loans.values().filter(|l| l.is_open()).count(),
            overdue_loans: self
                .loans
                .values()
                .filter(|l| l.is_overdue(overdue_threshold_days))
                .count(),
        }
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Write all three tables. Each table is replaced atomically; in-memory
    /// state is untouched either way.
    pub fn save(&self) -> AppResult<()> {
        self.repository.members.save(self.members.values())?;
        self.repository.documents.save(self.documents.values())?;
        self.repository.loans.save(self.loans.values())?;
        tracing::info!(
            documents = self.documents.len(),
            members = self.members.len(),
            loans = self.loans.len(),
            "library saved"
        );
        Ok(())
    }

    /// Load all three tables into this (empty, startup-time) aggregate,
    /// resume the ID sequences past the stored records, and reconcile
    /// availability flags and member borrow sets from the open loans.
    pub fn load(&mut self) -> AppResult<()> {
        for member in self.repository.members.load()? {
            self.member_ids.advance_past(member.id);
            self.members.insert(member.id, member);
        }
        for document in self.repository.documents.load()? {
            self.document_ids.advance_past(document.id);
            self.documents.insert(document.id, document);
        }
        for loan in self.repository.loans.load()? {
            self.loan_ids.advance_past(loan.id);
            self.loans.insert(loan.id, loan);
        }
        self.reconcile();
        tracing::info!(
            documents = self.documents.len(),
            members = self.members.len(),
            loans = self.loans.len(),
            "library loaded"
        );
        Ok(())
    }

    /// Re-derive the state that is not persisted: a book is available iff no
    /// open loan references it, and each member's borrow set mirrors the open
    /// loans. Loans pointing at removed documents or members are tolerated.
    fn reconcile(&mut self) {
        for document in self.documents.values_mut() {
            document.set_available(true);
        }
        let open: Vec<(i32, i32)> = self
            .loans
            .values()
            .filter(|l| l.is_open())
            .map(|l| (l.member_id, l.item_id))
            .collect();
        for (member_id, item_id) in open {
            match self.documents.get_mut(&item_id) {
                Some(document) if document.is_book() => document.set_available(false),
                _ => tracing::warn!(item_id, "open loan references a missing or non-book item"),
            }
            match self.members.get_mut(&member_id) {
                Some(member) => member.record_loan(item_id),
                None => tracing::warn!(member_id, "open loan references a missing member"),
            }
        }
    }
}
