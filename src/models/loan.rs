//! Loan (borrow) model.

use chrono::NaiveDate;
use std::fmt;

use crate::error::{AppError, AppResult};
use crate::validate::today;

/// Default number of days a book may be out before it counts as overdue.
pub const DEFAULT_OVERDUE_THRESHOLD_DAYS: i64 = 30;

/// A borrowing transaction linking a member and a book, by ID only.
///
/// A loan is open while `returned_on` is `None`. Closing is one-way: there is
/// no reopening, and closing an already-closed loan is rejected so a return
/// can never be back-dated.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: i32,
    pub member_id: i32,
    pub item_id: i32,
    pub started_on: NaiveDate,
    pub returned_on: Option<NaiveDate>,
}

impl Loan {
    /// Open a new loan starting today.
    pub fn new(id: i32, member_id: i32, item_id: i32) -> Self {
        Self {
            id,
            member_id,
            item_id,
            started_on: today(),
            returned_on: None,
        }
    }

    /// Rebuild a loan from a persisted record.
    pub fn from_record(
        id: i32,
        member_id: i32,
        item_id: i32,
        started_on: NaiveDate,
        returned_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            member_id,
            item_id,
            started_on,
            returned_on,
        }
    }

    pub fn is_open(&self) -> bool {
        self.returned_on.is_none()
    }

    /// Close the loan, stamping today as the return date.
    pub fn close(&mut self) -> AppResult<()> {
        if self.returned_on.is_some() {
            return Err(AppError::LoanAlreadyReturned(self.id));
        }
        self.returned_on = Some(today());
        Ok(())
    }

    /// Whole days on loan: today − start while open, return − start once
    /// closed.
    pub fn days_on_loan(&self) -> i64 {
        let end = self.returned_on.unwrap_or_else(today);
        (end - self.started_on).num_days()
    }

    /// An open loan out for strictly more than `threshold_days`.
    pub fn is_overdue(&self, threshold_days: i64) -> bool {
        self.is_open() && self.days_on_loan() > threshold_days
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.returned_on {
            Some(returned) => write!(
                f,
                "[Loan #{}] member #{} had item #{} ({} to {})",
                self.id, self.member_id, self.item_id, self.started_on, returned
            ),
            None => write!(
                f,
                "[Loan #{}] member #{} has item #{} (since {})",
                self.id, self.member_id, self.item_id, self.started_on
            ),
        }
    }
}
