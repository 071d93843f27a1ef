//! Loan table: `id,memberId,itemId,startDate,endDate`
//!
//! The end-date field is empty while the loan is open. Loan records carry
//! the cross-entity references, so every ID and the start date must parse;
//! lines that fail are skipped rather than guessed at.

use std::path::PathBuf;

use crate::error::AppResult;
use crate::models::Loan;
use crate::validate::DATE_FORMAT;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct LoansTable {
    path: PathBuf,
}

impl LoansTable {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save<'a>(&self, rows: impl IntoIterator<Item = &'a Loan>) -> AppResult<()> {
        super::save_table(&self.path, rows, encode)
    }

    pub fn load(&self) -> AppResult<Vec<Loan>> {
        super::load_table(&self.path, decode)
    }
}

pub fn encode(loan: &Loan) -> String {
    let returned = loan
        .returned_on
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{}",
        loan.id,
        loan.member_id,
        loan.item_id,
        loan.started_on.format(DATE_FORMAT),
        returned
    )
}

pub fn decode(line: &str) -> Option<Loan> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 4 {
        return None;
    }
    let id: i32 = parts[0].trim().parse().ok()?;
    let member_id: i32 = parts[1].trim().parse().ok()?;
    let item_id: i32 = parts[2].trim().parse().ok()?;
    let started_on = NaiveDate::parse_from_str(parts[3].trim(), DATE_FORMAT).ok()?;
    let returned_on = match parts.get(4).map(|s| s.trim()) {
        None | Some("") => None,
        Some(s) => Some(NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?),
    };
    Some(Loan::from_record(id, member_id, item_id, started_on, returned_on))
}
