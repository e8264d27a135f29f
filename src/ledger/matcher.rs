use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::{debug, warn};

use crate::{document::ExpenseInfo, errors::LedgerSchemaError};

use super::table::{CellValue, LedgerTable};

pub const DESCRIPTION_COLUMN: &str = "Description";
pub const DATE_COLUMN: &str = "Date";
pub const UPLOADED_COLUMN: &str = "Uploaded";
pub const UPLOADED_MARK: &str = "Yes";

/// Column positions the matcher relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSchema {
    pub description: usize,
    pub date: usize,
    pub uploaded: Option<usize>,
}

impl LedgerSchema {
    pub fn resolve(table: &LedgerTable) -> Result<Self, LedgerSchemaError> {
        let description = table
            .column(DESCRIPTION_COLUMN)
            .ok_or_else(|| LedgerSchemaError::MissingColumn(DESCRIPTION_COLUMN.into()))?;
        let date = table
            .column(DATE_COLUMN)
            .ok_or_else(|| LedgerSchemaError::MissingColumn(DATE_COLUMN.into()))?;
        Ok(Self {
            description,
            date,
            uploaded: table.column(UPLOADED_COLUMN),
        })
    }
}

/// One ledger row paired with one expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerMatch {
    pub row: usize,
    pub row_date: NaiveDate,
    pub description: String,
    pub expense: ExpenseInfo,
}

/// Pairs every expense with every row whose description contains the vendor
/// as a whole word and whose date falls in the same month and year.
///
/// No pair is preferred over another: a row can match several expenses and
/// an expense several rows. Rows without a readable date are skipped.
pub fn find_matches(
    table: &LedgerTable,
    expenses: &[ExpenseInfo],
) -> Result<Vec<LedgerMatch>, LedgerSchemaError> {
    let schema = LedgerSchema::resolve(table)?;

    let rows: Vec<(usize, NaiveDate, String)> = (0..table.len())
        .filter_map(|row| {
            let date_cell = table.cell(row, schema.date);
            match date_cell.as_date() {
                Some(date) => {
                    let description = table.cell(row, schema.description).to_string();
                    Some((row, date, description))
                }
                None => {
                    debug!(row, value = %date_cell, "skipping ledger row without a readable date");
                    None
                }
            }
        })
        .collect();

    let mut matches = Vec::new();
    for expense in expenses {
        let Some(pattern) = vendor_pattern(&expense.vendor) else {
            continue;
        };
        for (row, row_date, description) in &rows {
            if !same_month(*row_date, expense.date) {
                continue;
            }
            if pattern.is_match(&description.to_uppercase()) {
                matches.push(LedgerMatch {
                    row: *row,
                    row_date: *row_date,
                    description: description.clone(),
                    expense: expense.clone(),
                });
            }
        }
    }
    Ok(matches)
}

/// Sets `Uploaded` to `Yes` on every matched row, creating the column first
/// when the ledger lacks it. Returns the number of distinct rows marked.
pub fn mark_uploaded(table: &mut LedgerTable, matches: &[LedgerMatch]) -> usize {
    let col = table.ensure_column(UPLOADED_COLUMN);
    let mut rows: Vec<usize> = matches.iter().map(|m| m.row).collect();
    rows.sort_unstable();
    rows.dedup();
    for &row in &rows {
        table.set_cell(row, col, CellValue::text(UPLOADED_MARK));
    }
    rows.len()
}

fn vendor_pattern(vendor: &str) -> Option<Regex> {
    let needle = vendor.trim().to_uppercase();
    if needle.is_empty() {
        return None;
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(&needle))) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            warn!(vendor, error = %err, "could not build vendor pattern");
            None
        }
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
