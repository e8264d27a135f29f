//! Reconciliation of recognised expenses against an external ledger sheet.

pub mod dates;
pub mod matcher;
pub mod table;

pub use matcher::{
    find_matches, mark_uploaded, LedgerMatch, LedgerSchema, DATE_COLUMN, DESCRIPTION_COLUMN,
    UPLOADED_COLUMN, UPLOADED_MARK,
};
pub use table::{CellValue, LedgerTable};

use std::{collections::BTreeSet, path::Path};

use tracing::{info, warn};

use crate::{document::ExpenseInfo, errors::LedgerError, storage::LedgerStore};

/// Result of one matching pass.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    pub matches: Vec<LedgerMatch>,
    /// Distinct ledger rows covered by `matches`.
    pub rows_marked: usize,
    /// The ledger had no `Uploaded` column.
    pub uploaded_column_missing: bool,
    /// The ledger file was rewritten.
    pub persisted: bool,
}

/// Loads the ledger at `path`, matches `expenses` against it and, unless
/// previewing, marks the matched rows and writes the whole ledger back.
///
/// All matches are computed before the ledger is touched. Nothing is
/// written when there are no matches.
pub fn reconcile(
    store: &dyn LedgerStore,
    path: &Path,
    expenses: &[ExpenseInfo],
    preview: bool,
) -> Result<MatchReport, LedgerError> {
    if !path.is_file() {
        return Err(LedgerError::NotFound(path.to_path_buf()));
    }
    let mut table = store.load(path)?;
    let matches = find_matches(&table, expenses)?;

    let uploaded_column_missing = table.column(UPLOADED_COLUMN).is_none();
    if uploaded_column_missing {
        warn!(path = %path.display(), "ledger has no '{UPLOADED_COLUMN}' column; it will be created");
    }

    let rows_marked = matches
        .iter()
        .map(|m| m.row)
        .collect::<BTreeSet<_>>()
        .len();
    info!(matches = matches.len(), rows = rows_marked, preview, "ledger matching finished");

    let mut report = MatchReport {
        matches,
        rows_marked,
        uploaded_column_missing,
        persisted: false,
    };
    if preview || report.matches.is_empty() {
        return Ok(report);
    }

    mark_uploaded(&mut table, &report.matches);
    store.save(&table, path)?;
    report.persisted = true;
    Ok(report)
}
