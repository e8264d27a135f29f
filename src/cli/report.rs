//! Console rendering of batch and ledger results.

use std::path::Path;

use crate::{
    batch::BatchSummary,
    document::{DocumentRecord, DATE_FORMAT},
    ledger::{LedgerMatch, MatchReport},
    processor::{FileStatus, ProcessOutcome, Relocation},
};

use super::output;

const DESCRIPTION_WIDTH: usize = 40;

pub fn print_banner(folder: &Path, files: usize, preview: bool) {
    output::info(format!("Found {files} PDF file(s) in {}", folder.display()));
    if preview {
        output::warning("DRY RUN - no files will be renamed");
    }
}

pub fn print_outcome(outcome: &ProcessOutcome) {
    output::section(format!("Processing: {}", file_name(&outcome.source)));

    if let Some(record) = &outcome.record {
        for line in record_lines(record) {
            output::info(format!("  {line}"));
        }
    }

    match &outcome.status {
        FileStatus::Skipped { reason } => output::info(format!("  Skipped ({reason})")),
        FileStatus::AlreadyNamed => output::info("  Already correctly named"),
        FileStatus::Renamed { to } if outcome.preview => {
            output::info(format!("  Would rename to: {}", file_name(to)))
        }
        FileStatus::Renamed { to } => output::success(format!("  Renamed to: {}", file_name(to))),
        FileStatus::Failed(err) => output::error(format!("  FAILED: {err}")),
    }

    match &outcome.relocation {
        Some(Relocation::Moved(dest)) if outcome.preview => {
            output::info(format!("  Would move to: {}", month_relative(dest)))
        }
        Some(Relocation::Moved(dest)) => {
            output::success(format!("  Moved to: {}", month_relative(dest)))
        }
        Some(Relocation::InPlace) => output::info("  Already in its month folder"),
        Some(Relocation::Failed { destination, error }) => output::warning(format!(
            "  Failed to move file to {}: {error}",
            month_relative(destination)
        )),
        None => {}
    }
}

pub fn print_summary(summary: &BatchSummary, preview: bool) {
    output::separator();
    output::info(format!(
        "Summary: {} successful, {} failed",
        summary.succeeded(),
        summary.failed()
    ));
    if preview {
        output::info("(Dry run - no files were actually renamed)");
    }
}

pub fn print_ledger_header(path: &Path) {
    output::separator();
    output::info(format!("Matching expenses against: {}", file_name(path)));
}

pub fn print_match_report(report: &MatchReport, preview: bool) {
    if report.uploaded_column_missing {
        output::warning("'Uploaded' column not found, creating it");
    }
    if report.matches.is_empty() {
        output::info("No matches found");
        return;
    }

    output::info(format!("\nMatches found ({}):", report.matches.len()));
    for m in &report.matches {
        output::info(format!("  {}", describe_match(m)));
    }

    if report.persisted {
        output::success(format!(
            "Ledger updated: {} row(s) marked as 'Yes' in Uploaded column",
            report.rows_marked
        ));
    } else if preview {
        output::info("(Dry run - ledger not modified)");
    }
    output::info(format!(
        "Matched {} expense(s) in ledger",
        report.matches.len()
    ));
}

fn record_lines(record: &DocumentRecord) -> Vec<String> {
    let or_missing = |value: Option<String>| value.unwrap_or_else(|| "?".to_string());
    let date = |value: Option<chrono::NaiveDate>| {
        or_missing(value.map(|d| d.format(DATE_FORMAT).to_string()))
    };
    match record {
        DocumentRecord::BankStatement {
            bank_name,
            start_date,
            end_date,
        } => vec![
            format!("Type: {}", record.kind_label()),
            format!("Bank: {}", or_missing(bank_name.clone())),
            format!("Period: {} to {}", date(*start_date), date(*end_date)),
        ],
        DocumentRecord::Expense { vendor, date: when } => vec![
            format!("Type: {}", record.kind_label()),
            format!("Vendor: {}", or_missing(vendor.clone())),
            format!("Date: {}", date(*when)),
        ],
        DocumentRecord::OutgoingInvoice => vec![format!("Type: {}", record.kind_label())],
        DocumentRecord::Unknown { .. } => Vec::new(),
    }
}

/// One report line: ledger description (truncated), row date, expense.
pub fn describe_match(m: &LedgerMatch) -> String {
    let description = truncate_description(&m.description);
    format!(
        "{description} ({}) <- {}",
        m.row_date.format(DATE_FORMAT),
        m.expense
    )
}

fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_WIDTH) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `MM MonthName/file.pdf` for a destination inside a month folder.
fn month_relative(path: &Path) -> String {
    match path.parent().and_then(Path::file_name) {
        Some(folder) => format!("{}/{}", folder.to_string_lossy(), file_name(path)),
        None => file_name(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ExpenseInfo;
    use chrono::NaiveDate;

    #[test]
    fn long_descriptions_are_cut_at_forty_chars() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let m = LedgerMatch {
            row: 0,
            row_date: date,
            description: "CARD PAYMENT TO UBER EATS LTD LONDON GB REF 0042".into(),
            expense: ExpenseInfo::new("Uber Eats", NaiveDate::from_ymd_opt(2024, 3, 28).unwrap()),
        };
        assert_eq!(
            describe_match(&m),
            "CARD PAYMENT TO UBER EATS LTD LONDON GB ... (2024-03-10) <- Uber Eats (2024-03-28)"
        );
    }

    #[test]
    fn short_descriptions_are_kept() {
        assert_eq!(truncate_description("TESCO"), "TESCO");
    }

    #[test]
    fn month_destination_is_shown_relative() {
        let path = Path::new("/docs/02 February/Amazon_2024-02-05.pdf");
        assert_eq!(month_relative(path), "02 February/Amazon_2024-02-05.pdf");
    }
}
