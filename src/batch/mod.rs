//! Runs the processor over every PDF in a folder, in name order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    document::ExpenseInfo,
    processor::{DocumentProcessor, ProcessOutcome},
};

/// Aggregated result of one batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<ProcessOutcome>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Expenses collected from files that were renamed or already named.
    pub fn expenses(&self) -> Vec<ExpenseInfo> {
        self.outcomes
            .iter()
            .filter_map(|o| o.expense.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// PDF files directly inside `folder` (extension matched case-insensitively),
/// sorted by file name.
pub fn collect_pdfs(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Processes `files` one after another, handing each outcome to
/// `on_outcome` as soon as the file is done. A failing file never stops the
/// batch.
pub fn run_batch(
    processor: &mut DocumentProcessor,
    files: &[PathBuf],
    mut on_outcome: impl FnMut(&ProcessOutcome),
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for file in files {
        let outcome = processor.process(file);
        on_outcome(&outcome);
        summary.outcomes.push(outcome);
    }
    info!(
        total = summary.outcomes.len(),
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "batch finished"
    );
    summary
}
