//! Per-file lifecycle: extract, classify, name, rename and archive.

mod relocate;

pub use relocate::{move_file, relocate_to_month_folder, Relocation};

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    classifier::Classifier,
    document::{DocumentRecord, ExpenseInfo, FileTarget, NamedDocument},
    errors::{ExtractionError, FileError},
    extract::TextExtractor,
    naming::PlannedNames,
};

/// Terminal state of one processed file.
#[derive(Debug)]
pub enum FileStatus {
    /// Nothing to do for this kind of document.
    Skipped { reason: String },
    /// Renamed (or, in preview, would be renamed) to this path.
    Renamed { to: PathBuf },
    /// The file already carries its target name.
    AlreadyNamed,
    Failed(FileError),
}

impl FileStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, FileStatus::Failed(_))
    }
}

/// Everything decided about one file.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub source: PathBuf,
    pub record: Option<DocumentRecord>,
    pub status: FileStatus,
    pub relocation: Option<Relocation>,
    /// Set for expenses whose rename step succeeded.
    pub expense: Option<ExpenseInfo>,
    pub preview: bool,
}

impl ProcessOutcome {
    fn new(source: &Path, preview: bool) -> Self {
        Self {
            source: source.to_path_buf(),
            record: None,
            status: FileStatus::AlreadyNamed,
            relocation: None,
            expense: None,
            preview,
        }
    }

    fn fail(mut self, error: FileError) -> Self {
        warn!(file = %self.source.display(), error = %error, "file failed");
        self.status = FileStatus::Failed(error);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Where the file is (or would be) once processing finished.
    pub fn final_path(&self) -> &Path {
        if let Some(Relocation::Moved(path)) = &self.relocation {
            return path;
        }
        match &self.status {
            FileStatus::Renamed { to } => to,
            _ => &self.source,
        }
    }
}

/// Runs the per-file state machine against injected extraction and
/// classification capabilities.
///
/// In preview, renames and moves decided for earlier files are remembered so
/// later files resolve their names as they would in a real run.
pub struct DocumentProcessor {
    extractor: Box<dyn TextExtractor>,
    classifier: Box<dyn Classifier>,
    preview: bool,
    planned: PlannedNames,
}

impl DocumentProcessor {
    pub fn new(
        extractor: Box<dyn TextExtractor>,
        classifier: Box<dyn Classifier>,
        preview: bool,
    ) -> Self {
        Self {
            extractor,
            classifier,
            preview,
            planned: PlannedNames::default(),
        }
    }

    pub fn process(&mut self, path: &Path) -> ProcessOutcome {
        let outcome = ProcessOutcome::new(path, self.preview);
        info!(file = %path.display(), "processing");

        let text = match self.extractor.extract_text(path) {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => return outcome.fail(ExtractionError::NoText.into()),
            Err(err) => return outcome.fail(err.into()),
        };

        let record = self.classifier.classify(&text);
        debug!(file = %path.display(), kind = record.kind_label(), "classified");
        self.apply(outcome, path, record)
    }

    fn apply(
        &mut self,
        mut outcome: ProcessOutcome,
        path: &Path,
        record: DocumentRecord,
    ) -> ProcessOutcome {
        let named = match &record {
            DocumentRecord::OutgoingInvoice => Ok(None),
            DocumentRecord::Unknown { kind } => Err(FileError::UnknownType(kind.clone())),
            DocumentRecord::BankStatement {
                bank_name,
                start_date,
                end_date,
            } => NamedDocument::bank_statement(bank_name.as_deref(), *start_date, *end_date)
                .map(Some)
                .map_err(FileError::from),
            DocumentRecord::Expense { vendor, date } => {
                NamedDocument::expense(vendor.as_deref(), *date)
                    .map(Some)
                    .map_err(FileError::from)
            }
        };
        outcome.record = Some(record);

        let named = match named {
            Ok(Some(named)) => named,
            Ok(None) => {
                outcome.status = FileStatus::Skipped {
                    reason: "outgoing invoice".to_string(),
                };
                return outcome;
            }
            Err(err) => return outcome.fail(err),
        };

        let target = FileTarget::beside(path, named.base_name());
        let destination = match target.resolve(path.file_name(), &self.planned) {
            Ok(dest) => dest,
            Err(err) => return outcome.fail(err.into()),
        };

        let current = if destination == path {
            outcome.status = FileStatus::AlreadyNamed;
            path.to_path_buf()
        } else {
            if self.preview {
                self.planned.record_move(path, &destination);
            } else if let Err(err) = fs::rename(path, &destination) {
                return outcome.fail(FileError::Rename(err));
            }
            info!(
                from = %path.display(),
                to = %destination.display(),
                preview = self.preview,
                "renamed"
            );
            outcome.status = FileStatus::Renamed {
                to: destination.clone(),
            };
            destination
        };

        if let Some(expense) = named.expense_info() {
            outcome.relocation = Some(relocate_to_month_folder(
                &current,
                expense.date,
                self.preview,
                &mut self.planned,
            ));
            outcome.expense = Some(expense.clone());
        }
        outcome
    }
}
