//! Document records produced by classification and the values derived from them.

use std::{
    ffi::OsStr,
    fmt,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    errors::{MissingField, TooManyDuplicates},
    naming::{resolve_unique_name, sanitize_fragment, PlannedNames},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the classifier recognised in a document.
///
/// Fields are optional because the classifier may recognise a kind while
/// failing to read one of its fields; the processor turns a missing field
/// into a specific failure reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRecord {
    BankStatement {
        bank_name: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    },
    Expense {
        vendor: Option<String>,
        date: Option<NaiveDate>,
    },
    OutgoingInvoice,
    /// Anything else, keeping the kind string the classifier reported.
    Unknown { kind: String },
}

impl DocumentRecord {
    pub fn unknown() -> Self {
        DocumentRecord::Unknown {
            kind: "unknown".to_string(),
        }
    }

    pub fn kind_label(&self) -> &str {
        match self {
            DocumentRecord::BankStatement { .. } => "Bank Statement",
            DocumentRecord::Expense { .. } => "Expense",
            DocumentRecord::OutgoingInvoice => "Outgoing Invoice",
            DocumentRecord::Unknown { kind } => kind,
        }
    }
}

/// The part of an expense the ledger matcher needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInfo {
    pub vendor: String,
    pub date: NaiveDate,
}

impl ExpenseInfo {
    pub fn new(vendor: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            vendor: vendor.into(),
            date,
        }
    }
}

impl fmt::Display for ExpenseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.vendor, self.date.format(DATE_FORMAT))
    }
}

/// A fully validated record, ready to be turned into a filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedDocument {
    BankStatement {
        bank_name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    Expense(ExpenseInfo),
}

impl NamedDocument {
    pub fn bank_statement(
        bank_name: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, MissingField> {
        let bank_name = non_empty(bank_name).ok_or(MissingField::BankName)?;
        let (start_date, end_date) = start_date
            .zip(end_date)
            .ok_or(MissingField::StatementRange)?;
        Ok(NamedDocument::BankStatement {
            bank_name,
            start_date,
            end_date,
        })
    }

    pub fn expense(vendor: Option<&str>, date: Option<NaiveDate>) -> Result<Self, MissingField> {
        let vendor = non_empty(vendor).ok_or(MissingField::Vendor)?;
        let date = date.ok_or(MissingField::DocumentDate)?;
        Ok(NamedDocument::Expense(ExpenseInfo::new(vendor, date)))
    }

    /// Base filename without extension.
    pub fn base_name(&self) -> String {
        match self {
            NamedDocument::BankStatement {
                bank_name,
                start_date,
                end_date,
            } => format!(
                "{}_{}_{}",
                sanitize_fragment(bank_name),
                start_date.format(DATE_FORMAT),
                end_date.format(DATE_FORMAT)
            ),
            NamedDocument::Expense(info) => format!(
                "{}_{}",
                sanitize_fragment(&info.vendor),
                info.date.format(DATE_FORMAT)
            ),
        }
    }

    pub fn expense_info(&self) -> Option<&ExpenseInfo> {
        match self {
            NamedDocument::Expense(info) => Some(info),
            NamedDocument::BankStatement { .. } => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Desired location of a file before collision resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub folder: PathBuf,
    pub base_name: String,
    /// Extension including its leading dot, as found on the source file.
    pub extension: String,
}

impl FileTarget {
    pub fn new(
        folder: impl Into<PathBuf>,
        base_name: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            base_name: base_name.into(),
            extension: extension.into(),
        }
    }

    /// Target for `source` renamed to `base_name`, in the same folder and
    /// keeping the source extension's case.
    pub fn beside(source: &Path, base_name: impl Into<String>) -> Self {
        let folder = source.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::new(folder, base_name, dotted_extension(source))
    }

    /// Resolves a free path in the target folder. `current` names the file
    /// being moved, which never collides with itself.
    pub fn resolve(
        &self,
        current: Option<&OsStr>,
        planned: &PlannedNames,
    ) -> Result<PathBuf, TooManyDuplicates> {
        let name = resolve_unique_name(
            &self.folder,
            &self.base_name,
            &self.extension,
            current,
            planned,
        )?;
        Ok(self.folder.join(name))
    }
}

/// Extension of `path` with a leading dot, or an empty string.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
