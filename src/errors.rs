use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal problems detected before any file is touched.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("folder does not exist: {0}")]
    FolderMissing(PathBuf),
    #[error("path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration file {path}: {message}")]
    Serde { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
    #[error("text extraction panicked for {0}")]
    Panicked(PathBuf),
    #[error("no text could be extracted")]
    NoText,
}

/// Failures of the classification round trip. These never leave the
/// classifier adapter; they are logged and turned into an unknown record.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("response contained no text")]
    EmptyResponse,
    #[error("could not parse response as JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("response JSON is not an object")]
    NotAnObject,
}

/// Required fields a recognised document kind can be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    BankName,
    StatementRange,
    Vendor,
    DocumentDate,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MissingField::BankName => "could not identify bank name",
            MissingField::StatementRange => "could not identify statement date range",
            MissingField::Vendor => "could not identify vendor name",
            MissingField::DocumentDate => "could not identify document date",
        };
        f.write_str(text)
    }
}

/// Every candidate name from `base.ext` to `base_999.ext` is already taken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("too many duplicates for {base}")]
pub struct TooManyDuplicates {
    pub base: String,
}

/// Reasons a single file ends up in the `Failed` state.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not extract text from PDF: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("{0}")]
    MissingField(MissingField),
    #[error("unknown document type: {0}")]
    UnknownType(String),
    #[error(transparent)]
    NameCollisionExhausted(#[from] TooManyDuplicates),
    #[error("failed to rename: {0}")]
    Rename(#[source] io::Error),
}

impl From<MissingField> for FileError {
    fn from(field: MissingField) -> Self {
        FileError::MissingField(field)
    }
}

/// Relocation into a monthly folder failed. Reported as a warning only.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("failed to create folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to move file: {0}")]
    Move(#[source] io::Error),
    #[error("destination folder is full: {0}")]
    NameCollisionExhausted(#[from] TooManyDuplicates),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerSchemaError {
    #[error("ledger must have a '{0}' column")]
    MissingColumn(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger file not found: {0}")]
    NotFound(PathBuf),
    #[error("unsupported ledger format: {0}")]
    UnsupportedFormat(String),
    #[error("cannot write {0} ledgers; save it as .xlsx or .csv")]
    ReadOnlyFormat(String),
    #[error("ledger has no sheets")]
    EmptyWorkbook,
    #[error("ledger sheet exceeds spreadsheet limits at row {row}, column {col}")]
    SheetTooLarge { row: usize, col: usize },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet read error: {0}")]
    SpreadsheetRead(String),
    #[error("spreadsheet write error: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Schema(#[from] LedgerSchemaError),
}
