pub mod csv_backend;
pub mod xlsx_backend;

use std::path::{Path, PathBuf};

use crate::{errors::LedgerError, ledger::LedgerTable};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Reads a ledger file completely and writes it back as a whole.
pub trait LedgerStore {
    fn load(&self, path: &Path) -> Result<LedgerTable>;
    fn save(&self, table: &LedgerTable, path: &Path) -> Result<()>;
}

pub use csv_backend::CsvStore;
pub use xlsx_backend::XlsxStore;

/// Picks the backend for a ledger file from its extension.
pub fn store_for(path: &Path) -> Result<Box<dyn LedgerStore>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(Box::new(CsvStore)),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(Box::new(XlsxStore)),
        other => Err(LedgerError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            format!(".{other}")
        })),
    }
}

/// Sibling path used to stage a write before renaming over the original.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
