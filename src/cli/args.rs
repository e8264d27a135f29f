use std::path::PathBuf;

use clap::Parser;
use once_cell::sync::Lazy;

use crate::utils::build_info;

static LONG_VERSION: Lazy<String> = Lazy::new(|| build_info::current().to_string());

/// Classify, rename and file PDF documents, then reconcile expenses against a ledger.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "paperwork",
    version = build_info::VERSION,
    long_version = LONG_VERSION.as_str()
)]
pub struct Args {
    /// Folder containing the PDF files to process
    pub folder: PathBuf,

    /// Report what would happen without renaming, moving or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Ledger (.xlsx, .csv, ...) to mark matched expenses in
    #[arg(long, value_name = "PATH")]
    pub excel: Option<PathBuf>,

    /// Configuration file (defaults to ~/.paperwork/config.json)
    #[arg(long, value_name = "PATH", env = "PAPERWORK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "paperwork",
            "docs",
            "--dry-run",
            "--excel",
            "ledger.xlsx",
        ])
        .unwrap();
        assert_eq!(args.folder, PathBuf::from("docs"));
        assert!(args.dry_run);
        assert_eq!(args.excel, Some(PathBuf::from("ledger.xlsx")));
    }

    #[test]
    fn folder_is_required() {
        assert!(Args::try_parse_from(["paperwork"]).is_err());
    }
}
