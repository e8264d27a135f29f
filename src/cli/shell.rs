use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{error, info};

use crate::{
    batch::{collect_pdfs, run_batch},
    classifier::AnthropicClassifier,
    config::ConfigManager,
    errors::InputError,
    extract::PdfTextExtractor,
    ledger::reconcile,
    processor::DocumentProcessor,
    storage::store_for,
};

use super::{args::Args, output, report};

/// Runs one invocation end to end. Only startup problems are returned as
/// errors; per-file and ledger failures are reported and the run succeeds.
pub fn run(args: Args) -> Result<(), InputError> {
    let manager = match &args.config {
        Some(path) => ConfigManager::at(expand_home(path)),
        None => ConfigManager::new(),
    };
    let config = manager.load()?;

    let folder = validate_folder(&expand_home(&args.folder))?;
    let classifier = AnthropicClassifier::from_env(&config)?;
    let preview = args.dry_run;

    let files = collect_pdfs(&folder)?;
    if files.is_empty() {
        output::info(format!("No PDF files found in: {}", folder.display()));
        return Ok(());
    }
    info!(folder = %folder.display(), files = files.len(), preview, "starting batch");
    report::print_banner(&folder, files.len(), preview);

    let mut processor = DocumentProcessor::new(
        Box::new(PdfTextExtractor),
        Box::new(classifier),
        preview,
    );
    let summary = run_batch(&mut processor, &files, report::print_outcome);
    report::print_summary(&summary, preview);

    if let Some(ledger) = &args.excel {
        let expenses = summary.expenses();
        if expenses.is_empty() {
            output::info("No expenses to match against the ledger");
            return Ok(());
        }
        let ledger = expand_home(ledger);
        report::print_ledger_header(&ledger);
        let result = store_for(&ledger)
            .and_then(|store| reconcile(store.as_ref(), &ledger, &expenses, preview));
        match result {
            Ok(match_report) => report::print_match_report(&match_report, preview),
            Err(err) => {
                error!(ledger = %ledger.display(), error = %err, "ledger matching failed");
                output::error(err);
            }
        }
    }
    Ok(())
}

fn validate_folder(folder: &Path) -> Result<PathBuf, InputError> {
    if !folder.exists() {
        return Err(InputError::FolderMissing(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(InputError::NotADirectory(folder.to_path_buf()));
    }
    Ok(fs::canonicalize(folder)?)
}

/// Replaces a leading `~` with the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
