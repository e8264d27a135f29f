mod common;

use std::path::{Path, PathBuf};

use assert_fs::{prelude::*, TempDir};
use paperwork_core::{
    batch::{collect_pdfs, run_batch, BatchSummary},
    document::ExpenseInfo,
    processor::{FileStatus, Relocation},
};

use common::{date, processor};

fn office_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("scan_001.pdf").write_str("HSBC STATEMENT").unwrap();
    dir.child("scan_002.pdf").write_str("AMAZON RECEIPT").unwrap();
    dir.child("scan_003.PDF").write_str("INVOICE 001").unwrap();
    dir
}

fn run_folder(folder: &Path, preview: bool) -> BatchSummary {
    let files = collect_pdfs(folder).unwrap();
    run_batch(&mut processor(preview), &files, |_| {})
}

fn final_paths(summary: &BatchSummary, root: &Path) -> Vec<PathBuf> {
    summary
        .outcomes
        .iter()
        .map(|o| relative(root, o.final_path()))
        .collect()
}

fn relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap().to_path_buf()
}

#[test]
fn mixed_folder_is_named_and_filed() {
    let dir = office_folder();
    let files = collect_pdfs(dir.path()).unwrap();
    let summary = run_batch(&mut processor(false), &files, |_| {});

    assert_eq!(summary.succeeded(), 3);
    assert_eq!(summary.failed(), 0);

    dir.child("HSBC_2024-01-01_2024-01-31.pdf")
        .assert(predicates::path::exists());
    dir.child("02 February/Amazon_2024-02-05.pdf")
        .assert(predicates::path::exists());
    dir.child("scan_002.pdf").assert(predicates::path::missing());
    dir.child("scan_003.PDF").assert(predicates::path::exists());

    assert!(matches!(summary.outcomes[2].status, FileStatus::Skipped { .. }));
    assert_eq!(
        summary.expenses(),
        vec![ExpenseInfo::new("Amazon", date(2024, 2, 5))]
    );
}

#[test]
fn dry_run_plans_the_same_outcome_without_touching_files() {
    let preview_dir = office_folder();
    let live_dir = office_folder();

    let planned = run_folder(preview_dir.path(), true);
    let done = run_folder(live_dir.path(), false);

    assert_eq!(
        final_paths(&planned, preview_dir.path()),
        final_paths(&done, live_dir.path())
    );
    assert_eq!(planned.expenses(), done.expenses());

    for name in ["scan_001.pdf", "scan_002.pdf", "scan_003.PDF"] {
        preview_dir.child(name).assert(predicates::path::exists());
    }
    preview_dir
        .child("02 February")
        .assert(predicates::path::missing());
}

#[test]
fn second_run_over_filed_expense_is_stable() {
    let dir = TempDir::new().unwrap();
    dir.child("Amazon_2024-02-05.pdf")
        .write_str("AMAZON RECEIPT")
        .unwrap();

    let first = run_folder(dir.path(), false);
    assert!(matches!(first.outcomes[0].status, FileStatus::AlreadyNamed));
    assert!(matches!(first.outcomes[0].relocation, Some(Relocation::Moved(_))));

    let month = dir.child("02 February");
    let second = run_folder(month.path(), false);
    assert!(matches!(second.outcomes[0].status, FileStatus::AlreadyNamed));
    assert!(matches!(second.outcomes[0].relocation, Some(Relocation::InPlace)));
    month
        .child("Amazon_2024-02-05.pdf")
        .assert(predicates::path::exists());
    month.child("02 February").assert(predicates::path::missing());
}

#[test]
fn failures_are_counted_and_do_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    dir.child("a.pdf").write_str("PAYSLIP").unwrap();
    dir.child("b.pdf").write_str("   ").unwrap();
    dir.child("c.pdf").write_str("HSBC STATEMENT").unwrap();

    let summary = run_folder(dir.path(), false);
    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.succeeded(), 1);
    dir.child("a.pdf").assert(predicates::path::exists());
    dir.child("HSBC_2024-01-01_2024-01-31.pdf")
        .assert(predicates::path::exists());
}

fn duplicates_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("scan_001.pdf").write_str("HSBC STATEMENT").unwrap();
    dir.child("scan_002.pdf").write_str("HSBC STATEMENT").unwrap();
    dir.child("scan_003.pdf").write_str("AMAZON RECEIPT").unwrap();
    dir.child("scan_004.pdf").write_str("AMAZON RECEIPT").unwrap();
    dir
}

#[test]
fn dry_run_suffixes_duplicates_like_the_real_run() {
    let preview_dir = duplicates_folder();
    let live_dir = duplicates_folder();

    let planned = run_folder(preview_dir.path(), true);
    let done = run_folder(live_dir.path(), false);

    let expected: Vec<PathBuf> = [
        "HSBC_2024-01-01_2024-01-31.pdf",
        "HSBC_2024-01-01_2024-01-31_1.pdf",
        "02 February/Amazon_2024-02-05.pdf",
        "02 February/Amazon_2024-02-05_1.pdf",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(final_paths(&done, live_dir.path()), expected);
    assert_eq!(final_paths(&planned, preview_dir.path()), expected);
    preview_dir
        .child("02 February")
        .assert(predicates::path::missing());
}

#[test]
fn each_outcome_is_reported_as_soon_as_it_is_ready() {
    let dir = office_folder();
    let files = collect_pdfs(dir.path()).unwrap();

    let mut seen = Vec::new();
    let summary = run_batch(&mut processor(true), &files, |outcome| {
        seen.push(outcome.source.clone());
    });
    assert_eq!(seen, files);
    assert_eq!(summary.outcomes.len(), 3);
}
