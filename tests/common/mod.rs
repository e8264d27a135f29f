#![allow(dead_code)]

use std::{collections::HashMap, fs, path::Path};

use chrono::NaiveDate;
use paperwork_core::{
    classifier::Classifier, document::DocumentRecord, errors::ExtractionError,
    extract::TextExtractor, processor::DocumentProcessor,
};

/// Uses the file's contents as its extracted text.
pub struct ContentsExtractor;

impl TextExtractor for ContentsExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        fs::read_to_string(path).map_err(|err| ExtractionError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Answers from a fixed table keyed by document text.
#[derive(Default)]
pub struct ScriptedClassifier {
    answers: HashMap<String, DocumentRecord>,
}

impl ScriptedClassifier {
    pub fn with(mut self, text: &str, record: DocumentRecord) -> Self {
        self.answers.insert(text.to_string(), record);
        self
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&self, text: &str) -> DocumentRecord {
        self.answers
            .get(text.trim())
            .cloned()
            .unwrap_or_else(DocumentRecord::unknown)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Classifier covering the documents used across the integration tests.
pub fn office_classifier() -> ScriptedClassifier {
    ScriptedClassifier::default()
        .with(
            "HSBC STATEMENT",
            DocumentRecord::BankStatement {
                bank_name: Some("HSBC".into()),
                start_date: Some(date(2024, 1, 1)),
                end_date: Some(date(2024, 1, 31)),
            },
        )
        .with(
            "AMAZON RECEIPT",
            DocumentRecord::Expense {
                vendor: Some("Amazon".into()),
                date: Some(date(2024, 2, 5)),
            },
        )
        .with(
            "UBER EATS RECEIPT",
            DocumentRecord::Expense {
                vendor: Some("Uber Eats".into()),
                date: Some(date(2024, 3, 28)),
            },
        )
        .with("INVOICE 001", DocumentRecord::OutgoingInvoice)
}

pub fn processor(preview: bool) -> DocumentProcessor {
    DocumentProcessor::new(
        Box::new(ContentsExtractor),
        Box::new(office_classifier()),
        preview,
    )
}
