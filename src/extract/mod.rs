//! Text extraction from document files.

use std::{
    fs,
    panic::{self, AssertUnwindSafe},
    path::Path,
};

use tracing::{debug, warn};

use crate::errors::ExtractionError;

/// Pulls plain text out of a document file.
pub trait TextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Native text layer extraction for PDFs via `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = fs::read(path).map_err(|err| ExtractionError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        debug!(path = %path.display(), size = bytes.len(), "extracting PDF text");

        // pdf-extract can panic on malformed fonts
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }));

        match result {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(err)) => {
                warn!(path = %path.display(), error = %err, "could not read PDF");
                Err(ExtractionError::Unreadable {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })
            }
            Err(_) => {
                warn!(path = %path.display(), "PDF extraction panicked");
                Err(ExtractionError::Panicked(path.to_path_buf()))
            }
        }
    }
}

/// Keeps at most `limit` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        let err = PdfTextExtractor::new().extract_text(&missing).unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable { .. }));
    }

    #[test]
    fn garbage_bytes_do_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();
        assert!(PdfTextExtractor::new().extract_text(&path).is_err());
    }
}
