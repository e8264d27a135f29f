//! Classification adapter: turns document text into a [`DocumentRecord`].

mod anthropic;
mod prompt;
mod response;

pub use anthropic::AnthropicClassifier;
pub use prompt::build_prompt;
pub use response::parse_classification;

use crate::document::DocumentRecord;

/// Decides what kind of document a text belongs to.
///
/// Implementations must not fail: service or parsing problems degrade to
/// [`DocumentRecord::Unknown`].
pub trait Classifier {
    fn classify(&self, text: &str) -> DocumentRecord;
}
