//! Filename construction: label sanitising, collision-free names and
//! monthly archive folder names.

pub mod month;
pub mod sanitize;
pub mod unique;

pub use month::{month_folder_name, month_name};
pub use sanitize::{sanitize_fragment, FALLBACK_FRAGMENT, MAX_FRAGMENT_LEN};
pub use unique::{resolve_unique_name, PlannedNames, MAX_DUPLICATE_SUFFIX};
