use std::{
    collections::HashSet,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use crate::errors::TooManyDuplicates;

/// Highest numeric suffix tried before giving up.
pub const MAX_DUPLICATE_SUFFIX: u32 = 999;

/// Renames and moves decided during a preview run but not performed.
///
/// A claimed path counts as taken and a vacated path as free, so a preview
/// resolves names the way the real run would after its earlier writes.
#[derive(Debug, Default, Clone)]
pub struct PlannedNames {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl PlannedNames {
    /// Records that `from` would be renamed or moved to `to`.
    pub fn record_move(&mut self, from: &Path, to: &Path) {
        self.claimed.remove(from);
        self.vacated.insert(from.to_path_buf());
        self.vacated.remove(to);
        self.claimed.insert(to.to_path_buf());
    }

    fn is_taken(&self, path: &Path) -> bool {
        if self.claimed.contains(path) {
            return true;
        }
        if self.vacated.contains(path) {
            return false;
        }
        fs::symlink_metadata(path).is_ok()
    }
}

/// Finds a filename in `folder` that does not exist yet.
///
/// Tries `base{ext}`, then `base_1{ext}`, `base_2{ext}` and so on up to
/// [`MAX_DUPLICATE_SUFFIX`]. `extension` carries its leading dot (or is empty).
/// When `current` is given, an entry with exactly that name is the file being
/// renamed and does not count as a collision. `planned` overlays changes a
/// preview has already decided on.
///
/// The check is not atomic: callers are expected to be the only writer in
/// `folder` while the name is used.
pub fn resolve_unique_name(
    folder: &Path,
    base: &str,
    extension: &str,
    current: Option<&OsStr>,
    planned: &PlannedNames,
) -> Result<String, TooManyDuplicates> {
    let is_free = |candidate: &str| {
        current == Some(OsStr::new(candidate)) || !planned.is_taken(&folder.join(candidate))
    };

    let first = format!("{base}{extension}");
    if is_free(&first) {
        return Ok(first);
    }

    for counter in 1..=MAX_DUPLICATE_SUFFIX {
        let candidate = format!("{base}_{counter}{extension}");
        if is_free(&candidate) {
            return Ok(candidate);
        }
    }

    Err(TooManyDuplicates {
        base: base.to_string(),
    })
}
