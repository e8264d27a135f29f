use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    document::{dotted_extension, FileTarget},
    errors::MoveError,
    naming::{month_folder_name, PlannedNames},
};

/// Where an expense file ended up after the monthly archive step.
#[derive(Debug)]
pub enum Relocation {
    /// Moved (or, in preview, would be moved) to this path.
    Moved(PathBuf),
    /// The file already sits in its month folder.
    InPlace,
    /// The move failed; the file stays where it was.
    Failed {
        destination: PathBuf,
        error: MoveError,
    },
}

impl Relocation {
    pub fn is_failed(&self) -> bool {
        matches!(self, Relocation::Failed { .. })
    }
}

/// Moves `file` into the `MM MonthName` folder beside it, named after `date`.
///
/// In preview the destination is computed the same way but nothing is
/// created or moved; the planned move is recorded in `planned` instead.
/// Failures are reported in the result and never undo an earlier rename.
pub fn relocate_to_month_folder(
    file: &Path,
    date: NaiveDate,
    preview: bool,
    planned: &mut PlannedNames,
) -> Relocation {
    let month = month_folder_name(date);
    let parent = file.parent().unwrap_or_else(|| Path::new(""));

    if parent.file_name() == Some(OsStr::new(&month)) {
        debug!(file = %file.display(), "already in month folder");
        return Relocation::InPlace;
    }

    let dest_folder = parent.join(&month);
    let file_name = file.file_name().unwrap_or_default();
    let intended = dest_folder.join(file_name);

    if !preview {
        if let Err(source) = fs::create_dir_all(&dest_folder) {
            return failed(
                intended,
                MoveError::CreateFolder {
                    path: dest_folder,
                    source,
                },
            );
        }
    }

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let target = FileTarget::new(&dest_folder, stem, dotted_extension(file));
    let destination = match target.resolve(None, planned) {
        Ok(path) => path,
        Err(err) => return failed(intended, err.into()),
    };

    if preview {
        planned.record_move(file, &destination);
        return Relocation::Moved(destination);
    }

    match move_file(file, &destination) {
        Ok(()) => {
            debug!(from = %file.display(), to = %destination.display(), "moved to month folder");
            Relocation::Moved(destination)
        }
        Err(err) => failed(destination, MoveError::Move(err)),
    }
}

fn failed(destination: PathBuf, error: MoveError) -> Relocation {
    warn!(destination = %destination.display(), error = %error, "could not move file to month folder");
    Relocation::Failed { destination, error }
}

/// Renames `from` to `to`, falling back to copy and delete when a plain
/// rename is not possible (for example across filesystems).
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !from.is_file() {
                return Err(rename_err);
            }
            fs::copy(from, to)?;
            if let Err(err) = fs::remove_file(from) {
                let _ = fs::remove_file(to);
                return Err(err);
            }
            Ok(())
        }
    }
}
