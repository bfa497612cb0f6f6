// src/scan.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::trace;
use walkdir::WalkDir;

use crate::{
    config::ScanOrder,
    error::{ConvertError, Result},
};

/// Case-sensitive suffix of the files picked up by the scanner.
pub const CSV_SUFFIX: &str = ".csv";

/// Lazily walk `root` recursively, yielding every file whose name ends in `.csv`.
///
/// Symlinks to files are yielded like regular files. Symlinked directories
/// are not followed.
///
/// The root is checked up front so a missing or unreadable directory fails
/// before anything is processed. Errors hit mid-walk are yielded in place.
pub fn csv_files(root: &Path, order: ScanOrder) -> Result<impl Iterator<Item = Result<PathBuf>>> {
    let meta = fs::metadata(root).map_err(|source| ConvertError::InputAccess {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ConvertError::NotADirectory(root.to_path_buf()));
    }

    let walker = match order {
        ScanOrder::Sorted => WalkDir::new(root).sort_by_file_name(),
        ScanOrder::Filesystem => WalkDir::new(root),
    };

    Ok(walker.into_iter().filter_map(|entry| match entry {
        Ok(entry) => {
            // Symlinked files are kept; symlinked directories are neither kept nor descended.
            let is_dir = if entry.path_is_symlink() {
                entry.path().is_dir()
            } else {
                entry.file_type().is_dir()
            };
            let is_csv = !is_dir && entry.file_name().to_string_lossy().ends_with(CSV_SUFFIX);
            if !is_csv {
                trace!(path = %entry.path().display(), "skipping");
                return None;
            }
            Some(Ok(entry.into_path()))
        }
        Err(err) => {
            let path = err.path().map(Path::to_path_buf).unwrap_or_default();
            Some(Err(ConvertError::InputAccess {
                path,
                source: err.into(),
            }))
        }
    }))
}
