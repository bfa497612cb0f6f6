// src/process/write.rs

use std::{fs, path::Path};

use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    config::Compression,
    error::{ConvertError, Result},
};

/// Write `batch` to a single Parquet file at `path`, replacing anything already there.
///
/// The data goes to a temporary file next to `path` first and is renamed into
/// place only once the writer has closed cleanly. Returns the archive size in bytes.
pub fn write_archive(batch: &RecordBatch, path: &Path, compression: Compression) -> Result<u64> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| ConvertError::Io {
        context: "creating directory",
        path: dir.to_path_buf(),
        source,
    })?;

    let write_err = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| ConvertError::Io {
        context: "creating temporary file in",
        path: dir.to_path_buf(),
        source,
    })?;

    let props = WriterProperties::builder()
        .set_compression(compression.to_parquet().map_err(write_err)?)
        .build();
    let mut writer =
        ArrowWriter::try_new(tmp.as_file_mut(), batch.schema(), Some(props)).map_err(write_err)?;
    writer.write(batch).map_err(write_err)?;
    writer.close().map_err(write_err)?;

    tmp.persist(path).map_err(|source| ConvertError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = fs::metadata(path)
        .map_err(|source| ConvertError::Io {
            context: "reading metadata of",
            path: path.to_path_buf(),
            source,
        })?
        .len();
    debug!(path = %path.display(), bytes, "archive written");
    Ok(bytes)
}
