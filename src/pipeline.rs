// src/pipeline.rs

use std::{path::PathBuf, time::Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{ConvertError, FileNameError, Result},
    filename::RecordingMeta,
    process::{combine, load_table, tag_table, write_archive, SourceTable},
    scan,
};

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub files: usize,
    pub rows: usize,
    pub columns: usize,
    pub bytes_written: u64,
    pub output_path: PathBuf,
}

/// Task code of `meta`, failing when the file name carries none.
fn required_task_code<'a>(path: &std::path::Path, meta: &'a RecordingMeta) -> Result<&'a str> {
    meta.task_code
        .as_deref()
        .ok_or_else(|| ConvertError::FileName {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source: FileNameError::TooFewTokens {
                expected: 5,
                found: 4,
            },
        })
}

/// Scan → (extract + load)* → aggregate → write.
///
/// Every error aborts the run; nothing is written unless all files loaded.
#[tracing::instrument(level = "info", skip(config), fields(input = %config.input_dir.display()))]
pub fn convert(config: &Config) -> Result<ConversionSummary> {
    let start = Instant::now();
    let mut tables = Vec::new();

    for path in scan::csv_files(&config.input_dir, config.scan_order)? {
        let path = path?;
        info!(file = %path.display(), "processing");

        let meta = RecordingMeta::from_path(&path)?;
        let task_code = if config.include_task_code {
            Some(required_task_code(&path, &meta)?)
        } else {
            None
        };
        let table = load_table(&path, &config.policy)?;
        let batch = tag_table(&table, &meta, task_code)?;
        debug!(file = %path.display(), rows = batch.num_rows(), ?meta, "tagged");

        tables.push(SourceTable { path, batch });
    }

    if tables.is_empty() {
        return Err(ConvertError::NoInput(config.input_dir.clone()));
    }

    info!(files = tables.len(), "concatenating");
    let combined = combine(&tables, config.schema_mode)?;
    let files = tables.len();
    drop(tables);

    info!(
        rows = combined.num_rows(),
        output = %config.output_path.display(),
        "saving"
    );
    let bytes_written = write_archive(&combined, &config.output_path, config.compression)?;

    let summary = ConversionSummary {
        files,
        rows: combined.num_rows(),
        columns: combined.num_columns(),
        bytes_written,
        output_path: config.output_path.clone(),
    };
    info!(
        files = summary.files,
        rows = summary.rows,
        bytes = summary.bytes_written,
        elapsed = ?start.elapsed(),
        "done"
    );
    Ok(summary)
}
