// src/inspect.rs

//! Read back an archive's metadata and a summary of its recording columns.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::{self, File},
    path::Path,
};

use anyhow::{Context, Result};
use arrow::{
    array::AsArray,
    compute::cast,
    datatypes::{DataType, Int64Type},
};
use parquet::{
    arrow::arrow_reader::ParquetRecordBatchReaderBuilder,
    file::reader::{FileReader, SerializedFileReader},
};
use serde::Serialize;

use crate::schema::METADATA_COLUMNS;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnReport {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowGroupReport {
    pub rows: i64,
    pub compressed_bytes: i64,
    pub uncompressed_bytes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub created_by: Option<String>,
    pub rows: i64,
    pub file_bytes: u64,
    pub columns: Vec<ColumnReport>,
    pub row_groups: Vec<RowGroupReport>,
    /// Distinct values of each metadata column present in the archive.
    pub metadata_values: BTreeMap<String, BTreeSet<i64>>,
}

pub fn inspect_archive(path: &Path) -> Result<ArchiveReport> {
    let file_bytes = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();

    let reader = SerializedFileReader::new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    )
    .context("reading parquet footer")?;
    let meta = reader.metadata();
    let file_meta = meta.file_metadata();

    let row_groups = meta
        .row_groups()
        .iter()
        .map(|rg| {
            let compressed = rg.columns().iter().map(|c| c.compressed_size()).sum();
            RowGroupReport {
                rows: rg.num_rows(),
                compressed_bytes: compressed,
                uncompressed_bytes: rg.total_byte_size(),
            }
        })
        .collect();

    let builder = ParquetRecordBatchReaderBuilder::try_new(
        File::open(path).with_context(|| format!("opening {}", path.display()))?,
    )
    .context("reading arrow schema")?;
    let schema = builder.schema().clone();
    let columns = schema
        .fields()
        .iter()
        .map(|f| ColumnReport {
            name: f.name().clone(),
            data_type: f.data_type().to_string(),
            nullable: f.is_nullable(),
        })
        .collect();

    let present: Vec<&str> = METADATA_COLUMNS
        .iter()
        .copied()
        .filter(|name| schema.field_with_name(name).is_ok())
        .collect();
    let mut metadata_values: BTreeMap<String, BTreeSet<i64>> = present
        .iter()
        .map(|name| (name.to_string(), BTreeSet::new()))
        .collect();

    for batch in builder.build().context("building batch reader")? {
        let batch = batch.context("decoding batch")?;
        for name in &present {
            let Some(col) = batch.column_by_name(name) else {
                continue;
            };
            let wide = cast(col, &DataType::Int64)?;
            let values = metadata_values.entry(name.to_string()).or_default();
            values.extend(wide.as_primitive::<Int64Type>().iter().flatten());
        }
    }

    Ok(ArchiveReport {
        created_by: file_meta.created_by().map(str::to_string),
        rows: file_meta.num_rows(),
        file_bytes,
        columns,
        row_groups,
        metadata_values,
    })
}
