#![allow(dead_code)]

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use arrow::{compute::concat_batches, record_batch::RecordBatch};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::{tempdir, TempDir};

/// Scratch input tree plus an output location, removed on drop.
pub struct Dataset {
    temp_dir: TempDir,
}

impl Dataset {
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("temp dir");
        fs::create_dir_all(temp_dir.path().join("input")).expect("create input dir");
        Self { temp_dir }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    pub fn output_path(&self) -> PathBuf {
        self.temp_dir.path().join("out").join("dataset.parquet")
    }

    /// Write `contents` at `rel` under the input directory, creating parents.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.input_dir().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write input file");
        path
    }
}

/// Read a whole archive back into one batch.
pub fn read_archive(path: &Path) -> RecordBatch {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path).expect("open archive"))
        .expect("parquet reader");
    let schema = builder.schema().clone();
    let batches: Vec<RecordBatch> = builder
        .build()
        .expect("build reader")
        .collect::<Result<_, _>>()
        .expect("decode batches");
    concat_batches(&schema, &batches).expect("concat batches")
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect()
}
