// src/config.rs

use std::path::PathBuf;

use clap::ValueEnum;
use parquet::basic::{BrotliLevel, Compression as ParquetCompression, GzipLevel, ZstdLevel};
use parquet::errors::ParquetError;

use crate::schema::TypePolicy;

pub const DEFAULT_INPUT_DIR: &str = "dataset/gazebasevr";
pub const DEFAULT_OUTPUT_PATH: &str = "dataset/gazebasevr.parquet";

/// How differing column sets across input files are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaMode {
    /// Every file must carry the first file's columns; anything else fails.
    #[default]
    Strict,
    /// Union of all columns; missing values are null.
    Union,
}

/// Order in which files found by the scanner are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScanOrder {
    /// File-name order within each directory. Deterministic.
    #[default]
    Sorted,
    /// Whatever order the filesystem enumerates entries in.
    Filesystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Compression {
    #[default]
    Snappy,
    Zstd,
    Brotli,
    Gzip,
    None,
}

impl Compression {
    pub fn to_parquet(self) -> Result<ParquetCompression, ParquetError> {
        Ok(match self {
            Self::Snappy => ParquetCompression::SNAPPY,
            Self::Zstd => ParquetCompression::ZSTD(ZstdLevel::try_new(3)?),
            Self::Brotli => ParquetCompression::BROTLI(BrotliLevel::try_new(5)?),
            Self::Gzip => ParquetCompression::GZIP(GzipLevel::try_new(6)?),
            Self::None => ParquetCompression::UNCOMPRESSED,
        })
    }
}

/// Everything one conversion run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub policy: TypePolicy,
    pub schema_mode: SchemaMode,
    pub scan_order: ScanOrder,
    pub compression: Compression,
    /// Persist the task code token as a `task_code` column.
    pub include_task_code: bool,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            policy: TypePolicy::default(),
            schema_mode: SchemaMode::default(),
            scan_order: ScanOrder::default(),
            compression: Compression::default(),
            include_task_code: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::NumericType;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.input_dir, PathBuf::from("dataset/gazebasevr"));
        assert_eq!(cfg.output_path, PathBuf::from("dataset/gazebasevr.parquet"));
        assert_eq!(cfg.schema_mode, SchemaMode::Strict);
        assert_eq!(cfg.scan_order, ScanOrder::Sorted);
        assert_eq!(cfg.policy.type_for("n"), NumericType::Float64);
        assert!(!cfg.include_task_code);
    }

    #[test]
    fn compression_levels_are_valid() {
        for c in [
            Compression::Snappy,
            Compression::Zstd,
            Compression::Brotli,
            Compression::Gzip,
            Compression::None,
        ] {
            assert!(c.to_parquet().is_ok(), "{c:?}");
        }
    }
}
