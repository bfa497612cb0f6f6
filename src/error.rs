// src/error.rs

use std::{num::ParseIntError, path::PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Why a recording file name could not be decomposed into its metadata.
#[derive(Error, Debug)]
pub enum FileNameError {
    #[error("expected at least {expected} `_`-separated tokens, found {found}")]
    TooFewTokens { expected: usize, found: usize },

    #[error("token {token_index} (`{token}`) has no character at position {position}")]
    MissingChar {
        token_index: usize,
        token: String,
        position: usize,
    },

    #[error("{field} `{value}` is not an integer: {source}")]
    NotNumeric {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Every way a conversion run can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("cannot access input {path}: {source}")]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("bad file name {name}: {source}")]
    FileName {
        name: String,
        #[source]
        source: FileNameError,
    },

    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading header of {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },

    #[error("{0} has no header row")]
    EmptyFile(PathBuf),

    #[error("coercing values in {path}: {source}")]
    Coercion {
        path: PathBuf,
        #[source]
        source: ArrowError,
    },

    #[error("column `{column}` appears more than once in {path}")]
    DuplicateColumn { path: PathBuf, column: String },

    #[error("column `{column}` in {path} collides with a metadata column")]
    ReservedColumn { path: PathBuf, column: String },

    #[error("{path} does not match the schema of earlier files (missing: {missing:?}, extra: {extra:?})")]
    SchemaMismatch {
        path: PathBuf,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("no .csv files found under {0}")]
    NoInput(PathBuf),

    #[error("building combined table: {0}")]
    Arrow(#[from] ArrowError),

    #[error("writing archive {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: ParquetError,
    },

    #[error("replacing {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },

    #[error("{context} {path}: {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
