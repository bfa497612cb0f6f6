// src/process/mod.rs

//! Per-file load and tag, then concatenation and the archive write.

pub mod concat;
pub mod convert;
pub mod load;
pub mod tag;
pub mod write;

pub use concat::{combine, SourceTable};
pub use load::load_table;
pub use tag::tag_table;
pub use write::write_archive;
