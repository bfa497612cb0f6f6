pub mod config;
pub mod error;
pub mod filename;
pub mod inspect;
pub mod pipeline;
pub mod process;
pub mod scan;
pub mod schema;

pub use config::Config;
pub use error::{ConvertError, FileNameError};
pub use pipeline::{convert, ConversionSummary};
