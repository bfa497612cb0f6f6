pub mod arrow;
pub mod policy;

pub use self::arrow::{
    build_data_schema, is_metadata_column, metadata_fields, to_arrow_type, METADATA_COLUMNS,
    TASK_CODE_COLUMN,
};
pub use self::policy::{ColumnOverride, NumericType, TypePolicy};
