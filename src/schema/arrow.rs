// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field, Schema};

use super::{NumericType, TypePolicy};

/// Names of the columns derived from the file name, in output order.
pub const METADATA_COLUMNS: [&str; 4] = ["round", "participant", "session", "task"];

/// Optional column holding the task code, e.g. `VRG`.
pub const TASK_CODE_COLUMN: &str = "task_code";

/// Map a policy type onto its Arrow counterpart.
pub fn to_arrow_type(ty: NumericType) -> DataType {
    match ty {
        NumericType::Float32 => DataType::Float32,
        NumericType::Float64 => DataType::Float64,
        NumericType::Int32 => DataType::Int32,
        NumericType::Int64 => DataType::Int64,
    }
}

/// Build the typed schema for a CSV header under `policy`.
///
/// Every data field is nullable: empty cells load as nulls.
pub fn build_data_schema(headers: &[String], policy: &TypePolicy) -> Schema {
    let fields: Vec<Field> = headers
        .iter()
        .map(|name| Field::new(name, to_arrow_type(policy.type_for(name)), true))
        .collect();
    Schema::new(fields)
}

/// Fields appended to every table:
/// - round       → Int8
/// - participant → Int16
/// - session     → Int8
/// - task        → Int8
/// - task_code   → Utf8 (only with `include_task_code`)
pub fn metadata_fields(include_task_code: bool) -> Vec<Field> {
    let mut fields = vec![
        Field::new(METADATA_COLUMNS[0], DataType::Int8, false),
        Field::new(METADATA_COLUMNS[1], DataType::Int16, false),
        Field::new(METADATA_COLUMNS[2], DataType::Int8, false),
        Field::new(METADATA_COLUMNS[3], DataType::Int8, false),
    ];
    if include_task_code {
        fields.push(Field::new(TASK_CODE_COLUMN, DataType::Utf8, false));
    }
    fields
}

/// True for names owned by the metadata columns.
pub fn is_metadata_column(name: &str) -> bool {
    METADATA_COLUMNS.contains(&name) || name == TASK_CODE_COLUMN
}
