// src/process/convert.rs

use std::{str::FromStr, sync::Arc};

use arrow::{
    array::{Array, ArrayRef, AsArray, PrimitiveBuilder, StringArray},
    datatypes::{
        ArrowPrimitiveType, DataType, Float32Type, Float64Type, Int32Type, Int64Type, SchemaRef,
    },
    error::ArrowError,
    record_batch::RecordBatch,
};

/// Cell values read as missing, in addition to empty or all-blank cells.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Trim surrounding whitespace; `None` for blank and NA cells.
pub fn clean_cell(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_VALUES.contains(&trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_column<T>(strings: &StringArray, column: &str) -> Result<ArrayRef, ArrowError>
where
    T: ArrowPrimitiveType,
    T::Native: FromStr,
{
    let mut builder = PrimitiveBuilder::<T>::with_capacity(strings.len());
    for (row, raw) in strings.iter().enumerate() {
        match raw.and_then(clean_cell) {
            None => builder.append_null(),
            Some(cell) => {
                let value = cell.parse::<T::Native>().map_err(|_| {
                    ArrowError::ParseError(format!(
                        "cannot parse `{}` as {} in column `{}` at data row {}",
                        raw.unwrap_or_default(),
                        T::DATA_TYPE,
                        column,
                        row + 1
                    ))
                })?;
                builder.append_value(value);
            }
        }
    }
    Ok(Arc::new(builder.finish()))
}

/// Convert a batch read as text into the numeric types of `schema`.
///
/// Columns are matched by position; `batch` must carry one Utf8 column per field.
pub fn convert_to_final_types(
    batch: &RecordBatch,
    schema: &SchemaRef,
) -> Result<RecordBatch, ArrowError> {
    let mut out = Vec::with_capacity(batch.num_columns());

    for (col, field) in batch.columns().iter().zip(schema.fields()) {
        let strings = col.as_string_opt::<i32>().ok_or_else(|| {
            ArrowError::CastError(format!("column `{}` was not read as text", field.name()))
        })?;
        let typed = match field.data_type() {
            DataType::Float32 => parse_column::<Float32Type>(strings, field.name())?,
            DataType::Float64 => parse_column::<Float64Type>(strings, field.name())?,
            DataType::Int32 => parse_column::<Int32Type>(strings, field.name())?,
            DataType::Int64 => parse_column::<Int64Type>(strings, field.name())?,
            other => {
                return Err(ArrowError::NotYetImplemented(format!(
                    "no text conversion to {other} for column `{}`",
                    field.name()
                )))
            }
        };
        out.push(typed);
    }

    RecordBatch::try_new(schema.clone(), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};

    fn text_batch(values: Vec<Option<&str>>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Utf8, true)]));
        RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(values))]).unwrap()
    }

    fn float_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![Field::new("x", DataType::Float32, true)]))
    }

    #[test]
    fn clean_cell_trims_and_detects_missing() {
        assert_eq!(clean_cell(" 1.5 "), Some("1.5"));
        assert_eq!(clean_cell("\t-2\t"), Some("-2"));
        assert_eq!(clean_cell("   "), None);
        assert_eq!(clean_cell(" NA "), None);
        assert_eq!(clean_cell("inf"), Some("inf"));
    }

    #[test]
    fn every_na_token_becomes_null() {
        for token in NA_VALUES {
            let batch = text_batch(vec![Some(*token), Some("1.0")]);
            let typed = convert_to_final_types(&batch, &float_schema()).unwrap();
            let x = typed.column(0).as_primitive::<Float32Type>();
            assert!(x.is_null(0), "{token} should be null");
            assert_eq!(x.value(1), 1.0);
        }
    }

    #[test]
    fn parses_padded_and_special_values() {
        let batch = text_batch(vec![
            Some(" 1.5"),
            Some("2.5 "),
            Some("inf"),
            Some("-inf"),
            Some("1e3"),
            None,
        ]);
        let typed = convert_to_final_types(&batch, &float_schema()).unwrap();
        let x = typed.column(0).as_primitive::<Float32Type>();
        assert_eq!(x.value(0), 1.5);
        assert_eq!(x.value(1), 2.5);
        assert_eq!(x.value(2), f32::INFINITY);
        assert_eq!(x.value(3), f32::NEG_INFINITY);
        assert_eq!(x.value(4), 1000.0);
        assert!(x.is_null(5));
    }

    #[test]
    fn unparseable_cell_names_column_and_row() {
        let batch = text_batch(vec![Some("1.0"), Some("abc")]);
        let err = convert_to_final_types(&batch, &float_schema()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`abc`"), "{msg}");
        assert!(msg.contains("column `x`"), "{msg}");
        assert!(msg.contains("row 2"), "{msg}");
    }

    #[test]
    fn integer_columns_reject_fractions() {
        let batch = text_batch(vec![Some("3"), Some("NA")]);
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Int32, true)]));
        let typed = convert_to_final_types(&batch, &schema).unwrap();
        let x = typed.column(0).as_primitive::<Int32Type>();
        assert_eq!(x.value(0), 3);
        assert!(x.is_null(1));

        let batch = text_batch(vec![Some("3.5")]);
        assert!(convert_to_final_types(&batch, &schema).is_err());
    }
}
