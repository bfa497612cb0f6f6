// src/process/load.rs

use std::{
    collections::HashSet,
    fs::File,
    io::{Read, Seek},
    path::Path,
    sync::Arc,
};

use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::{
    error::{ConvertError, Result},
    process::convert::convert_to_final_types,
    schema::{build_data_schema, is_metadata_column, TypePolicy},
};

/// Rows decoded per Arrow batch while reading a single CSV.
const BATCH_SIZE: usize = 64 * 1024;

/// Read the header row of `reader`, returning the column names in file order.
fn read_headers<R: Read>(path: &Path, reader: R) -> Result<Vec<String>> {
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(reader, Some(0))
        .map_err(|source| ConvertError::Header {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(inferred.fields().iter().map(|f| f.name().clone()).collect())
}

fn check_headers(path: &Path, headers: &[String]) -> Result<()> {
    if headers.is_empty() {
        return Err(ConvertError::EmptyFile(path.to_path_buf()));
    }
    let mut seen = HashSet::with_capacity(headers.len());
    for name in headers {
        if is_metadata_column(name) {
            return Err(ConvertError::ReservedColumn {
                path: path.to_path_buf(),
                column: name.clone(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ConvertError::DuplicateColumn {
                path: path.to_path_buf(),
                column: name.clone(),
            });
        }
    }
    Ok(())
}

/// Load one CSV into a single `RecordBatch`, typing every column through `policy`.
///
/// Cells are read as text, trimmed, and parsed into the policy types. Blank
/// cells and the NA tokens in [`NA_VALUES`](crate::process::convert::NA_VALUES)
/// become nulls. Any other cell that does not parse fails the whole load.
/// A header-only file yields zero rows.
pub fn load_table(path: &Path, policy: &TypePolicy) -> Result<RecordBatch> {
    let read_err = |source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;

    let headers = read_headers(path, &mut file)?;
    check_headers(path, &headers)?;
    let schema = Arc::new(build_data_schema(&headers, policy));
    let text_schema = Arc::new(Schema::new(
        headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    file.rewind().map_err(read_err)?;
    let coerce_err = |source| ConvertError::Coercion {
        path: path.to_path_buf(),
        source,
    };
    let reader = ReaderBuilder::new(text_schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(file)
        .map_err(coerce_err)?;

    let batches = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(coerce_err)?;
    let text = concat_batches(&text_schema, &batches).map_err(coerce_err)?;
    let table = convert_to_final_types(&text, &schema).map_err(coerce_err)?;

    debug!(
        path = %path.display(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::{
        array::{Array, Float32Array, Float64Array},
        datatypes::DataType,
    };
    use std::{fs, path::PathBuf};
    use tempfile::{tempdir, TempDir};

    fn write_csv(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("S_1001_S1_1_VRG.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn applies_type_policy() {
        let (_dir, path) = write_csv("n,x,y\n0,1.5,-2.25\n4,3.0,4.5\n8,,6.0\n");
        let table = load_table(&path, &TypePolicy::default()).unwrap();

        assert_eq!(table.num_rows(), 3);
        let schema = table.schema();
        assert_eq!(schema.field(0).data_type(), &DataType::Float64);
        assert_eq!(schema.field(1).data_type(), &DataType::Float32);
        assert_eq!(schema.field(2).data_type(), &DataType::Float32);

        let n = table
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(n.value(2), 8.0);
        let x = table
            .column(1)
            .as_any()
            .downcast_ref::<Float32Array>()
            .unwrap();
        assert_eq!(x.value(0), 1.5);
        assert!(x.is_null(2));
    }

    #[test]
    fn header_only_file_has_zero_rows() {
        let (_dir, path) = write_csv("n,x,y\n");
        let table = load_table(&path, &TypePolicy::default()).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 3);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let (_dir, path) = write_csv("n,x\n0,1.0\n1,abc\n");
        let err = load_table(&path, &TypePolicy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Coercion { .. }), "{err}");
    }

    #[test]
    fn rejects_ragged_rows() {
        let (_dir, path) = write_csv("n,x\n0,1.0,2.0\n");
        let err = load_table(&path, &TypePolicy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Coercion { .. }), "{err}");
    }

    #[test]
    fn rejects_reserved_and_duplicate_columns() {
        let (_dir, path) = write_csv("n,round\n0,1\n");
        let err = load_table(&path, &TypePolicy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::ReservedColumn { ref column, .. } if column == "round"));

        let (_dir, path) = write_csv("x,x\n0,1\n");
        let err = load_table(&path, &TypePolicy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::DuplicateColumn { .. }));
    }

    #[test]
    fn empty_file_is_an_error() {
        let (_dir, path) = write_csv("");
        let err = load_table(&path, &TypePolicy::default()).unwrap_err();
        assert!(
            matches!(
                err,
                ConvertError::EmptyFile(_) | ConvertError::Header { .. }
            ),
            "{err}"
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.csv"), &TypePolicy::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }));
    }

    #[test]
    fn na_tokens_and_padding_follow_pandas_defaults() {
        let (_dir, path) = write_csv("n,x\n0,NA\n1,N/A\n2,NULL\n3,#N/A\n4,None\n5,-NaN\n6, 1.5\n7,2.5 \n");
        let table = load_table(&path, &TypePolicy::default()).unwrap();
        assert_eq!(table.num_rows(), 8);

        let x = table
            .column(1)
            .as_any()
            .downcast_ref::<Float32Array>()
            .unwrap();
        for row in 0..6 {
            assert!(x.is_null(row), "row {row} should be null");
        }
        assert_eq!(x.value(6), 1.5);
        assert_eq!(x.value(7), 2.5);
    }
}
