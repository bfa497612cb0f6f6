// src/process/tag.rs

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, Int16Array, Int8Array, StringArray},
    datatypes::Schema,
    record_batch::RecordBatch,
};

use crate::{error::Result, filename::RecordingMeta, schema::metadata_fields};

/// Append the metadata columns to `table`, broadcasting each value to every row.
///
/// `task_code` adds a trailing `task_code` column when set.
pub fn tag_table(
    table: &RecordBatch,
    meta: &RecordingMeta,
    task_code: Option<&str>,
) -> Result<RecordBatch> {
    let rows = table.num_rows();

    let mut fields: Vec<_> = table.schema().fields().iter().cloned().collect();
    fields.extend(
        metadata_fields(task_code.is_some())
            .into_iter()
            .map(Arc::new),
    );

    let mut columns: Vec<ArrayRef> = table.columns().to_vec();
    columns.push(Arc::new(Int8Array::from_value(meta.round, rows)));
    columns.push(Arc::new(Int16Array::from_value(meta.participant, rows)));
    columns.push(Arc::new(Int8Array::from_value(meta.session, rows)));
    columns.push(Arc::new(Int8Array::from_value(meta.task, rows)));
    if let Some(code) = task_code {
        columns.push(Arc::new(StringArray::from(vec![code; rows])));
    }

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, columns)?)
}
