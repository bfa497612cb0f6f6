// src/process/concat.rs

use std::{collections::HashSet, path::PathBuf, sync::Arc};

use arrow::{
    array::{new_null_array, ArrayRef},
    compute::concat_batches,
    datatypes::{FieldRef, Schema, SchemaRef},
    record_batch::RecordBatch,
};
use tracing::debug;

use crate::{
    config::SchemaMode,
    error::{ConvertError, Result},
    schema::is_metadata_column,
};

/// A tagged table together with the file it came from.
#[derive(Debug)]
pub struct SourceTable {
    pub path: PathBuf,
    pub batch: RecordBatch,
}

fn data_fields(batch: &RecordBatch) -> impl Iterator<Item = FieldRef> + '_ {
    batch
        .schema_ref()
        .fields()
        .iter()
        .filter(|f| !is_metadata_column(f.name()))
        .cloned()
}

/// Data columns shared by all tables, aligned to the first table's order.
fn strict_fields(tables: &[SourceTable]) -> Result<Vec<FieldRef>> {
    let reference: Vec<FieldRef> = data_fields(&tables[0].batch).collect();
    let expected: HashSet<&str> = reference.iter().map(|f| f.name().as_str()).collect();

    for table in &tables[1..] {
        let schema = table.batch.schema();
        let found: HashSet<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .filter(|name| !is_metadata_column(name))
            .collect();
        if found != expected {
            let mut missing: Vec<String> = expected
                .difference(&found)
                .map(|s| s.to_string())
                .collect();
            let mut extra: Vec<String> = found
                .difference(&expected)
                .map(|s| s.to_string())
                .collect();
            missing.sort();
            extra.sort();
            return Err(ConvertError::SchemaMismatch {
                path: table.path.clone(),
                missing,
                extra,
            });
        }
    }
    Ok(reference)
}

/// Every data column seen in any table, in first-appearance order.
fn union_fields(tables: &[SourceTable]) -> Vec<FieldRef> {
    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    for table in tables {
        for field in data_fields(&table.batch) {
            if seen.insert(field.name().clone()) {
                fields.push(Arc::new(field.as_ref().clone().with_nullable(true)));
            }
        }
    }
    fields
}

/// Project `batch` onto `schema` by column name, null-filling absent columns.
fn align(batch: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(col) => col.clone(),
            None => new_null_array(field.data_type(), batch.num_rows()),
        })
        .collect();
    Ok(RecordBatch::try_new(schema.clone(), columns)?)
}

/// Concatenate tagged tables row-wise in the order given.
///
/// Columns are matched by name. The metadata columns always come last.
pub fn combine(tables: &[SourceTable], mode: SchemaMode) -> Result<RecordBatch> {
    let Some(first) = tables.first() else {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    };

    let mut fields = match mode {
        SchemaMode::Strict => strict_fields(tables)?,
        SchemaMode::Union => union_fields(tables),
    };
    fields.extend(
        first
            .batch
            .schema_ref()
            .fields()
            .iter()
            .filter(|f| is_metadata_column(f.name()))
            .cloned(),
    );
    let schema: SchemaRef = Arc::new(Schema::new(fields));
    debug!(columns = schema.fields().len(), ?mode, "combined schema");

    let aligned = tables
        .iter()
        .map(|t| align(&t.batch, &schema))
        .collect::<Result<Vec<_>>>()?;
    Ok(concat_batches(&schema, &aligned)?)
}
