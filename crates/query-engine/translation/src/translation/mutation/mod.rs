//! Translate INSERT, UPDATE and DELETE statements.

pub mod delete;
pub mod insert;
pub mod update;

use query_engine_plan::plan;
use query_engine_sql::sql;

use super::error::BuildError;
use super::query::values;

/// Pair each column with the value at the same position.
/// `row_number` is 1-based and only used for error reporting.
fn make_document(
    columns: &[String],
    row: sql::ast::Row,
    row_number: usize,
) -> Result<plan::ast::Document, BuildError> {
    if row.len() != columns.len() {
        return Err(BuildError::ArityMismatch {
            row: row_number,
            columns: columns.len(),
            values: row.len(),
        });
    }
    Ok(columns
        .iter()
        .cloned()
        .zip(row.into_iter().map(values::translate_scalar))
        .collect())
}

fn check_duplicate_columns(columns: &[String]) -> Result<(), BuildError> {
    for (index, column) in columns.iter().enumerate() {
        if columns[..index].contains(column) {
            return Err(BuildError::DuplicateColumn(column.clone()));
        }
    }
    Ok(())
}
