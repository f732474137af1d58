//! Translate an INSERT statement.

use query_engine_plan::plan;
use query_engine_sql::sql;

use super::{check_duplicate_columns, make_document};
use crate::translation::error::BuildError;

/// One document per row of values, in order.
pub fn translate(statement: sql::ast::Statement) -> Result<plan::ast::Insert, BuildError> {
    let rows = match statement.values {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Err(BuildError::MissingValues(statement.kind)),
    };
    if statement.columns.is_empty() {
        return Err(BuildError::MissingColumns);
    }
    check_duplicate_columns(&statement.columns)?;

    let documents = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| make_document(&statement.columns, row, index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(plan::ast::Insert {
        collection: statement.table,
        documents,
    })
}

#[cfg(test)]
mod tests {
    use query_engine_plan::plan::ast::Value;
    use query_engine_sql::sql::ast::{Scalar, Statement, StatementKind};
    use query_engine_sql::sql::helpers::{empty_statement, int, string};
    use similar_asserts::assert_eq;

    use super::translate;
    use crate::translation::error::BuildError;

    fn insert(columns: &[&str], rows: Option<Vec<Vec<Scalar>>>) -> Statement {
        let mut statement = empty_statement(StatementKind::Insert, "t");
        statement.columns = columns.iter().map(ToString::to_string).collect();
        statement.values = rows;
        statement
    }

    #[test]
    fn documents_follow_rows() {
        let plan = translate(insert(
            &["a", "b"],
            Some(vec![vec![int(1), string("x")], vec![int(3), string("y")]]),
        ))
        .unwrap();
        assert_eq!(plan.collection, "t");
        assert_eq!(plan.documents.len(), 2);
        assert_eq!(
            plan.documents[1].iter().collect::<Vec<_>>(),
            vec![
                (&"a".to_string(), &Value::Number(3.into())),
                (&"b".to_string(), &Value::String("y".to_string())),
            ]
        );
    }

    #[test]
    fn missing_values() {
        assert_eq!(
            translate(insert(&["a"], None)),
            Err(BuildError::MissingValues(StatementKind::Insert))
        );
        assert_eq!(
            translate(insert(&["a"], Some(vec![]))),
            Err(BuildError::MissingValues(StatementKind::Insert))
        );
    }

    #[test]
    fn missing_columns() {
        assert_eq!(
            translate(insert(&[], Some(vec![vec![int(1)]]))),
            Err(BuildError::MissingColumns)
        );
    }

    #[test]
    fn arity_mismatch_is_never_truncated() {
        assert_eq!(
            translate(insert(
                &["a", "b"],
                Some(vec![vec![int(1), int(2)], vec![int(3), int(4), int(5)]])
            )),
            Err(BuildError::ArityMismatch {
                row: 2,
                columns: 2,
                values: 3
            })
        );
    }

    #[test]
    fn duplicate_columns() {
        assert_eq!(
            translate(insert(&["a", "a"], Some(vec![vec![int(1), int(2)]]))),
            Err(BuildError::DuplicateColumn("a".to_string()))
        );
    }
}
