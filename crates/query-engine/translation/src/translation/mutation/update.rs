//! Translate an UPDATE statement.

use query_engine_plan::plan;
use query_engine_sql::sql;

use super::{check_duplicate_columns, make_document};
use crate::translation::error::BuildError;
use crate::translation::query::filtering;

/// Set the assigned columns on every document matching the WHERE clause.
pub fn translate(statement: sql::ast::Statement) -> Result<plan::ast::Update, BuildError> {
    if statement.columns.is_empty() {
        return Err(BuildError::EmptySet);
    }
    let mut rows = match statement.values {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Err(BuildError::MissingValues(statement.kind)),
    };
    if rows.len() > 1 {
        return Err(BuildError::MultipleRows(rows.len()));
    }
    check_duplicate_columns(&statement.columns)?;

    let row = rows.remove(0);
    let set = make_document(&statement.columns, row, 1)?;

    Ok(plan::ast::Update {
        collection: statement.table,
        filter: filtering::translate_where(statement.predicate),
        set,
        multi: true,
    })
}

#[cfg(test)]
mod tests {
    use query_engine_plan::plan::ast::{Filter, Value};
    use query_engine_sql::sql::ast::{ComparisonOp, Scalar, Statement, StatementKind};
    use query_engine_sql::sql::helpers::{comparison, empty_statement, int};
    use similar_asserts::assert_eq;

    use super::translate;
    use crate::translation::error::BuildError;

    fn update(columns: &[&str], rows: Option<Vec<Vec<Scalar>>>) -> Statement {
        let mut statement = empty_statement(StatementKind::Update, "t");
        statement.columns = columns.iter().map(ToString::to_string).collect();
        statement.values = rows;
        statement
    }

    #[test]
    fn unrestricted_update() {
        let plan = translate(update(&["x"], Some(vec![vec![int(1)]]))).unwrap();
        assert_eq!(plan.filter, Filter::default());
        assert!(plan.multi);
        assert_eq!(plan.set.get("x"), Some(&Value::Number(1.into())));
    }

    #[test]
    fn filter_from_where() {
        let mut statement = update(&["x", "y"], Some(vec![vec![int(1), Scalar::Null]]));
        statement.predicate = Some(comparison("id", ComparisonOp::Eq, int(7)));
        let plan = translate(statement).unwrap();
        assert_eq!(
            plan.filter.to_json(),
            serde_json::json!({"id": 7})
        );
        assert_eq!(plan.set.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn empty_set() {
        assert_eq!(
            translate(update(&[], Some(vec![vec![]]))),
            Err(BuildError::EmptySet)
        );
    }

    #[test]
    fn missing_values() {
        assert_eq!(
            translate(update(&["x"], None)),
            Err(BuildError::MissingValues(StatementKind::Update))
        );
    }

    #[test]
    fn arity_mismatch() {
        assert_eq!(
            translate(update(&["x", "y"], Some(vec![vec![int(1)]]))),
            Err(BuildError::ArityMismatch {
                row: 1,
                columns: 2,
                values: 1
            })
        );
    }

    #[test]
    fn more_than_one_row() {
        assert_eq!(
            translate(update(&["x"], Some(vec![vec![int(1)], vec![int(2)]]))),
            Err(BuildError::MultipleRows(2))
        );
    }
}
