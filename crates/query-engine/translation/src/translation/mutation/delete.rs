//! Translate a DELETE statement.

use query_engine_plan::plan;
use query_engine_sql::sql;

use crate::translation::query::filtering;

/// Remove every document matching the WHERE clause.
pub fn translate(statement: sql::ast::Statement) -> plan::ast::Delete {
    plan::ast::Delete {
        collection: statement.table,
        filter: filtering::translate_where(statement.predicate),
    }
}
