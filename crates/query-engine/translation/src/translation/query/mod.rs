//! Translate a SELECT statement into a find.

pub mod filtering;
pub mod sorting;
pub mod values;

use query_engine_plan::plan;
use query_engine_sql::sql;

/// Build a find from a SELECT statement.
pub fn translate(statement: sql::ast::Statement) -> plan::ast::Find {
    plan::ast::Find {
        collection: statement.table,
        filter: filtering::translate_where(statement.predicate),
        projection: translate_projection(statement.columns),
        sort: sorting::translate_order_by(statement.order_by),
        limit: statement.limit,
        skip: statement.offset,
    }
}

/// Include the listed columns only, unless the list selects everything.
fn translate_projection(columns: Vec<String>) -> plan::ast::Projection {
    if sql::helpers::selects_all_columns(&columns) {
        return plan::ast::Projection::default();
    }
    let mut fields: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        if !fields.contains(&column) {
            fields.push(column);
        }
    }
    plan::ast::Projection(fields)
}

#[cfg(test)]
mod tests {
    use query_engine_plan::plan::ast::Projection;
    use similar_asserts::assert_eq;

    use super::translate_projection;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn wildcard_projects_everything() {
        assert_eq!(translate_projection(columns(&["*"])), Projection::default());
        assert_eq!(translate_projection(vec![]), Projection::default());
    }

    #[test]
    fn projection_keeps_column_order() {
        assert_eq!(
            translate_projection(columns(&["b", "a", "b"])),
            Projection(columns(&["b", "a"]))
        );
    }
}
