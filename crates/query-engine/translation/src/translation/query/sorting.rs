//! Translate an ORDER BY clause.

use indexmap::IndexMap;

use query_engine_plan::plan;
use query_engine_sql::sql;

/// Sort keys in declaration order. A field listed again later keeps its first direction.
pub fn translate_order_by(order_by: Option<Vec<sql::ast::OrderByElement>>) -> Option<plan::ast::Sort> {
    let elements = order_by?;
    let mut keys = IndexMap::new();
    for element in elements {
        let direction = if element.ascending {
            plan::ast::SortDirection::Ascending
        } else {
            plan::ast::SortDirection::Descending
        };
        keys.entry(element.field).or_insert(direction);
    }
    if keys.is_empty() {
        None
    } else {
        Some(plan::ast::Sort(keys))
    }
}
