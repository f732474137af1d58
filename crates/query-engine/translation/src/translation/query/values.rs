//! Handle the translation of literal values.

use query_engine_plan::plan;
use query_engine_sql::sql;

/// Convert a SQL literal into a document value.
pub fn translate_scalar(scalar: sql::ast::Scalar) -> plan::ast::Value {
    match scalar {
        sql::ast::Scalar::String(s) => plan::ast::Value::String(s),
        sql::ast::Scalar::Number(n) => plan::ast::Value::Number(n),
        sql::ast::Scalar::Bool(b) => plan::ast::Value::Bool(b),
        sql::ast::Scalar::Null => plan::ast::Value::Null,
        sql::ast::Scalar::List(items) => {
            plan::ast::Value::Array(items.into_iter().map(translate_scalar).collect())
        }
    }
}

/// The operand of `$in` and `$nin`, which is always an array.
pub fn translate_list(scalar: sql::ast::Scalar) -> plan::ast::Value {
    match scalar {
        list @ sql::ast::Scalar::List(_) => translate_scalar(list),
        single => plan::ast::Value::Array(vec![translate_scalar(single)]),
    }
}

/// The text of a LIKE pattern. Non-string operands match their literal spelling.
pub fn pattern_text(scalar: sql::ast::Scalar) -> String {
    match scalar {
        sql::ast::Scalar::String(s) => s,
        sql::ast::Scalar::Number(n) => n.to_string(),
        sql::ast::Scalar::Bool(b) => b.to_string(),
        sql::ast::Scalar::Null => "null".to_string(),
        sql::ast::Scalar::List(items) => items
            .into_iter()
            .map(pattern_text)
            .collect::<Vec<_>>()
            .join(","),
    }
}
