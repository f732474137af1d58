//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

/// The column list sentinel meaning "all columns".
pub const WILDCARD: &str = "*";

/// A statement of the given kind with every optional part empty.
pub fn empty_statement(kind: StatementKind, table: impl Into<String>) -> Statement {
    Statement {
        kind,
        table: table.into(),
        columns: vec![],
        predicate: None,
        order_by: None,
        limit: None,
        offset: None,
        values: None,
    }
}

/// `SELECT <columns> FROM <table>`.
pub fn simple_select(table: impl Into<String>, columns: &[&str]) -> Statement {
    Statement {
        columns: columns.iter().map(ToString::to_string).collect(),
        ..empty_statement(StatementKind::Select, table)
    }
}

/// Whether a column list selects all columns.
pub fn selects_all_columns(columns: &[String]) -> bool {
    columns.is_empty() || columns.iter().any(|column| column == WILDCARD)
}

/// Whether a field path has a segment starting with `$`, which filter
/// documents reserve for operators.
pub fn is_reserved_field(field: &str) -> bool {
    field.split('.').any(|segment| segment.starts_with('$'))
}

// Predicates //

/// `<field> <op> <value>`
pub fn comparison(field: impl Into<String>, op: ComparisonOp, value: Scalar) -> Predicate {
    Predicate::Comparison {
        field: field.into(),
        op,
        value,
    }
}

/// `<left> AND <right>`
pub fn and(left: Predicate, right: Predicate) -> Predicate {
    Predicate::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `<left> OR <right>`
pub fn or(left: Predicate, right: Predicate) -> Predicate {
    Predicate::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `NOT <predicate>`
pub fn not(predicate: Predicate) -> Predicate {
    Predicate::Not(Box::new(predicate))
}

// Literals //

pub fn string(value: impl Into<String>) -> Scalar {
    Scalar::String(value.into())
}

pub fn int(value: i64) -> Scalar {
    Scalar::Number(value.into())
}

/// A floating point literal. Non-finite values have no literal form and become NULL.
pub fn float(value: f64) -> Scalar {
    serde_json::Number::from_f64(value).map_or(Scalar::Null, Scalar::Number)
}

pub fn list(values: Vec<Scalar>) -> Scalar {
    Scalar::List(values)
}

/// Build a number from the text of a numeric literal and its sign.
/// Integers stay integers as long as they fit in 64 bits.
pub fn number_from_literal(text: &str, negative: bool) -> Option<serde_json::Number> {
    let is_integer = text.chars().all(|c| c.is_ascii_digit());
    if is_integer {
        let signed = if negative {
            format!("-{text}")
        } else {
            text.to_string()
        };
        if let Ok(value) = signed.parse::<i64>() {
            return Some(value.into());
        }
        if let Ok(value) = signed.parse::<u64>() {
            return Some(value.into());
        }
    }
    let value: f64 = text.parse().ok()?;
    serde_json::Number::from_f64(if negative { -value } else { value })
}
