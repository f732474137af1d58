//! A plain-language account of what a statement does once translated.

use query_engine_sql::sql::ast::{
    ComparisonOp, OrderByElement, Predicate, Scalar, Statement, StatementKind,
};
use query_engine_sql::sql::helpers::selects_all_columns;

/// Describe, one sentence per line, how a statement maps onto document operations.
pub fn explain(statement: &Statement) -> String {
    let mut lines = vec![];
    let table = &statement.table;

    match statement.kind {
        StatementKind::Select => {
            lines.push(format!(
                "Reads documents from the '{table}' collection with a find operation."
            ));
            lines.push(describe_filter(statement.predicate.as_ref(), "Matches"));
            if selects_all_columns(&statement.columns) {
                lines.push("Returns every field, so the projection is empty.".to_string());
            } else {
                lines.push(format!(
                    "Returns only {} through the projection.",
                    statement.columns.join(", ")
                ));
            }
            if let Some(order_by) = &statement.order_by {
                lines.push(format!("Sorts by {}.", describe_order_by(order_by)));
            }
            if let Some(limit) = statement.limit {
                lines.push(format!("Returns at most {limit} documents."));
            }
            if let Some(offset) = statement.offset {
                lines.push(format!("Skips the first {offset} documents."));
            }
        }
        StatementKind::Insert => {
            let count = statement.values.as_ref().map_or(0, Vec::len);
            let noun = if count == 1 { "document" } else { "documents" };
            lines.push(format!(
                "Inserts {count} {noun} into the '{table}' collection, with the fields {}.",
                statement.columns.join(", ")
            ));
        }
        StatementKind::Update => {
            lines.push(format!(
                "Updates documents in the '{table}' collection with $set."
            ));
            let assignments = statement
                .values
                .as_ref()
                .and_then(|rows| rows.first())
                .map(|row| {
                    statement
                        .columns
                        .iter()
                        .zip(row)
                        .map(|(column, value)| format!("{column} to {}", describe_scalar(value)))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            lines.push(format!("Sets {assignments}."));
            lines.push(describe_filter(statement.predicate.as_ref(), "Applies to"));
        }
        StatementKind::Delete => {
            lines.push(format!("Deletes documents from the '{table}' collection."));
            lines.push(describe_filter(statement.predicate.as_ref(), "Removes"));
        }
    }

    lines.join("\n")
}

fn describe_filter(predicate: Option<&Predicate>, verb: &str) -> String {
    match predicate {
        None => format!("{verb} every document, so the filter is empty."),
        Some(predicate) => format!(
            "{verb} documents where {}.",
            describe_predicate(predicate, false)
        ),
    }
}

fn describe_predicate(predicate: &Predicate, nested: bool) -> String {
    let description = match predicate {
        Predicate::Comparison { field, op, value } => {
            return describe_comparison(field, *op, value);
        }
        Predicate::And { .. } => describe_chain(predicate, " and "),
        Predicate::Or { .. } => describe_chain(predicate, " or "),
        Predicate::Not(predicate) => {
            return format!("not ({})", describe_predicate(predicate, false));
        }
    };
    if nested {
        format!("({description})")
    } else {
        description
    }
}

/// Operands of a run of ANDs or ORs, described in order.
fn describe_chain(predicate: &Predicate, separator: &str) -> String {
    let mut operands = vec![];
    collect_operands(predicate, predicate, &mut operands);
    operands
        .into_iter()
        .map(|operand| describe_predicate(operand, true))
        .collect::<Vec<_>>()
        .join(separator)
}

fn collect_operands<'a>(
    chain: &Predicate,
    predicate: &'a Predicate,
    operands: &mut Vec<&'a Predicate>,
) {
    match (chain, predicate) {
        (Predicate::And { .. }, Predicate::And { left, right })
        | (Predicate::Or { .. }, Predicate::Or { left, right }) => {
            collect_operands(chain, left, operands);
            collect_operands(chain, right, operands);
        }
        _ => operands.push(predicate),
    }
}

fn describe_comparison(field: &str, op: ComparisonOp, value: &Scalar) -> String {
    let value = describe_scalar(value);
    match op {
        ComparisonOp::Eq => format!("{field} equals {value}"),
        ComparisonOp::Ne => format!("{field} does not equal {value}"),
        ComparisonOp::Gt => format!("{field} is greater than {value}"),
        ComparisonOp::Gte => format!("{field} is at least {value}"),
        ComparisonOp::Lt => format!("{field} is less than {value}"),
        ComparisonOp::Lte => format!("{field} is at most {value}"),
        ComparisonOp::In => format!("{field} is one of {value}"),
        ComparisonOp::NotIn => format!("{field} is none of {value}"),
        ComparisonOp::Like => format!("{field} matches the pattern {value} ($regex)"),
    }
}

fn describe_order_by(order_by: &[OrderByElement]) -> String {
    order_by
        .iter()
        .map(|element| {
            let direction = if element.ascending {
                "ascending"
            } else {
                "descending"
            };
            format!("{} {direction}", element.field)
        })
        .collect::<Vec<_>>()
        .join(", then ")
}

fn describe_scalar(value: &Scalar) -> String {
    match value {
        Scalar::String(s) => format!("'{s}'"),
        Scalar::Number(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Null => "null".to_string(),
        Scalar::List(items) => format!(
            "({})",
            items
                .iter()
                .map(describe_scalar)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
