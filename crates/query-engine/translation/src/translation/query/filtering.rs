//! Translate WHERE clause predicates into filter documents.

use indexmap::IndexMap;

use query_engine_plan::plan::ast::{
    ComparisonOperator, FieldCondition, Filter, LogicalOperator, Value,
};
use query_engine_plan::plan::helpers::{clause_filter, field_filter};
use query_engine_sql::sql::ast::{ComparisonOp, Predicate, Scalar};

use super::values;

/// The filter for an optional WHERE clause. No clause matches everything.
pub fn translate_where(predicate: Option<Predicate>) -> Filter {
    predicate.map(translate_predicate).unwrap_or_default()
}

/// Translate a predicate tree into a filter document.
///
/// The tree is walked with an explicit stack, so its depth is not limited by
/// the call stack.
pub fn translate_predicate(predicate: Predicate) -> Filter {
    enum Step {
        Translate(Predicate),
        Conjoin,
        Disjoin,
        Negate,
    }

    let mut steps = vec![Step::Translate(predicate)];
    let mut filters: Vec<Filter> = vec![];
    while let Some(step) = steps.pop() {
        match step {
            Step::Translate(Predicate::Comparison { field, op, value }) => {
                filters.push(translate_comparison(field, op, value));
            }
            Step::Translate(Predicate::And { left, right }) => {
                steps.extend([Step::Conjoin, Step::Translate(*right), Step::Translate(*left)]);
            }
            Step::Translate(Predicate::Or { left, right }) => {
                steps.extend([Step::Disjoin, Step::Translate(*right), Step::Translate(*left)]);
            }
            Step::Translate(Predicate::Not(predicate)) => {
                steps.extend([Step::Negate, Step::Translate(*predicate)]);
            }
            Step::Conjoin => {
                let right = filters.pop().unwrap_or_default();
                let left = filters.pop().unwrap_or_default();
                filters.push(conjoin(left, right));
            }
            Step::Disjoin => {
                let right = filters.pop().unwrap_or_default();
                let left = filters.pop().unwrap_or_default();
                filters.push(disjoin(left, right));
            }
            Step::Negate => {
                let negated = filters.pop().unwrap_or_default();
                filters.push(clause_filter(LogicalOperator::Nor, vec![negated]));
            }
        }
    }
    filters.pop().unwrap_or_default()
}

/// Map a SQL comparison operator to its filter operator.
pub fn translate_operator(op: ComparisonOp) -> ComparisonOperator {
    match op {
        ComparisonOp::Eq => ComparisonOperator::Equal,
        ComparisonOp::Ne => ComparisonOperator::NotEqual,
        ComparisonOp::Gt => ComparisonOperator::GreaterThan,
        ComparisonOp::Gte => ComparisonOperator::GreaterThanOrEqual,
        ComparisonOp::Lt => ComparisonOperator::LessThan,
        ComparisonOp::Lte => ComparisonOperator::LessThanOrEqual,
        ComparisonOp::In => ComparisonOperator::In,
        ComparisonOp::NotIn => ComparisonOperator::NotIn,
        ComparisonOp::Like => ComparisonOperator::Regex,
    }
}

fn translate_comparison(field: String, op: ComparisonOp, value: Scalar) -> Filter {
    let condition = match op {
        ComparisonOp::Eq => FieldCondition::Equals(values::translate_scalar(value)),
        ComparisonOp::In | ComparisonOp::NotIn => {
            single_operator(translate_operator(op), values::translate_list(value))
        }
        ComparisonOp::Like => single_operator(
            translate_operator(op),
            Value::String(like_to_regex(&values::pattern_text(value))),
        ),
        ComparisonOp::Ne
        | ComparisonOp::Gt
        | ComparisonOp::Gte
        | ComparisonOp::Lt
        | ComparisonOp::Lte => single_operator(translate_operator(op), values::translate_scalar(value)),
    };
    field_filter(field, condition)
}

fn single_operator(operator: ComparisonOperator, value: Value) -> FieldCondition {
    FieldCondition::Operators(IndexMap::from([(operator, value)]))
}

/// Convert a LIKE pattern into an anchored regular expression.
/// `%` matches any run of characters and `_` any single character;
/// everything else matches itself.
pub fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');
    for c in pattern.chars() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }
    regex.push('$');
    regex
}

// AND //

/// The conjunction of two filters.
///
/// Both documents are flattened into one when that loses nothing. Otherwise
/// `right` joins the `$and` of `left`, or the result is `{$and: [left, right]}`
/// when `left` has none.
pub fn conjoin(left: Filter, right: Filter) -> Filter {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }
    match merge(left, right) {
        Ok(merged) => merged,
        Err((mut left, right)) => {
            if left.clauses.contains_key(&LogicalOperator::And) {
                left.clauses
                    .entry(LogicalOperator::And)
                    .or_default()
                    .push(right);
                left
            } else {
                clause_filter(LogicalOperator::And, vec![left, right])
            }
        }
    }
}

/// Flatten `right` into `left`, or hand both back when they conflict.
fn merge(left: Filter, right: Filter) -> Result<Filter, (Filter, Filter)> {
    // two disjunctions cannot share one key
    let both_disjunctions = left.clauses.contains_key(&LogicalOperator::Or)
        && right.clauses.contains_key(&LogicalOperator::Or);
    if both_disjunctions {
        return Err((left, right));
    }
    let Some(mut combined) = shared_field_conditions(&left, &right) else {
        return Err((left, right));
    };

    let mut merged = left;
    for (field, condition) in right.fields {
        let condition = combined.shift_remove(&field).unwrap_or(condition);
        merged.fields.insert(field, condition);
    }
    for (operator, members) in right.clauses {
        merged.clauses.entry(operator).or_default().extend(members);
    }
    Ok(merged)
}

/// The combined condition of every field both filters constrain, if all of them combine.
fn shared_field_conditions(
    left: &Filter,
    right: &Filter,
) -> Option<IndexMap<String, FieldCondition>> {
    let mut combined = IndexMap::new();
    for (field, condition) in &right.fields {
        if let Some(existing) = left.fields.get(field) {
            combined.insert(field.clone(), combine_conditions(existing, condition)?);
        }
    }
    Some(combined)
}

/// Two conditions on the same field as one operator document, unless they
/// disagree on the value of some operator.
fn combine_conditions(
    existing: &FieldCondition,
    incoming: &FieldCondition,
) -> Option<FieldCondition> {
    if existing == incoming {
        return Some(existing.clone());
    }
    let mut operators = operator_document(existing);
    for (operator, value) in operator_document(incoming) {
        match operators.get(&operator) {
            Some(current) if *current != value => return None,
            Some(_) => {}
            None => {
                operators.insert(operator, value);
            }
        }
    }
    Some(FieldCondition::Operators(operators))
}

fn operator_document(condition: &FieldCondition) -> IndexMap<ComparisonOperator, Value> {
    match condition {
        FieldCondition::Equals(value) => {
            IndexMap::from([(ComparisonOperator::Equal, value.clone())])
        }
        FieldCondition::Operators(operators) => operators.clone(),
    }
}

// OR //

/// The disjunction of two filters: `{$or: [left, right]}`, with the members of
/// either side that is itself a plain disjunction spliced in its place.
pub fn disjoin(left: Filter, right: Filter) -> Filter {
    let mut members = disjuncts(left);
    members.extend(disjuncts(right));
    clause_filter(LogicalOperator::Or, members)
}

fn disjuncts(mut filter: Filter) -> Vec<Filter> {
    if filter.as_lone_clause(LogicalOperator::Or).is_some() {
        filter
            .clauses
            .shift_remove(&LogicalOperator::Or)
            .unwrap_or_default()
    } else {
        vec![filter]
    }
}
