//! Translate SQL text into a document-database query plan.

pub mod error;
pub mod mutation;
pub mod query;

use query_engine_plan::plan;
use query_engine_sql::sql;

pub use error::{BuildError, Error};

/// Parse a single SQL statement and build the plan for it.
pub fn translate(sql_text: &str) -> Result<plan::ast::Plan, Error> {
    let statement = query_engine_sql::parse(sql_text)?;
    build(statement)
}

/// Translate each statement independently. One result per input, in input order.
pub fn translate_batch<S: AsRef<str>>(sql_texts: &[S]) -> Vec<Result<plan::ast::Plan, Error>> {
    sql_texts
        .iter()
        .map(|sql_text| translate(sql_text.as_ref()))
        .collect()
}

/// Build the plan for a parsed statement.
pub fn build(statement: sql::ast::Statement) -> Result<plan::ast::Plan, Error> {
    if statement.table.trim().is_empty() {
        return Err(BuildError::EmptyTable.into());
    }
    if field_names(&statement).any(sql::helpers::is_reserved_field) {
        return Err(Error::UnsupportedConstruct(
            "field names starting with '$'".to_string(),
        ));
    }
    match statement.kind {
        sql::ast::StatementKind::Select => Ok(plan::ast::Plan::Find(query::translate(statement))),
        sql::ast::StatementKind::Insert => Ok(plan::ast::Plan::Insert(
            mutation::insert::translate(statement)?,
        )),
        sql::ast::StatementKind::Update => Ok(plan::ast::Plan::Update(
            mutation::update::translate(statement)?,
        )),
        sql::ast::StatementKind::Delete => Ok(plan::ast::Plan::Delete(
            mutation::delete::translate(statement),
        )),
    }
}

/// Every field name a statement mentions: its columns, sort fields and the
/// fields compared in its predicate.
fn field_names(statement: &sql::ast::Statement) -> impl Iterator<Item = &str> {
    let mut compared = vec![];
    let mut pending: Vec<&sql::ast::Predicate> = statement.predicate.iter().collect();
    while let Some(predicate) = pending.pop() {
        match predicate {
            sql::ast::Predicate::Comparison { field, .. } => compared.push(field.as_str()),
            sql::ast::Predicate::And { left, right } | sql::ast::Predicate::Or { left, right } => {
                pending.extend([left.as_ref(), right.as_ref()]);
            }
            sql::ast::Predicate::Not(predicate) => pending.push(predicate),
        }
    }

    statement
        .columns
        .iter()
        .map(String::as_str)
        .chain(
            statement
                .order_by
                .iter()
                .flatten()
                .map(|element| element.field.as_str()),
        )
        .chain(compared)
}
