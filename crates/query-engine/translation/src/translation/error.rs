//! Errors for translation.

use query_engine_sql::sql;
use query_engine_sql::sql::ast::StatementKind;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },
    #[error("queries containing {0} are not supported")]
    UnsupportedConstruct(String),
    #[error("unable to build a plan: {0}")]
    Build(#[from] BuildError),
}

impl From<sql::error::Error> for Error {
    fn from(error: sql::error::Error) -> Self {
        match error {
            sql::error::Error::Syntax { message, position } => Error::Syntax { message, position },
            sql::error::Error::UnsupportedConstruct(construct) => {
                Error::UnsupportedConstruct(construct)
            }
        }
    }
}

/// A statement that parsed, but lacks what its kind needs to become a plan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("the statement does not name a table")]
    EmptyTable,
    #[error("{0} requires at least one row of values")]
    MissingValues(StatementKind),
    #[error("INSERT requires a column list")]
    MissingColumns,
    #[error("UPDATE requires at least one SET assignment")]
    EmptySet,
    #[error("row {row} has {values} values for {columns} columns")]
    ArityMismatch {
        row: usize,
        columns: usize,
        values: usize,
    },
    #[error("column '{0}' is given more than once")]
    DuplicateColumn(String),
    #[error("UPDATE takes exactly one row of values, found {0}")]
    MultipleRows(usize),
}
