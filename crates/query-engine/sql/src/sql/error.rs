//! Errors for parsing SQL text.

use thiserror::Error;

/// A type for parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text does not conform to the supported grammar.
    #[error("syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },
    /// The text uses a recognized SQL feature we do not translate.
    #[error("queries containing {0} are not supported")]
    UnsupportedConstruct(String),
}

impl Error {
    pub fn syntax(message: impl Into<String>, position: usize) -> Error {
        Error::Syntax {
            message: message.into(),
            position,
        }
    }

    pub fn unsupported(construct: impl Into<String>) -> Error {
        Error::UnsupportedConstruct(construct.into())
    }
}
