//! Parse SQL text into the typed statement AST consumed by the translation phase.

pub mod sql;

pub use sql::parser::parse;
