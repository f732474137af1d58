//! The document-database operations a SQL statement is translated into,
//! and their JSON rendering.

pub mod ast;
pub mod convert;
pub mod helpers;
