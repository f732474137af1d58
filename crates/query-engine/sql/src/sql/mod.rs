pub mod ast;
pub mod error;
pub mod helpers;
pub mod lexer;
pub mod parser;
