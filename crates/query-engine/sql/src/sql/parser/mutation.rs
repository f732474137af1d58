//! INSERT, UPDATE and DELETE.

use std::collections::HashSet;

use super::{Error, Keyword, Parser, Token};
use crate::sql::ast::{Row, Statement, StatementKind};
use crate::sql::helpers::empty_statement;
use crate::sql::lexer::Operator;

impl Parser {
    /// `INSERT INTO <table> (<columns>) VALUES (<row>), ...`
    pub(super) fn parse_insert(&mut self) -> Result<Statement, Error> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_table()?;

        if self.peek_keyword(Keyword::Select) {
            return Err(Error::unsupported("INSERT with a SELECT source"));
        }
        if self.peek_keyword(Keyword::Values) {
            return Err(self.syntax_error("INSERT requires a column list before VALUES"));
        }
        let columns_position = self.current_position();
        let columns = self.parse_field_list()?;
        check_duplicate_columns(&columns, columns_position)?;

        if self.peek_keyword(Keyword::Select) {
            return Err(Error::unsupported("INSERT with a SELECT source"));
        }
        self.expect_keyword(Keyword::Values)?;

        let mut rows: Vec<Row> = vec![];
        loop {
            let row_position = self.current_position();
            let row = self.parse_literal_list()?;
            if row.len() != columns.len() {
                return Err(Error::syntax(
                    format!(
                        "INSERT has {} columns but {} values",
                        columns.len(),
                        row.len()
                    ),
                    row_position,
                ));
            }
            rows.push(row);
            if !self.try_consume(&Token::Comma) {
                break;
            }
        }

        Ok(Statement {
            columns,
            values: Some(rows),
            ..empty_statement(StatementKind::Insert, table)
        })
    }

    /// `UPDATE <table> SET <column> = <value>, ... [WHERE ..]`
    pub(super) fn parse_update(&mut self) -> Result<Statement, Error> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_table()?;
        self.expect_keyword(Keyword::Set)?;

        let mut columns = vec![];
        let mut row = vec![];
        loop {
            let column_position = self.current_position();
            let column = self.parse_field()?;
            if columns.contains(&column) {
                return Err(Error::syntax(
                    format!("column '{column}' is assigned more than once"),
                    column_position,
                ));
            }
            self.expect_token(&Token::Operator(Operator::Equals))?;
            if matches!(self.peek(), Token::Identifier(_)) && self.peek_nth(1) != &Token::LParen {
                return Err(Error::unsupported("assignments from other columns"));
            }
            let value = self.parse_literal()?;
            columns.push(column);
            row.push(value);
            if !self.try_consume(&Token::Comma) {
                break;
            }
        }

        let predicate = if self.try_consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(Statement {
            columns,
            predicate,
            values: Some(vec![row]),
            ..empty_statement(StatementKind::Update, table)
        })
    }

    /// `DELETE FROM <table> [WHERE ..]`
    pub(super) fn parse_delete(&mut self) -> Result<Statement, Error> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_table()?;

        let predicate = if self.try_consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(Statement {
            predicate,
            ..empty_statement(StatementKind::Delete, table)
        })
    }
}

fn check_duplicate_columns(columns: &[String], position: usize) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Err(Error::syntax(
                format!("column '{column}' appears more than once in the column list"),
                position,
            ));
        }
    }
    Ok(())
}
