//! Identifiers, table names and literal values.

use super::{Error, Keyword, Parser, Token};
use crate::sql::ast::Scalar;
use crate::sql::helpers;

impl Parser {
    /// Parse a single identifier.
    pub(super) fn parse_identifier(&mut self) -> Result<String, Error> {
        match self.peek() {
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.syntax_error(format!("expected identifier, found {other}"))),
        }
    }

    /// Parse a field reference: an identifier, or a dotted path such as `address.city`.
    pub(super) fn parse_field(&mut self) -> Result<String, Error> {
        let mut field = self.parse_identifier()?;
        if self.peek() == &Token::LParen {
            return Err(Error::unsupported("function calls"));
        }
        while self.peek() == &Token::Symbol('.') {
            self.advance();
            if self.peek() == &Token::Symbol('*') {
                return Err(Error::unsupported("qualified wildcards"));
            }
            field.push('.');
            field.push_str(&self.parse_identifier()?);
        }
        if helpers::is_reserved_field(&field) {
            return Err(Error::unsupported("field names starting with '$'"));
        }
        if matches!(self.peek(), Token::Symbol('+' | '-' | '*' | '/' | '%')) {
            return Err(Error::unsupported("arithmetic expressions"));
        }
        Ok(field)
    }

    /// Parse a parenthesized, comma separated list of fields.
    pub(super) fn parse_field_list(&mut self) -> Result<Vec<String>, Error> {
        self.expect_token(&Token::LParen)?;
        let mut fields = vec![self.parse_field()?];
        while self.try_consume(&Token::Comma) {
            fields.push(self.parse_field()?);
        }
        self.expect_token(&Token::RParen)?;
        Ok(fields)
    }

    /// Parse the single table a statement operates on.
    pub(super) fn parse_table(&mut self) -> Result<String, Error> {
        if self.peek() == &Token::LParen {
            return Err(Error::unsupported("subqueries"));
        }
        let mut table = self.parse_identifier()?;
        while self.peek() == &Token::Symbol('.') {
            self.advance();
            table.push('.');
            table.push_str(&self.parse_identifier()?);
        }

        match self.peek() {
            Token::Comma => Err(Error::unsupported("multiple tables")),
            Token::Keyword(
                Keyword::Join
                | Keyword::Inner
                | Keyword::Left
                | Keyword::Right
                | Keyword::Full
                | Keyword::Cross
                | Keyword::Outer,
            ) => Err(Error::unsupported("joins")),
            Token::Keyword(Keyword::As) | Token::Identifier(_) => {
                Err(Error::unsupported("table aliases"))
            }
            _ => Ok(table),
        }
    }

    /// Parse a literal value: a string, a signed number, TRUE, FALSE or NULL.
    pub(super) fn parse_literal(&mut self) -> Result<Scalar, Error> {
        match self.peek().clone() {
            Token::String(value) => {
                self.advance();
                Ok(Scalar::String(value))
            }
            Token::Number(text) => {
                let value = self.make_number(&text, false)?;
                self.advance();
                Ok(value)
            }
            Token::Symbol(sign @ ('-' | '+')) => {
                self.advance();
                match self.peek().clone() {
                    Token::Number(text) => {
                        let value = self.make_number(&text, sign == '-')?;
                        self.advance();
                        Ok(value)
                    }
                    other => Err(self.syntax_error(format!(
                        "expected a number after '{sign}', found {other}"
                    ))),
                }
            }
            Token::Keyword(Keyword::True) => {
                self.advance();
                Ok(Scalar::Bool(true))
            }
            Token::Keyword(Keyword::False) => {
                self.advance();
                Ok(Scalar::Bool(false))
            }
            Token::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Scalar::Null)
            }
            Token::LParen if self.peek_nth(1) == &Token::Keyword(Keyword::Select) => {
                Err(Error::unsupported("subqueries"))
            }
            Token::Identifier(_) if self.peek_nth(1) == &Token::LParen => {
                Err(Error::unsupported("function calls"))
            }
            other => Err(self.syntax_error(format!("expected a literal value, found {other}"))),
        }
    }

    /// Parse a parenthesized, non-empty, comma separated list of literals.
    pub(super) fn parse_literal_list(&mut self) -> Result<Vec<Scalar>, Error> {
        if self.peek() == &Token::LParen && self.peek_nth(1) == &Token::Keyword(Keyword::Select) {
            return Err(Error::unsupported("subqueries"));
        }
        self.expect_token(&Token::LParen)?;
        let mut values = vec![self.parse_literal()?];
        while self.try_consume(&Token::Comma) {
            values.push(self.parse_literal()?);
        }
        self.expect_token(&Token::RParen)?;
        Ok(values)
    }

    /// Parse the operand of LIMIT or OFFSET.
    pub(super) fn parse_non_negative_integer(&mut self, clause: Keyword) -> Result<u64, Error> {
        match self.peek().clone() {
            Token::Number(text) => match text.parse::<u64>() {
                Ok(value) => {
                    self.advance();
                    Ok(value)
                }
                Err(_) => Err(self.syntax_error(format!(
                    "{clause} expects a non-negative integer, found {text}"
                ))),
            },
            Token::Symbol('-') => Err(self.syntax_error(format!(
                "{clause} expects a non-negative integer, found a negative value"
            ))),
            other => Err(self.syntax_error(format!(
                "{clause} expects a non-negative integer, found {other}"
            ))),
        }
    }

    fn make_number(&self, text: &str, negative: bool) -> Result<Scalar, Error> {
        helpers::number_from_literal(text, negative)
            .map(Scalar::Number)
            .ok_or_else(|| self.syntax_error(format!("numeric literal {text} is out of range")))
    }
}
