//! A recursive-descent parser from tokens to a `Statement`.
//!
//! Each statement kind has its own grammar rule:
//! - `select`: SELECT .. FROM .. [WHERE ..] [ORDER BY ..] [LIMIT ..] [OFFSET ..]
//! - `mutation`: INSERT INTO .. VALUES .., UPDATE .. SET .., DELETE FROM ..
//! - `predicate`: WHERE conditions with AND/OR/NOT and parentheses
//! - `terms`: identifiers, table names and literals shared by the rules above

mod mutation;
mod predicate;
mod select;
mod terms;

use super::ast::Statement;
use super::error::Error;
use super::lexer::{self, Keyword, Spanned, Token};

/// Parse a single SQL statement, optionally terminated by a semicolon.
pub fn parse(sql: &str) -> Result<Statement, Error> {
    let tokens = lexer::tokenize(sql)?;
    let mut parser = Parser::new(tokens);
    let statement = parser.parse_statement()?;
    parser.expect_end_of_statement()?;
    Ok(statement)
}

/// How deeply parentheses and NOT may nest within a WHERE clause.
pub const MAX_NESTING_DEPTH: usize = 100;

/// SQL parser state: a token stream and a cursor into it.
pub struct Parser {
    tokens: Vec<Spanned>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser from the output of the lexer. The token list must end with `Token::Eof`.
    pub fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Parse one statement, dispatching on its leading keyword.
    pub fn parse_statement(&mut self) -> Result<Statement, Error> {
        match self.peek() {
            Token::Keyword(Keyword::Select) => self.parse_select(),
            Token::Keyword(Keyword::Insert) => self.parse_insert(),
            Token::Keyword(Keyword::Update) => self.parse_update(),
            Token::Keyword(Keyword::Delete) => self.parse_delete(),
            Token::Keyword(Keyword::With) => Err(Error::unsupported("common table expressions")),
            other => Err(self.syntax_error(format!(
                "expected SELECT, INSERT, UPDATE or DELETE, found {other}"
            ))),
        }
    }

    /// Accept an optional `;` and require the end of input after it.
    fn expect_end_of_statement(&mut self) -> Result<(), Error> {
        let terminated = self.try_consume(&Token::Semicolon);
        match self.peek() {
            Token::Eof => Ok(()),
            Token::Keyword(Keyword::Union | Keyword::Intersect | Keyword::Except) => {
                Err(Error::unsupported("set operations"))
            }
            _ if terminated => Err(Error::unsupported("multiple statements")),
            other => Err(self.syntax_error(format!("unexpected {other}"))),
        }
    }

    // Token helpers //

    /// The current token, without consuming it.
    pub(super) fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// The token `n` positions ahead of the current one.
    pub(super) fn peek_nth(&self, n: usize) -> &Token {
        self.tokens
            .get(self.position + n)
            .map_or(&Token::Eof, |spanned| &spanned.token)
    }

    /// The character offset of the current token.
    pub(super) fn current_position(&self) -> usize {
        self.tokens
            .get(self.position)
            .or(self.tokens.last())
            .map_or(0, |spanned| spanned.position)
    }

    pub(super) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(super) fn peek_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), Token::Keyword(k) if *k == keyword)
    }

    /// Consume the keyword if it is the current token.
    pub(super) fn try_consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), Error> {
        if self.try_consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected {keyword}, found {}", self.peek())))
        }
    }

    /// Consume the token if it is the current one.
    pub(super) fn try_consume(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn expect_token(&mut self, expected: &Token) -> Result<(), Error> {
        if self.try_consume(expected) {
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected {expected}, found {}", self.peek())))
        }
    }

    /// Run a rule one nesting level deeper, failing once `MAX_NESTING_DEPTH` is reached.
    pub(super) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::unsupported(format!(
                "conditions nested more than {MAX_NESTING_DEPTH} levels deep"
            )));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// A syntax error located at the current token.
    pub(super) fn syntax_error(&self, message: impl Into<String>) -> Error {
        Error::syntax(message, self.current_position())
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::sql::error::Error;

    #[test]
    fn unknown_leading_keyword() {
        assert_eq!(
            parse("GARBAGE"),
            Err(Error::syntax(
                "expected SELECT, INSERT, UPDATE or DELETE, found identifier 'GARBAGE'",
                0
            ))
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            parse("   "),
            Err(Error::syntax(
                "expected SELECT, INSERT, UPDATE or DELETE, found end of input",
                3
            ))
        );
    }

    #[test]
    fn multiple_statements() {
        assert_eq!(
            parse("SELECT * FROM a; SELECT * FROM b"),
            Err(Error::unsupported("multiple statements"))
        );
    }

    #[test]
    fn trailing_semicolon_is_accepted() {
        assert!(parse("DELETE FROM t;").is_ok());
    }

    #[test]
    fn trailing_garbage() {
        assert!(matches!(
            parse("DELETE FROM t )"),
            Err(Error::Syntax { position: 14, .. })
        ));
    }

    #[test]
    fn common_table_expressions() {
        assert_eq!(
            parse("WITH x AS (SELECT * FROM t) SELECT * FROM x"),
            Err(Error::unsupported("common table expressions"))
        );
    }

    #[test]
    fn set_operations() {
        assert_eq!(
            parse("SELECT a FROM t UNION SELECT a FROM u"),
            Err(Error::unsupported("set operations"))
        );
    }
}
