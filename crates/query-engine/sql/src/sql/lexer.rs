//! Tokenize SQL text into a stream of tokens.
//!
//! The lexer is split into focused submodules:
//! - `keywords`: keyword recognition
//! - `identifiers`: bare and delimited identifiers
//! - `literals`: string and numeric literals

mod identifiers;
mod keywords;
mod literals;

pub use keywords::Keyword;

use super::error::Error;

/// Comparison operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let symbol = match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(String),
    String(String),
    /// The source text of a numeric literal, without sign.
    Number(String),
    Operator(Operator),
    /// One of `* + - / % .`
    Symbol(char),
    Comma,
    LParen,
    RParen,
    Semicolon,
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "keyword {keyword}"),
            Token::Identifier(name) => write!(f, "identifier '{name}'"),
            Token::String(value) => write!(f, "string '{value}'"),
            Token::Number(value) => write!(f, "number {value}"),
            Token::Operator(operator) => write!(f, "'{operator}'"),
            Token::Symbol(symbol) => write!(f, "'{symbol}'"),
            Token::Comma => write!(f, "','"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Semicolon => write!(f, "';'"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// SQL lexer - converts SQL text into tokens.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input. The result always ends with `Token::Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, Error> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let position = self.position;
            if self.is_eof() {
                tokens.push(Spanned {
                    token: Token::Eof,
                    position,
                });
                break;
            }

            let token = self.next_token()?;
            tokens.push(Spanned { token, position });
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, Error> {
        let ch = self.current_char();

        match ch {
            ',' => {
                self.advance();
                Ok(Token::Comma)
            }
            '(' => {
                self.advance();
                Ok(Token::LParen)
            }
            ')' => {
                self.advance();
                Ok(Token::RParen)
            }
            ';' => {
                self.advance();
                Ok(Token::Semicolon)
            }
            '=' | '<' | '>' | '!' => self.tokenize_operator(),
            '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.tokenize_number(),
            '*' | '+' | '-' | '/' | '%' | '.' => {
                self.advance();
                Ok(Token::Symbol(ch))
            }
            '\'' => self.tokenize_string(),
            '"' | '`' => self.tokenize_delimited_identifier(),
            '0'..='9' => self.tokenize_number(),
            c if c.is_alphabetic() || c == '_' => Ok(self.tokenize_identifier_or_keyword()),
            _ => Err(Error::syntax(
                format!("unexpected character '{ch}'"),
                self.position,
            )),
        }
    }

    fn tokenize_operator(&mut self) -> Result<Token, Error> {
        let start = self.position;
        let first = self.current_char();
        self.advance();
        let second = if self.is_eof() {
            None
        } else {
            Some(self.current_char())
        };

        let (operator, two_chars) = match (first, second) {
            ('<', Some('=')) => (Operator::LessThanOrEqualTo, true),
            ('<', Some('>')) | ('!', Some('=')) => (Operator::NotEquals, true),
            ('>', Some('=')) => (Operator::GreaterThanOrEqualTo, true),
            ('=', Some('=')) => (Operator::Equals, true),
            ('<', _) => (Operator::LessThan, false),
            ('>', _) => (Operator::GreaterThan, false),
            ('=', _) => (Operator::Equals, false),
            _ => {
                return Err(Error::syntax(
                    format!("unexpected character '{first}'"),
                    start,
                ))
            }
        };
        if two_chars {
            self.advance();
        }
        Ok(Token::Operator(operator))
    }

    /// Skip whitespace, `-- line` comments and `/* block */` comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), Error> {
        loop {
            while !self.is_eof() && self.current_char().is_whitespace() {
                self.advance();
            }

            if self.current_char() == '-' && self.peek(1) == Some('-') {
                while !self.is_eof() && self.current_char() != '\n' {
                    self.advance();
                }
                continue;
            }

            if self.current_char() == '/' && self.peek(1) == Some('*') {
                let start = self.position;
                self.advance();
                self.advance();
                loop {
                    if self.is_eof() {
                        return Err(Error::syntax("unterminated block comment", start));
                    }
                    if self.current_char() == '*' && self.peek(1) == Some('/') {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }
                continue;
            }

            return Ok(());
        }
    }

    pub(super) fn current_char(&self) -> char {
        if self.is_eof() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    pub(super) fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    pub(super) fn advance(&mut self) {
        if !self.is_eof() {
            self.position += 1;
        }
    }

    pub(super) fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Tokenize a complete input.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, Error> {
    Lexer::new(input).tokenize()
}
