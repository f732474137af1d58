use super::{keywords, Error, Lexer, Token};

impl Lexer {
    /// Tokenize a bare word: a keyword when it matches one case-insensitively,
    /// otherwise an identifier with its original casing.
    pub(super) fn tokenize_identifier_or_keyword(&mut self) -> Token {
        let start = self.position;
        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        match keywords::lookup(&text.to_uppercase()) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(text),
        }
    }

    /// Tokenize an identifier delimited by double quotes or backticks.
    /// A doubled delimiter inside stands for the delimiter itself.
    /// Delimited identifiers are never keywords.
    pub(super) fn tokenize_delimited_identifier(&mut self) -> Result<Token, Error> {
        let start = self.position;
        let quote = self.current_char();
        self.advance();

        let mut identifier = String::new();
        while !self.is_eof() {
            let ch = self.current_char();
            self.advance();
            if ch != quote {
                identifier.push(ch);
            } else if self.current_char() == quote && !self.is_eof() {
                identifier.push(quote);
                self.advance();
            } else if identifier.is_empty() {
                return Err(Error::syntax("empty delimited identifier", start));
            } else {
                return Ok(Token::Identifier(identifier));
            }
        }

        Err(Error::syntax("unterminated delimited identifier", start))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{tokenize, Keyword, Token};

    #[test]
    fn keywords_are_case_insensitive() {
        let tokens = tokenize("SeLeCt").unwrap();
        assert_eq!(tokens[0].token, Token::Keyword(Keyword::Select));
    }

    #[test]
    fn identifiers_keep_their_casing() {
        let tokens = tokenize("userName").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("userName".to_string()));
    }

    #[test]
    fn delimited_identifiers_may_be_keywords() {
        let tokens = tokenize("\"order\" `from`").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("order".to_string()));
        assert_eq!(tokens[1].token, Token::Identifier("from".to_string()));
    }

    #[test]
    fn doubled_delimiter_is_escaped() {
        let tokens = tokenize("\"a\"\"b\"").unwrap();
        assert_eq!(tokens[0].token, Token::Identifier("a\"b".to_string()));
    }

    #[test]
    fn unterminated_delimited_identifier() {
        assert!(tokenize("\"abc").is_err());
    }
}
