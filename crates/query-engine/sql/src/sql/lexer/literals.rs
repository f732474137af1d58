use super::{Error, Lexer, Token};

impl Lexer {
    /// Tokenize a string literal enclosed in single quotes.
    /// Supports SQL-standard escaped quotes ('O''Reilly' becomes O'Reilly).
    pub(super) fn tokenize_string(&mut self) -> Result<Token, Error> {
        let start = self.position;
        self.advance();

        let mut content = String::new();
        while !self.is_eof() {
            let ch = self.current_char();
            self.advance();
            if ch != '\'' {
                content.push(ch);
            } else if self.current_char() == '\'' && !self.is_eof() {
                content.push('\'');
                self.advance();
            } else {
                return Ok(Token::String(content));
            }
        }

        Err(Error::syntax("unterminated string literal", start))
    }

    /// Tokenize a numeric literal: integers, decimals and E-notation.
    /// Examples: 42, 3.14, .5, 2.5E+10, 1e-5
    pub(super) fn tokenize_number(&mut self) -> Result<Token, Error> {
        let start = self.position;
        let mut has_dot = false;

        while !self.is_eof() {
            let ch = self.current_char();
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if matches!(self.current_char(), 'e' | 'E') {
            self.advance();
            if matches!(self.current_char(), '+' | '-') {
                self.advance();
            }
            let exponent_start = self.position;
            while !self.is_eof() && self.current_char().is_ascii_digit() {
                self.advance();
            }
            if self.position == exponent_start {
                return Err(Error::syntax(
                    "invalid numeric literal: expected digits after exponent",
                    start,
                ));
            }
        }

        if self.current_char().is_alphabetic() || self.current_char() == '_' {
            return Err(Error::syntax("invalid numeric literal", start));
        }

        let number: String = self.input[start..self.position].iter().collect();
        Ok(Token::Number(number))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{tokenize, Error, Token};

    fn first(input: &str) -> Result<Token, Error> {
        tokenize(input).map(|tokens| tokens[0].token.clone())
    }

    #[test]
    fn escaped_quote() {
        assert_eq!(
            first("'O''Reilly'"),
            Ok(Token::String("O'Reilly".to_string()))
        );
    }

    #[test]
    fn empty_string() {
        assert_eq!(first("''"), Ok(Token::String(String::new())));
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            first("'abc"),
            Err(Error::syntax("unterminated string literal", 0))
        );
    }

    #[test]
    fn numbers() {
        for (input, expected) in [
            ("42", "42"),
            ("3.14", "3.14"),
            (".5", ".5"),
            ("2.5E+10", "2.5E+10"),
            ("1e-5", "1e-5"),
        ] {
            assert_eq!(
                first(input),
                Ok(Token::Number(expected.to_string())),
                "input: {input}"
            );
        }
    }

    #[test]
    fn missing_exponent_digits() {
        assert!(first("1e").is_err());
    }

    #[test]
    fn trailing_letters() {
        assert_eq!(first("12abc"), Err(Error::syntax("invalid numeric literal", 0)));
    }
}
