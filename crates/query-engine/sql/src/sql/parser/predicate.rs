//! WHERE clause conditions.
//!
//! Precedence, loosest first: OR, AND, NOT, comparison. Parentheses group.

use super::{Error, Keyword, Parser, Token};
use crate::sql::ast::{ComparisonOp, Predicate, Scalar};
use crate::sql::helpers::{and, comparison, not, or};
use crate::sql::lexer::Operator;

impl Parser {
    pub(super) fn parse_predicate(&mut self) -> Result<Predicate, Error> {
        let mut operands = vec![self.parse_conjunction()?];
        while self.try_consume_keyword(Keyword::Or) {
            operands.push(self.parse_conjunction()?);
        }
        balanced(operands, or).ok_or_else(|| self.syntax_error("expected a condition"))
    }

    fn parse_conjunction(&mut self) -> Result<Predicate, Error> {
        let mut operands = vec![self.parse_negation()?];
        while self.try_consume_keyword(Keyword::And) {
            operands.push(self.parse_negation()?);
        }
        balanced(operands, and).ok_or_else(|| self.syntax_error("expected a condition"))
    }

    fn parse_negation(&mut self) -> Result<Predicate, Error> {
        if self.try_consume_keyword(Keyword::Not) {
            Ok(not(self.nested(Self::parse_negation)?))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> Result<Predicate, Error> {
        if self.peek() == &Token::LParen {
            if self.peek_nth(1) == &Token::Keyword(Keyword::Select) {
                return Err(Error::unsupported("subqueries"));
            }
            self.advance();
            let predicate = self.nested(Self::parse_predicate)?;
            self.expect_token(&Token::RParen)?;
            return Ok(predicate);
        }
        if self.starts_literal() {
            return self.parse_flipped_comparison();
        }
        self.parse_comparison()
    }

    /// `<field> <op> <literal>` and the keyword forms: `[NOT] IN`, `[NOT] LIKE`,
    /// `IS [NOT] NULL` and `[NOT] BETWEEN`.
    fn parse_comparison(&mut self) -> Result<Predicate, Error> {
        let field = match self.peek() {
            Token::Identifier(_) => self.parse_field()?,
            other => {
                return Err(self.syntax_error(format!("expected a condition, found {other}")));
            }
        };

        if let Token::Operator(operator) = self.peek() {
            let op = comparison_op(*operator);
            self.advance();
            let value = self.parse_comparison_operand()?;
            return Ok(comparison(field, op, value));
        }

        let negated = self.try_consume_keyword(Keyword::Not);
        let predicate = match self.peek() {
            Token::Keyword(Keyword::In) => {
                self.advance();
                let values = self.parse_literal_list()?;
                let op = if negated {
                    ComparisonOp::NotIn
                } else {
                    ComparisonOp::In
                };
                return Ok(comparison(field, op, Scalar::List(values)));
            }
            Token::Keyword(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_like_pattern()?;
                comparison(field, ComparisonOp::Like, pattern)
            }
            Token::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_literal()?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_literal()?;
                and(
                    comparison(field.clone(), ComparisonOp::Gte, low),
                    comparison(field, ComparisonOp::Lte, high),
                )
            }
            Token::Keyword(Keyword::Is) if !negated => {
                self.advance();
                let op = if self.try_consume_keyword(Keyword::Not) {
                    ComparisonOp::Ne
                } else {
                    ComparisonOp::Eq
                };
                self.expect_keyword(Keyword::Null)?;
                return Ok(comparison(field, op, Scalar::Null));
            }
            other if negated => {
                return Err(self.syntax_error(format!(
                    "expected IN, LIKE or BETWEEN after NOT, found {other}"
                )));
            }
            other => {
                return Err(self.syntax_error(format!(
                    "expected a comparison operator, found {other}"
                )));
            }
        };

        Ok(if negated { not(predicate) } else { predicate })
    }

    /// `<literal> <op> <field>`, rewritten so the field comes first.
    fn parse_flipped_comparison(&mut self) -> Result<Predicate, Error> {
        let value = self.parse_literal()?;
        let op = match self.peek() {
            Token::Operator(operator) => comparison_op(*operator),
            other => {
                return Err(self.syntax_error(format!(
                    "expected a comparison operator, found {other}"
                )));
            }
        };
        self.advance();
        match self.peek() {
            Token::Identifier(_) => {}
            Token::String(_) | Token::Number(_) | Token::Symbol('-' | '+') => {
                return Err(Error::unsupported("comparisons between literals"));
            }
            other => {
                return Err(self.syntax_error(format!("expected a column name, found {other}")));
            }
        }
        let field = self.parse_field()?;
        // only In, NotIn and Like have no mirror image, and none of them is an operator token
        let op = op.flipped().unwrap_or(op);
        Ok(comparison(field, op, value))
    }

    /// The right hand side of `<field> <op>`: a literal, never another column.
    fn parse_comparison_operand(&mut self) -> Result<Scalar, Error> {
        if matches!(self.peek(), Token::Identifier(_)) && self.peek_nth(1) != &Token::LParen {
            return Err(Error::unsupported("comparisons between columns"));
        }
        self.parse_literal()
    }

    fn parse_like_pattern(&mut self) -> Result<Scalar, Error> {
        match self.peek().clone() {
            Token::String(pattern) => {
                self.advance();
                Ok(Scalar::String(pattern))
            }
            other => Err(self.syntax_error(format!(
                "LIKE expects a string pattern, found {other}"
            ))),
        }
    }

    fn starts_literal(&self) -> bool {
        matches!(
            self.peek(),
            Token::String(_)
                | Token::Number(_)
                | Token::Symbol('-' | '+')
                | Token::Keyword(Keyword::True | Keyword::False | Keyword::Null)
        )
    }
}

/// Combine a chain of operands joined by one operator into a tree of logarithmic
/// depth. Chains of up to three operands associate to the left.
fn balanced(
    mut operands: Vec<Predicate>,
    combine: fn(Predicate, Predicate) -> Predicate,
) -> Option<Predicate> {
    if operands.len() < 2 {
        return operands.pop();
    }
    let right = operands.split_off(operands.len().div_ceil(2));
    Some(combine(
        balanced(operands, combine)?,
        balanced(right, combine)?,
    ))
}

fn comparison_op(operator: Operator) -> ComparisonOp {
    match operator {
        Operator::Equals => ComparisonOp::Eq,
        Operator::NotEquals => ComparisonOp::Ne,
        Operator::LessThan => ComparisonOp::Lt,
        Operator::LessThanOrEqualTo => ComparisonOp::Lte,
        Operator::GreaterThan => ComparisonOp::Gt,
        Operator::GreaterThanOrEqualTo => ComparisonOp::Gte,
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use crate::sql::ast::{ComparisonOp, Predicate, Scalar};
    use crate::sql::error::Error;
    use crate::sql::helpers::{and, comparison, float, int, list, not, or, string};
    use crate::sql::parser::{parse, MAX_NESTING_DEPTH};

    fn where_clause(condition: &str) -> Result<Predicate, Error> {
        let statement = parse(&format!("SELECT * FROM t WHERE {condition}"))?;
        Ok(statement.predicate.expect("a WHERE clause"))
    }

    #[test]
    fn comparison_operators() {
        for (sql, op) in [
            ("a = 1", ComparisonOp::Eq),
            ("a != 1", ComparisonOp::Ne),
            ("a <> 1", ComparisonOp::Ne),
            ("a < 1", ComparisonOp::Lt),
            ("a <= 1", ComparisonOp::Lte),
            ("a > 1", ComparisonOp::Gt),
            ("a >= 1", ComparisonOp::Gte),
        ] {
            assert_eq!(where_clause(sql), Ok(comparison("a", op, int(1))), "{sql}");
        }
    }

    #[test]
    fn literal_types() {
        assert_eq!(
            where_clause("a = 'x'"),
            Ok(comparison("a", ComparisonOp::Eq, string("x")))
        );
        assert_eq!(
            where_clause("a = -2.5"),
            Ok(comparison("a", ComparisonOp::Eq, float(-2.5)))
        );
        assert_eq!(
            where_clause("a = TRUE"),
            Ok(comparison("a", ComparisonOp::Eq, Scalar::Bool(true)))
        );
        assert_eq!(
            where_clause("a = NULL"),
            Ok(comparison("a", ComparisonOp::Eq, Scalar::Null))
        );
    }

    #[test]
    fn and_is_left_associative() {
        assert_eq!(
            where_clause("a = 1 AND b = 2 AND c = 3"),
            Ok(and(
                and(
                    comparison("a", ComparisonOp::Eq, int(1)),
                    comparison("b", ComparisonOp::Eq, int(2)),
                ),
                comparison("c", ComparisonOp::Eq, int(3)),
            ))
        );
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(
            where_clause("(a = 1 OR b = 2) AND c = 3"),
            Ok(and(
                or(
                    comparison("a", ComparisonOp::Eq, int(1)),
                    comparison("b", ComparisonOp::Eq, int(2)),
                ),
                comparison("c", ComparisonOp::Eq, int(3)),
            ))
        );
    }

    #[test]
    fn in_and_not_in() {
        assert_eq!(
            where_clause("status IN ('a', 'b')"),
            Ok(comparison(
                "status",
                ComparisonOp::In,
                list(vec![string("a"), string("b")])
            ))
        );
        assert_eq!(
            where_clause("id NOT IN (1, 2, 3)"),
            Ok(comparison(
                "id",
                ComparisonOp::NotIn,
                list(vec![int(1), int(2), int(3)])
            ))
        );
    }

    #[test]
    fn empty_in_list() {
        assert!(matches!(
            where_clause("id IN ()"),
            Err(Error::Syntax { .. })
        ));
    }

    #[test]
    fn like_keeps_the_pattern_verbatim() {
        assert_eq!(
            where_clause("name LIKE 'J_n%'"),
            Ok(comparison("name", ComparisonOp::Like, string("J_n%")))
        );
        assert_eq!(
            where_clause("name NOT LIKE '%x'"),
            Ok(not(comparison("name", ComparisonOp::Like, string("%x"))))
        );
    }

    #[test]
    fn like_requires_a_string() {
        assert_eq!(
            where_clause("name LIKE 5"),
            Err(Error::syntax("LIKE expects a string pattern, found number 5", 32))
        );
    }

    #[test]
    fn is_null() {
        assert_eq!(
            where_clause("deleted_at IS NULL"),
            Ok(comparison("deleted_at", ComparisonOp::Eq, Scalar::Null))
        );
        assert_eq!(
            where_clause("deleted_at IS NOT NULL"),
            Ok(comparison("deleted_at", ComparisonOp::Ne, Scalar::Null))
        );
    }

    #[test]
    fn between() {
        assert_eq!(
            where_clause("age BETWEEN 18 AND 65"),
            Ok(and(
                comparison("age", ComparisonOp::Gte, int(18)),
                comparison("age", ComparisonOp::Lte, int(65)),
            ))
        );
        assert_eq!(
            where_clause("age NOT BETWEEN 18 AND 65 AND x = 1"),
            Ok(and(
                not(and(
                    comparison("age", ComparisonOp::Gte, int(18)),
                    comparison("age", ComparisonOp::Lte, int(65)),
                )),
                comparison("x", ComparisonOp::Eq, int(1)),
            ))
        );
    }

    #[test]
    fn not_binds_tighter_than_and() {
        assert_eq!(
            where_clause("NOT a = 1 AND b = 2"),
            Ok(and(
                not(comparison("a", ComparisonOp::Eq, int(1))),
                comparison("b", ComparisonOp::Eq, int(2)),
            ))
        );
    }

    #[test]
    fn literal_first_comparison_is_flipped() {
        assert_eq!(
            where_clause("5 < age"),
            Ok(comparison("age", ComparisonOp::Gt, int(5)))
        );
        assert_eq!(
            where_clause("'x' = name"),
            Ok(comparison("name", ComparisonOp::Eq, string("x")))
        );
    }

    #[test]
    fn column_comparisons_are_unsupported() {
        assert_eq!(
            where_clause("a = b"),
            Err(Error::unsupported("comparisons between columns"))
        );
    }

    #[test]
    fn missing_operand() {
        assert!(matches!(where_clause("a ="), Err(Error::Syntax { .. })));
        assert!(matches!(where_clause("a"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn unbalanced_parentheses() {
        assert!(matches!(
            where_clause("(a = 1"),
            Err(Error::Syntax { .. })
        ));
    }

    fn depth(predicate: &Predicate) -> usize {
        match predicate {
            Predicate::Comparison { .. } => 1,
            Predicate::And { left, right } | Predicate::Or { left, right } => {
                1 + depth(left).max(depth(right))
            }
            Predicate::Not(predicate) => 1 + depth(predicate),
        }
    }

    fn chain(terms: usize, operator: &str) -> String {
        (0..terms)
            .map(|i| format!("f{i} = {i}"))
            .collect::<Vec<_>>()
            .join(&format!(" {operator} "))
    }

    #[test]
    fn long_chains_parse_into_shallow_trees() {
        for operator in ["AND", "OR"] {
            let predicate = where_clause(&chain(20_000, operator)).unwrap();
            assert!(depth(&predicate) <= 16, "{operator}: {}", depth(&predicate));
        }
    }

    #[test]
    fn chains_of_four_pair_up() {
        assert_eq!(
            where_clause("a = 1 OR b = 2 OR c = 3 OR d = 4"),
            Ok(or(
                or(
                    comparison("a", ComparisonOp::Eq, int(1)),
                    comparison("b", ComparisonOp::Eq, int(2)),
                ),
                or(
                    comparison("c", ComparisonOp::Eq, int(3)),
                    comparison("d", ComparisonOp::Eq, int(4)),
                ),
            ))
        );
    }

    #[test]
    fn nesting_up_to_the_limit() {
        let condition = format!(
            "{}a = 1{}",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        assert_eq!(
            where_clause(&condition),
            Ok(comparison("a", ComparisonOp::Eq, int(1)))
        );
    }

    #[test]
    fn deeply_nested_parentheses_are_unsupported() {
        for levels in [MAX_NESTING_DEPTH + 1, 20_000] {
            let condition = format!("{}a = 1{}", "(".repeat(levels), ")".repeat(levels));
            assert_eq!(
                where_clause(&condition),
                Err(Error::unsupported("conditions nested more than 100 levels deep"))
            );
        }
    }

    #[test]
    fn deeply_nested_negations_are_unsupported() {
        assert_eq!(
            where_clause(&format!("{}a = 1", "NOT ".repeat(20_000))),
            Err(Error::unsupported("conditions nested more than 100 levels deep"))
        );
        assert!(where_clause(&format!("{}a = 1", "NOT ".repeat(50))).is_ok());
    }

    #[test]
    fn operator_like_field_names_are_unsupported() {
        let unsupported: Result<(), Error> =
            Err(Error::unsupported("field names starting with '$'"));
        for sql in [
            r#"SELECT * FROM t WHERE "$or" = 1 AND (a = 1 OR b = 2)"#,
            r#"SELECT * FROM t WHERE "$where" = 'sleep(100)'"#,
            r#"SELECT * FROM t WHERE address."$ne" = 1"#,
            r#"SELECT "$x" FROM t"#,
            r#"SELECT * FROM t ORDER BY `$natural`"#,
            r#"INSERT INTO t ("$set") VALUES (1)"#,
            r#"UPDATE t SET "$inc" = 1"#,
        ] {
            assert_eq!(parse(sql).map(|_| ()), unsupported, "{sql}");
        }
        assert!(parse("SELECT * FROM t WHERE price$ = 1").is_ok());
    }
}
