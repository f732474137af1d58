use super::{Error, Keyword, Parser, Token};
use crate::sql::ast::{OrderByElement, Statement, StatementKind};
use crate::sql::helpers::WILDCARD;

impl Parser {
    /// `SELECT <column-list|*> FROM <table> [WHERE ..] [ORDER BY ..] [LIMIT n] [OFFSET n]`
    pub(super) fn parse_select(&mut self) -> Result<Statement, Error> {
        self.expect_keyword(Keyword::Select)?;
        if self.peek_keyword(Keyword::Distinct) {
            return Err(Error::unsupported("DISTINCT"));
        }

        let columns = self.parse_select_list()?;

        self.expect_keyword(Keyword::From)?;
        let table = self.parse_table()?;

        let predicate = if self.try_consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        if self.peek_keyword(Keyword::Group) {
            return Err(Error::unsupported("GROUP BY clauses"));
        }
        if self.peek_keyword(Keyword::Having) {
            return Err(Error::unsupported("HAVING clauses"));
        }

        let order_by = if self.try_consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_order_by_list()?)
        } else {
            None
        };

        let limit = if self.try_consume_keyword(Keyword::Limit) {
            Some(self.parse_non_negative_integer(Keyword::Limit)?)
        } else {
            None
        };

        let offset = if self.try_consume_keyword(Keyword::Offset) {
            Some(self.parse_non_negative_integer(Keyword::Offset)?)
        } else {
            None
        };

        Ok(Statement {
            kind: StatementKind::Select,
            table,
            columns,
            predicate,
            order_by,
            limit,
            offset,
            values: None,
        })
    }

    /// Either a lone `*`, or one or more field references.
    fn parse_select_list(&mut self) -> Result<Vec<String>, Error> {
        if self.try_consume(&Token::Symbol('*')) {
            if self.peek() == &Token::Comma {
                return Err(Error::unsupported("wildcards mixed with named columns"));
            }
            return Ok(vec![WILDCARD.to_string()]);
        }

        let mut columns = vec![];
        loop {
            if self.peek() == &Token::Symbol('*') {
                return Err(Error::unsupported("wildcards mixed with named columns"));
            }
            columns.push(self.parse_select_item()?);
            if !self.try_consume(&Token::Comma) {
                break;
            }
        }
        Ok(columns)
    }

    fn parse_select_item(&mut self) -> Result<String, Error> {
        match self.peek() {
            Token::Identifier(_) => {}
            Token::LParen if self.peek_nth(1) == &Token::Keyword(Keyword::Select) => {
                return Err(Error::unsupported("subqueries"));
            }
            Token::String(_) | Token::Number(_) => {
                return Err(Error::unsupported("literal values in the select list"));
            }
            other => {
                return Err(self.syntax_error(format!("expected a column name, found {other}")));
            }
        }
        let column = self.parse_field()?;
        if self.peek_keyword(Keyword::As) || matches!(self.peek(), Token::Identifier(_)) {
            return Err(Error::unsupported("column aliases"));
        }
        Ok(column)
    }

    fn parse_order_by_list(&mut self) -> Result<Vec<OrderByElement>, Error> {
        let mut elements = vec![];
        loop {
            let field = self.parse_field()?;
            let ascending = if self.try_consume_keyword(Keyword::Desc) {
                false
            } else {
                self.try_consume_keyword(Keyword::Asc);
                true
            };
            elements.push(OrderByElement { field, ascending });
            if !self.try_consume(&Token::Comma) {
                break;
            }
        }
        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use crate::sql::ast::{ComparisonOp, OrderByElement, StatementKind};
    use crate::sql::error::Error;
    use crate::sql::helpers::{self, and, comparison, int, or, string};
    use crate::sql::parser::parse;

    #[test]
    fn all_features_together() {
        let statement = parse(
            "SELECT name, age FROM users \
             WHERE age > 18 AND status = 'active' \
             ORDER BY age DESC, name \
             LIMIT 10 OFFSET 20",
        )
        .unwrap();

        let mut expected = helpers::simple_select("users", &["name", "age"]);
        expected.predicate = Some(and(
            comparison("age", ComparisonOp::Gt, int(18)),
            comparison("status", ComparisonOp::Eq, string("active")),
        ));
        expected.order_by = Some(vec![
            OrderByElement {
                field: "age".to_string(),
                ascending: false,
            },
            OrderByElement {
                field: "name".to_string(),
                ascending: true,
            },
        ]);
        expected.limit = Some(10);
        expected.offset = Some(20);

        assert_eq!(statement, expected);
    }

    #[test]
    fn wildcard() {
        let statement = parse("select * from t").unwrap();
        assert_eq!(statement, helpers::simple_select("t", &["*"]));
    }

    #[test]
    fn dotted_fields_and_quoted_identifiers() {
        let statement =
            parse("SELECT address.city, \"order\" FROM customers WHERE address.zip = '1000'")
                .unwrap();
        assert_eq!(statement.kind, StatementKind::Select);
        assert_eq!(statement.columns, vec!["address.city", "order"]);
        assert_eq!(
            statement.predicate,
            Some(comparison("address.zip", ComparisonOp::Eq, string("1000")))
        );
    }

    #[test]
    fn or_binds_looser_than_and() {
        let statement = parse("SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3").unwrap();
        assert_eq!(
            statement.predicate,
            Some(or(
                comparison("a", ComparisonOp::Eq, int(1)),
                and(
                    comparison("b", ComparisonOp::Eq, int(2)),
                    comparison("c", ComparisonOp::Eq, int(3)),
                ),
            ))
        );
    }

    #[test]
    fn negative_limit() {
        assert!(matches!(
            parse("SELECT * FROM t LIMIT -1"),
            Err(Error::Syntax { position: 22, .. })
        ));
    }

    #[test]
    fn fractional_limit() {
        assert_eq!(
            parse("SELECT * FROM t LIMIT 2.5"),
            Err(Error::syntax(
                "LIMIT expects a non-negative integer, found 2.5",
                22
            ))
        );
    }

    #[test]
    fn missing_from() {
        assert_eq!(
            parse("SELECT a WHERE a = 1"),
            Err(Error::syntax("expected FROM, found keyword WHERE", 9))
        );
    }

    #[test]
    fn joins_are_unsupported() {
        assert_eq!(
            parse("SELECT * FROM a JOIN b ON a.id = b.id"),
            Err(Error::unsupported("joins"))
        );
        assert_eq!(
            parse("SELECT * FROM a, b"),
            Err(Error::unsupported("multiple tables"))
        );
    }

    #[test]
    fn subqueries_are_unsupported() {
        assert_eq!(
            parse("SELECT * FROM (SELECT * FROM t)"),
            Err(Error::unsupported("subqueries"))
        );
        assert_eq!(
            parse("SELECT * FROM t WHERE a IN (SELECT a FROM u)"),
            Err(Error::unsupported("subqueries"))
        );
    }

    #[test]
    fn function_calls_are_unsupported() {
        assert_eq!(
            parse("SELECT COUNT(*) FROM t"),
            Err(Error::unsupported("function calls"))
        );
        assert_eq!(
            parse("SELECT * FROM t WHERE created < NOW()"),
            Err(Error::unsupported("function calls"))
        );
    }

    #[test]
    fn aggregation_is_unsupported() {
        assert_eq!(
            parse("SELECT a FROM t GROUP BY a"),
            Err(Error::unsupported("GROUP BY clauses"))
        );
        assert_eq!(
            parse("SELECT DISTINCT a FROM t"),
            Err(Error::unsupported("DISTINCT"))
        );
    }

    #[test]
    fn wildcard_mixed_with_columns() {
        assert_eq!(
            parse("SELECT *, a FROM t"),
            Err(Error::unsupported("wildcards mixed with named columns"))
        );
    }

    #[test]
    fn aliases_are_unsupported() {
        assert_eq!(
            parse("SELECT a AS b FROM t"),
            Err(Error::unsupported("column aliases"))
        );
        assert_eq!(
            parse("SELECT * FROM t u"),
            Err(Error::unsupported("table aliases"))
        );
    }
}
