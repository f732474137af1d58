//! Helpers for building and inspecting plan::ast types.

use indexmap::IndexMap;

use super::ast::*;

/// `{field: condition}`
pub fn field_filter(field: impl Into<String>, condition: FieldCondition) -> Filter {
    Filter {
        fields: IndexMap::from([(field.into(), condition)]),
        clauses: IndexMap::new(),
    }
}

/// `{$op: [members]}`
pub fn clause_filter(operator: LogicalOperator, members: Vec<Filter>) -> Filter {
    Filter {
        fields: IndexMap::new(),
        clauses: IndexMap::from([(operator, members)]),
    }
}

/// A find over every document of a collection, returning every field.
pub fn find_all(collection: impl Into<String>) -> Find {
    Find {
        collection: collection.into(),
        filter: Filter::default(),
        projection: Projection::default(),
        sort: None,
        limit: None,
        skip: None,
    }
}

impl Filter {
    /// Whether this filter matches every document.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.clauses.is_empty()
    }

    /// The members of the clause, if this filter is that clause and nothing else.
    pub fn as_lone_clause(&self, operator: LogicalOperator) -> Option<&Vec<Filter>> {
        if self.fields.is_empty() && self.clauses.len() == 1 {
            self.clauses.get(&operator)
        } else {
            None
        }
    }

    /// Every field name mentioned anywhere in the filter, including nested clauses.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        for members in self.clauses.values() {
            for member in members {
                fields.extend(member.referenced_fields());
            }
        }
        fields
    }
}

impl Plan {
    /// The collection the plan operates on.
    pub fn collection(&self) -> &str {
        match self {
            Plan::Find(find) => &find.collection,
            Plan::Insert(insert) => &insert.collection,
            Plan::Update(update) => &update.collection,
            Plan::Delete(delete) => &delete.collection,
        }
    }

    /// The operation name used in the rendered plan.
    pub fn operation(&self) -> &'static str {
        match self {
            Plan::Find(_) => "find",
            Plan::Insert(_) => "insert",
            Plan::Update(_) => "update",
            Plan::Delete(_) => "delete",
        }
    }

    /// Whether this is an UPDATE or DELETE that touches every document of its collection.
    pub fn is_unrestricted_mutation(&self) -> bool {
        match self {
            Plan::Update(update) => update.filter.is_empty(),
            Plan::Delete(delete) => delete.filter.is_empty(),
            Plan::Find(_) | Plan::Insert(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equals(value: i64) -> FieldCondition {
        FieldCondition::Equals(Value::Number(value.into()))
    }

    #[test]
    fn lone_clause() {
        let or = clause_filter(
            LogicalOperator::Or,
            vec![field_filter("a", equals(1)), field_filter("b", equals(2))],
        );
        assert_eq!(or.as_lone_clause(LogicalOperator::Or).map(Vec::len), Some(2));
        assert_eq!(or.as_lone_clause(LogicalOperator::And), None);

        let mut mixed = or.clone();
        mixed.fields.insert("c".to_string(), equals(3));
        assert_eq!(mixed.as_lone_clause(LogicalOperator::Or), None);
    }

    #[test]
    fn referenced_fields_descend_into_clauses() {
        let mut filter = clause_filter(
            LogicalOperator::Nor,
            vec![clause_filter(
                LogicalOperator::Or,
                vec![field_filter("a", equals(1)), field_filter("b", equals(2))],
            )],
        );
        filter.fields.insert("c".to_string(), equals(3));
        assert_eq!(filter.referenced_fields(), vec!["c", "a", "b"]);
    }

    #[test]
    fn unrestricted_mutations() {
        let delete_all = Plan::Delete(Delete {
            collection: "t".to_string(),
            filter: Filter::default(),
        });
        assert!(delete_all.is_unrestricted_mutation());

        let delete_one = Plan::Delete(Delete {
            collection: "t".to_string(),
            filter: field_filter("id", equals(1)),
        });
        assert!(!delete_one.is_unrestricted_mutation());

        let update_all = Plan::Update(Update {
            collection: "t".to_string(),
            filter: Filter::default(),
            set: IndexMap::from([("x".to_string(), Value::Null)]),
            multi: true,
        });
        assert!(update_all.is_unrestricted_mutation());

        assert!(!Plan::Find(find_all("t")).is_unrestricted_mutation());
    }

    #[test]
    fn operation_names() {
        let plan = Plan::Find(find_all("users"));
        assert_eq!(plan.operation(), "find");
        assert_eq!(plan.collection(), "users");
    }
}
