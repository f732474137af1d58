//! Render a plan as the JSON document exchanged with clients.

use serde_json::{json, Map, Value as Json};

use super::ast::*;

impl Plan {
    /// The interchange form of the plan:
    ///
    /// ```text
    /// find:   {"collection", "operation": "find", "filter", "projection", "options"}
    /// insert: {"collection", "operation": "insert", "documents"}
    /// update: {"collection", "operation": "update", "filter", "update": {"$set"}, "options": {"multi"}}
    /// delete: {"collection", "operation": "delete", "filter"}
    /// ```
    pub fn to_json(&self) -> Json {
        match self {
            Plan::Find(find) => find.to_json(),
            Plan::Insert(insert) => insert.to_json(),
            Plan::Update(update) => update.to_json(),
            Plan::Delete(delete) => delete.to_json(),
        }
    }
}

impl Find {
    pub fn to_json(&self) -> Json {
        let mut options = Map::new();
        if let Some(sort) = &self.sort {
            options.insert("sort".to_string(), sort.to_json());
        }
        if let Some(limit) = self.limit {
            options.insert("limit".to_string(), limit.into());
        }
        if let Some(skip) = self.skip {
            options.insert("skip".to_string(), skip.into());
        }

        json!({
            "collection": self.collection,
            "operation": "find",
            "filter": self.filter.to_json(),
            "projection": self.projection.to_json(),
            "options": options,
        })
    }
}

impl Insert {
    pub fn to_json(&self) -> Json {
        json!({
            "collection": self.collection,
            "operation": "insert",
            "documents": self.documents.iter().map(document_to_json).collect::<Vec<_>>(),
        })
    }
}

impl Update {
    pub fn to_json(&self) -> Json {
        json!({
            "collection": self.collection,
            "operation": "update",
            "filter": self.filter.to_json(),
            "update": { "$set": document_to_json(&self.set) },
            "options": { "multi": self.multi },
        })
    }
}

impl Delete {
    pub fn to_json(&self) -> Json {
        json!({
            "collection": self.collection,
            "operation": "delete",
            "filter": self.filter.to_json(),
        })
    }
}

// Filters

impl Filter {
    /// Field conditions first, then logical clauses.
    pub fn to_json(&self) -> Json {
        let mut filter = Map::new();
        for (field, condition) in &self.fields {
            filter.insert(field.clone(), condition.to_json());
        }
        for (operator, members) in &self.clauses {
            filter.insert(
                operator.name().to_string(),
                Json::Array(members.iter().map(Filter::to_json).collect()),
            );
        }
        Json::Object(filter)
    }
}

impl FieldCondition {
    pub fn to_json(&self) -> Json {
        match self {
            FieldCondition::Equals(value) => value.to_json(),
            FieldCondition::Operators(operators) => Json::Object(
                operators
                    .iter()
                    .map(|(operator, value)| (operator.name().to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

// Options

impl Projection {
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.0
                .iter()
                .map(|field| (field.clone(), Json::from(1)))
                .collect(),
        )
    }
}

impl Sort {
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.0
                .iter()
                .map(|(field, direction)| (field.clone(), Json::from(direction.to_number())))
                .collect(),
        )
    }
}

impl SortDirection {
    /// `1` for ascending, `-1` for descending.
    pub fn to_number(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

// Values

impl Value {
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(n.clone()),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(values) => Json::Array(values.iter().map(Value::to_json).collect()),
        }
    }
}

fn document_to_json(document: &Document) -> Json {
    Json::Object(
        document
            .iter()
            .map(|(field, value)| (field.clone(), value.to_json()))
            .collect(),
    )
}
