//! Type definitions of a document-database query plan.

use enum_iterator::Sequence;
use indexmap::IndexMap;

/// A single operation against one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Find(Find),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

/// Read documents matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Find {
    pub collection: String,
    pub filter: Filter,
    pub projection: Projection,
    pub sort: Option<Sort>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Insert documents, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub collection: String,
    pub documents: Vec<Document>,
}

/// Set fields on the documents matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub collection: String,
    pub filter: Filter,
    pub set: Document,
    /// Whether every matching document is updated, rather than the first one.
    pub multi: bool,
}

/// Remove the documents matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub collection: String,
    pub filter: Filter,
}

/// Field names mapped to values, in insertion order.
pub type Document = IndexMap<String, Value>;

/// The fields to include in results. Empty means every field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection(pub Vec<String>);

/// Sort keys, most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort(pub IndexMap<String, SortDirection>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A filter document.
///
/// Field conditions and logical clauses are all implicitly conjoined,
/// so the empty filter matches every document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    pub fields: IndexMap<String, FieldCondition>,
    pub clauses: IndexMap<LogicalOperator, Vec<Filter>>,
}

/// The condition a single field must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCondition {
    /// `{field: value}`
    Equals(Value),
    /// `{field: {$op: value, ...}}`, every operator must hold.
    Operators(IndexMap<ComparisonOperator, Value>),
}

/// Operators usable in a field's operator document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    Regex,
}

impl ComparisonOperator {
    /// The operator key as it appears in a filter document.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equal => "$eq",
            Self::NotEqual => "$ne",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqual => "$gte",
            Self::LessThan => "$lt",
            Self::LessThanOrEqual => "$lte",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::Regex => "$regex",
        }
    }
}

/// Operators combining a list of filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum LogicalOperator {
    /// All members match.
    And,
    /// At least one member matches.
    Or,
    /// No member matches.
    Nor,
}

impl LogicalOperator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
            Self::Nor => "$nor",
        }
    }
}

/// A document value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value>),
}
