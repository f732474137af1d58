//! Type definitions of the SQL statement AST.

use enum_iterator::Sequence;

/// The kind of a statement. Determines which plan is built and which
/// optional fields of a `Statement` are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StatementKind::Select => write!(f, "SELECT"),
            StatementKind::Insert => write!(f, "INSERT"),
            StatementKind::Update => write!(f, "UPDATE"),
            StatementKind::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single parsed SQL statement.
///
/// All four statement kinds share this shape:
/// - SELECT uses `columns` as the projection (empty or `["*"]` meaning all columns),
///   `predicate`, `order_by`, `limit` and `offset`.
/// - INSERT uses `columns` and `values`, one row per inserted document.
/// - UPDATE uses `columns` as the assigned columns, `values` holding exactly one row
///   of new values, and `predicate`.
/// - DELETE uses `predicate` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub table: String,
    pub columns: Vec<String>,
    pub predicate: Option<Predicate>,
    pub order_by: Option<Vec<OrderByElement>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub values: Option<Vec<Row>>,
}

/// A tuple of literal values, aligned positionally with `Statement::columns`.
pub type Row = Vec<Scalar>;

/// One element of an ORDER BY clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub field: String,
    pub ascending: bool,
}

/// A WHERE clause condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison {
        field: String,
        op: ComparisonOp,
        value: Scalar,
    },
    And {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Or {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Not(Box<Predicate>),
}

/// Comparison operators usable between a field and a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
}

impl ComparisonOp {
    /// The operator to use when the operands of a comparison are swapped,
    /// as in `5 < age` becoming `age > 5`. Only defined for operators
    /// whose operands are both scalars.
    pub fn flipped(self) -> Option<ComparisonOp> {
        match self {
            ComparisonOp::Eq => Some(ComparisonOp::Eq),
            ComparisonOp::Ne => Some(ComparisonOp::Ne),
            ComparisonOp::Gt => Some(ComparisonOp::Lt),
            ComparisonOp::Gte => Some(ComparisonOp::Lte),
            ComparisonOp::Lt => Some(ComparisonOp::Gt),
            ComparisonOp::Lte => Some(ComparisonOp::Gte),
            ComparisonOp::In | ComparisonOp::NotIn | ComparisonOp::Like => None,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(serde_json::Number),
    Bool(bool),
    Null,
    List(Vec<Scalar>),
}
