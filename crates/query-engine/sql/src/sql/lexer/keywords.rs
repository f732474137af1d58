//! Keyword recognition.

/// Reserved words. Words that only appear in constructs we reject are still
/// reserved so the parser can report them as unsupported rather than as
/// unexpected identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // statements
    Select,
    Insert,
    Update,
    Delete,
    // clauses
    From,
    Where,
    Order,
    By,
    Asc,
    Desc,
    Limit,
    Offset,
    Into,
    Values,
    Set,
    // predicates
    And,
    Or,
    Not,
    In,
    Like,
    Is,
    Between,
    // literals
    Null,
    True,
    False,
    // unsupported constructs
    As,
    Cross,
    Distinct,
    Except,
    Full,
    Group,
    Having,
    Inner,
    Intersect,
    Join,
    Left,
    On,
    Outer,
    Right,
    Union,
    With,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::Insert => "INSERT",
            Keyword::Update => "UPDATE",
            Keyword::Delete => "DELETE",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Order => "ORDER",
            Keyword::By => "BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Set => "SET",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::In => "IN",
            Keyword::Like => "LIKE",
            Keyword::Is => "IS",
            Keyword::Between => "BETWEEN",
            Keyword::Null => "NULL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::As => "AS",
            Keyword::Cross => "CROSS",
            Keyword::Distinct => "DISTINCT",
            Keyword::Except => "EXCEPT",
            Keyword::Full => "FULL",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::Inner => "INNER",
            Keyword::Intersect => "INTERSECT",
            Keyword::Join => "JOIN",
            Keyword::Left => "LEFT",
            Keyword::On => "ON",
            Keyword::Outer => "OUTER",
            Keyword::Right => "RIGHT",
            Keyword::Union => "UNION",
            Keyword::With => "WITH",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map an upper-cased word to its keyword, if it is one.
pub fn lookup(upper: &str) -> Option<Keyword> {
    let keyword = match upper {
        "SELECT" => Keyword::Select,
        "INSERT" => Keyword::Insert,
        "UPDATE" => Keyword::Update,
        "DELETE" => Keyword::Delete,
        "FROM" => Keyword::From,
        "WHERE" => Keyword::Where,
        "ORDER" => Keyword::Order,
        "BY" => Keyword::By,
        "ASC" => Keyword::Asc,
        "DESC" => Keyword::Desc,
        "LIMIT" => Keyword::Limit,
        "OFFSET" => Keyword::Offset,
        "INTO" => Keyword::Into,
        "VALUES" => Keyword::Values,
        "SET" => Keyword::Set,
        "AND" => Keyword::And,
        "OR" => Keyword::Or,
        "NOT" => Keyword::Not,
        "IN" => Keyword::In,
        "LIKE" => Keyword::Like,
        "IS" => Keyword::Is,
        "BETWEEN" => Keyword::Between,
        "NULL" => Keyword::Null,
        "TRUE" => Keyword::True,
        "FALSE" => Keyword::False,
        "AS" => Keyword::As,
        "CROSS" => Keyword::Cross,
        "DISTINCT" => Keyword::Distinct,
        "EXCEPT" => Keyword::Except,
        "FULL" => Keyword::Full,
        "GROUP" => Keyword::Group,
        "HAVING" => Keyword::Having,
        "INNER" => Keyword::Inner,
        "INTERSECT" => Keyword::Intersect,
        "JOIN" => Keyword::Join,
        "LEFT" => Keyword::Left,
        "ON" => Keyword::On,
        "OUTER" => Keyword::Outer,
        "RIGHT" => Keyword::Right,
        "UNION" => Keyword::Union,
        "WITH" => Keyword::With,
        _ => return None,
    };
    Some(keyword)
}
