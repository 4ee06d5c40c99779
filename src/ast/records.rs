use crate::ast::{Clause, Conditional, Forbidden, Parameter};
use crate::store::Id;

/// A literal token of a categorical/ordinal domain, or a literal wrapped for
/// use inside an advanced forbidden clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    pub text: String,
}

/// Right-hand side of `in`.
///
/// # Example
/// ```text
/// MODE in {fast, slow}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValueArray {
    pub values: Vec<Id>,
}

/// Comment text without the leading `#`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
}

/// Everything that can live in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Parameter(Parameter),
    Value(ValueRecord),
    ValueArray(ValueArray),
    Clause(Clause),
    Conditional(Conditional),
    Forbidden(Forbidden),
    Comment(Comment),
}

impl Record {
    /// Short tag used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Record::Parameter(_) => "parameter",
            Record::Value(_) => "value",
            Record::ValueArray(_) => "value array",
            Record::Clause(_) => "clause",
            Record::Conditional(_) => "conditional",
            Record::Forbidden(_) => "forbidden",
            Record::Comment(_) => "comment",
        }
    }
}
