use crate::ast::ClauseOp;
use crate::store::Id;

/// One side of a [`Clause`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Reference to another record
    ///
    /// A parameter, a value, a value array or a nested clause.
    Ref(Id),

    /// Raw literal text
    ///
    /// Used for the right-hand side of comparisons on numeric parameters.
    ///
    /// # Example
    /// ```text
    /// DEPTH > 4
    /// ```
    Literal(String),
}

impl Operand {
    pub fn as_ref_id(&self) -> Option<Id> {
        match self {
            Operand::Ref(id) => Some(*id),
            Operand::Literal(_) => None,
        }
    }
}

impl From<Id> for Operand {
    fn from(id: Id) -> Self {
        Operand::Ref(id)
    }
}

/// Binary expression node.
///
/// Conditional statements and forbidden clauses are both parsed into trees of
/// clauses. Chains such as `A && B && C` become right-nested trees.
///
/// # Examples
/// ```text
/// KICK_WALK == NO
/// MODE in {fast, slow}
/// (A == 1 || B == 2) && C == 3
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub left: Operand,
    pub op: ClauseOp,
    pub right: Operand,
    /// Whether the source wrapped this node in parentheses.
    /// Only the advanced forbidden dialect prints it back.
    pub brackets: bool,
}

impl Clause {
    pub fn new(left: impl Into<Operand>, op: ClauseOp, right: impl Into<Operand>) -> Self {
        Clause {
            left: left.into(),
            op,
            right: right.into(),
            brackets: false,
        }
    }
}
