use std::fmt;

/// Clause operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseOp {
    // Comparison
    /// Equal (`==`, written `=` in classic forbidden clauses)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Membership
    /// Set membership (`in`)
    In,

    // Logical
    /// Logical AND (`&&`, written `,` in classic forbidden clauses)
    And,
    /// Logical OR (`||`)
    Or,
}

impl ClauseOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseOp::Equal => "==",
            ClauseOp::NotEqual => "!=",
            ClauseOp::LessThan => "<",
            ClauseOp::GreaterThan => ">",
            ClauseOp::LessEqual => "<=",
            ClauseOp::GreaterEqual => ">=",
            ClauseOp::In => "in",
            ClauseOp::And => "&&",
            ClauseOp::Or => "||",
        }
    }

    /// Parse the surface text of an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "==" | "=" => Some(ClauseOp::Equal),
            "!=" => Some(ClauseOp::NotEqual),
            "<" => Some(ClauseOp::LessThan),
            ">" => Some(ClauseOp::GreaterThan),
            "<=" => Some(ClauseOp::LessEqual),
            ">=" => Some(ClauseOp::GreaterEqual),
            "in" => Some(ClauseOp::In),
            "&&" => Some(ClauseOp::And),
            "||" => Some(ClauseOp::Or),
            _ => None,
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, ClauseOp::And | ClauseOp::Or)
    }

    /// Operators allowed in a conditional statement's comparisons.
    pub fn is_conditional_comparison(self) -> bool {
        matches!(
            self,
            ClauseOp::Equal
                | ClauseOp::NotEqual
                | ClauseOp::LessThan
                | ClauseOp::GreaterThan
                | ClauseOp::In
        )
    }
}

impl fmt::Display for ClauseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
