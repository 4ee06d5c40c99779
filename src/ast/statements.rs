use std::fmt;

use crate::store::Id;

/// Activation condition of a parameter.
///
/// `child` is only active when `clause` evaluates to true.
///
/// # Example
/// ```text
/// KICKS | KICK_WALK == NO
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub child: Id,
    pub clause: Id,
}

/// Surface syntax a forbidden clause was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenSyntax {
    /// `{A=1, B=2}`
    Classic,
    /// `{(A == 1 || B == 2) && C > 3}`
    Advanced,
}

impl fmt::Display for ForbiddenSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForbiddenSyntax::Classic => f.write_str("classic"),
            ForbiddenSyntax::Advanced => f.write_str("advanced"),
        }
    }
}

/// A combination of parameter values that must never occur.
#[derive(Debug, Clone, PartialEq)]
pub struct Forbidden {
    pub syntax: ForbiddenSyntax,
    pub clause: Id,
}
