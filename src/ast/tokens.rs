use crate::ast::{DeclSyntax, ParamKind};

/// Class of one line of a `.pcs` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line
    Blank,

    /// Full-line comment
    ///
    /// # Example
    /// ```text
    /// # search space for the LKH solver
    /// ```
    Comment,

    /// Parameter declaration
    ///
    /// # Examples
    /// ```text
    /// ALPHA real [0.01, 1.0] [0.1] log
    /// DEPTH [1, 64] [8]i
    /// ```
    Parameter(ParamKind, DeclSyntax),

    /// Activation condition
    ///
    /// # Example
    /// ```text
    /// KICKS | KICK_WALK == NO
    /// ```
    Conditional,

    /// Forbidden clause, in either syntax
    ///
    /// # Examples
    /// ```text
    /// {A=1, B=2}
    /// {(A == 1 || B == 2) && C == 3}
    /// ```
    Forbidden,

    /// Anything else. Kept as a comment when the document is loaded.
    Unrecognized,
}

/// A classified line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Line text with surrounding whitespace removed
    pub text: String,
    pub kind: LineKind,
}
