//! Documentation content for pcs CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Parameters,
    Conditionals,
    Forbidden,
    Comments,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "parameters" | "parameter" | "params" => Some(Self::Parameters),
            "conditionals" | "conditional" | "conditions" => Some(Self::Conditionals),
            "forbidden" | "forbidden-clauses" | "forbiddens" => Some(Self::Forbidden),
            "comments" | "comment" => Some(Self::Comments),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"PCS DOCUMENTATION

A .pcs document describes the search space of a tunable algorithm: typed
parameters, the conditions under which a parameter is active, and the value
combinations that are forbidden. The format is line oriented; every line is
one declaration, one conditional, one forbidden clause or one comment.

DOCUMENTATION CATEGORIES

  parameters        real, integer, categorical and ordinal declarations
  conditionals      Activation conditions of the form `child | clause`
  forbidden         Classic and advanced forbidden clauses
  comments          Full-line and trailing comments

QUICK REFERENCE

  NAME real [lo, hi] [default] [log]       Real parameter
  NAME integer [lo, hi] [default] [log]    Integer parameter
  NAME categorical {a, b, c} [default]     Categorical parameter
  NAME ordinal {low, mid, high} [default]  Ordinal parameter
  CHILD | PARENT == value                  Conditional
  {A=1, B=2}                               Classic forbidden clause
  {(A == 1 || B == 2) && C > 3}            Advanced forbidden clause
  # text                                   Comment

Run 'pcs doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Parameters) => Ok(PARAMETERS_DOC),
        Some(DocCategory::Conditionals) => Ok(CONDITIONALS_DOC),
        Some(DocCategory::Forbidden) => Ok(FORBIDDEN_DOC),
        Some(DocCategory::Comments) => Ok(COMMENTS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const PARAMETERS_DOC: &str = r#"PARAMETERS - Typed Declarations

REAL
  NAME real [lower, upper] [default]
    A continuous range. Bounds may use scientific notation and keep the
    precision they were written with.

    Example:
      ALPHA real [0.01, 1.0] [0.10]

INTEGER
  NAME integer [lower, upper] [default]

    Example:
      DEPTH integer [1, 64] [8]

LOG SCALE
  Append `log` to a real or integer declaration.

    Example:
      LEARNING_RATE real [1e-5, 1e-1] [1e-3] log

CATEGORICAL
  NAME categorical {v1, v2, ...} [default]

    Example:
      KICK_WALK categorical {YES, NO} [NO]

ORDINAL
  NAME ordinal {v1, v2, ...} [default]
    Like categorical, but the values are listed in increasing order.

    Example:
      EFFORT ordinal {low, medium, high} [medium]

LEGACY SYNTAX
  Older documents omit the kind keyword:

    NAME [lower, upper] [default]        real
    NAME [lower, upper] [default]i       integer
    NAME [lower, upper] [default]l       real, log scale
    NAME [lower, upper] [default]il      integer, log scale
    NAME {v1, v2} [default]              categorical

  Legacy declarations are printed back in the keyword syntax.

  Constraints:
    - Names are unique within a document
    - The default must lie inside the range or be one of the listed values
    - Names and values may not start with `@#`
"#;

const CONDITIONALS_DOC: &str = r#"CONDITIONALS - Activation Conditions

FORM
  CHILD | clause
    CHILD is active only when the clause holds. A parameter with several
    conditionals must satisfy all of them; a parameter with none is always
    active.

    Example:
      KICKS | KICK_WALK == NO

OPERATORS
  ==    Equal
  !=    Not equal
  <     Less than
  >     Greater than
  in    Member of a braced list

  Examples:
    PATIENCE | DEPTH > 4
    MUTATION | STRATEGY in {evolve, mixed}

COMBINING
  &&    Logical AND
  ||    Logical OR

  `||` binds looser than `&&`:
    X | A == 1 && B == 2 || C == 3
  reads as
    X | (A == 1 && B == 2) || C == 3

  Constraints:
    - Parentheses are not allowed in conditionals
    - Every parameter mentioned must have a value in the configuration
      being checked, otherwise activation cannot be determined
"#;

const FORBIDDEN_DOC: &str = r#"FORBIDDEN - Excluded Combinations

CLASSIC SYNTAX
  {NAME=value, NAME=value, ...}
    The combination of all listed assignments is forbidden.

    Example:
      {KICK_WALK=YES, KICKS=0}

    Printed as:
      {KICK_WALK=YES, KICKS=0}

ADVANCED SYNTAX
  {clause}
    Any boolean clause over parameters. Supports ==, !=, <, >, <=, >=, in,
    && and ||, and parentheses for grouping.

    Example:
      {(A == 1 || B == 2) && C > 3}

    Either side of a comparison may name the parameter:
      {3 < DEPTH}

  Constraints:
    - A literal facing a categorical or ordinal parameter must be one of
      its values
    - Parentheses are printed back exactly where they were written
"#;

const COMMENTS_DOC: &str = r##"COMMENTS

FULL-LINE
  # text
    Kept in place when the document is printed.

TRAILING
  DEPTH integer [1, 64] [8] # text
    Attached to the declaration, conditional or forbidden clause on the
    same line.

BLANK LINES
  Preserved as empty lines.

UNRECOGNIZED LINES
  Lines that match no known form are kept as comments and reported as
  warnings by `pcs check`.
"##;
