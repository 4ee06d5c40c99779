use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::store::Id;

/// Declared kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Real,
    Integer,
    Categorical,
    Ordinal,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Real => "real",
            ParamKind::Integer => "integer",
            ParamKind::Categorical => "categorical",
            ParamKind::Ordinal => "ordinal",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "real" => Some(ParamKind::Real),
            "integer" => Some(ParamKind::Integer),
            "categorical" => Some(ParamKind::Categorical),
            "ordinal" => Some(ParamKind::Ordinal),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ParamKind::Real | ParamKind::Integer)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which declaration syntax a parameter line uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclSyntax {
    /// `name real [0, 1] [0.5] log`
    Current,
    /// `name [0, 1] [0.5]l`, kind given by the trailing suffix
    Legacy,
}

/// A real bound or default, kept as written.
///
/// Ordering uses the exact decimal when both sides fit one (at most 28
/// fractional digits, magnitude below about 7.9e28) and falls back to `f64`
/// otherwise, so `1e-30` and `1e30` are accepted.
///
/// ```
/// use pcs_lang::ast::RealBound;
///
/// let tiny = RealBound::parse("1e-30").unwrap();
/// let small = RealBound::parse("0.10").unwrap();
/// assert!(tiny < small);
/// assert_eq!(small.to_string(), "0.10");
/// ```
#[derive(Debug, Clone)]
pub struct RealBound {
    text: String,
    value: f64,
    exact: Option<Decimal>,
}

impl RealBound {
    /// Parses a finite real in plain or scientific notation.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let exact = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .filter(|d| d.to_string().parse::<f64>().ok() == Some(value));
        Some(RealBound {
            text: text.to_string(),
            value,
            exact,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }
}

impl PartialEq for RealBound {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for RealBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.exact, other.exact) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.value.partial_cmp(&other.value),
        }
    }
}

impl fmt::Display for RealBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Values a parameter may take, together with its default.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Closed real range
    Real {
        lower: RealBound,
        upper: RealBound,
        default: RealBound,
    },
    /// Closed integer range
    Integer { lower: i64, upper: i64, default: i64 },
    /// Unordered set of value records
    Categorical { values: Vec<Id>, default: Id },
    /// Ordered set of value records
    Ordinal { values: Vec<Id>, default: Id },
}

impl Domain {
    /// Value records of a categorical or ordinal domain.
    pub fn value_ids(&self) -> &[Id] {
        match self {
            Domain::Categorical { values, .. } | Domain::Ordinal { values, .. } => values,
            Domain::Real { .. } | Domain::Integer { .. } => &[],
        }
    }
}

/// A tunable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub domain: Domain,
    /// Search on a log scale (numeric kinds only)
    pub log: bool,
}

impl Parameter {
    pub fn kind(&self) -> ParamKind {
        match self.domain {
            Domain::Real { .. } => ParamKind::Real,
            Domain::Integer { .. } => ParamKind::Integer,
            Domain::Categorical { .. } => ParamKind::Categorical,
            Domain::Ordinal { .. } => ParamKind::Ordinal,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }
}
