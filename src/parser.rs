use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Clause, ClauseOp, ForbiddenSyntax, Operand, ParamKind, Record, ValueArray, ValueRecord},
    store::{Id, Store, StoreError},
};

/// Name → id lookup of the declared parameters.
pub type ParameterIndex = HashMap<String, Id>;

/// Errors raised while building records from document text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The line does not have the shape of a declaration at all
    #[error("malformed declaration: `{0}`")]
    MalformedDeclaration(String),

    /// Range bounds missing or not parseable as the declared kind
    #[error("malformed range for `{name}`: `{range}`")]
    MalformedRange { name: String, range: String },

    /// Default not parseable as the declared kind
    #[error("malformed default for `{name}`: `{default}`")]
    MalformedDefault { name: String, default: String },

    /// Default outside the declared range or set
    #[error("default value `{default}` of `{name}` is outside its declared domain")]
    DefaultOutOfRange { name: String, default: String },

    /// Declaration builder invoked on a line of another kind
    #[error("expected a {expected} declaration, found `{found}`")]
    KindMismatch { expected: ParamKind, found: String },

    #[error("parameter `{0}` is declared more than once")]
    DuplicateParameter(String),

    /// Name or value text starting with the id prefix
    #[error("`{0}` starts with the reserved `@#` prefix")]
    ReservedName(String),

    /// A clause operand could not be matched to any parameter
    #[error("no parameter named `{0}`")]
    UnresolvedParameter(String),

    /// A literal outside a categorical/ordinal parameter's domain
    #[error("`{value}` is not a value of `{parameter}`")]
    UnknownValue { parameter: String, value: String },

    /// Operand of `in` is not a braced list
    #[error("expected a braced value list, found `{0}`")]
    MalformedSet(String),

    #[error("comparison `{0}` has no right-hand operand")]
    MissingOperand(String),

    #[error("unbalanced brackets in `{0}`")]
    UnbalancedBrackets(String),

    #[error("unsupported operator in `{0}`")]
    UnsupportedOperator(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of matching one operand of an advanced forbidden comparison.
///
/// The variants are tried in declaration order: a parameter name wins over a
/// value of the opposite parameter, which wins over a bare literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Name of a declared parameter
    Parameter(Id),
    /// Value of the categorical/ordinal parameter on the other side
    Value(Id),
    /// Literal facing a numeric parameter; wrapped in a value record once the
    /// clause is built
    Literal(String),
    Unresolved,
}

static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<left>.+?)\s*(?P<op>==|!=|<=|>=|<|>|=|\sin\b)\s*(?P<right>.*)$").unwrap()
});

static CLASSIC_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<name>[^\s=!<>(){}&|,]+)\s*=\s*(?P<value>[^\s=!<>(){}&|,]+)\s*$").unwrap()
});

/// Splits a comparison into its operands and operator, at the first operator.
fn split_comparison(text: &str) -> Result<(&str, ClauseOp, &str), ParseError> {
    let caps = COMPARISON
        .captures(text)
        .ok_or_else(|| ParseError::UnsupportedOperator(text.to_string()))?;

    let (Some(left), Some(op), Some(right)) = (caps.name("left"), caps.name("op"), caps.name("right"))
    else {
        return Err(ParseError::UnsupportedOperator(text.to_string()));
    };

    let op = ClauseOp::from_symbol(op.as_str())
        .filter(|op| !op.is_logical())
        .ok_or_else(|| ParseError::UnsupportedOperator(text.to_string()))?;

    let right = right.as_str().trim();
    if right.is_empty() {
        return Err(ParseError::MissingOperand(text.to_string()));
    }

    Ok((left.as_str().trim(), op, right))
}

/// Locates the top-level parenthesised spans of `text`.
///
/// Each span is returned as the byte positions of its opening and closing
/// bracket.
///
/// ```
/// use pcs_lang::parser::split_braces;
///
/// assert_eq!(split_braces("(a) && (b || (c))").unwrap(), vec![(0, 2), (7, 16)]);
/// assert!(split_braces("(a").is_err());
/// ```
pub fn split_braces(text: &str) -> Result<Vec<(usize, usize)>, ParseError> {
    let mut depth = 0usize;
    let mut start = 0;
    let mut spans = vec![];

    for (i, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseError::UnbalancedBrackets(text.to_string()))?;
                if depth == 0 {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ParseError::UnbalancedBrackets(text.to_string()));
    }
    Ok(spans)
}

/// Items of a braced list such as `{fast, slow}`.
fn split_set(text: &str) -> Result<Vec<&str>, ParseError> {
    let inner = text
        .trim()
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| ParseError::MalformedSet(text.to_string()))?;

    let items: Vec<&str> = inner.split(',').map(str::trim).collect();
    if items.iter().any(|item| item.is_empty()) {
        return Err(ParseError::MalformedSet(text.to_string()));
    }
    Ok(items)
}

/// Builds records from declaration lines and clause text.
///
/// The parser writes into a borrowed [`Store`] and keeps the
/// [`ParameterIndex`] current as declarations are added. Clauses can only
/// refer to parameters that are already in the index.
pub struct Parser<'a> {
    pub(crate) store: &'a mut Store,
    pub(crate) parameters: &'a mut ParameterIndex,
}

impl<'a> Parser<'a> {
    pub fn new(store: &'a mut Store, parameters: &'a mut ParameterIndex) -> Self {
        Parser { store, parameters }
    }

    pub fn lookup(&self, name: &str) -> Option<Id> {
        self.parameters.get(name).copied()
    }

    /// Value record of `param` whose text is `text`.
    fn value_of(&self, param: Id, text: &str) -> Option<Id> {
        let param = self.store.parameter(param)?;
        param
            .domain
            .value_ids()
            .iter()
            .copied()
            .find(|&id| self.store.value(id).is_some_and(|v| v.text == text))
    }

    fn is_set_kind(&self, param: Id) -> bool {
        self.store.parameter(param).is_some_and(|p| !p.is_numeric())
    }

    fn parameter_name(&self, param: Id) -> String {
        self.store
            .parameter(param)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| param.to_string())
    }

    fn push_clause(&mut self, left: impl Into<Operand>, op: ClauseOp, right: impl Into<Operand>) -> Id {
        self.store.insert(Record::Clause(Clause::new(left, op, right)))
    }

    fn push_value(&mut self, text: &str) -> Id {
        self.store.insert(Record::Value(ValueRecord {
            text: text.to_string(),
        }))
    }

    /// Right-hand operand of a comparison on `param`.
    ///
    /// Categorical/ordinal literals resolve to their value records, numeric
    /// literals stay text. `in` always yields a value array.
    fn comparison_operand(&mut self, param: Id, op: ClauseOp, text: &str) -> Result<Operand, ParseError> {
        let set_kind = self.is_set_kind(param);

        if op == ClauseOp::In {
            let items = split_set(text)?;
            let values = if set_kind {
                items
                    .iter()
                    .map(|item| {
                        self.value_of(param, item).ok_or_else(|| ParseError::UnknownValue {
                            parameter: self.parameter_name(param),
                            value: item.to_string(),
                        })
                    })
                    .collect::<Result<Vec<Id>, ParseError>>()?
            } else {
                items.iter().map(|item| self.push_value(item)).collect()
            };
            let array = self.store.insert(Record::ValueArray(ValueArray { values }));
            return Ok(Operand::Ref(array));
        }

        if set_kind {
            let value = self.value_of(param, text).ok_or_else(|| ParseError::UnknownValue {
                parameter: self.parameter_name(param),
                value: text.to_string(),
            })?;
            Ok(Operand::Ref(value))
        } else {
            Ok(Operand::Literal(text.to_string()))
        }
    }

    // ------------------------------------------------------------------
    // Conditional statements
    // ------------------------------------------------------------------

    /// Parse the condition of a conditional statement (the part after `|`).
    ///
    /// `||` is split before `&&`, so `A == 1 && B == 2 || C == 3` becomes
    /// `(A == 1 && B == 2) || C == 3`. Parentheses are not part of this
    /// dialect.
    ///
    /// On failure the store is left as it was before the call.
    pub fn parse_conditional_clause(&mut self, text: &str) -> Result<Id, ParseError> {
        self.transaction(|parser| parser.conditional_clause(text))
    }

    fn conditional_clause(&mut self, text: &str) -> Result<Id, ParseError> {
        let text = text.trim();

        for op in [ClauseOp::Or, ClauseOp::And] {
            if let Some((left, right)) = text.split_once(op.as_str()) {
                let left = self.conditional_clause(left)?;
                let right = self.conditional_clause(right)?;
                return Ok(self.push_clause(left, op, right));
            }
        }

        let (name, op, operand) = split_comparison(text)?;
        if !op.is_conditional_comparison() {
            return Err(ParseError::UnsupportedOperator(text.to_string()));
        }

        let param = self
            .lookup(name)
            .ok_or_else(|| ParseError::UnresolvedParameter(name.to_string()))?;
        let right = self.comparison_operand(param, op, operand)?;

        Ok(self.push_clause(param, op, right))
    }

    // ------------------------------------------------------------------
    // Forbidden clauses
    // ------------------------------------------------------------------

    /// Parse the body of a forbidden clause, with or without its braces.
    ///
    /// Text shaped like `A=1, B=2` is read as classic syntax; anything else
    /// goes through the advanced grammar.
    pub fn parse_forbidden_clause(&mut self, text: &str) -> Result<(ForbiddenSyntax, Id), ParseError> {
        self.transaction(|parser| parser.forbidden_clause(text))
    }

    fn forbidden_clause(&mut self, text: &str) -> Result<(ForbiddenSyntax, Id), ParseError> {
        let mut body = text.trim();
        if let Some(inner) = body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
            body = inner.trim();
        }

        if let Some(pairs) = classic_pairs(body) {
            debug!(clause = body, "classic forbidden syntax");
            let id = self.parse_classic_pairs(&pairs)?;
            return Ok((ForbiddenSyntax::Classic, id));
        }

        debug!(clause = body, "advanced forbidden syntax");
        let id = self.advanced_clause(body)?;
        Ok((ForbiddenSyntax::Advanced, id))
    }

    fn parse_classic_pairs(&mut self, pairs: &[(&str, &str)]) -> Result<Id, ParseError> {
        let Some(((name, value), rest)) = pairs.split_first() else {
            return Err(ParseError::UnsupportedOperator(String::new()));
        };

        let param = self
            .lookup(name)
            .ok_or_else(|| ParseError::UnresolvedParameter(name.to_string()))?;
        let right = self.comparison_operand(param, ClauseOp::Equal, value)?;
        let head = self.push_clause(param, ClauseOp::Equal, right);

        if rest.is_empty() {
            return Ok(head);
        }
        let tail = self.parse_classic_pairs(rest)?;
        Ok(self.push_clause(head, ClauseOp::And, tail))
    }

    /// Parse a forbidden clause written in the advanced syntax.
    ///
    /// Top-level parenthesised groups are parsed first and replaced in the
    /// text by the id of the resulting clause, then the remaining text is
    /// split on `||` and `&&` exactly like a conditional.
    pub fn parse_advanced_clause(&mut self, text: &str) -> Result<Id, ParseError> {
        self.transaction(|parser| parser.advanced_clause(text))
    }

    fn advanced_clause(&mut self, text: &str) -> Result<Id, ParseError> {
        let mut text = text.trim().to_string();

        if text.contains(['(', ')']) {
            let spans = split_braces(&text)?;

            if let [(0, end)] = spans[..]
                && end == text.len() - 1
            {
                let id = self.advanced_clause(&text[1..end])?;
                if let Record::Clause(clause) = self.store.get_mut(id)? {
                    clause.brackets = true;
                }
                return Ok(id);
            }

            for &(start, end) in spans.iter().rev() {
                let id = self.advanced_clause(&text[start..=end])?;
                text.replace_range(start..=end, &id.to_string());
            }
        }

        for op in [ClauseOp::Or, ClauseOp::And] {
            if let Some((left, right)) = text.split_once(op.as_str()) {
                let left = self.advanced_clause(left)?;
                let right = self.advanced_clause(right)?;
                return Ok(self.push_clause(left, op, right));
            }
        }

        if let Some(id) = Id::parse(&text) {
            return match self.store.clause(id) {
                Some(_) => Ok(id),
                None => Err(ParseError::UnresolvedParameter(text)),
            };
        }

        self.parse_advanced_comparison(&text)
    }

    fn parse_advanced_comparison(&mut self, text: &str) -> Result<Id, ParseError> {
        let (a, op, b) = split_comparison(text)?;

        if op == ClauseOp::In {
            let param = self
                .lookup(a)
                .ok_or_else(|| ParseError::UnresolvedParameter(a.to_string()))?;
            let right = self.comparison_operand(param, op, b)?;
            return Ok(self.push_clause(param, op, right));
        }

        let left = self.resolve_leaf(a, b);
        let right = self.resolve_leaf(b, a);

        if left == Resolution::Unresolved && right == Resolution::Unresolved {
            return Err(ParseError::UnresolvedParameter(a.to_string()));
        }
        // Both sides must resolve before a literal becomes a record.
        if left == Resolution::Unresolved {
            return Err(self.unresolved(a, b));
        }
        if right == Resolution::Unresolved {
            return Err(self.unresolved(b, a));
        }
        let left = self.materialize(left, a, b)?;
        let right = self.materialize(right, b, a)?;

        Ok(self.push_clause(left, op, right))
    }

    /// Decide what `token` refers to, given the text of the opposite operand.
    ///
    /// ```
    /// use pcs_lang::parser::{ParameterIndex, Parser, Resolution};
    /// use pcs_lang::store::Store;
    ///
    /// let mut store = Store::new();
    /// let mut index = ParameterIndex::new();
    /// let mut parser = Parser::new(&mut store, &mut index);
    /// let depth = parser.parse_declaration_line("DEPTH integer [1, 64] [8]").unwrap();
    ///
    /// assert_eq!(parser.resolve_leaf("DEPTH", "4"), Resolution::Parameter(depth));
    /// assert_eq!(parser.resolve_leaf("4", "DEPTH"), Resolution::Literal("4".into()));
    /// assert_eq!(parser.resolve_leaf("4", "WIDTH"), Resolution::Unresolved);
    /// ```
    pub fn resolve_leaf(&self, token: &str, opposite: &str) -> Resolution {
        if let Some(param) = self.lookup(token) {
            return Resolution::Parameter(param);
        }

        let Some(other) = self.lookup(opposite) else {
            return Resolution::Unresolved;
        };

        if self.is_set_kind(other) {
            match self.value_of(other, token) {
                Some(value) => Resolution::Value(value),
                None => Resolution::Unresolved,
            }
        } else {
            Resolution::Literal(token.to_string())
        }
    }

    fn materialize(&mut self, resolution: Resolution, token: &str, opposite: &str) -> Result<Id, ParseError> {
        match resolution {
            Resolution::Parameter(id) | Resolution::Value(id) => Ok(id),
            Resolution::Literal(text) => Ok(self.push_value(&text)),
            Resolution::Unresolved => Err(self.unresolved(token, opposite)),
        }
    }

    fn unresolved(&self, token: &str, opposite: &str) -> ParseError {
        match self.lookup(opposite) {
            Some(other) if self.is_set_kind(other) => ParseError::UnknownValue {
                parameter: self.parameter_name(other),
                value: token.to_string(),
            },
            _ => ParseError::UnresolvedParameter(token.to_string()),
        }
    }

    /// Runs `build`, dropping whatever it inserted if it fails.
    fn transaction<T>(&mut self, build: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        let mark = self.store.len();
        let result = build(self);
        if result.is_err() {
            self.store.truncate(mark);
        }
        result
    }
}

/// `Param=Value` pairs when the whole text has the classic shape.
fn classic_pairs(text: &str) -> Option<Vec<(&str, &str)>> {
    text.split(',')
        .map(|pair| {
            let caps = CLASSIC_PAIR.captures(pair)?;
            Some((caps.name("name")?.as_str(), caps.name("value")?.as_str()))
        })
        .collect()
}
