//! Loaded `.pcs` documents.
//!
//! [`Document`] owns the record store, the parameter index and the textual
//! order of the records, and exposes the queries consumers need: parameter
//! lookup, activation checks and printing.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    ast::{
        Clause, ClauseOp, Comment, Conditional, Domain, Forbidden, ForbiddenSyntax, Line, LineKind,
        Operand, Parameter, Record, ValueRecord,
    },
    evaluator::{Configuration, EvalError, Evaluator},
    lexer::{Lexer, split_comment},
    output::to_text,
    parser::{ParameterIndex, ParseError, Parser},
    store::{Id, Store, StoreError},
};

/// A declaration or clause that could not be loaded, with the line it came from.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {source}\n    {text}")]
pub struct LoadError {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    #[source]
    pub source: ParseError,
}

impl LoadError {
    fn new(line: &Line, source: ParseError) -> Self {
        LoadError {
            line: line.number,
            text: line.text.clone(),
            source,
        }
    }
}

/// Problems that do not stop a document from loading.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Line that matched no known shape; kept as a comment
    UnrecognizedLine { line: usize, text: String },
    /// A parameter name equals a value text while advanced forbidden clauses
    /// are in use, so those clauses may resolve operands the wrong way
    NameValueCollision { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognizedLine { line, text } => {
                write!(f, "line {}: unrecognized line converted to a comment: {}", line, text)
            }
            Warning::NameValueCollision { name } => write!(
                f,
                "parameter name `{}` is also used as a value while advanced forbidden clauses are present; resolve manually",
                name
            ),
        }
    }
}

/// A parameter configuration space.
#[derive(Debug, Clone, Default)]
pub struct Document {
    store: Store,
    parameters: ParameterIndex,
    content: Vec<Id>,
    warnings: Vec<Warning>,
}

impl Document {
    /// An empty document, for building one programmatically.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a document from its text.
    ///
    /// Parameters are built on a first pass. Conditionals and forbidden
    /// clauses get their slot reserved in textual order and are parsed on a
    /// second pass, so they may mention parameters declared further down.
    ///
    /// ```
    /// use pcs_lang::Document;
    ///
    /// let doc = Document::parse(
    ///     "KICKS | KICK_WALK == NO\nKICK_WALK categorical {YES, NO} [NO]\nKICKS integer [0, 5] [1]\n",
    /// )
    /// .unwrap();
    /// assert!(doc.is_active("KICKS", &[("KICK_WALK", "NO")]).unwrap());
    /// ```
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut doc = Document::new();
        let mut pending = vec![];

        for line in Lexer::new(text) {
            match line.kind {
                LineKind::Parameter(kind, syntax) => {
                    let id = doc
                        .parser()
                        .parse_declaration(kind, syntax, &line.text)
                        .map_err(|e| LoadError::new(&line, e))?;
                    doc.content.push(id);
                }
                LineKind::Blank => doc.push_comment(""),
                LineKind::Comment => {
                    let text = line.text.strip_prefix('#').unwrap_or(&line.text);
                    doc.push_comment(text);
                }
                LineKind::Unrecognized => {
                    warn!(line = line.number, text = %line.text, "unrecognized line converted to a comment");
                    doc.push_comment(&line.text);
                    doc.warnings.push(Warning::UnrecognizedLine {
                        line: line.number,
                        text: line.text,
                    });
                }
                LineKind::Conditional | LineKind::Forbidden => {
                    let id = doc.store.allocate();
                    doc.content.push(id);
                    pending.push((id, line));
                }
            }
        }

        for (id, line) in &pending {
            doc.build_statement(*id, line)
                .map_err(|e| LoadError::new(line, e))?;
        }

        doc.validate();
        debug!(
            parameters = doc.parameters.len(),
            records = doc.store.len(),
            warnings = doc.warnings.len(),
            "loaded document"
        );
        Ok(doc)
    }

    fn push_comment(&mut self, text: &str) {
        let id = self.new_comment(text);
        self.content.push(id);
    }

    fn build_statement(&mut self, id: Id, line: &Line) -> Result<(), ParseError> {
        let (code, comment) = split_comment(&line.text);

        let record = match line.kind {
            LineKind::Conditional => {
                let (child, condition) = code
                    .split_once('|')
                    .ok_or_else(|| ParseError::UnsupportedOperator(code.to_string()))?;
                let child = child.trim();
                let child = self
                    .parameters
                    .get(child)
                    .copied()
                    .ok_or_else(|| ParseError::UnresolvedParameter(child.to_string()))?;
                let clause = self.parser().parse_conditional_clause(condition)?;
                Record::Conditional(Conditional { child, clause })
            }
            _ => {
                let (syntax, clause) = self.parser().parse_forbidden_clause(code)?;
                Record::Forbidden(Forbidden { syntax, clause })
            }
        };

        self.store.put(id, record)?;
        if let Some(text) = comment {
            let comment = self.new_comment(text);
            self.store.attach_comment(id, comment)?;
        }
        Ok(())
    }

    /// Soft checks run after loading; findings become [`Warning`]s.
    fn validate(&mut self) {
        let advanced = self.forbidden().iter().any(|id| {
            matches!(
                self.store.get(*id),
                Ok(Record::Forbidden(Forbidden {
                    syntax: ForbiddenSyntax::Advanced,
                    ..
                }))
            )
        });
        if !advanced {
            return;
        }

        let mut names: Vec<&String> = self
            .parameters
            .keys()
            .filter(|name| {
                self.store
                    .records()
                    .any(|(_, r)| matches!(r, Record::Value(v) if &v.text == *name))
            })
            .collect();
        names.sort();

        let collisions: Vec<Warning> = names
            .into_iter()
            .map(|name| Warning::NameValueCollision { name: name.clone() })
            .collect();
        for warning in &collisions {
            warn!("{}", warning);
        }
        self.warnings.extend(collisions);
    }

    /// A parser writing into this document's store.
    pub fn parser(&mut self) -> Parser<'_> {
        Parser::new(&mut self.store, &mut self.parameters)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Record ids in textual order.
    pub fn content(&self) -> &[Id] {
        &self.content
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn lookup_parameter(&self, name: &str) -> Option<Id> {
        self.parameters.get(name).copied()
    }

    pub fn parameter(&self, id: Id) -> Option<&Parameter> {
        self.store.parameter(id)
    }

    /// Accepts a parameter name or a rendered parameter id (`@#3`).
    pub fn resolve_parameter(&self, name_or_id: &str) -> Option<Id> {
        match Id::parse(name_or_id) {
            Some(id) => self.store.parameter(id).map(|_| id),
            None => self.lookup_parameter(name_or_id.trim()),
        }
    }

    fn content_of(&self, keep: impl Fn(&Record) -> bool) -> Vec<Id> {
        self.content
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_ok_and(&keep))
            .collect()
    }

    /// Parameter ids in declaration order.
    pub fn parameters(&self) -> Vec<Id> {
        self.content_of(|r| matches!(r, Record::Parameter(_)))
    }

    pub fn conditionals(&self) -> Vec<Id> {
        self.content_of(|r| matches!(r, Record::Conditional(_)))
    }

    pub fn forbidden(&self) -> Vec<Id> {
        self.content_of(|r| matches!(r, Record::Forbidden(_)))
    }

    /// Domain of a parameter as text: the items of a categorical/ordinal
    /// parameter, or the two bounds of a numeric one.
    pub fn named_values(&self, param: Id) -> Result<Vec<String>, StoreError> {
        let param = self.store.parameter(param).ok_or(StoreError::UnknownId(param))?;
        match &param.domain {
            Domain::Real { lower, upper, .. } => Ok(vec![lower.to_string(), upper.to_string()]),
            Domain::Integer { lower, upper, .. } => Ok(vec![lower.to_string(), upper.to_string()]),
            Domain::Categorical { values, .. } | Domain::Ordinal { values, .. } => values
                .iter()
                .map(|v| {
                    self.store
                        .value(*v)
                        .map(|v| v.text.clone())
                        .ok_or(StoreError::UnknownId(*v))
                })
                .collect(),
        }
    }

    /// Builds a [`Configuration`] from `(parameter, value)` pairs.
    ///
    /// Parameters may be given by name or id; a value given as the id of a
    /// value record is replaced by that record's text.
    pub fn configuration(&self, assignments: &[(&str, &str)]) -> Result<Configuration, EvalError> {
        let mut config = Configuration::new();
        for (param, value) in assignments {
            let id = self
                .resolve_parameter(param)
                .ok_or_else(|| EvalError::UnknownParameter(param.to_string()))?;
            let text = match Id::parse(value).and_then(|v| self.store.value(v)) {
                Some(record) => record.text.clone(),
                None => value.to_string(),
            };
            config.assign(id, text);
        }
        Ok(config)
    }

    /// Whether the parameter named (or identified) by `param` is active under
    /// the given assignments.
    pub fn is_active(&self, param: &str, assignments: &[(&str, &str)]) -> Result<bool, EvalError> {
        let id = self
            .resolve_parameter(param)
            .ok_or_else(|| EvalError::UnknownParameter(param.to_string()))?;
        let config = self.configuration(assignments)?;
        self.is_active_with(id, &config)
    }

    pub fn is_active_with(&self, param: Id, config: &Configuration) -> Result<bool, EvalError> {
        Evaluator::new(&self.store).is_active(param, config)
    }

    pub fn evaluate(&self, clause: Id, config: &Configuration) -> Result<bool, EvalError> {
        Evaluator::new(&self.store).evaluate(clause, config)
    }

    /// Conditionals gating `param`.
    pub fn parent_conditions(&self, param: Id) -> Vec<Id> {
        Evaluator::new(&self.store).parent_conditions(param)
    }

    /// Whether `param` appears as a leaf anywhere under `clause`.
    pub fn contains_parameter(&self, clause: Id, param: Id) -> Result<bool, StoreError> {
        let Record::Clause(node) = self.store.get(clause)? else {
            return Ok(clause == param);
        };
        for operand in [&node.left, &node.right] {
            if let Operand::Ref(id) = operand
                && (*id == param || self.contains_parameter(*id, param)?)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // Programmatic construction

    pub fn new_value(&mut self, text: &str) -> Id {
        self.store.insert(Record::Value(ValueRecord {
            text: text.to_string(),
        }))
    }

    /// Creates a comment record. It is not placed in the document; use
    /// [`Document::append`] for that.
    pub fn new_comment(&mut self, text: &str) -> Id {
        self.store.insert(Record::Comment(Comment {
            text: text.to_string(),
        }))
    }

    pub fn new_clause(&mut self, left: impl Into<Operand>, op: ClauseOp, right: impl Into<Operand>) -> Id {
        self.store.insert(Record::Clause(Clause::new(left, op, right)))
    }

    /// Adds a conditional for `child` at the end of the document.
    pub fn new_conditional(&mut self, child: Id, clause: Id) -> Result<Id, StoreError> {
        self.store.parameter(child).ok_or(StoreError::UnknownId(child))?;
        self.store.clause(clause).ok_or(StoreError::UnknownId(clause))?;
        let id = self.store.insert(Record::Conditional(Conditional { child, clause }));
        self.content.push(id);
        Ok(id)
    }

    /// Adds a forbidden clause at the end of the document.
    pub fn new_forbidden(&mut self, clause: Id, syntax: ForbiddenSyntax) -> Result<Id, StoreError> {
        self.store.clause(clause).ok_or(StoreError::UnknownId(clause))?;
        let id = self.store.insert(Record::Forbidden(Forbidden { syntax, clause }));
        self.content.push(id);
        Ok(id)
    }

    /// Places an existing record at the end of the document.
    pub fn append(&mut self, id: Id) -> Result<(), StoreError> {
        self.store.get(id)?;
        self.content.push(id);
        Ok(())
    }

    /// Regenerates the document text.
    pub fn print(&self) -> Result<String, StoreError> {
        to_text(&self.store, &self.content)
    }
}
