//! Text serialization of loaded `.pcs` documents.
//!
//! This module turns records back into document text. Output is a pure
//! function of the records: whitespace is normalized, but the dialect of every
//! clause is kept, so a printed document parses back into equivalent clause
//! trees.
//!
//! # Features
//!
//! - **Parameters** - always printed in the current keyword syntax, legacy
//!   declarations included
//! - **Conditionals** - operators surrounded by single spaces
//! - **Classic forbidden clauses** - `&&` printed as `, ` and `==` as `=`
//! - **Advanced forbidden clauses** - parentheses printed exactly where the
//!   source had them
//! - **Comments** - full-line and trailing comments are kept in place
//!
//! # Examples
//!
//! ```
//! use pcs_lang::Document;
//!
//! let doc = Document::parse("A integer [0, 3] [1]\nB integer [0, 3] [1]\n{A=1,B=2}\n").unwrap();
//! assert_eq!(
//!     doc.print().unwrap(),
//!     "A integer [0, 3] [1]\nB integer [0, 3] [1]\n{A=1, B=2}\n"
//! );
//! ```

use tracing::warn;

use crate::{
    ast::{ClauseOp, Domain, ForbiddenSyntax, Operand, Parameter, Record},
    store::{Id, Store, StoreError},
};

/// Surface syntax used to render a clause tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Conditional,
    Classic,
    Advanced,
}

impl From<ForbiddenSyntax> for Dialect {
    fn from(syntax: ForbiddenSyntax) -> Self {
        match syntax {
            ForbiddenSyntax::Classic => Dialect::Classic,
            ForbiddenSyntax::Advanced => Dialect::Advanced,
        }
    }
}

pub struct Printer<'a> {
    store: &'a Store,
}

impl<'a> Printer<'a> {
    pub fn new(store: &'a Store) -> Self {
        Printer { store }
    }

    /// Renders `content` one record per line, each line ending in `\n`.
    pub fn print(&self, content: &[Id]) -> Result<String, StoreError> {
        let mut out = String::new();
        for id in content {
            out.push_str(&self.render(*id)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Renders a single record as it appears on its own line.
    pub fn render(&self, id: Id) -> Result<String, StoreError> {
        let line = match self.store.get(id)? {
            Record::Parameter(param) => self.render_parameter(param)?,
            Record::Comment(comment) if comment.text.is_empty() => return Ok(String::new()),
            Record::Comment(comment) => return Ok(format!("#{}", comment.text)),
            Record::Conditional(cond) => format!(
                "{} | {}",
                self.parameter_name(cond.child)?,
                self.render_clause(cond.clause, Dialect::Conditional)?
            ),
            Record::Forbidden(forbidden) => {
                format!("{{{}}}", self.render_clause(forbidden.clause, forbidden.syntax.into())?)
            }
            Record::Clause(_) => self.render_clause(id, Dialect::Advanced)?,
            Record::Value(value) => value.text.clone(),
            Record::ValueArray(_) => self.render_ref(id, Dialect::Advanced)?,
        };

        match self.store.comment_of(id) {
            Some(comment) => Ok(format!("{} {}", line, self.render(comment)?)),
            None => Ok(line),
        }
    }

    fn render_parameter(&self, param: &Parameter) -> Result<String, StoreError> {
        let kind = param.kind();
        let mut line = match &param.domain {
            Domain::Real { lower, upper, default } => {
                format!("{} {} [{}, {}] [{}]", param.name, kind, lower, upper, default)
            }
            Domain::Integer { lower, upper, default } => {
                format!("{} {} [{}, {}] [{}]", param.name, kind, lower, upper, default)
            }
            Domain::Categorical { values, default } | Domain::Ordinal { values, default } => {
                let values = values
                    .iter()
                    .map(|v| self.value_text(*v))
                    .collect::<Result<Vec<_>, _>>()?;
                format!(
                    "{} {} {{{}}} [{}]",
                    param.name,
                    kind,
                    values.join(", "),
                    self.value_text(*default)?
                )
            }
        };
        if param.log {
            line.push_str(" log");
        }
        Ok(line)
    }

    /// Renders the clause tree rooted at `id` in `dialect`.
    pub fn render_clause(&self, id: Id, dialect: Dialect) -> Result<String, StoreError> {
        let Some(clause) = self.store.clause(id) else {
            return self.render_ref(id, dialect);
        };

        let left = self.render_operand(&clause.left, dialect)?;
        let right = self.render_operand(&clause.right, dialect)?;

        Ok(match dialect {
            Dialect::Classic => {
                let op = match clause.op {
                    ClauseOp::And => ", ",
                    ClauseOp::Equal => "=",
                    other => {
                        warn!(operator = %other, "operator has no classic spelling");
                        other.as_str()
                    }
                };
                format!("{left}{op}{right}")
            }
            Dialect::Conditional => format!("{} {} {}", left, clause.op, right),
            Dialect::Advanced if clause.brackets => format!("({} {} {})", left, clause.op, right),
            Dialect::Advanced => format!("{} {} {}", left, clause.op, right),
        })
    }

    fn render_operand(&self, operand: &Operand, dialect: Dialect) -> Result<String, StoreError> {
        match operand {
            Operand::Literal(text) => Ok(text.clone()),
            Operand::Ref(id) => self.render_ref(*id, dialect),
        }
    }

    fn render_ref(&self, id: Id, dialect: Dialect) -> Result<String, StoreError> {
        match self.store.get(id)? {
            Record::Parameter(param) => Ok(param.name.clone()),
            Record::Value(value) => Ok(value.text.clone()),
            Record::ValueArray(array) => {
                let items = array
                    .values
                    .iter()
                    .map(|v| self.value_text(*v))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{{{}}}", items.join(", ")))
            }
            Record::Clause(_) => self.render_clause(id, dialect),
            other => {
                warn!(%id, kind = other.type_name(), "record cannot appear inside a clause");
                Ok(id.to_string())
            }
        }
    }

    fn value_text(&self, id: Id) -> Result<String, StoreError> {
        match self.store.value(id) {
            Some(value) => Ok(value.text.clone()),
            None => Err(StoreError::UnknownId(id)),
        }
    }

    fn parameter_name(&self, id: Id) -> Result<String, StoreError> {
        match self.store.parameter(id) {
            Some(param) => Ok(param.name.clone()),
            None => Err(StoreError::UnknownId(id)),
        }
    }
}

/// Renders `content` from `store` as document text.
pub fn to_text(store: &Store, content: &[Id]) -> Result<String, StoreError> {
    Printer::new(store).print(content)
}
