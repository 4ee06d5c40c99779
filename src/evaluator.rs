use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{Clause, ClauseOp, Operand, Record},
    store::{Id, Store, StoreError},
    value::Value,
};

/// Partial assignment of parameters to value texts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    assignments: HashMap<Id, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `value` to the parameter `param`, returning the previous value.
    pub fn assign(&mut self, param: Id, value: impl Into<String>) -> Option<String> {
        self.assignments.insert(param, value.into())
    }

    pub fn get(&self, param: Id) -> Option<&str> {
        self.assignments.get(&param).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(Id, S)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (Id, S)>>(iter: I) -> Self {
        Configuration {
            assignments: iter.into_iter().map(|(id, v)| (id, v.into())).collect(),
        }
    }
}

/// Errors that can occur while evaluating a clause.
///
/// Evaluation never modifies the store, so a failed query can simply be
/// retried with a more complete configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A parameter referenced by the clause has no assigned value
    #[error("no value assigned to `{0}`; activation cannot be determined")]
    MissingAssignment(String),

    /// An operand of `<`, `>`, `<=` or `>=` is not a number
    #[error("cannot compare `{text}` numerically")]
    NonNumericComparison { text: String },

    /// Operand of the wrong record type (e.g. `in` without a value array)
    #[error("invalid operand: {0}")]
    InvalidOperand(String),

    /// Configuration key or queried parameter that is not declared
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Evaluates clause trees held in a [`Store`].
pub struct Evaluator<'a> {
    store: &'a Store,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a Store) -> Self {
        Evaluator { store }
    }

    /// Evaluates the clause stored under `clause` against `config`.
    ///
    /// Both operands of `&&` and `||` are always evaluated, so a missing
    /// assignment anywhere in the tree is reported even when the other side
    /// already decides the result.
    pub fn evaluate(&self, clause: Id, config: &Configuration) -> Result<bool, EvalError> {
        let result = self.eval_ref(clause, config)?;
        trace!(%clause, ?result, "evaluated clause");
        logical(&result, "a clause")
    }

    /// Conditionals whose child is `param`, in document order.
    pub fn parent_conditions(&self, param: Id) -> Vec<Id> {
        self.store
            .records()
            .filter_map(|(id, record)| match record {
                Record::Conditional(cond) if cond.child == param => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Whether `param` is active under `config`.
    ///
    /// Every conditional gating `param` is evaluated and the results are
    /// combined with AND. A parameter without conditionals is always active.
    pub fn is_active(&self, param: Id, config: &Configuration) -> Result<bool, EvalError> {
        let mut active = true;
        for cond in self.parent_conditions(param) {
            let Record::Conditional(cond) = self.store.get(cond)? else {
                continue;
            };
            active &= self.evaluate(cond.clause, config)?;
        }
        Ok(active)
    }

    fn eval_operand(&self, operand: &Operand, config: &Configuration) -> Result<Value, EvalError> {
        match operand {
            Operand::Literal(text) => Ok(Value::Text(text.clone())),
            Operand::Ref(id) => self.eval_ref(*id, config),
        }
    }

    fn eval_ref(&self, id: Id, config: &Configuration) -> Result<Value, EvalError> {
        match self.store.get(id)? {
            Record::Parameter(param) => config
                .get(id)
                .map(|v| Value::Text(v.to_string()))
                .ok_or_else(|| EvalError::MissingAssignment(param.name.clone())),
            Record::Value(value) => Ok(Value::Text(value.text.clone())),
            Record::ValueArray(array) => {
                let mut items = Vec::with_capacity(array.values.len());
                for value in &array.values {
                    match self.store.get(*value)? {
                        Record::Value(v) => items.push(v.text.clone()),
                        other => {
                            return Err(EvalError::InvalidOperand(format!(
                                "value array member {} is a {}",
                                value,
                                other.type_name()
                            )));
                        }
                    }
                }
                Ok(Value::Set(items))
            }
            Record::Clause(clause) => self.eval_clause(clause, config).map(Value::Bool),
            other => Err(EvalError::InvalidOperand(format!(
                "{} is a {}, not a clause operand",
                id,
                other.type_name()
            ))),
        }
    }

    fn eval_clause(&self, clause: &Clause, config: &Configuration) -> Result<bool, EvalError> {
        let left = self.eval_operand(&clause.left, config)?;
        let right = self.eval_operand(&clause.right, config)?;

        match clause.op {
            ClauseOp::And => Ok(logical(&left, "`&&`")? & logical(&right, "`&&`")?),
            ClauseOp::Or => Ok(logical(&left, "`||`")? | logical(&right, "`||`")?),
            // Ordinal order is not consulted: operands compare as numbers.
            ClauseOp::LessThan | ClauseOp::GreaterThan | ClauseOp::LessEqual | ClauseOp::GreaterEqual => {
                let a = numeric(&left)?;
                let b = numeric(&right)?;
                Ok(match clause.op {
                    ClauseOp::LessThan => a < b,
                    ClauseOp::GreaterThan => a > b,
                    ClauseOp::LessEqual => a <= b,
                    _ => a >= b,
                })
            }
            ClauseOp::Equal => Ok(left.as_text() == right.as_text()),
            ClauseOp::NotEqual => Ok(left.as_text() != right.as_text()),
            ClauseOp::In => match right {
                Value::Set(items) => Ok(items.contains(&left.as_text())),
                other => Err(EvalError::InvalidOperand(format!(
                    "right operand of `in` must be a value array, found `{}`",
                    other.as_text()
                ))),
            },
        }
    }
}

/// Operands of `&&`/`||` and evaluated roots must be clauses.
fn logical(value: &Value, context: &str) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| {
        EvalError::InvalidOperand(format!("{} needs a clause, found `{}`", context, value.as_text()))
    })
}

fn numeric(value: &Value) -> Result<f64, EvalError> {
    value.as_float().ok_or_else(|| EvalError::NonNumericComparison {
        text: value.as_text(),
    })
}
