/// Intermediate result of evaluating a clause operand.
///
/// Parameters and values evaluate to their text, value arrays to a set of
/// texts and clauses to a boolean.
///
/// # Examples
///
/// ```
/// use pcs_lang::Value;
///
/// let assigned = Value::Text("NO".to_string());
/// assert_eq!(assigned.as_text(), "NO");
/// assert_eq!(assigned.as_bool(), None);
/// assert_eq!(Value::Bool(true).as_bool(), Some(true));
///
/// let number = Value::Text("3.5".to_string());
/// assert_eq!(number.as_float(), Some(3.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Result of a comparison or logical clause
    Bool(bool),

    /// Assigned parameter value or literal
    Text(String),

    /// Members of a value array
    Set(Vec<String>),
}

impl Value {
    /// Truth value of a clause result; texts and sets have none
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric reading of a text value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text used for equality and membership tests
    pub fn as_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Set(items) => format!("{{{}}}", items.join(", ")),
        }
    }
}
