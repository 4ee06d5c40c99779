//! Load `.pcs` documents and run queries against them

use super::{CliError, json_to_assignments};
use crate::{Document, Warning};

/// Options for the check, print and active commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Document text
    pub source: String,
    /// Parameter whose activation is queried
    pub parameter: Option<String>,
    /// JSON configuration for the activation query
    pub config: Option<String>,
    /// Print the regenerated document
    pub print: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Document loaded; any soft findings are attached
    Valid(Vec<Warning>),
    /// Regenerated document text
    Printed(String),
    /// Activation of the queried parameter
    Active(bool),
}

/// Execute a pcs check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let doc = Document::parse(&options.source)?;

    if let Some(param) = &options.parameter {
        let json = options.config.as_ref().ok_or(CliError::NoConfig)?;
        let json_value: serde_json::Value = serde_json::from_str(json)?;
        let assignments = json_to_assignments(json_value)?;

        let pairs: Vec<(&str, &str)> = assignments
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        return Ok(CheckResult::Active(doc.is_active(param, &pairs)?));
    }

    if options.print {
        return Ok(CheckResult::Printed(doc.print()?));
    }

    Ok(CheckResult::Valid(doc.warnings().to_vec()))
}
