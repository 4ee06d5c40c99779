//! JSON -> configuration conversion

use super::CliError;

/// Flattens a JSON object of `name: value` pairs into text assignments.
///
/// Strings are taken as is; numbers and booleans use their JSON spelling.
/// Nested values and `null` are rejected.
pub fn json_to_assignments(v: serde_json::Value) -> Result<Vec<(String, String)>, CliError> {
    let serde_json::Value::Object(obj) = v else {
        return Err(CliError::Config("expected a JSON object".to_string()));
    };

    obj.into_iter()
        .map(|(name, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(CliError::Config(format!(
                        "value of `{}` must be a string, number or boolean, found {}",
                        name, other
                    )));
                }
            };
            Ok((name, text))
        })
        .collect()
}
