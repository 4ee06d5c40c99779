// tests/cli_tests.rs

use pcs_lang::cli::{
    CheckOptions, CheckResult, CliError, DocCategory, execute_check, get_doc_category, get_docs_overview,
    json_to_assignments,
};
use pcs_lang::Warning;

const LKH: &str = "\
KICK_WALK categorical {YES, NO} [NO]
KICKS integer [0, 5] [1]
KICKS | KICK_WALK == NO
";

fn options(source: &str) -> CheckOptions {
    CheckOptions {
        source: source.to_string(),
        ..Default::default()
    }
}

// ============================================================================
// check / print
// ============================================================================

#[test]
fn test_check_valid_document() {
    match execute_check(&options(LKH)).unwrap() {
        CheckResult::Valid(warnings) => assert!(warnings.is_empty()),
        other => panic!("Expected Valid, got {:?}", other),
    }
}

#[test]
fn test_check_reports_warnings() {
    let source = format!("{}not a pcs line\n", LKH);

    match execute_check(&options(&source)).unwrap() {
        CheckResult::Valid(warnings) => {
            assert_eq!(warnings.len(), 1);
            assert!(matches!(warnings[0], Warning::UnrecognizedLine { line: 4, .. }));
        }
        other => panic!("Expected Valid, got {:?}", other),
    }
}

#[test]
fn test_check_load_error() {
    let result = execute_check(&options("DEPTH integer [1, 64] [0]\n"));

    assert!(matches!(result, Err(CliError::Load(_))));
}

#[test]
fn test_print() {
    let opts = CheckOptions {
        print: true,
        ..options("KICK_WALK categorical {YES,NO} [NO]\n")
    };

    match execute_check(&opts).unwrap() {
        CheckResult::Printed(text) => assert_eq!(text, "KICK_WALK categorical {YES, NO} [NO]\n"),
        other => panic!("Expected Printed, got {:?}", other),
    }
}

// ============================================================================
// active
// ============================================================================

fn active(parameter: &str, config: Option<&str>) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        parameter: Some(parameter.to_string()),
        config: config.map(str::to_string),
        ..options(LKH)
    })
}

#[test]
fn test_active_query() {
    assert!(matches!(
        active("KICKS", Some(r#"{"KICK_WALK": "NO"}"#)),
        Ok(CheckResult::Active(true))
    ));
    assert!(matches!(
        active("KICKS", Some(r#"{"KICK_WALK": "YES", "KICKS": 2}"#)),
        Ok(CheckResult::Active(false))
    ));
}

#[test]
fn test_active_errors() {
    assert!(matches!(active("KICKS", None), Err(CliError::NoConfig)));
    assert!(matches!(active("KICKS", Some("{not json")), Err(CliError::Json(_))));
    assert!(matches!(active("KICKS", Some("{}")), Err(CliError::Eval(_))));
    assert!(matches!(active("KICKS", Some("[1, 2]")), Err(CliError::Config(_))));
}

#[test]
fn test_json_to_assignments() {
    let json: serde_json::Value = serde_json::from_str(r#"{"A": 3, "B": "x", "C": true, "D": 0.5}"#).unwrap();
    let mut assignments = json_to_assignments(json).unwrap();
    assignments.sort();

    assert_eq!(
        assignments,
        vec![
            ("A".to_string(), "3".to_string()),
            ("B".to_string(), "x".to_string()),
            ("C".to_string(), "true".to_string()),
            ("D".to_string(), "0.5".to_string()),
        ]
    );

    let nested: serde_json::Value = serde_json::from_str(r#"{"A": [1]}"#).unwrap();
    assert!(matches!(json_to_assignments(nested), Err(CliError::Config(_))));
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn test_doc_categories() {
    assert_eq!(DocCategory::from_str("Parameters"), Some(DocCategory::Parameters));
    assert_eq!(DocCategory::from_str("forbidden_clauses"), Some(DocCategory::Forbidden));
    assert_eq!(DocCategory::from_str("conditions"), Some(DocCategory::Conditionals));
    assert_eq!(DocCategory::from_str("operators"), None);

    assert!(get_docs_overview().contains("PCS DOCUMENTATION"));
    assert!(get_doc_category("comments").unwrap().starts_with("COMMENTS"));
    assert!(matches!(
        get_doc_category("nope"),
        Err(CliError::UnknownCategory(name)) if name == "nope"
    ));
}
