// tests/integration_tests.rs

use pcs_lang::ast::{ForbiddenSyntax, ParamKind, Record};
use pcs_lang::{Document, EvalError, LoadError, ParseError, Warning};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const SEARCH_SPACE: &str = "\
# solver search space
STRATEGY categorical {greedy, beam, anneal} [greedy]
WIDTH integer [1, 16] [4]
TEMPERATURE real [0.1, 10.0] [1.0] log
EFFORT ordinal {low, medium, high} [medium]
DEPTH [1, 64] [8]i

WIDTH | STRATEGY == beam
TEMPERATURE | STRATEGY == anneal
DEPTH | STRATEGY != greedy && WIDTH > 2 || EFFORT in {high}
{STRATEGY=greedy, EFFORT=high}
{(WIDTH > 8 || DEPTH > 32) && STRATEGY == beam} # too slow
";

fn load(text: &str) -> Document {
    Document::parse(text).unwrap()
}

fn forbidden_clauses(doc: &Document) -> Vec<(ForbiddenSyntax, pcs_lang::Id)> {
    doc.forbidden()
        .into_iter()
        .map(|id| match doc.store().get(id).unwrap() {
            Record::Forbidden(f) => (f.syntax, f.clause),
            other => panic!("Expected forbidden record, got {:?}", other),
        })
        .collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_search_space() {
    let doc = load(SEARCH_SPACE);

    let kinds: Vec<ParamKind> = doc
        .parameters()
        .into_iter()
        .map(|id| doc.parameter(id).unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            ParamKind::Categorical,
            ParamKind::Integer,
            ParamKind::Real,
            ParamKind::Ordinal,
            ParamKind::Integer,
        ]
    );
    assert_eq!(doc.conditionals().len(), 3);

    let syntaxes: Vec<ForbiddenSyntax> = forbidden_clauses(&doc).into_iter().map(|(s, _)| s).collect();
    assert_eq!(syntaxes, vec![ForbiddenSyntax::Classic, ForbiddenSyntax::Advanced]);
    assert!(doc.warnings().is_empty());
    assert_eq!(doc.content().len(), 12);
}

#[test]
fn test_activation_queries() {
    let doc = load(SEARCH_SPACE);

    assert_eq!(doc.is_active("WIDTH", &[("STRATEGY", "beam")]), Ok(true));
    assert_eq!(doc.is_active("TEMPERATURE", &[("STRATEGY", "beam")]), Ok(false));
    assert_eq!(doc.is_active("STRATEGY", &[]), Ok(true));
    assert_eq!(
        doc.is_active("DEPTH", &[("STRATEGY", "greedy"), ("WIDTH", "1"), ("EFFORT", "high")]),
        Ok(true)
    );
    assert_eq!(
        doc.is_active("DEPTH", &[("STRATEGY", "greedy"), ("WIDTH", "1"), ("EFFORT", "low")]),
        Ok(false)
    );
    assert_eq!(
        doc.is_active("DEPTH", &[("STRATEGY", "beam"), ("EFFORT", "low")]),
        Err(EvalError::MissingAssignment("WIDTH".to_string()))
    );
}

#[test]
fn test_parent_conditions() {
    let doc = load(SEARCH_SPACE);
    let width = doc.lookup_parameter("WIDTH").unwrap();
    let effort = doc.lookup_parameter("EFFORT").unwrap();

    assert_eq!(doc.parent_conditions(width).len(), 1);
    assert!(doc.parent_conditions(effort).is_empty());
}

// ============================================================================
// Load errors
// ============================================================================

#[test]
fn test_load_error_reports_line() {
    let err = Document::parse("A integer [0, 3] [1]\nB | C == 1\nB integer [0, 3] [1]\n").unwrap_err();

    assert_eq!(
        err,
        LoadError {
            line: 2,
            text: "B | C == 1".to_string(),
            source: ParseError::UnresolvedParameter("C".to_string()),
        }
    );
}

#[test]
fn test_load_error_for_bad_declaration() {
    let err = Document::parse("# header\nDEPTH integer [1, 64] [100]\n").unwrap_err();

    assert_eq!(err.line, 2);
    assert!(matches!(err.source, ParseError::DefaultOutOfRange { .. }));
}

#[test]
fn test_unknown_conditional_child() {
    let err = Document::parse("A integer [0, 3] [1]\nGHOST | A == 1\n").unwrap_err();

    assert_eq!(err.source, ParseError::UnresolvedParameter("GHOST".to_string()));
}

#[test]
fn test_name_value_collision_warning() {
    let doc = load(
        "fast categorical {on, off} [on]
MODE categorical {fast, slow} [fast]
{MODE == slow && fast == on}
",
    );

    assert_eq!(
        doc.warnings(),
        &[Warning::NameValueCollision {
            name: "fast".to_string()
        }]
    );
}

#[test]
fn test_no_collision_warning_without_advanced_clauses() {
    let doc = load(
        "fast categorical {on, off} [on]
MODE categorical {fast, slow} [fast]
{MODE=slow, fast=on}
",
    );

    assert!(doc.warnings().is_empty());
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_print_is_stable() {
    let once = load(SEARCH_SPACE).print().unwrap();
    let twice = load(&once).print().unwrap();

    assert_eq!(once, twice);
}

fn strategies() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["greedy", "beam", "anneal"])
}

fn efforts() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["low", "medium", "high"])
}

proptest! {
    #[test]
    fn test_round_trip_preserves_semantics(
        strategy in strategies(),
        effort in efforts(),
        width in 1i64..=16,
        depth in 1i64..=64,
    ) {
        let original = load(SEARCH_SPACE);
        let reprinted = load(&original.print().unwrap());

        let width = width.to_string();
        let depth = depth.to_string();
        let assignments = [
            ("STRATEGY", strategy),
            ("EFFORT", effort),
            ("WIDTH", width.as_str()),
            ("DEPTH", depth.as_str()),
        ];

        for name in ["WIDTH", "TEMPERATURE", "DEPTH"] {
            prop_assert_eq!(
                original.is_active(name, &assignments),
                reprinted.is_active(name, &assignments)
            );
        }

        let before = original.configuration(&assignments).unwrap();
        let after = reprinted.configuration(&assignments).unwrap();
        let pairs = forbidden_clauses(&original)
            .into_iter()
            .zip(forbidden_clauses(&reprinted));
        for ((syntax_a, a), (syntax_b, b)) in pairs {
            prop_assert_eq!(syntax_a, syntax_b);
            prop_assert_eq!(original.evaluate(a, &before), reprinted.evaluate(b, &after));
        }
    }
}
