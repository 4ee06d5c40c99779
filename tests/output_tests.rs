// tests/output_tests.rs

use pcs_lang::ast::{ClauseOp, ForbiddenSyntax, Operand};
use pcs_lang::output::{Dialect, Printer};
use pcs_lang::{Document, Record, Warning};
use pretty_assertions::assert_eq;

fn reprint(text: &str) -> String {
    Document::parse(text).unwrap().print().unwrap()
}

// ============================================================================
// Whole documents
// ============================================================================

#[test]
fn test_canonical_document_is_unchanged() {
    let text = "\
# LKH search space

KICK_WALK categorical {YES, NO} [NO]
KICKS integer [0, 5] [1] # kicks per restart
ALPHA real [0.01, 1.0] [0.10] log
EFFORT ordinal {low, medium, high} [medium]
KICKS | KICK_WALK == NO
{KICK_WALK=YES, KICKS=0}
{(KICKS > 2 || EFFORT == high) && ALPHA < 0.5} # too aggressive
";

    assert_eq!(reprint(text), text);
}

#[test]
fn test_classic_forbidden_spacing() {
    assert_eq!(
        reprint("A integer [0, 3] [1]\nB integer [0, 3] [1]\n{A=1,B=2}\n"),
        "A integer [0, 3] [1]\nB integer [0, 3] [1]\n{A=1, B=2}\n"
    );
}

#[test]
fn test_advanced_brackets_reprinted() {
    assert_eq!(
        reprint(
            "A integer [0, 9] [1]\nB integer [0, 9] [1]\nC integer [0, 9] [1]\n{(A==1 || B==2) && C==3}\n"
        ),
        "A integer [0, 9] [1]\nB integer [0, 9] [1]\nC integer [0, 9] [1]\n{(A == 1 || B == 2) && C == 3}\n"
    );
}

#[test]
fn test_conditional_spacing_normalized() {
    assert_eq!(
        reprint("KICK_WALK categorical {YES, NO} [NO]\nKICKS integer [0, 5] [1]\nKICKS|KICK_WALK==NO\n"),
        "KICK_WALK categorical {YES, NO} [NO]\nKICKS integer [0, 5] [1]\nKICKS | KICK_WALK == NO\n"
    );
}

#[test]
fn test_membership_printed_as_set() {
    assert_eq!(
        reprint("MODE categorical {fast,slow,mixed} [fast]\nX integer [0, 1] [0]\nX | MODE in {fast,mixed}\n"),
        "MODE categorical {fast, slow, mixed} [fast]\nX integer [0, 1] [0]\nX | MODE in {fast, mixed}\n"
    );
}

#[test]
fn test_legacy_declarations_printed_with_keywords() {
    assert_eq!(
        reprint("DEPTH [1, 64] [8]il\nALPHA [0.01, 1.0] [0.1]\nMODE {fast, slow} [slow]\n"),
        "DEPTH integer [1, 64] [8] log\nALPHA real [0.01, 1.0] [0.1]\nMODE categorical {fast, slow} [slow]\n"
    );
}

#[test]
fn test_conditional_before_declaration() {
    assert_eq!(
        reprint("KICKS | KICK_WALK == NO\nKICK_WALK categorical {YES, NO} [NO]\nKICKS integer [0, 5] [1]\n"),
        "KICKS | KICK_WALK == NO\nKICK_WALK categorical {YES, NO} [NO]\nKICKS integer [0, 5] [1]\n"
    );
}

#[test]
fn test_unrecognized_line_kept_as_comment() {
    let doc = Document::parse("DEPTH integer [1, 64] [8]\nthis is not pcs\n").unwrap();

    assert_eq!(doc.print().unwrap(), "DEPTH integer [1, 64] [8]\n#this is not pcs\n");
    assert_eq!(
        doc.warnings(),
        &[Warning::UnrecognizedLine {
            line: 2,
            text: "this is not pcs".to_string()
        }]
    );
}

// ============================================================================
// Printer
// ============================================================================

#[test]
fn test_render_clause_in_each_dialect() {
    let doc = Document::parse("A integer [0, 3] [1]\nB integer [0, 3] [1]\n{A=1,B=2}\n").unwrap();
    let clause = match doc.store().get(doc.forbidden()[0]).unwrap() {
        Record::Forbidden(f) => f.clause,
        other => panic!("Expected forbidden record, got {:?}", other),
    };
    let printer = Printer::new(doc.store());

    assert_eq!(printer.render_clause(clause, Dialect::Classic).unwrap(), "A=1, B=2");
    assert_eq!(
        printer.render_clause(clause, Dialect::Conditional).unwrap(),
        "A == 1 && B == 2"
    );
    assert_eq!(
        printer.render_clause(clause, Dialect::Advanced).unwrap(),
        "A == 1 && B == 2"
    );
}

#[test]
fn test_render_single_records() {
    let doc = Document::parse("MODE categorical {fast, slow} [fast] # strategy\n").unwrap();
    let mode = doc.lookup_parameter("MODE").unwrap();
    let printer = Printer::new(doc.store());

    assert_eq!(
        printer.render(mode).unwrap(),
        "MODE categorical {fast, slow} [fast] # strategy"
    );
}

// ============================================================================
// Programmatic construction
// ============================================================================

#[test]
fn test_build_document_in_code() {
    let mut doc = Document::parse("A integer [0, 3] [1]\nB integer [0, 3] [1]\n").unwrap();
    let a = doc.lookup_parameter("A").unwrap();
    let b = doc.lookup_parameter("B").unwrap();

    let header = doc.new_comment(" generated");
    doc.append(header).unwrap();

    let gate = doc.new_clause(a, ClauseOp::GreaterThan, Operand::Literal("1".to_string()));
    doc.new_conditional(b, gate).unwrap();

    let one = doc.new_value("1");
    let two = doc.new_value("2");
    let left = doc.new_clause(a, ClauseOp::Equal, one);
    let right = doc.new_clause(b, ClauseOp::Equal, two);
    let both = doc.new_clause(left, ClauseOp::And, right);
    doc.new_forbidden(both, ForbiddenSyntax::Advanced).unwrap();

    assert_eq!(
        doc.print().unwrap(),
        "A integer [0, 3] [1]\nB integer [0, 3] [1]\n# generated\nB | A > 1\n{A == 1 && B == 2}\n"
    );
    assert_eq!(doc.is_active("B", &[("A", "3")]), Ok(true));
}

#[test]
fn test_new_conditional_checks_records() {
    let mut doc = Document::parse("A integer [0, 3] [1]\n").unwrap();
    let a = doc.lookup_parameter("A").unwrap();
    let value = doc.new_value("1");

    assert!(doc.new_conditional(a, value).is_err());
    assert!(doc.new_conditional(value, value).is_err());
    assert!(doc.new_forbidden(a, ForbiddenSyntax::Classic).is_err());
}
