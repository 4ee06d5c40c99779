// tests/lexer_tests.rs

use pcs_lang::ast::{DeclSyntax, LineKind, ParamKind};
use pcs_lang::lexer::{Lexer, classify, split_comment};

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_current_declarations() {
    let test_cases = vec![
        ("ALPHA real [0.01, 1.0] [0.1]", ParamKind::Real),
        ("ALPHA real [0.01, 1.0] [0.1] log", ParamKind::Real),
        ("DEPTH integer [1, 64] [8]", ParamKind::Integer),
        ("KICK_WALK categorical {YES, NO} [NO]", ParamKind::Categorical),
        ("EFFORT ordinal {low, medium, high} [medium]", ParamKind::Ordinal),
        ("DEPTH integer [1, 64] [8] # search depth", ParamKind::Integer),
    ];

    for (input, kind) in test_cases {
        assert_eq!(
            classify(input),
            LineKind::Parameter(kind, DeclSyntax::Current),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_legacy_declarations() {
    let test_cases = vec![
        ("ALPHA [0.01, 1.0] [0.1]", ParamKind::Real),
        ("ALPHA [0.01, 1.0] [0.1]l", ParamKind::Real),
        ("DEPTH [1, 64] [8]i", ParamKind::Integer),
        ("DEPTH [1, 64] [8]il", ParamKind::Integer),
        ("DEPTH [1, 64] [8]li", ParamKind::Integer),
        ("MODE {fast, slow} [fast]", ParamKind::Categorical),
    ];

    for (input, kind) in test_cases {
        assert_eq!(
            classify(input),
            LineKind::Parameter(kind, DeclSyntax::Legacy),
            "Failed for input: {}",
            input
        );
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_conditionals() {
    assert_eq!(classify("KICKS | KICK_WALK == NO"), LineKind::Conditional);
    assert_eq!(classify("KICKS|KICK_WALK==NO"), LineKind::Conditional);
    assert_eq!(classify("PATIENCE | DEPTH > 4 && MODE != fast"), LineKind::Conditional);
    assert_eq!(classify("MUTATION | MODE in {fast, slow}"), LineKind::Conditional);
}

#[test]
fn test_forbidden() {
    assert_eq!(classify("{A=1, B=2}"), LineKind::Forbidden);
    assert_eq!(classify("{A=1,B=2}"), LineKind::Forbidden);
    assert_eq!(classify("{(A == 1 || B == 2) && C == 3}"), LineKind::Forbidden);
    assert_eq!(classify("{A=1, B=2} # never both"), LineKind::Forbidden);
}

#[test]
fn test_comments_and_blanks() {
    assert_eq!(classify(""), LineKind::Blank);
    assert_eq!(classify("   "), LineKind::Blank);
    assert_eq!(classify("# search space"), LineKind::Comment);
    assert_eq!(classify("  #indented"), LineKind::Comment);
}

#[test]
fn test_unrecognized() {
    assert_eq!(classify("this is not pcs"), LineKind::Unrecognized);
    assert_eq!(classify("{A=1"), LineKind::Unrecognized);
    assert_eq!(classify("DEPTH integer"), LineKind::Unrecognized);
}

// ============================================================================
// Comment splitting
// ============================================================================

#[test]
fn test_split_comment() {
    assert_eq!(
        split_comment("KICKS | KICK_WALK == NO # kicks only"),
        ("KICKS | KICK_WALK == NO", Some(" kicks only"))
    );
    assert_eq!(split_comment("{A=1, B=2}"), ("{A=1, B=2}", None));
    assert_eq!(split_comment("#"), ("", Some("")));
}

// ============================================================================
// Line iteration
// ============================================================================

#[test]
fn test_line_numbers() {
    let lines: Vec<_> = Lexer::new("# header\n\nDEPTH integer [1, 64] [8]\n  junk  \n").collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines.iter().map(|l| l.number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(lines[0].kind, LineKind::Comment);
    assert_eq!(lines[1].kind, LineKind::Blank);
    assert_eq!(
        lines[2].kind,
        LineKind::Parameter(ParamKind::Integer, DeclSyntax::Current)
    );
    assert_eq!(lines[3].kind, LineKind::Unrecognized);
    assert_eq!(lines[3].text, "junk");
}

#[test]
fn test_next_line_exhausts() {
    let mut lexer = Lexer::new("A integer [0, 1] [0]");
    assert!(lexer.next_line().is_some());
    assert!(lexer.next_line().is_none());
}
