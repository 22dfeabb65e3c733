use super::{PathSegment, tokenize_path};
use crate::ast::{CompareOp, Expr, Literal, LogicalOp};
use crate::error::{LangError, PathErrorKind};

fn path_error_kind(path: &str) -> PathErrorKind {
    match tokenize_path(path).unwrap_err() {
        LangError::Path(e) => e.kind(),
        other => panic!("expected path error for {path:?}, got {other:?}"),
    }
}

// -----------------------------------------------------------------------
// Plain paths
// -----------------------------------------------------------------------

#[test]
fn plain_path_splits_on_dots() {
    for path in ["userName", "name.familyName", "a.b.c.d"] {
        let segments = tokenize_path(path).unwrap();
        let expected: Vec<&str> = path.split('.').collect();
        assert_eq!(segments.len(), expected.len());
        let names: Vec<&str> = segments.attribute_names().collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn empty_components_fail() {
    for path in ["", ".name", "name.", "name..givenName"] {
        assert_eq!(path_error_kind(path), PathErrorKind::EmptyComponent, "{path:?}");
    }
}

// -----------------------------------------------------------------------
// Filtered components
// -----------------------------------------------------------------------

#[test]
fn filter_segment_between_names() {
    let mut segments = tokenize_path(r#"emails[type eq "work"].value"#).unwrap();
    assert_eq!(segments.len(), 3);
    assert_eq!(
        segments.poll(),
        Some(PathSegment::Attribute("emails".into()))
    );
    match segments.poll() {
        Some(PathSegment::Filter(Expr::Compare { op, attr, value })) => {
            assert_eq!(op, CompareOp::Eq);
            assert_eq!(attr.to_string(), "type");
            assert_eq!(value, Some(Literal::String("work".into())));
        }
        other => panic!("expected filter segment, got {other:?}"),
    }
    assert_eq!(segments.poll(), Some(PathSegment::Attribute("value".into())));
    assert!(segments.poll().is_none());
}

#[test]
fn compound_filter_in_brackets() {
    let segments = tokenize_path(r#"emails[type eq "work" and primary eq true].value"#).unwrap();
    let filter = segments.iter().nth(1).and_then(PathSegment::as_filter).unwrap();
    assert!(matches!(
        filter,
        Expr::Logical {
            op: LogicalOp::And,
            ..
        }
    ));
}

#[test]
fn trailing_filter_component() {
    let segments = tokenize_path(r#"members[value eq "2819c223"]"#).unwrap();
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().nth(1).unwrap().as_filter().is_some());
}

#[test]
fn dots_inside_brackets_do_not_split() {
    let segments = tokenize_path(r#"emails[value ew "example.com"].type"#).unwrap();
    assert_eq!(segments.len(), 3);
    let names: Vec<&str> = segments.attribute_names().collect();
    assert_eq!(names, vec!["emails", "type"]);
}

#[test]
fn brackets_and_dots_inside_quotes_are_literal() {
    let segments = tokenize_path(r#"emails[value eq "a]b"].display"#).unwrap();
    let names: Vec<&str> = segments.attribute_names().collect();
    assert_eq!(names, vec!["emails", "display"]);
    match segments.iter().nth(1) {
        Some(PathSegment::Filter(Expr::Compare { value, .. })) => {
            assert_eq!(value, &Some(Literal::String("a]b".into())));
        }
        other => panic!("expected filter segment, got {other:?}"),
    }

    let segments = tokenize_path(r#"emails[value sw "x.y[z"].type"#).unwrap();
    assert_eq!(segments.len(), 3);
}

#[test]
fn escaped_quote_does_not_end_filter_value() {
    let segments = tokenize_path(r#"emails[display eq "say \"a]\""].value"#).unwrap();
    assert_eq!(segments.len(), 3);
    match segments.iter().nth(1) {
        Some(PathSegment::Filter(Expr::Compare { value, .. })) => {
            assert_eq!(value, &Some(Literal::String(r#"say "a]""#.into())));
        }
        other => panic!("expected filter segment, got {other:?}"),
    }
}

#[test]
fn invalid_bracket_shapes() {
    for path in [
        r#"emails[type eq "work"]]"#,
        r#"emails[type eq "work""#,
        r#"emails]type eq "work"["#,
        r#"[type eq "work"]"#,
        "emails[]",
        r#"emails[type eq "work"]x"#,
        r#"emails[[type eq "work"]]"#,
    ] {
        assert_eq!(path_error_kind(path), PathErrorKind::InvalidComponent, "{path:?}");
    }
}

#[test]
fn invalid_component_is_named() {
    let err = tokenize_path(r#"name.emails[type eq "work"]]"#).unwrap_err();
    assert!(err.to_string().contains(r#"emails[type eq "work"]]"#));
}

#[test]
fn bad_filter_propagates() {
    assert!(matches!(
        tokenize_path(r#"emails[type eq "work].value"#),
        Err(LangError::Lex(_))
    ));
    assert!(matches!(
        tokenize_path("emails[type eq].value"),
        Err(LangError::Parse(_))
    ));
}
