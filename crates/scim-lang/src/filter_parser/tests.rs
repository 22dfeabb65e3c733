use super::parse_filter;
use crate::ast::*;
use crate::token::tokenize_filter;

fn parse(filter: &str) -> Expr {
    parse_filter(&tokenize_filter(filter).unwrap()).unwrap()
}

fn parse_err(filter: &str) -> crate::ParseError {
    parse_filter(&tokenize_filter(filter).unwrap()).unwrap_err()
}

fn cmp(name: &str, op: CompareOp, value: Option<Literal>) -> Expr {
    Expr::Compare {
        op,
        attr: AttrPath::parse(name).unwrap(),
        value,
    }
}

// -----------------------------------------------------------------------
// Comparisons
// -----------------------------------------------------------------------

#[test]
fn string_equality() {
    assert_eq!(
        parse(r#"userName eq "bjensen""#),
        cmp(
            "userName",
            CompareOp::Eq,
            Some(Literal::String("bjensen".into()))
        )
    );
}

#[test]
fn presence_takes_no_literal() {
    assert_eq!(parse("title pr"), cmp("title", CompareOp::Pr, None));
}

#[test]
fn literal_types() {
    assert_eq!(
        parse("age ge 21"),
        cmp("age", CompareOp::Ge, Some(Literal::Integer(21)))
    );
    assert_eq!(
        parse("score lt 4.5"),
        cmp("score", CompareOp::Lt, Some(Literal::Decimal(4.5)))
    );
    assert_eq!(
        parse("active eq false"),
        cmp("active", CompareOp::Eq, Some(Literal::Bool(false)))
    );
    assert_eq!(
        parse("manager eq null"),
        cmp("manager", CompareOp::Eq, Some(Literal::Null))
    );
    assert_eq!(
        parse(r#"nickName eq "true""#),
        cmp("nickName", CompareOp::Eq, Some(Literal::String("true".into())))
    );
}

#[test]
fn dotted_and_urn_paths() {
    let expr = parse(r#"name.familyName co "O'Malley""#);
    let Expr::Compare { attr, .. } = &expr else {
        panic!("expected comparison, got {expr:?}");
    };
    assert_eq!(attr.names().collect::<Vec<_>>(), ["name", "familyName"]);
    assert!(attr.uri().is_none());

    let expr = parse(r#"urn:ietf:params:scim:schemas:core:2.0:User:name.givenName sw "B""#);
    let Expr::Compare { attr, .. } = &expr else {
        panic!("expected comparison, got {expr:?}");
    };
    assert_eq!(
        attr.uri(),
        Some("urn:ietf:params:scim:schemas:core:2.0:User")
    );
    assert_eq!(attr.attribute(), "name");
    assert_eq!(attr.sub_attributes(), ["givenName".to_string()]);
}

// -----------------------------------------------------------------------
// Precedence
// -----------------------------------------------------------------------

#[test]
fn and_binds_tighter_than_or() {
    let expr = parse("a eq 1 or b eq 2 and c eq 3");
    let expected = Expr::Logical {
        op: LogicalOp::Or,
        left: Box::new(cmp("a", CompareOp::Eq, Some(Literal::Integer(1)))),
        right: Box::new(Expr::Logical {
            op: LogicalOp::And,
            left: Box::new(cmp("b", CompareOp::Eq, Some(Literal::Integer(2)))),
            right: Box::new(cmp("c", CompareOp::Eq, Some(Literal::Integer(3)))),
        }),
    };
    assert_eq!(expr, expected);

    // Same shape as the explicitly grouped form once the group is stripped.
    let grouped = parse("a eq 1 or (b eq 2 and c eq 3)");
    let Expr::Logical { right, .. } = &grouped else {
        panic!("expected logical root");
    };
    let Expr::Logical { right: expected_right, .. } = &expected else {
        unreachable!()
    };
    assert_eq!(right.ungrouped(), expected_right.as_ref());
}

#[test]
fn or_is_left_associative() {
    let expr = parse("a pr or b pr or c pr");
    let Expr::Logical { op, left, right } = expr else {
        panic!("expected logical root");
    };
    assert_eq!(op, LogicalOp::Or);
    assert_eq!(*right, cmp("c", CompareOp::Pr, None));
    assert!(matches!(*left, Expr::Logical { op: LogicalOp::Or, .. }));
}

#[test]
fn not_binds_tighter_than_and() {
    let expr = parse("not a pr and b pr");
    let Expr::Logical { op, left, .. } = expr else {
        panic!("expected logical root");
    };
    assert_eq!(op, LogicalOp::And);
    assert_eq!(*left, Expr::Not(Box::new(cmp("a", CompareOp::Pr, None))));
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse("(a pr or b pr) and c pr");
    let Expr::Logical { op, left, .. } = expr else {
        panic!("expected logical root");
    };
    assert_eq!(op, LogicalOp::And);
    assert!(matches!(*left, Expr::Group(_)));
    assert!(matches!(
        left.ungrouped(),
        Expr::Logical {
            op: LogicalOp::Or,
            ..
        }
    ));
}

#[test]
fn not_over_group() {
    let expr = parse(r#"not (emails co "example.com")"#);
    let Expr::Not(inner) = expr else {
        panic!("expected not");
    };
    assert!(matches!(*inner, Expr::Group(_)));
}

#[test]
fn display_round_trips_structure() {
    let expr = parse(r#"(a eq "x" or b pr) and not c gt 2"#);
    assert_eq!(expr.to_string(), r#"(a eq "x" or b pr) and not c gt 2"#);
    assert_eq!(parse(&expr.to_string()), expr);
}

#[test]
fn collects_attributes_in_order() {
    let expr = parse(r#"a pr and (b.c eq 1 or not d eq "x")"#);
    let names: Vec<String> = expr.attributes().iter().map(|a| a.to_string()).collect();
    assert_eq!(names, vec!["a", "b.c", "d"]);
}

// -----------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------

#[test]
fn empty_filter_fails() {
    let err = parse_filter(&[]).unwrap_err();
    assert_eq!(err.position, 0);
    assert!(err.found.is_none());
}

#[test]
fn missing_operand() {
    let err = parse_err("userName eq");
    assert_eq!(err.position, 2);
    assert!(err.found.is_none());
    assert!(err.message.contains("missing operand"));
}

#[test]
fn missing_operator() {
    let err = parse_err(r#"userName "bjensen""#);
    assert_eq!(err.position, 1);
    assert_eq!(err.found.as_deref(), Some(r#""bjensen""#));
}

#[test]
fn unbalanced_open_paren() {
    let err = parse_err("(a pr");
    assert_eq!(err.position, 0);
    assert!(err.message.contains("unbalanced"));
}

#[test]
fn stray_close_paren_is_trailing() {
    let err = parse_err("a pr)");
    assert_eq!(err.position, 2);
    assert_eq!(err.found.as_deref(), Some(")"));
    assert_eq!(err.offset, 4);
}

#[test]
fn trailing_tokens_fail() {
    let err = parse_err("a pr b pr");
    assert_eq!(err.position, 2);
    assert!(err.message.contains("trailing"));
}

#[test]
fn dangling_logical_fails() {
    let err = parse_err("a pr and");
    assert_eq!(err.position, 3);
    assert!(err.found.is_none());
}

#[test]
fn literal_where_path_expected() {
    let err = parse_err(r#""x" eq "y""#);
    assert_eq!(err.position, 0);
}

#[test]
fn invalid_attribute_name() {
    let err = parse_err("name..given pr");
    assert_eq!(err.position, 0);
    assert!(err.message.contains("invalid attribute path"));
}

#[test]
fn pr_rejects_trailing_literal() {
    let err = parse_err(r#"title pr "x""#);
    assert_eq!(err.position, 2);
}
