//! Integration tests for scanning whole filter queries.
//!
//! These tests drive the public API the way a query parser would: run
//! `tokenize` or pull tokens from a `Scanner`, then inspect kinds and values.

use filterscan::{
    lexer::{
        lexer::{tokenize, Scanner},
        tokens::{Keyword, TokenKind},
    },
    render_error, Position,
};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.value)
        .collect()
}

#[test]
fn test_null_comparison() {
    assert_eq!(
        kinds("students?filter=equals(displayName,null)"),
        vec![
            TokenKind::Identifier,
            TokenKind::ParamStart,
            TokenKind::Keyword,
            TokenKind::Equals,
            TokenKind::Keyword,
            TokenKind::LeftParenthesis,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Keyword,
            TokenKind::RightParenthesis,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_field_to_field_comparison() {
    assert_eq!(
        values("teachers?filter=equals(displayName,lastName)"),
        vec![
            "teachers",
            "?",
            "filter",
            "=",
            "equals",
            "(",
            "displayName",
            ",",
            "lastName",
            ")",
            " ",
        ]
    );
}

#[test]
fn test_incomplete_queries_still_scan() {
    assert_eq!(
        kinds("courses?filter=equals("),
        vec![
            TokenKind::Identifier,
            TokenKind::ParamStart,
            TokenKind::Keyword,
            TokenKind::Equals,
            TokenKind::Keyword,
            TokenKind::LeftParenthesis,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        values("courses?filter=equals(displayName,)"),
        vec!["courses", "?", "filter", "=", "equals", "(", "displayName", ",", ")", " "]
    );
}

#[test]
fn test_encoded_spaces_between_terms() {
    assert_eq!(
        values("users?filter=not(equals(name,'Ann'))%20and%20has(tags,'x')"),
        vec![
            "users", "?", "filter", "=", "not", "(", "equals", "(", "name", ",", "Ann", ")", ")",
            "and", "has", "(", "tags", ",", "x", ")", " ",
        ]
    );
}

#[test]
fn test_escaped_apostrophe_splits_value() {
    assert_eq!(
        values("users?filter=equals(displayName,'Brian O''Connor')"),
        vec![
            "users",
            "?",
            "filter",
            "=",
            "equals",
            "(",
            "displayName",
            ",",
            "Brian O",
            "Connor",
            ")",
            " ",
        ]
    );
}

#[test]
fn test_parser_can_read_keywords() {
    let keywords: Vec<Keyword> = Scanner::new(
        "filter=or(startsWith(a,'x'),endsWith(a,'y'),greaterOrEqual(n,m))",
    )
    .filter_map(|token| token.keyword())
    .collect();

    assert_eq!(
        keywords,
        vec![
            Keyword::Filter,
            Keyword::Or,
            Keyword::StartsWith,
            Keyword::EndsWith,
            Keyword::GreaterOrEqual,
        ]
    );
}

#[test]
fn test_lenient_caller_skips_illegal() {
    let mut scanner = Scanner::new("courses?top=10");
    let mut illegal = vec![];
    let mut kept = vec![];

    loop {
        let token = scanner.next_token();
        match token.kind {
            TokenKind::Eof => break,
            TokenKind::Illegal => {
                illegal.push(token.span.start);
                scanner.skip_illegal();
            }
            _ => kept.push(token.value),
        }
    }

    assert_eq!(illegal, vec![Position(12), Position(13)]);
    assert_eq!(kept, vec!["courses", "?", "top", "="]);
}

#[test]
fn test_illegal_character_diagnostic() {
    let source = "courses?filter=equals(display_name,'x')";
    let error = tokenize(source).unwrap_err();

    assert_eq!(*error.get_position(), Position(29));

    let rendered = render_error(&error, source);
    let caret_line = rendered.lines().last().unwrap();
    assert_eq!(caret_line.find('^'), Some("  | ".len() + 29));
}
