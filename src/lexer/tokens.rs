use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        map.insert("filter", Keyword::Filter);
        map.insert("equals", Keyword::Equals);
        map.insert("lessThan", Keyword::LessThan);
        map.insert("lessOrEqual", Keyword::LessOrEqual);
        map.insert("greaterThan", Keyword::GreaterThan);
        map.insert("greaterOrEqual", Keyword::GreaterOrEqual);
        map.insert("contains", Keyword::Contains);
        map.insert("startsWith", Keyword::StartsWith);
        map.insert("endsWith", Keyword::EndsWith);
        map.insert("any", Keyword::Any);
        map.insert("has", Keyword::Has);
        map.insert("not", Keyword::Not);
        map.insert("or", Keyword::Or);
        map.insert("and", Keyword::And);
        map.insert("null", Keyword::Null);
        map
    };
}

/// Classifies a run of letters. Lookup is case-sensitive.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    if KEYWORD_LOOKUP.contains_key(ident) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Identifier,
    Keyword,

    ParamStart,       // ?
    Equals,           // =
    LeftParenthesis,  // (
    RightParenthesis, // )
    Comma,            // ,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The reserved words of the filter language.
///
/// Every one of them scans as [`TokenKind::Keyword`]; this enum is what a
/// parser gets back from [`Token::keyword`] when it needs the actual word.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    Equals,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    Any,
    Has,
    Not,
    Or,
    And,
    Filter,
    Null,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Equals => "equals",
            Keyword::LessThan => "lessThan",
            Keyword::LessOrEqual => "lessOrEqual",
            Keyword::GreaterThan => "greaterThan",
            Keyword::GreaterOrEqual => "greaterOrEqual",
            Keyword::Contains => "contains",
            Keyword::StartsWith => "startsWith",
            Keyword::EndsWith => "endsWith",
            Keyword::Any => "any",
            Keyword::Has => "has",
            Keyword::Not => "not",
            Keyword::Or => "or",
            Keyword::And => "and",
            Keyword::Filter => "filter",
            Keyword::Null => "null",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[type: {}, literal: {}]", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Returns the specific reserved word for a `Keyword` token.
    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Keyword {
            return None;
        }

        KEYWORD_LOOKUP.get(self.value.as_str()).copied()
    }

    pub fn debug(&self) {
        println!("{}", self);
    }
}
