//! Lexical analysis for filter queries.
//!
//! This module contains the scanner that turns a query string such as
//! `courses?filter=equals(displayName,'Brian Connor')` into a flat stream of
//! tokens for a downstream parser. It handles:
//!
//! - Punctuation (`?`, `=`, `(`, `)`, `,`)
//! - Identifiers and the reserved filter keywords
//! - Apostrophe-quoted values
//! - `%20` as the only whitespace
//! - Illegal characters, reported as tokens

pub mod lexer;
pub mod tokens;
