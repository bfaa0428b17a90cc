use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Pull-based scanner over a fully materialized query string.
///
/// `ch` holds the byte under `position`, or `0` once the cursor has run past
/// the end of the source.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    position: usize,
    read_position: usize,
    ch: u8,
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Scanner<'src> {
        let mut scanner = Scanner {
            source,
            position: 0,
            read_position: 0,
            ch: 0,
            finished: false,
        };

        scanner.read_char();
        scanner
    }

    /// Produces the next token, advancing the cursor.
    ///
    /// Keeps returning `Eof` once the source is exhausted. An `Illegal` token
    /// does not move the cursor; call [`Scanner::skip_illegal`] to step past it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            _ if self.at_eof() => {
                let end = self.source.len();
                MK_TOKEN!(TokenKind::Eof, String::from(" "), self.span(end, end))
            }
            b'?' => self.single_char_token(TokenKind::ParamStart),
            b'=' => self.single_char_token(TokenKind::Equals),
            b'(' => self.single_char_token(TokenKind::LeftParenthesis),
            b')' => self.single_char_token(TokenKind::RightParenthesis),
            b',' => self.single_char_token(TokenKind::Comma),
            b'\'' => self.read_quoted(),
            ch if is_letter(ch) => {
                let token = self.read_identifier();
                trace!(kind = %token.kind, value = %token.value, offset = token.span.start.0, "token");
                return token;
            }
            _ => {
                let token = self.illegal_token();
                trace!(value = %token.value, offset = token.span.start.0, "illegal character");
                return token;
            }
        };

        trace!(kind = %token.kind, value = %token.value, offset = token.span.start.0, "token");
        self.read_char();
        token
    }

    /// Moves the cursor past the character under it, if any.
    ///
    /// Used by callers that recover from an `Illegal` token instead of
    /// treating it as fatal.
    pub fn skip_illegal(&mut self) {
        if self.at_eof() {
            return;
        }

        for _ in 0..self.current_char_width() {
            self.read_char();
        }
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    fn single_char_token(&self, kind: TokenKind) -> Token {
        MK_TOKEN!(
            kind,
            String::from(self.ch as char),
            self.span(self.position, self.position + 1)
        )
    }

    fn illegal_token(&self) -> Token {
        let value = self
            .source
            .get(self.position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(self.ch as char);

        MK_TOKEN!(
            TokenKind::Illegal,
            value.to_string(),
            self.span(self.position, self.position + value.len_utf8())
        )
    }

    // Termination is decided by look-ahead alone, so `''` inside a literal
    // ends it at the first apostrophe. End of input closes the literal.
    fn read_quoted(&mut self) -> Token {
        let start = self.position + 1;

        while self.peek_char() != b'\'' {
            if self.read_position >= self.source.len() {
                warn!(offset = self.position, "unterminated quoted literal");
                break;
            }
            self.read_char();
        }

        let end = (self.position + 1).min(self.source.len());
        let value = self.source.get(start..end).unwrap_or_default();

        // Land on the closing apostrophe; the caller's advance consumes it.
        self.read_char();

        MK_TOKEN!(TokenKind::Identifier, String::from(value), self.span(start, end))
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;

        while is_letter(self.ch) {
            self.read_char();
        }

        let value = self.source.get(start..self.position).unwrap_or_default();

        MK_TOKEN!(
            lookup_identifier(value),
            String::from(value),
            self.span(start, self.position)
        )
    }

    fn skip_whitespace(&mut self) {
        while self.ch == b'%' && self.peek_char() == b'2' && self.peek_char_n(1) == b'0' {
            trace!(offset = self.position, "skipping encoded space");
            self.read_char();
            self.read_char();
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        let bytes = self.source.as_bytes();

        self.ch = bytes.get(self.read_position).copied().unwrap_or(0);
        self.position = self.read_position.min(bytes.len());
        self.read_position = self.position + 1;
    }

    fn peek_char(&self) -> u8 {
        self.peek_char_n(0)
    }

    fn peek_char_n(&self, n: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.read_position + n)
            .copied()
            .unwrap_or(0)
    }

    fn current_char_width(&self) -> usize {
        self.source
            .get(self.position..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8)
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: Position(start as u32),
            end: Position(end as u32),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    /// Yields every token before `Eof`. Stops after the first `Illegal`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();

        match token.kind {
            TokenKind::Eof => {
                self.finished = true;
                None
            }
            TokenKind::Illegal => {
                self.finished = true;
                Some(token)
            }
            _ => Some(token),
        }
    }
}

impl FusedIterator for Scanner<'_> {}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
}

/// Scans the whole query, ending with the `Eof` token.
///
/// Fails on the first illegal character.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::new(source);
    let mut tokens = vec![];

    loop {
        let token = scanner.next_token();

        match token.kind {
            TokenKind::Illegal => {
                debug!(offset = token.span.start.0, value = %token.value, "tokenize stopped on illegal character");
                return Err(Error::new(
                    ErrorImpl::IllegalCharacter { token: token.value },
                    token.span.start,
                ));
            }
            TokenKind::Eof => {
                tokens.push(token);
                break;
            }
            _ => tokens.push(token),
        }
    }

    debug!(count = tokens.len(), "tokenized query");
    Ok(tokens)
}
