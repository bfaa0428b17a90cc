#![allow(clippy::module_inception)]

use std::sync::Once;

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// Byte offset into the scanned query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Finds the line holding byte `position`.
///
/// Returns the 1-based line number, the line text and the offset within it.
/// Positions at or past the end land after the last character.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    let last = content.lines().last().unwrap_or_default();
    (line_number.saturating_sub(1).max(1), last.to_string(), last.len())
}

/// Renders an error with a caret under the offending byte of `source`.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: IllegalCharacter (...)
        -> query
          |
        1 | courses?top=10
          | ------------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str("-> query\n");
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str) {
    print!("{}", render_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use crate::errors::errors::{Error, ErrorImpl};
    use crate::Position;

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) =
            super::get_line_at_position("courses?filter=equals(a,b)", 8);
        assert_eq!(line_number, 1);
        assert_eq!(line, "courses?filter=equals(a,b)");
        assert_eq!(line_pos, 8);

        let (line_number, line, line_pos) = super::get_line_at_position("first\nsecond\n", 9);
        assert_eq!(line_number, 2);
        assert_eq!(line, "second\n");
        assert_eq!(line_pos, 3);
    }

    #[test]
    fn test_get_line_past_end() {
        let (line_number, line, line_pos) = super::get_line_at_position("abc", 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "abc");
        assert_eq!(line_pos, 3);

        let (line_number, line, line_pos) = super::get_line_at_position("", 0);
        assert_eq!(line_number, 1);
        assert_eq!(line, "");
        assert_eq!(line_pos, 0);
    }

    #[test]
    fn test_render_error_points_at_offset() {
        let error = Error::new(
            ErrorImpl::IllegalCharacter {
                token: "1".to_string(),
            },
            Position(12),
        );

        let rendered = super::render_error(&error, "courses?top=10");
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("Error: IllegalCharacter (Unexpected character `1`"));
        assert_eq!(lines[1], "-> query");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "1 | courses?top=10");
        assert_eq!(lines[4], "  | ------------^");
    }

    #[test]
    fn test_render_error_without_tip() {
        let error = Error::new(ErrorImpl::MissingQuery, Position::null());

        let rendered = super::render_error(&error, "");
        assert!(rendered.starts_with("Error: MissingQuery\n"));
    }
}
