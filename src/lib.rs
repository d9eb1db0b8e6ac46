#![allow(clippy::module_inception)]

use std::fmt::{Display, Write};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
    parser::parser::Parser,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A 1-based (line, column) location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

/// Lexes and parses `source` in one go.
///
/// The returned program is only trustworthy when the error list is empty.
pub fn parse(source: &str) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (program, parser.into_errors())
}

/// Returns the line number, the text of the line and the 0-based character
/// offset of `position` within that line.
pub fn get_line_at_position(source: &str, position: &Position) -> (usize, String, usize) {
    let line_number = position.line().max(1) as usize;
    let line = source.lines().nth(line_number - 1).unwrap_or("");
    let line_pos = position.column().saturating_sub(1) as usize;

    (line_number, line.to_string(), line_pos)
}

/// Renders a diagnostic with the offending line and a caret under the column.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: UnexpectedToken: expected next token to be ASSIGN, got INTEGER
        -> shell:1:7
          |
        1 | var x 5;
          | ------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    let _ = writeln!(out, "Error: {}: {}", error.get_error_name(), error);
    let _ = writeln!(out, "-> {}:{}", file, position);
    let _ = writeln!(out, "{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        let _ = writeln!(out, "{:>padding$} tip: {}", "=", tip);
    }

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", render_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
