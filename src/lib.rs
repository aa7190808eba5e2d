#![allow(clippy::module_inception)]

use serde::Serialize;
use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::registry::Registry,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Where a token was read: its line and the cumulative length of the line's
/// fragments up to and including it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub position: usize,
}

impl Position {
    pub fn new(line: usize, position: usize) -> Self {
        Position { line, position }
    }

    pub fn null() -> Self {
        Position::new(0, 0)
    }
}

/// Tokenizes and parses `source` against `registry`, returning the typed AST.
pub fn check(source: &str, registry: &Registry) -> Result<Program, Error> {
    let stream = tokenize(source, false, registry)?;
    let program = parse(stream.tokens, registry)?;
    debug!(statements = program.len(), "checked source");
    Ok(program)
}

/// Returns the text of a 1-based line, without its line break.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source.split('\n').nth(line - 1)
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    /*
        Error: UnknownVariable (Variable `b` not declared)
        -> main.src
           |
        20 | num a = b;
           | ---------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file);

    let line_text = match get_line(source, position.line) {
        Some(text) => text,
        None => {
            eprintln!("   {}", error);
            return;
        }
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    // Positions count up to the end of the token, so the caret sits under its last character.
    let arrows = position.position.saturating_sub(removed_whitespace).max(1);

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
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

#[cfg(test)]
mod tests {
    use crate::{ast::ast::NodeKind, errors::errors::ErrorKind};

    use super::*;

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\n\nTesting { }";
        assert_eq!(get_line(source, 1), Some("Hello, world!"));
        assert_eq!(get_line(source, 3), Some(""));
        assert_eq!(get_line(source, 4), Some("Testing { }"));
        assert_eq!(get_line(source, 5), None);
        assert_eq!(get_line(source, 0), None);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(
            remove_starting_whitespace("    num a;"),
            (String::from("num a;"), 4)
        );
        assert_eq!(remove_starting_whitespace("num"), (String::from("num"), 0));
    }

    #[test]
    fn test_check_end_to_end() {
        let registry = Registry::new().with_function(
            "print",
            vec![crate::ast::types::ValueType::String],
            crate::ast::types::ValueType::Number,
        );
        let program = check("num a = 1;\nnum r = print(\"a\" + a);", &registry).unwrap();

        assert_eq!(program.len(), 2);
        assert!(program.iter().all(|node| node.kind() == NodeKind::Declare));
    }

    #[test]
    fn test_check_reports_lexical_errors() {
        let error = check("num a = #;", &Registry::new()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Lexical);
    }

    #[test]
    fn test_check_empty_source() {
        assert!(check("", &Registry::new()).unwrap().is_empty());
        assert!(check("  // only a comment\n", &Registry::new())
            .unwrap()
            .is_empty());
    }
}
