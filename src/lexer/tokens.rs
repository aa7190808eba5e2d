use std::fmt::Display;

use serde::Serialize;

use crate::Position;

/// Lexical category of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    Comment,
    String,
    Number,
    Keyword,
    Identifier,
    Paren,
    Bracket,
    Brace,
    Operator,
    Separator,
    Space,
    /// Unrecognised text, only produced in edit mode.
    Error,
}

impl TokenKind {
    /// Comments and whitespace, dropped outside edit mode.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Space)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The built-in table an identifier was found in.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum BuiltinKind {
    Object,
    Property,
    Function,
}

impl Display for BuiltinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    /// Cumulative length of the line's fragments up to and including this one.
    pub position: usize,
    /// Index of the token in the emitted sequence.
    pub index: usize,
    pub builtin: Option<BuiltinKind>,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {:?}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn get_position(&self) -> Position {
        Position::new(self.line, self.position)
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }

    pub fn debug(&self) {
        match self.builtin {
            Some(builtin) => println!(
                "{:>4}:{:<4} {:<10} {:?} ({})",
                self.line, self.position, self.kind, self.value, builtin
            ),
            None => println!(
                "{:>4}:{:<4} {:<10} {:?}",
                self.line, self.position, self.kind, self.value
            ),
        }
    }
}

/// Tokens of one source text plus the line count reached at its end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub lines: usize,
}

impl TokenStream {
    /// Concatenated token values. In edit mode this is the original source.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|token| token.value.as_str()).collect()
    }
}
