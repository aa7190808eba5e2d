//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization by an ordered list of regex rules
//! - Line and position tracking for error reporting
//! - Tagging identifiers that name built-ins
//! - Edit mode, which keeps comments, whitespace and unrecognised text

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
