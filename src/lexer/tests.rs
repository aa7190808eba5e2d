//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Rule priority (keywords over identifiers, fallbacks)
//! - Numeric and string literals
//! - Operators and punctuation
//! - Comments and whitespace in both modes
//! - Line/position tracking
//! - Built-in tagging
//! - Error cases

use crate::{
    ast::types::ValueType,
    errors::errors::ErrorKind,
    type_checker::registry::Registry,
    Position,
};

use super::{
    lexer::{tokenize, Lexer},
    tokens::{BuiltinKind, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, false, &Registry::new())
        .unwrap()
        .tokens
        .iter()
        .map(|token| token.kind)
        .collect()
}

fn values(source: &str) -> Vec<String> {
    tokenize(source, false, &Registry::new())
        .unwrap()
        .tokens
        .into_iter()
        .map(|token| token.value)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(kinds("num str if else for break"), vec![TokenKind::Keyword; 6]);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase";
    assert_eq!(kinds(source), vec![TokenKind::Identifier; 5]);
    assert_eq!(
        values(source),
        vec!["foo", "bar", "baz_123", "_underscore", "CamelCase"]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("number iffy format breaks"),
        vec![TokenKind::Identifier; 4]
    );
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5";
    assert_eq!(kinds(source), vec![TokenKind::Number; 4]);
    assert_eq!(values(source), vec!["42", "3.14", "0", "100.5"]);
}

#[test]
fn test_number_followed_by_dot() {
    assert_eq!(
        kinds("1.x"),
        vec![TokenKind::Number, TokenKind::Operator, TokenKind::Identifier]
    );
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" 'world' "two words""#;
    assert_eq!(kinds(source), vec![TokenKind::String; 3]);
    assert_eq!(values(source), vec![r#""hello""#, "'world'", r#""two words""#]);
}

#[test]
fn test_unterminated_string_runs_to_end_of_line() {
    let tokens = tokenize("\"open\nnum", false, &Registry::new()).unwrap().tokens;

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "\"open");
    assert_eq!(tokens[1].kind, TokenKind::Keyword);
}

#[test]
fn test_comment_inside_string_is_string() {
    assert_eq!(values(r#""a // b""#), vec![r#""a // b""#]);
    assert_eq!(
        kinds(r#"str u = 'http://x'; // tail"#),
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::String,
            TokenKind::Separator,
        ]
    );
}

#[test]
fn test_tokenize_operators() {
    let source = ">= <= == != += -= ++ -- && || > < + - * / % = ! ~ .";
    assert_eq!(kinds(source), vec![TokenKind::Operator; 21]);
    assert_eq!(
        values(source),
        vec![
            ">=", "<=", "==", "!=", "+=", "-=", "++", "--", "&&", "||", ">", "<", "+", "-", "*",
            "/", "%", "=", "!", "~", "."
        ]
    );
}

#[test]
fn test_compound_operators_without_spaces() {
    assert_eq!(values("a+=1"), vec!["a", "+=", "1"]);
    assert_eq!(values("i++"), vec!["i", "++"]);
    assert_eq!(values("a<=-b"), vec!["a", "<=", "-", "b"]);
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) [ ] { } , ;"),
        vec![
            TokenKind::Paren,
            TokenKind::Paren,
            TokenKind::Bracket,
            TokenKind::Bracket,
            TokenKind::Brace,
            TokenKind::Brace,
            TokenKind::Separator,
            TokenKind::Separator,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        values("num a; // this is a comment\nnum b;"),
        vec!["num", "a", ";", "num", "b", ";"]
    );
}

#[test]
fn test_edit_mode_keeps_trivia() {
    let stream = tokenize("a // note\n", true, &Registry::new()).unwrap();
    let kinds = stream
        .tokens
        .iter()
        .map(|token| token.kind)
        .collect::<Vec<TokenKind>>();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Space,
            TokenKind::Comment,
            TokenKind::Space,
        ]
    );
    assert_eq!(stream.source_text(), "a // note\n");
}

#[test]
fn test_positions_are_cumulative_lengths() {
    let stream = tokenize("num ab = 12;\nstr s;", false, &Registry::new()).unwrap();
    let positions = stream
        .tokens
        .iter()
        .map(|token| (token.line, token.position))
        .collect::<Vec<(usize, usize)>>();

    assert_eq!(
        positions,
        vec![(1, 3), (1, 6), (1, 8), (1, 11), (1, 12), (2, 3), (2, 5), (2, 6)]
    );
    assert_eq!(stream.lines, 2);
}

#[test]
fn test_newline_token_position() {
    let stream = tokenize("ab\ncd", true, &Registry::new()).unwrap();

    assert_eq!(stream.tokens[1].value, "\n");
    assert_eq!(stream.tokens[1].line, 2);
    assert_eq!(stream.tokens[1].position, 0);
    assert_eq!(stream.tokens[2].get_position(), Position::new(2, 2));
}

#[test]
fn test_token_indices_follow_emitted_sequence() {
    let stream = tokenize("a  b", false, &Registry::new()).unwrap();
    assert_eq!(stream.tokens[0].index, 0);
    assert_eq!(stream.tokens[1].index, 1);

    let stream = tokenize("a  b", true, &Registry::new()).unwrap();
    assert_eq!(stream.tokens[3].index, 3);
}

#[test]
fn test_line_count() {
    assert_eq!(tokenize("a\n\nb", false, &Registry::new()).unwrap().lines, 3);
    assert_eq!(tokenize("", false, &Registry::new()).unwrap().lines, 1);
}

#[test]
fn test_empty_source() {
    assert!(tokenize("", false, &Registry::new()).unwrap().tokens.is_empty());
}

#[test]
fn test_builtin_tagging() {
    let registry = Registry::new()
        .with_object("screen")
        .with_property("width", ValueType::Number)
        .with_function("print", vec![ValueType::String], ValueType::Number);
    let tokens = tokenize("screen width print other", false, &registry)
        .unwrap()
        .tokens;

    assert_eq!(tokens[0].builtin, Some(BuiltinKind::Object));
    assert_eq!(tokens[1].builtin, Some(BuiltinKind::Property));
    assert_eq!(tokens[2].builtin, Some(BuiltinKind::Function));
    assert_eq!(tokens[3].builtin, None);
}

#[test]
fn test_builtin_named_like_keyword_stays_keyword() {
    let registry = Registry::new().with_object("if");
    let tokens = tokenize("if", false, &registry).unwrap().tokens;

    assert_eq!(tokens[0].kind, TokenKind::Keyword);
    assert_eq!(tokens[0].builtin, None);
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("num a = @;", false, &Registry::new()).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(*error.get_position(), Position::new(1, 9));
}

#[test]
fn test_unrecognised_word() {
    let error = tokenize("9abc", false, &Registry::new()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.get_error_name(), "InvalidCharacter");
}

#[test]
fn test_single_ampersand_and_pipe_are_errors() {
    assert!(tokenize("a & b", false, &Registry::new()).is_err());
    assert!(tokenize("a | b", false, &Registry::new()).is_err());
}

#[test]
fn test_non_ascii_letter_is_error() {
    assert!(tokenize("é", false, &Registry::new()).is_err());
}

#[test]
fn test_edit_mode_error_tokens() {
    let stream = tokenize("a @ b", true, &Registry::new()).unwrap();

    assert_eq!(stream.tokens.len(), 5);
    assert_eq!(stream.tokens[2].kind, TokenKind::Error);
    assert_eq!(stream.tokens[2].value, "@");
    assert_eq!(stream.tokens[4].kind, TokenKind::Identifier);
    assert_eq!(stream.source_text(), "a @ b");
}

#[test]
fn test_classify_priority() {
    assert_eq!(Lexer::classify("if"), Some(TokenKind::Keyword));
    assert_eq!(Lexer::classify("iff"), Some(TokenKind::Identifier));
    assert_eq!(Lexer::classify("// x"), Some(TokenKind::Comment));
    assert_eq!(Lexer::classify("/"), Some(TokenKind::Operator));
    assert_eq!(Lexer::classify("\t"), Some(TokenKind::Space));
    assert_eq!(Lexer::classify("#"), None);
    assert_eq!(Lexer::classify("\"a // b\""), Some(TokenKind::String));
    assert_eq!(Lexer::classify("9abc"), None);
}
