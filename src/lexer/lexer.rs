use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::{
    errors::{
        diagnostics::report,
        errors::{Error, ErrorImpl},
    },
    type_checker::registry::Registry,
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, TokenStream};

/// ASCII word boundary, matching the word semantics of the rules below.
const B: &str = r"(?-u:\b)";

/// Lexical rules, highest priority first. The order decides ties: keywords
/// must out-rank identifiers, comments must out-rank operators.
fn rule_sources() -> Vec<(TokenKind, String)> {
    vec![
        (TokenKind::Comment, String::from(r"//[^\n]*")),
        (TokenKind::String, String::from(r#"("[^\n"]*"?)|('[^\n']*'?)"#)),
        (TokenKind::Number, format!(r"{B}[0-9]+(\.[0-9]+)?{B}")),
        (TokenKind::Keyword, format!(r"{B}(num|str|if|else|for|break){B}")),
        (TokenKind::Identifier, format!(r"{B}[a-zA-Z_][0-9A-Za-z_]*{B}")),
        (TokenKind::Paren, String::from(r"[()]")),
        (TokenKind::Bracket, String::from(r"[\[\]]")),
        (TokenKind::Brace, String::from(r"[{}]")),
        (
            TokenKind::Operator,
            String::from(r"(>=|<=|==|!=|\+=|-=|\+\+|--|&&|\|\|)|[><+\-*/%=!~.]"),
        ),
        (TokenKind::Separator, String::from(r"[,;]")),
        (TokenKind::Space, String::from(r"\s")),
    ]
}

/// A lexical rule and the splitter group that matches it.
#[derive(Clone)]
pub struct RegexPattern {
    pub kind: TokenKind,
    pub group: usize,
}

lazy_static! {
    /// Every rule in priority order, each in its own named group, then any run
    /// of word characters, then any single character. Splits the whole source
    /// in one pass.
    static ref SPLITTER: Regex = {
        let mut alternatives = rule_sources()
            .into_iter()
            .enumerate()
            .map(|(index, (_, source))| format!("(?P<rule{}>{})", index, source))
            .collect::<Vec<String>>();
        alternatives.push(String::from(r"[0-9A-Za-z_]+"));
        alternatives.push(String::from(r"."));
        Regex::new(&alternatives.join("|")).expect("lexical splitter must compile")
    };

    static ref PATTERNS: Vec<RegexPattern> = rule_sources()
        .into_iter()
        .enumerate()
        .filter_map(|(index, (kind, _))| {
            let name = format!("rule{}", index);
            SPLITTER
                .capture_names()
                .position(|group| group == Some(name.as_str()))
                .map(|group| RegexPattern { kind, group })
        })
        .collect();
}

/// The rule whose group took part in a splitter match. `None` when only a
/// fallback alternative matched.
fn rule_of(captures: &Captures) -> Option<TokenKind> {
    PATTERNS
        .iter()
        .find(|pattern| captures.get(pattern.group).is_some())
        .map(|pattern| pattern.kind)
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    line: usize,
    position: usize,
    edit: bool,
    registry: &'a Registry,
}

impl<'a> Lexer<'a> {
    pub fn new(edit: bool, registry: &'a Registry) -> Lexer<'a> {
        Lexer {
            tokens: vec![],
            line: 1,
            position: 0,
            edit,
            registry,
        }
    }

    /// Moves the line/position counters past a fragment.
    ///
    /// A newline starts a new line at position 0; anything else adds its
    /// length to the running position.
    pub fn advance(&mut self, fragment: &str) {
        if fragment == "\n" {
            self.line += 1;
            self.position = 0;
        } else {
            self.position += fragment.chars().count();
        }
    }

    pub fn push(&mut self, token: Token) {
        if self.edit || !token.kind.is_trivia() {
            self.tokens.push(token);
        }
    }

    pub fn get_position(&self) -> Position {
        Position::new(self.line, self.position)
    }

    /// Kind of a fragment as the splitter would read it. The whole fragment
    /// must be a single match.
    pub fn classify(fragment: &str) -> Option<TokenKind> {
        SPLITTER
            .captures(fragment)
            .filter(|captures| captures.get(0).map(|whole| whole.as_str()) == Some(fragment))
            .and_then(|captures| rule_of(&captures))
    }

    fn lex_fragment(&mut self, fragment: &str, kind: Option<TokenKind>) -> Result<(), Error> {
        self.advance(fragment);

        match kind {
            Some(kind) => {
                let builtin = if kind == TokenKind::Identifier {
                    self.registry.probe(fragment)
                } else {
                    None
                };

                let token = MK_TOKEN!(
                    kind,
                    String::from(fragment),
                    self.line,
                    self.position,
                    self.tokens.len(),
                    builtin
                );
                self.push(token);
                Ok(())
            }
            None => {
                trace!(fragment, line = self.line, "unrecognised fragment");
                report(
                    Error::new(
                        ErrorImpl::InvalidCharacter {
                            token: String::from(fragment),
                        },
                        self.get_position(),
                    ),
                    !self.edit,
                )?;

                let token = MK_TOKEN!(
                    TokenKind::Error,
                    String::from(fragment),
                    self.line,
                    self.position,
                    self.tokens.len()
                );
                self.push(token);
                Ok(())
            }
        }
    }
}

/// Splits source text into tokens.
///
/// Outside edit mode comments and whitespace are dropped and the first
/// unrecognised fragment aborts. In edit mode every fragment is kept, so the
/// token values concatenate back to `source`, and unrecognised fragments
/// become `Error` tokens.
pub fn tokenize(source: &str, edit: bool, registry: &Registry) -> Result<TokenStream, Error> {
    let mut lex = Lexer::new(edit, registry);

    for captures in SPLITTER.captures_iter(source) {
        if let Some(fragment) = captures.get(0) {
            lex.lex_fragment(fragment.as_str(), rule_of(&captures))?;
        }
    }

    debug!(
        tokens = lex.tokens.len(),
        lines = lex.line,
        edit,
        "tokenized source"
    );

    Ok(TokenStream {
        tokens: lex.tokens,
        lines: lex.line,
    })
}
