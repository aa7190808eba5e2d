//! Parser state and the parsing entry point.
//!
//! Parsing and type checking happen in one pass. Everything the recursive
//! functions share lives in the [`Parser`] value passed to each of them:
//!
//! - The token stream and the current index
//! - The running precedence threshold of the expression algorithm
//! - The stack of open braces
//! - The stack of `if` statements still waiting for an `else`
//! - The flat environment and the element-type side table

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::{Node, Program},
    errors::{
        diagnostics::fail,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::Token,
    type_checker::{registry::Registry, type_checker::Environment},
    Position,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup, LOOSEST},
    stmt::{expect_statement, parse_node},
};

/// An `if` waiting for its `else`, with the brace depth it was parsed at.
#[derive(Debug, Clone, Copy)]
struct PendingIf {
    id: usize,
    depth: usize,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Operators of this group index or looser end the current expression.
    precedence: usize,
    braces: Vec<Token>,
    pending_ifs: Vec<PendingIf>,
    /// Else branches parsed so far, keyed by the id of the `if` they belong to.
    else_branches: HashMap<usize, Node>,
    stmt_lookup: StmtLookup,
    environment: Environment,
    current_id: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, registry: &Registry) -> Self {
        Parser {
            tokens,
            pos: 0,
            precedence: LOOSEST,
            braces: vec![],
            pending_ifs: vec![],
            else_branches: HashMap::new(),
            stmt_lookup: HashMap::new(),
            environment: Environment::seeded(registry),
            current_id: 0,
        }
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub fn previous_token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos))
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            None => Err(self.end_of_input()),
        }
    }

    /// Whether the current token has exactly this text.
    pub fn current_is(&self, value: &str) -> bool {
        self.current_token()
            .is_some_and(|token| token.value == value)
    }

    /// Consumes the current token if it has exactly this text.
    pub fn expect(&mut self, value: &str) -> Result<Token, Error> {
        if self.current_is(value) {
            self.advance()
        } else {
            Err(self.unexpected())
        }
    }

    /// Error for the current token, or for running out of tokens.
    pub fn unexpected(&self) -> Error {
        match self.current_token() {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.get_position(),
            ),
            None => self.end_of_input(),
        }
    }

    pub fn end_of_input(&self) -> Error {
        Error::new(ErrorImpl::UnexpectedEndOfInput, self.get_previous_position())
    }

    /// Position of the current token, or of the last one at the end of input.
    pub fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.get_position(),
            None => self.get_previous_position(),
        }
    }

    pub fn get_previous_position(&self) -> Position {
        self.previous_token()
            .map(|token| token.get_position())
            .unwrap_or_else(Position::null)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers the handler for a keyword.
    pub fn stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn precedence(&self) -> usize {
        self.precedence
    }

    /// Sets the threshold and returns the one it replaces.
    pub fn set_precedence(&mut self, precedence: usize) -> usize {
        std::mem::replace(&mut self.precedence, precedence)
    }

    /// Runs `parse_fn` with the threshold reset to the loosest level, then restores it.
    pub fn with_loosest_precedence<T>(
        &mut self,
        parse_fn: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let previous = self.set_precedence(LOOSEST);
        let result = parse_fn(self);
        self.precedence = previous;
        result
    }

    pub fn advance_id(&mut self) -> usize {
        let id = self.current_id;
        self.current_id += 1;
        id
    }

    pub fn brace_depth(&self) -> usize {
        self.braces.len()
    }

    pub fn open_brace(&mut self, token: Token) {
        self.braces.push(token);
    }

    /// Closes the innermost block. Ifs pending inside it can no longer take an `else`.
    pub fn close_brace(&mut self) {
        self.braces.pop();
        let depth = self.braces.len();
        self.pending_ifs.retain(|pending| pending.depth <= depth);
    }

    pub fn push_pending_if(&mut self, id: usize) {
        let depth = self.braces.len();
        self.pending_ifs.push(PendingIf { id, depth });
    }

    pub fn pop_pending_if(&mut self) -> Option<usize> {
        self.pending_ifs.pop().map(|pending| pending.id)
    }

    pub fn store_else_branch(&mut self, id: usize, branch: Node) {
        self.else_branches.insert(id, branch);
    }
}

/// Moves every stored else branch into the `if` it was matched with.
fn attach_else_branches(node: &mut Node, branches: &mut HashMap<usize, Node>) {
    match node {
        Node::If(if_stmt) => {
            attach_else_branches(&mut if_stmt.body, branches);
            if let Some(mut branch) = branches.remove(&if_stmt.id) {
                attach_else_branches(&mut branch, branches);
                if_stmt.else_body = Some(Box::new(branch));
            }
        }
        Node::Block(block) => {
            for stmt in block.body.iter_mut() {
                attach_else_branches(stmt, branches);
            }
        }
        Node::For(for_stmt) => {
            attach_else_branches(&mut for_stmt.init, branches);
            attach_else_branches(&mut for_stmt.update, branches);
            attach_else_branches(&mut for_stmt.body, branches);
        }
        _ => {}
    }
}

fn parse_body(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    let mut body = vec![];

    while parser.has_tokens() {
        if let Some(node) = parse_node(parser, None)? {
            trace!(kind = %node.kind(), "parsed statement");
            body.push(expect_statement(node)?);
        }
    }

    Ok(body)
}

/// Parses a token stream into a typed program.
///
/// This is the main entry point for parsing. It seeds the environment from
/// `registry`, registers the keyword handlers and parses statements until the
/// tokens run out. The first error aborts the parse.
pub fn parse(tokens: Vec<Token>, registry: &Registry) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, registry);
    create_token_lookups(&mut parser);

    let mut body = match parse_body(&mut parser) {
        Ok(body) => body,
        Err(error) => return fail(error),
    };

    let mut branches = std::mem::take(&mut parser.else_branches);
    for node in body.iter_mut() {
        attach_else_branches(node, &mut branches);
    }

    debug!(
        statements = body.len(),
        names = parser.environment.variable_lookup.len(),
        "parsed program"
    );

    Ok(Program { body })
}
