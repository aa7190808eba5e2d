use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{ast::ast::Node, errors::errors::Error};

use super::{parser::Parser, stmt::*};

/// Operator groups, tightest binding first.
const GROUPS: [&[&str]; 8] = [
    &["."],
    &["/", "*", "%"],
    &["+", "-"],
    &[">", ">=", "<", "<="],
    &["==", "!="],
    &["&&"],
    &["||"],
    &["=", "+=", "-="],
];

/// Group of the member access operator.
pub const MEMBER: usize = 0;
/// Group of the assignment operators, never valid as an infix operator.
pub const ASSIGNMENT: usize = 7;
/// Not a binary operator. Also the loosest threshold, which lets any operator bind.
pub const LOOSEST: usize = 10;

lazy_static! {
    static ref PRECEDENCE: HashMap<&'static str, usize> = GROUPS
        .iter()
        .enumerate()
        .flat_map(|(group, operators)| operators.iter().map(move |operator| (*operator, group)))
        .collect();
}

/// Group index of an operator, [`LOOSEST`] for anything that is not one.
pub fn precedence(operator: &str) -> usize {
    PRECEDENCE.get(operator).copied().unwrap_or(LOOSEST)
}

pub type StmtHandler = fn(&mut Parser) -> Result<Option<Node>, Error>;

// Lookup table inside parser struct, keyed by keyword
pub type StmtLookup = HashMap<&'static str, StmtHandler>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.stmt("num", parse_declare_stmt);
    parser.stmt("str", parse_declare_stmt);
    parser.stmt("if", parse_if_stmt);
    parser.stmt("else", parse_else_stmt);
    parser.stmt("for", parse_for_stmt);
    parser.stmt("break", parse_break_stmt);
}
