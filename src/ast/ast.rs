use std::{fmt::Display, slice::Iter};

use serde::Serialize;

use crate::Position;

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, BinaryExpr, CallExpr, IdentifierExpr, MemberExpr, NumberExpr,
        StringExpr, UnaryExpr,
    },
    statements::{BlockStmt, BreakStmt, DeclareStmt, ForStmt, IfStmt},
    types::{Signature, ValueType},
};

/// Node Kinds
///
/// One tag per construct of the language.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeKind {
    Declare,
    If,
    For,
    Break,
    Block,
    Assignment,
    Expression,
    UnaryExpression,
    Call,
    Member,
    Array,
    Identifier,
    Number,
    String,
}

impl NodeKind {
    /// Kinds that produce a value and may be used as operands, conditions and arguments.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            NodeKind::Expression
                | NodeKind::UnaryExpression
                | NodeKind::Call
                | NodeKind::Member
                | NodeKind::Array
                | NodeKind::Identifier
                | NodeKind::Number
                | NodeKind::String
        )
    }

    /// Kinds that may stand alone in a program, a block or a branch.
    ///
    /// Calls are values, not statements: `f();` is rejected while `x = f();` is not.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeKind::Declare
                | NodeKind::If
                | NodeKind::For
                | NodeKind::Break
                | NodeKind::Block
                | NodeKind::Assignment
        )
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A node of the typed syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    Declare(DeclareStmt),
    If(IfStmt),
    For(ForStmt),
    Break(BreakStmt),
    Block(BlockStmt),
    Assignment(AssignmentExpr),
    Expression(BinaryExpr),
    UnaryExpression(UnaryExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Array(ArrayExpr),
    Identifier(IdentifierExpr),
    Number(NumberExpr),
    String(StringExpr),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Declare(_) => NodeKind::Declare,
            Node::If(_) => NodeKind::If,
            Node::For(_) => NodeKind::For,
            Node::Break(_) => NodeKind::Break,
            Node::Block(_) => NodeKind::Block,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::Expression(_) => NodeKind::Expression,
            Node::UnaryExpression(_) => NodeKind::UnaryExpression,
            Node::Call(_) => NodeKind::Call,
            Node::Member(_) => NodeKind::Member,
            Node::Array(_) => NodeKind::Array,
            Node::Identifier(_) => NodeKind::Identifier,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
        }
    }

    /// The type of the value this node produces, `None` for statements.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Node::Expression(binary) => Some(binary.value_type),
            Node::UnaryExpression(unary) => Some(unary.value_type),
            Node::Call(call) => Some(call.value_type),
            Node::Member(member) => Some(member.value_type),
            Node::Array(_) => Some(ValueType::Array),
            Node::Identifier(identifier) => Some(identifier.value_type),
            Node::Number(_) => Some(ValueType::Number),
            Node::String(_) => Some(ValueType::String),
            Node::Declare(_)
            | Node::If(_)
            | Node::For(_)
            | Node::Break(_)
            | Node::Block(_)
            | Node::Assignment(_) => None,
        }
    }

    /// Parameter and return types when the node names a callable.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Node::Identifier(identifier) => identifier.signature.as_ref(),
            Node::Member(member) => member.signature.as_ref(),
            _ => None,
        }
    }

    pub fn get_position(&self) -> Position {
        match self {
            Node::Declare(node) => node.position,
            Node::If(node) => node.position,
            Node::For(node) => node.position,
            Node::Break(node) => node.position,
            Node::Block(node) => node.position,
            Node::Assignment(node) => node.position,
            Node::Expression(node) => node.position,
            Node::UnaryExpression(node) => node.position,
            Node::Call(node) => node.position,
            Node::Member(node) => node.position,
            Node::Array(node) => node.position,
            Node::Identifier(node) => node.position,
            Node::Number(node) => node.position,
            Node::String(node) => node.position,
        }
    }
}

/// Root of a parsed program.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub body: Vec<Node>,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Node> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
