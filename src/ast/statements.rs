use std::slice::Iter;

use serde::Serialize;

use crate::Position;

use super::{ast::Node, types::ValueType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStmt {
    pub body: Vec<Node>,
    pub position: Position,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Node> {
        self.body.iter()
    }
}

/// One name of a declaration list.
///
/// `value_type` is the type the name was entered with: the declared type, or
/// `Array` when the initializer is an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declarator {
    pub name: String,
    pub value_type: ValueType,
    pub initializer: Option<Node>,
    pub position: Position,
}

/// `num a = 1, b;` / `str s;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclareStmt {
    pub declared_type: ValueType,
    pub variables: Vec<Declarator>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    /// Identifies the statement while it waits for an `else`.
    pub id: usize,
    pub condition: Box<Node>,
    pub body: Box<Node>,
    pub else_body: Option<Box<Node>>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStmt {
    pub init: Box<Node>,
    pub test: Box<Node>,
    pub update: Box<Node>,
    pub body: Box<Node>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStmt {
    pub position: Position,
}
