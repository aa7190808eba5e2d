use std::fmt::Display;

use serde::Serialize;

use crate::Position;

use super::{
    ast::Node,
    types::{Signature, ValueType},
};

// OPERATORS

/// Infix operators that build an `Expression` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Greater,
    GreaterEquals,
    Less,
    LessEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_operator(operator: &str) -> Option<BinaryOp> {
        Some(match operator {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Subtract,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "%" => BinaryOp::Modulo,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterEquals,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessEquals,
            "==" => BinaryOp::Equals,
            "!=" => BinaryOp::NotEquals,
            "&&" => BinaryOp::And,
            "||" => BinaryOp::Or,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn from_operator(operator: &str) -> Option<UnaryOp> {
        match operator {
            "-" => Some(UnaryOp::Negate),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operators that turn an identifier or member chain into an `Assignment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubtractAssign,
    Increment,
    Decrement,
}

impl AssignOp {
    pub fn from_operator(operator: &str) -> Option<AssignOp> {
        Some(match operator {
            "=" => AssignOp::Assign,
            "+=" => AssignOp::AddAssign,
            "-=" => AssignOp::SubtractAssign,
            "++" => AssignOp::Increment,
            "--" => AssignOp::Decrement,
            _ => return None,
        })
    }

    /// `++` and `--` take no right-hand side.
    pub fn is_unary(&self) -> bool {
        matches!(self, AssignOp::Increment | AssignOp::Decrement)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubtractAssign => "-=",
            AssignOp::Increment => "++",
            AssignOp::Decrement => "--",
        }
    }
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberExpr {
    pub value: f64,
    pub position: Position,
}

/// String Expression
/// Represents a string literal in the AST, without its quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringExpr {
    pub value: String,
    pub position: Position,
}

/// Array Expression
/// A homogeneous array literal. The node itself has type `Array`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpr {
    pub elements: Vec<Node>,
    pub element_type: ValueType,
    pub position: Position,
}

// SYMBOLS

/// Identifier Expression
/// A reference to a declared variable or a built-in. Callables carry their signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentifierExpr {
    pub name: String,
    pub value_type: ValueType,
    pub signature: Option<Signature>,
    pub position: Position,
}

/// What a member access selects: `.name` or `[index]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MemberProperty {
    Named(String),
    Index(Box<Node>),
}

/// Member Expression
/// One step of an access chain, `object.property` or `object[index]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpr {
    pub object: Box<Node>,
    pub property: MemberProperty,
    pub value_type: ValueType,
    pub signature: Option<Signature>,
    pub position: Position,
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub left: Box<Node>,
    pub operator: BinaryOp,
    pub right: Box<Node>,
    pub value_type: ValueType,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Node>,
    pub value_type: ValueType,
    pub position: Position,
}

/// Call Expression
/// The value type is the callee's declared return type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Box<Node>,
    pub arguments: Vec<Node>,
    pub value_type: ValueType,
    pub position: Position,
}

/// Assignment Expression
/// `value` is `None` for `++` and `--`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpr {
    pub target: Box<Node>,
    pub operator: AssignOp,
    pub value: Option<Box<Node>>,
    pub position: Position,
}
