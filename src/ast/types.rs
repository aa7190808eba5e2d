//! Value types carried by the typed AST.
//!
//! The language has two primitive value types (`Number`, `String`) and three
//! reference-like ones (`Array`, `Object`, `Function`). Arrays track their
//! element type separately, see `Environment::get_element_type`.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The type of every value-producing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    String,
    Array,
    Object,
    Function,
}

impl ValueType {
    /// Object, Array and Function values cannot take part in arithmetic or be assigned to.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ValueType::Array | ValueType::Object | ValueType::Function
        )
    }

    /// Type declared by a `num`/`str` keyword.
    pub fn from_keyword(keyword: &str) -> Option<ValueType> {
        match keyword {
            "num" => Some(ValueType::Number),
            "str" => Some(ValueType::String),
            _ => None,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Parameter and return types of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub input: Vec<ValueType>,
    pub output: ValueType,
}

impl Signature {
    pub fn new(input: Vec<ValueType>, output: ValueType) -> Self {
        Signature { input, output }
    }
}
