use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::{
        expressions::{AssignOp, BinaryOp, UnaryOp},
        types::{Signature, ValueType},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::registry::Registry;

/// The one symbol table of a program.
///
/// There is no nesting: a declaration anywhere is visible for the rest of the
/// parse, and every name, built-in or declared, can be declared only once.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, ValueType>,
    /// Element types of arrays, keyed by variable or property name.
    pub element_lookup: HashMap<String, ValueType>,
    pub function_lookup: HashMap<String, Signature>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Builds the table a parse starts from: objects, then properties, then functions.
    pub fn seeded(registry: &Registry) -> Self {
        let mut environment = Environment::new();

        for object in registry.objects.iter() {
            environment
                .variable_lookup
                .insert(object.clone(), ValueType::Object);
        }
        for (property, value_type) in registry.properties.iter() {
            environment
                .variable_lookup
                .insert(property.clone(), *value_type);
        }
        for (function, signature) in registry.functions.iter() {
            environment
                .variable_lookup
                .insert(function.clone(), ValueType::Function);
            environment
                .function_lookup
                .insert(function.clone(), signature.clone());
        }

        trace!(names = environment.variable_lookup.len(), "seeded environment");
        environment
    }

    pub fn declare_variable(
        &mut self,
        variable_name: String,
        variable_type: ValueType,
        current_position: Position,
    ) -> Result<(), Error> {
        if self.contains(&variable_name) {
            Err(Error::new(
                ErrorImpl::NamingConflict {
                    variable: variable_name,
                },
                current_position,
            ))
        } else {
            self.variable_lookup.insert(variable_name, variable_type);
            Ok(())
        }
    }

    /// Re-types an already declared name, used when an array initializer promotes it.
    pub fn promote_to_array(&mut self, variable_name: &str, element_type: ValueType) {
        self.variable_lookup
            .insert(variable_name.to_string(), ValueType::Array);
        self.element_lookup
            .insert(variable_name.to_string(), element_type);
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<ValueType> {
        self.variable_lookup.get(variable_name).copied()
    }

    pub fn get_signature(&self, function_name: &str) -> Option<&Signature> {
        self.function_lookup.get(function_name)
    }

    pub fn get_element_type(&self, name: &str) -> Option<ValueType> {
        self.element_lookup.get(name).copied()
    }

    pub fn contains(&self, variable_name: &str) -> bool {
        self.variable_lookup.contains_key(variable_name)
    }
}

/// Result type of `left <operator> right`.
pub fn binary_result_type(
    operator: BinaryOp,
    left: ValueType,
    right: ValueType,
    position: Position,
) -> Result<ValueType, Error> {
    let error = || {
        Err(Error::new(
            ErrorImpl::OperatorTypeError {
                operator: operator.to_string(),
                left,
                right,
            },
            position,
        ))
    };

    match operator {
        BinaryOp::Add => {
            if left.is_reference() || right.is_reference() {
                return error();
            }
            match (left, right) {
                _ if left == right => Ok(left),
                (ValueType::String, ValueType::Number) | (ValueType::Number, ValueType::String) => {
                    Ok(ValueType::String)
                }
                _ => error(),
            }
        }
        BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
            if left.is_reference() || right.is_reference() || left != right {
                error()
            } else {
                Ok(left)
            }
        }
        BinaryOp::Greater | BinaryOp::GreaterEquals | BinaryOp::Less | BinaryOp::LessEquals => {
            if left == ValueType::Number && right == ValueType::Number {
                Ok(ValueType::Number)
            } else {
                error()
            }
        }
        // No boolean type: comparisons and logic yield Number and accept anything.
        BinaryOp::Equals | BinaryOp::NotEquals | BinaryOp::And | BinaryOp::Or => {
            Ok(ValueType::Number)
        }
    }
}

/// Result type of `-operand` / `!operand`.
pub fn unary_result_type(
    operator: UnaryOp,
    operand: ValueType,
    position: Position,
) -> Result<ValueType, Error> {
    match operator {
        UnaryOp::Negate if operand != ValueType::Number => Err(Error::new(
            ErrorImpl::UnaryTypeError {
                operator: operator.to_string(),
                operand,
            },
            position,
        )),
        UnaryOp::Negate | UnaryOp::Not => Ok(ValueType::Number),
    }
}

/// Checks that a target of `target_type` may be written to at all.
pub fn check_assignable(
    operator: AssignOp,
    target_type: ValueType,
    position: Position,
) -> Result<(), Error> {
    if operator.is_unary() {
        if target_type != ValueType::Number {
            return Err(Error::new(
                ErrorImpl::UnaryTypeError {
                    operator: operator.to_string(),
                    operand: target_type,
                },
                position,
            ));
        }
    } else if target_type.is_reference() {
        return Err(Error::new(
            ErrorImpl::NotAssignable {
                value_type: target_type,
            },
            position,
        ));
    }

    Ok(())
}

/// Checks the right-hand side of `=`, `+=` and `-=` against the target.
pub fn check_assigned_value(
    target_type: ValueType,
    value_type: ValueType,
    position: Position,
) -> Result<(), Error> {
    if target_type != value_type {
        Err(Error::new(
            ErrorImpl::AssignmentTypeError {
                expected: target_type,
                received: value_type,
            },
            position,
        ))
    } else {
        Ok(())
    }
}

/// Checks the argument at `index` as soon as it has been parsed.
pub fn check_argument(
    signature: &Signature,
    index: usize,
    received: ValueType,
    position: Position,
) -> Result<(), Error> {
    match signature.input.get(index) {
        Some(expected) if *expected == received => Ok(()),
        Some(expected) => Err(Error::new(
            ErrorImpl::ArgumentTypeError {
                expected: *expected,
                received,
            },
            position,
        )),
        None => Err(Error::new(
            ErrorImpl::ArgumentCountError {
                expected: signature.input.len(),
                received: index + 1,
            },
            position,
        )),
    }
}

pub fn check_arity(signature: &Signature, received: usize, position: Position) -> Result<(), Error> {
    if signature.input.len() != received {
        Err(Error::new(
            ErrorImpl::ArgumentCountError {
                expected: signature.input.len(),
                received,
            },
            position,
        ))
    } else {
        Ok(())
    }
}

/// Checks an array element against the element type the array must have.
pub fn check_element(
    expected: ValueType,
    received: ValueType,
    position: Position,
) -> Result<(), Error> {
    if expected != received {
        Err(Error::new(
            ErrorImpl::ElementTypeError { expected, received },
            position,
        ))
    } else {
        Ok(())
    }
}
