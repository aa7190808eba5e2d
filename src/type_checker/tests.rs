//! Unit tests for the typing rules and the environment.

use crate::{
    ast::{
        expressions::{AssignOp, BinaryOp, UnaryOp},
        types::{Signature, ValueType},
    },
    errors::errors::ErrorKind,
    Position,
};

use super::{
    registry::Registry,
    type_checker::{
        binary_result_type, check_argument, check_arity, check_assignable, check_assigned_value,
        check_element, unary_result_type, Environment,
    },
};

fn binary(operator: BinaryOp, left: ValueType, right: ValueType) -> Option<ValueType> {
    binary_result_type(operator, left, right, Position::null()).ok()
}

#[test]
fn test_plus_concatenates_mixed_primitives() {
    use ValueType::*;

    assert_eq!(binary(BinaryOp::Add, Number, Number), Some(Number));
    assert_eq!(binary(BinaryOp::Add, String, String), Some(String));
    assert_eq!(binary(BinaryOp::Add, String, Number), Some(String));
    assert_eq!(binary(BinaryOp::Add, Number, String), Some(String));
}

#[test]
fn test_arithmetic_rejects_reference_types() {
    use ValueType::*;

    for operator in [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Modulo,
    ] {
        for reference in [Array, Object, Function] {
            let error = binary_result_type(operator, reference, Number, Position::null())
                .unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Type);
            assert!(binary(operator, Number, reference).is_none());
            assert!(binary(operator, reference, reference).is_none());
        }
    }
}

#[test]
fn test_arithmetic_requires_equal_types() {
    use ValueType::*;

    assert_eq!(binary(BinaryOp::Subtract, Number, Number), Some(Number));
    assert_eq!(binary(BinaryOp::Multiply, String, String), Some(String));
    assert!(binary(BinaryOp::Subtract, String, Number).is_none());
    assert!(binary(BinaryOp::Modulo, Number, String).is_none());
}

#[test]
fn test_comparison_requires_numbers() {
    use ValueType::*;

    assert_eq!(binary(BinaryOp::Less, Number, Number), Some(Number));
    assert!(binary(BinaryOp::GreaterEquals, String, String).is_none());
    assert!(binary(BinaryOp::Greater, Number, String).is_none());
}

#[test]
fn test_equality_and_logic_accept_anything() {
    use ValueType::*;

    for operator in [BinaryOp::Equals, BinaryOp::NotEquals, BinaryOp::And, BinaryOp::Or] {
        assert_eq!(binary(operator, Object, String), Some(Number));
        assert_eq!(binary(operator, Array, Function), Some(Number));
    }
}

#[test]
fn test_unary_operators() {
    let position = Position::null();

    assert_eq!(
        unary_result_type(UnaryOp::Negate, ValueType::Number, position).unwrap(),
        ValueType::Number
    );
    assert!(unary_result_type(UnaryOp::Negate, ValueType::String, position).is_err());
    assert_eq!(
        unary_result_type(UnaryOp::Not, ValueType::Object, position).unwrap(),
        ValueType::Number
    );
}

#[test]
fn test_assignment_rules() {
    let position = Position::null();

    assert!(check_assignable(AssignOp::Assign, ValueType::String, position).is_ok());
    assert_eq!(
        check_assignable(AssignOp::AddAssign, ValueType::Object, position)
            .unwrap_err()
            .get_error_name(),
        "NotAssignable"
    );
    assert_eq!(
        check_assignable(AssignOp::Increment, ValueType::String, position)
            .unwrap_err()
            .get_error_name(),
        "UnaryTypeError"
    );
    assert!(check_assigned_value(ValueType::Number, ValueType::Number, position).is_ok());
    assert!(check_assigned_value(ValueType::Number, ValueType::String, position).is_err());
}

#[test]
fn test_argument_rules() {
    let position = Position::null();
    let signature = Signature::new(vec![ValueType::String, ValueType::Number], ValueType::Number);

    assert!(check_argument(&signature, 0, ValueType::String, position).is_ok());
    assert_eq!(
        check_argument(&signature, 1, ValueType::String, position)
            .unwrap_err()
            .get_error_name(),
        "ArgumentTypeError"
    );
    assert_eq!(
        check_argument(&signature, 2, ValueType::Number, position)
            .unwrap_err()
            .get_error_name(),
        "ArgumentCountError"
    );
    assert!(check_arity(&signature, 2, position).is_ok());
    assert!(check_arity(&signature, 1, position).is_err());
}

#[test]
fn test_element_rule() {
    assert!(check_element(ValueType::Number, ValueType::Number, Position::null()).is_ok());
    assert_eq!(
        check_element(ValueType::Number, ValueType::String, Position::null())
            .unwrap_err()
            .kind(),
        ErrorKind::Type
    );
}

#[test]
fn test_environment_is_seeded_from_registry() {
    let registry = Registry::new()
        .with_object("screen")
        .with_property("width", ValueType::Number)
        .with_function("print", vec![ValueType::String], ValueType::Number);
    let environment = Environment::seeded(&registry);

    assert_eq!(environment.get_variable("screen"), Some(ValueType::Object));
    assert_eq!(environment.get_variable("width"), Some(ValueType::Number));
    assert_eq!(environment.get_variable("print"), Some(ValueType::Function));
    assert_eq!(
        environment.get_signature("print").map(|signature| signature.output),
        Some(ValueType::Number)
    );
    assert!(!environment.contains("missing"));
}

#[test]
fn test_declare_rejects_any_existing_name() {
    let registry = Registry::new().with_object("screen");
    let mut environment = Environment::seeded(&registry);

    environment
        .declare_variable(String::from("a"), ValueType::Number, Position::null())
        .unwrap();

    let error = environment
        .declare_variable(String::from("a"), ValueType::String, Position::new(2, 5))
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Name);
    assert_eq!(*error.get_position(), Position::new(2, 5));

    assert!(environment
        .declare_variable(String::from("screen"), ValueType::Number, Position::null())
        .is_err());
}

#[test]
fn test_promote_to_array() {
    let mut environment = Environment::new();
    environment
        .declare_variable(String::from("xs"), ValueType::Number, Position::null())
        .unwrap();
    environment.promote_to_array("xs", ValueType::Number);

    assert_eq!(environment.get_variable("xs"), Some(ValueType::Array));
    assert_eq!(environment.get_element_type("xs"), Some(ValueType::Number));
    assert_eq!(environment.get_element_type("ys"), None);
}
