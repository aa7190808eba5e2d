use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::ValueType, Position};

/// Category an error is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Name,
    Type,
    Structural,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "LexicalError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Structural => "StructuralError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedEndOfInput
            | ErrorImpl::UnclosedBlock
            | ErrorImpl::UnmatchedClosingBrace
            | ErrorImpl::ExpectedValue { .. }
            | ErrorImpl::ExpectedStatement { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::NotIndexable { .. } => ErrorKind::Syntax,
            ErrorImpl::UnknownVariable { .. }
            | ErrorImpl::NamingConflict { .. }
            | ErrorImpl::UnknownProperty { .. } => ErrorKind::Name,
            ErrorImpl::OperatorTypeError { .. }
            | ErrorImpl::UnaryTypeError { .. }
            | ErrorImpl::AssignmentTypeError { .. }
            | ErrorImpl::NotAssignable { .. }
            | ErrorImpl::ElementTypeError { .. }
            | ErrorImpl::UnknownElementType
            | ErrorImpl::ArgumentTypeError { .. }
            | ErrorImpl::ArgumentCountError { .. } => ErrorKind::Type,
            ErrorImpl::ElseWithoutIf => ErrorKind::Structural,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ErrorImpl::UnclosedBlock => "UnclosedBlock",
            ErrorImpl::UnmatchedClosingBrace => "UnmatchedClosingBrace",
            ErrorImpl::ExpectedValue { .. } => "ExpectedValue",
            ErrorImpl::ExpectedStatement { .. } => "ExpectedStatement",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::NamingConflict { .. } => "NamingConflict",
            ErrorImpl::UnknownProperty { .. } => "UnknownProperty",
            ErrorImpl::OperatorTypeError { .. } => "OperatorTypeError",
            ErrorImpl::UnaryTypeError { .. } => "UnaryTypeError",
            ErrorImpl::AssignmentTypeError { .. } => "AssignmentTypeError",
            ErrorImpl::NotAssignable { .. } => "NotAssignable",
            ErrorImpl::ElementTypeError { .. } => "ElementTypeError",
            ErrorImpl::UnknownElementType => "UnknownElementType",
            ErrorImpl::ArgumentTypeError { .. } => "ArgumentTypeError",
            ErrorImpl::ArgumentCountError { .. } => "ArgumentCountError",
            ErrorImpl::ElseWithoutIf => "ElseWithoutIf",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedEndOfInput => {
                ErrorTip::Suggestion(String::from("The program ends in the middle of a construct"))
            }
            ErrorImpl::UnclosedBlock => {
                ErrorTip::Suggestion(String::from("This `{` is never closed"))
            }
            ErrorImpl::UnmatchedClosingBrace => {
                ErrorTip::Suggestion(String::from("There is no open block for this `}` to close"))
            }
            ErrorImpl::ExpectedValue { .. } => ErrorTip::None,
            ErrorImpl::ExpectedStatement { .. } => ErrorTip::Suggestion(String::from(
                "Only declarations, assignments, `if`, `for`, `break` and blocks can stand alone",
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::NotCallable { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
            ErrorImpl::NotIndexable { name } => {
                ErrorTip::Suggestion(format!("`{}` is neither an object nor an array", name))
            }
            ErrorImpl::UnknownVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::NamingConflict { variable } => {
                ErrorTip::Suggestion(format!("Name `{}` already declared", variable))
            }
            ErrorImpl::UnknownProperty { property } => {
                ErrorTip::Suggestion(format!("Property `{}` is not known", property))
            }
            ErrorImpl::OperatorTypeError {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` and `{}` cannot be combined with `{}`",
                left, right, operator
            )),
            ErrorImpl::UnaryTypeError { operator, operand } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::AssignmentTypeError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::NotAssignable { value_type } => {
                ErrorTip::Suggestion(format!("Values of type `{}` cannot be assigned", value_type))
            }
            ErrorImpl::ElementTypeError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected element type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::UnknownElementType => ErrorTip::Suggestion(String::from(
                "Empty arrays need a declaration to take their element type from",
            )),
            ErrorImpl::ArgumentTypeError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::ArgumentCountError { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::ElseWithoutIf => {
                ErrorTip::Suggestion(String::from("There is no pending `if` for this `else`"))
            }
        }
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    /// Consumes the error into its `(line, position, message)` triple.
    pub fn into_triple(self) -> (usize, usize, String) {
        let message = self.message();
        (self.position.line, self.position.position, message)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {} position {}: {}",
            self.position.line,
            self.position.position,
            self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid character: {token:?}")]
    InvalidCharacter { token: String },
    #[error("syntax error: unexpected token {token:?}")]
    UnexpectedToken { token: String },
    #[error("syntax error: unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("syntax error: block is never closed")]
    UnclosedBlock,
    #[error("syntax error: unmatched closing brace")]
    UnmatchedClosingBrace,
    #[error("syntax error: expected a value near {token:?}")]
    ExpectedValue { token: String },
    #[error("syntax error: {node} cannot be used as a statement")]
    ExpectedStatement { node: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("syntax error: {name:?} cannot be called")]
    NotCallable { name: String },
    #[error("syntax error: {name:?} cannot be indexed")]
    NotIndexable { name: String },
    #[error("unknown variable {variable:?}")]
    UnknownVariable { variable: String },
    #[error("naming conflict: {variable:?} already declared")]
    NamingConflict { variable: String },
    #[error("unknown property {property:?}")]
    UnknownProperty { property: String },
    #[error("operator error: {left} and {right} cannot use '{operator}'")]
    OperatorTypeError {
        operator: String,
        left: ValueType,
        right: ValueType,
    },
    #[error("operator error: {operand} cannot use '{operator}'")]
    UnaryTypeError { operator: String, operand: ValueType },
    #[error("assignment type error: expected {expected}, received {received}")]
    AssignmentTypeError {
        expected: ValueType,
        received: ValueType,
    },
    #[error("{value_type} cannot be assigned")]
    NotAssignable { value_type: ValueType },
    #[error("type error: expected element type {expected}, received {received}")]
    ElementTypeError {
        expected: ValueType,
        received: ValueType,
    },
    #[error("type error: element type of empty array is unknown")]
    UnknownElementType,
    #[error("argument type error: expected {expected}, received {received}")]
    ArgumentTypeError {
        expected: ValueType,
        received: ValueType,
    },
    #[error("argument count error: expected {expected} arguments, received {received}")]
    ArgumentCountError { expected: usize, received: usize },
    #[error("else without a pending if")]
    ElseWithoutIf,
}
