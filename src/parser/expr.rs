use crate::{
    ast::{
        ast::Node,
        expressions::{
            ArrayExpr, AssignOp, AssignmentExpr, BinaryExpr, BinaryOp, CallExpr, IdentifierExpr,
            MemberExpr, MemberProperty, NumberExpr, StringExpr, UnaryExpr, UnaryOp,
        },
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    type_checker::type_checker::{
        binary_result_type, check_argument, check_arity, check_assignable, check_assigned_value,
        check_element, unary_result_type,
    },
};

use super::{
    lookups::{precedence, ASSIGNMENT, MEMBER},
    parser::Parser,
    stmt::parse_node,
};

/// Accepts only value-producing nodes.
pub fn expect_value(parser: &Parser, node: Option<Node>) -> Result<Node, Error> {
    match node {
        Some(node) if node.kind().is_value() => Ok(node),
        Some(node) => Err(Error::new(
            ErrorImpl::ExpectedValue {
                token: node.kind().to_string(),
            },
            node.get_position(),
        )),
        None => Err(Error::new(
            ErrorImpl::ExpectedValue {
                token: parser
                    .previous_token()
                    .map(|token| token.value.clone())
                    .unwrap_or_default(),
            },
            parser.get_previous_position(),
        )),
    }
}

/// Parses the next construct and requires it to produce a value.
pub fn parse_value(parser: &mut Parser, element_type: Option<ValueType>) -> Result<Node, Error> {
    let node = parse_node(parser, element_type)?;
    expect_value(parser, node)
}

pub fn value_type_of(node: &Node) -> Result<ValueType, Error> {
    node.value_type().ok_or_else(|| {
        Error::new(
            ErrorImpl::ExpectedValue {
                token: node.kind().to_string(),
            },
            node.get_position(),
        )
    })
}

/// Group index of the operator at the current token, if there is one.
///
/// `.` and the assignment operators are never infix operators inside an
/// expression; meeting one here is a syntax error.
fn next_operator(parser: &Parser) -> Result<Option<usize>, Error> {
    match parser.current_token() {
        Some(token) if token.kind == TokenKind::Operator => {
            let now = precedence(&token.value);
            if now == MEMBER || now == ASSIGNMENT {
                Err(parser.unexpected())
            } else {
                Ok(Some(now))
            }
        }
        _ => Ok(None),
    }
}

/// Extends an already parsed left operand with any binary operators that
/// bind tighter than the current threshold.
///
/// The threshold is lowered to the first operator's group while its right
/// operand is parsed. Operators from that group up to (not including) the
/// caller's threshold are then chained on to the left.
pub fn parse_expr(parser: &mut Parser, left: Node) -> Result<Node, Error> {
    let left = expect_value(parser, Some(left))?;

    let now = match next_operator(parser)? {
        Some(now) => now,
        None => return Ok(left),
    };

    let threshold = parser.precedence();
    if now >= threshold {
        return Ok(left);
    }

    parser.set_precedence(now);
    let mut expression = parse_binary_expr(parser, left)?;

    while let Some(next) = next_operator(parser)? {
        if next >= now && next < threshold {
            let lowered = parser.set_precedence(next);
            expression = parse_binary_expr(parser, expression)?;
            parser.set_precedence(lowered);
        } else {
            break;
        }
    }

    parser.set_precedence(threshold);
    Ok(expression)
}

/// Consumes an operator, parses its right operand and types the result.
fn parse_binary_expr(parser: &mut Parser, left: Node) -> Result<Node, Error> {
    let operator_token = parser.advance()?;
    let operator = match BinaryOp::from_operator(&operator_token.value) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value.clone(),
                },
                operator_token.get_position(),
            ))
        }
    };

    let right = parse_value(parser, None)?;

    let value_type = binary_result_type(
        operator,
        value_type_of(&left)?,
        value_type_of(&right)?,
        operator_token.get_position(),
    )?;

    Ok(Node::Expression(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        value_type,
        position: operator_token.get_position(),
    }))
}

/// Number and string literals, extended by any trailing operators.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance()?;

    let node = match token.kind {
        TokenKind::Number => match token.value.parse::<f64>() {
            Ok(value) => Node::Number(NumberExpr {
                value,
                position: token.get_position(),
            }),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value.clone() },
                    token.get_position(),
                ))
            }
        },
        TokenKind::String => Node::String(StringExpr {
            value: unquote(&token.value),
            position: token.get_position(),
        }),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value.clone() },
                token.get_position(),
            ))
        }
    };

    parse_expr(parser, node)
}

/// Text between the quotes. An unterminated literal has no closing quote to drop.
fn unquote(literal: &str) -> String {
    let mut chars = literal.chars();
    match chars.next() {
        Some(quote @ ('"' | '\'')) => {
            let rest = chars.as_str();
            rest.strip_suffix(quote).unwrap_or(rest).to_string()
        }
        _ => literal.to_string(),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance()?;

    let inner = parser.with_loosest_precedence(|parser| parse_node(parser, None))?;
    parser.expect(")")?;

    let inner = expect_value(parser, inner)?;
    parse_expr(parser, inner)
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator_token = parser.advance()?;
    let operator = match UnaryOp::from_operator(&operator_token.value) {
        Some(operator) => operator,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value.clone(),
                },
                operator_token.get_position(),
            ))
        }
    };

    let operand = parse_value(parser, None)?;
    let value_type = unary_result_type(
        operator,
        value_type_of(&operand)?,
        operator_token.get_position(),
    )?;

    let node = Node::UnaryExpression(UnaryExpr {
        operator,
        operand: Box::new(operand),
        value_type,
        position: operator_token.get_position(),
    });

    parse_expr(parser, node)
}

/// Parses a comma separated list of values up to `end`, checking each value
/// as soon as it is parsed. The threshold is loosest inside the list.
fn parse_list(
    parser: &mut Parser,
    end: &str,
    mut check: impl FnMut(usize, &Node) -> Result<(), Error>,
) -> Result<Vec<Node>, Error> {
    parser.with_loosest_precedence(|parser| {
        let mut elements = vec![];

        loop {
            if parser.current_token().is_none() {
                return Err(parser.end_of_input());
            }
            if parser.current_is(end) {
                break;
            }
            if !elements.is_empty() {
                parser.expect(",")?;
            }

            let element = parse_value(parser, None)?;
            check(elements.len(), &element)?;
            elements.push(element);
        }

        parser.advance()?;
        Ok(elements)
    })
}

/// `[a, b, c]`
///
/// With an `element_type` from the context every element must have it,
/// otherwise every element must match the first one.
pub fn parse_array_expr(
    parser: &mut Parser,
    element_type: Option<ValueType>,
) -> Result<Node, Error> {
    let open = parser.advance()?;

    let mut expected = element_type;
    let elements = parse_list(parser, "]", |_, element| {
        let received = value_type_of(element)?;
        match expected {
            Some(expected) => check_element(expected, received, element.get_position()),
            None => {
                expected = Some(received);
                Ok(())
            }
        }
    })?;

    let element_type = match expected {
        Some(element_type) => element_type,
        None => return Err(Error::new(ErrorImpl::UnknownElementType, open.get_position())),
    };

    Ok(Node::Array(ArrayExpr {
        elements,
        element_type,
        position: open.get_position(),
    }))
}

/// An identifier, its `.property` / `[index]` chain and what follows it: a
/// call, an assignment or the rest of an expression.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.advance()?;

    let value_type = match parser.environment().get_variable(&token.value) {
        Some(value_type) => value_type,
        None => {
            return Err(Error::new(
                ErrorImpl::UnknownVariable {
                    variable: token.value.clone(),
                },
                token.get_position(),
            ))
        }
    };

    let mut node = Node::Identifier(IdentifierExpr {
        name: token.value.clone(),
        value_type,
        signature: parser.environment().get_signature(&token.value).cloned(),
        position: token.get_position(),
    });

    // Name used for diagnostics, and for the side table when it is still a plain name.
    let mut name = token.value.clone();
    let mut indexable_name = Some(token.value);

    while let Some(operator) = parser
        .current_token()
        .filter(|token| token.is(TokenKind::Operator, ".") || token.is(TokenKind::Bracket, "["))
        .cloned()
    {
        let object_type = value_type_of(&node)?;
        if object_type != ValueType::Object && object_type != ValueType::Array {
            return Err(Error::new(
                ErrorImpl::NotIndexable { name },
                operator.get_position(),
            ));
        }
        parser.advance()?;

        if operator.value == "." {
            let property = match parser.current_token() {
                Some(token) if token.kind == TokenKind::Identifier => parser.advance()?,
                _ => return Err(parser.unexpected()),
            };

            let value_type = match parser.environment().get_variable(&property.value) {
                Some(value_type) => value_type,
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnknownProperty {
                            property: property.value.clone(),
                        },
                        property.get_position(),
                    ))
                }
            };

            node = Node::Member(MemberExpr {
                object: Box::new(node),
                property: MemberProperty::Named(property.value.clone()),
                value_type,
                signature: parser.environment().get_signature(&property.value).cloned(),
                position: operator.get_position(),
            });
            name = property.value.clone();
            indexable_name = Some(property.value);
        } else {
            let element_type = match indexable_name
                .as_deref()
                .and_then(|name| parser.environment().get_element_type(name))
            {
                Some(element_type) => element_type,
                None => {
                    return Err(Error::new(
                        ErrorImpl::NotIndexable { name },
                        operator.get_position(),
                    ))
                }
            };

            let index = parser.with_loosest_precedence(|parser| parse_value(parser, None))?;
            parser.expect("]")?;

            node = Node::Member(MemberExpr {
                object: Box::new(node),
                property: MemberProperty::Index(Box::new(index)),
                value_type: element_type,
                signature: None,
                position: operator.get_position(),
            });
            name = format!("{}[]", name);
            indexable_name = None;
        }
    }

    let next = parser
        .current_token()
        .map(|token| (token.kind, token.value.clone()));

    match next {
        Some((TokenKind::Paren, value)) if value == "(" => {
            let call = parse_call_expr(parser, node, name)?;
            parse_expr(parser, call)
        }
        Some((TokenKind::Operator, value)) => match AssignOp::from_operator(&value) {
            Some(operator) => parse_assignment_expr(parser, node, operator),
            None => parse_expr(parser, node),
        },
        _ => parse_expr(parser, node),
    }
}

/// `callee(a, b)`: each argument is checked against the parameter list as
/// it is parsed, then the argument count.
fn parse_call_expr(parser: &mut Parser, callee: Node, name: String) -> Result<Node, Error> {
    let signature = match (callee.value_type(), callee.signature()) {
        (Some(ValueType::Function), Some(signature)) => signature.clone(),
        _ => {
            return Err(Error::new(
                ErrorImpl::NotCallable { name },
                parser.get_position(),
            ))
        }
    };
    parser.advance()?;

    let arguments = parse_list(parser, ")", |index, argument| {
        check_argument(
            &signature,
            index,
            value_type_of(argument)?,
            argument.get_position(),
        )
    })?;
    check_arity(&signature, arguments.len(), parser.get_previous_position())?;

    Ok(Node::Call(CallExpr {
        position: callee.get_position(),
        callee: Box::new(callee),
        arguments,
        value_type: signature.output,
    }))
}

/// `target = value`, `target += value`, `target -= value`, `target++`, `target--`
fn parse_assignment_expr(
    parser: &mut Parser,
    target: Node,
    operator: AssignOp,
) -> Result<Node, Error> {
    let operator_token = parser.advance()?;
    let target_type = value_type_of(&target)?;
    check_assignable(operator, target_type, operator_token.get_position())?;

    let value = if operator.is_unary() {
        None
    } else {
        let value = parse_value(parser, None)?;
        check_assigned_value(
            target_type,
            value_type_of(&value)?,
            operator_token.get_position(),
        )?;
        Some(Box::new(value))
    };

    Ok(Node::Assignment(AssignmentExpr {
        target: Box::new(target),
        operator,
        value,
        position: operator_token.get_position(),
    }))
}
