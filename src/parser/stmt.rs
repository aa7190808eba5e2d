use tracing::trace;

use crate::{
    ast::{
        ast::Node,
        expressions::MemberProperty,
        statements::{BlockStmt, BreakStmt, Declarator, DeclareStmt, ForStmt, IfStmt},
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    type_checker::type_checker::{check_assigned_value, check_element},
};

use super::{
    expr::{
        parse_array_expr, parse_grouping_expr, parse_identifier_expr, parse_primary_expr,
        parse_unary_expr, parse_value,
    },
    lookups::LOOSEST,
    parser::Parser,
};

/// Parses whatever construct starts at the current token.
///
/// Returns `None` for constructs that leave no node behind: separators,
/// `else` (its branch is stored with the matching `if`) and the end of input
/// right after a `;`. `element_type` is the element type an array literal
/// here must have, when the context decides it.
pub fn parse_node(
    parser: &mut Parser,
    element_type: Option<ValueType>,
) -> Result<Option<Node>, Error> {
    let token = match parser.current_token() {
        Some(token) => token.clone(),
        None => {
            return match parser.previous_token() {
                Some(previous) if previous.is(TokenKind::Separator, ";") => Ok(None),
                _ => Err(parser.end_of_input()),
            }
        }
    };

    match token.kind {
        TokenKind::String | TokenKind::Number => parse_primary_expr(parser).map(Some),
        TokenKind::Paren if token.value == "(" => parse_grouping_expr(parser).map(Some),
        TokenKind::Bracket if token.value == "[" => {
            parse_array_expr(parser, element_type).map(Some)
        }
        TokenKind::Brace if token.value == "{" => parse_block_stmt(parser).map(Some),
        TokenKind::Brace => {
            if parser.brace_depth() > 0 {
                Err(parser.unexpected())
            } else {
                Err(Error::new(
                    ErrorImpl::UnmatchedClosingBrace,
                    token.get_position(),
                ))
            }
        }
        TokenKind::Keyword => {
            let handler = parser.get_stmt_lookup().get(token.value.as_str()).copied();
            match handler {
                Some(handler) => handler(parser),
                None => Err(parser.unexpected()),
            }
        }
        TokenKind::Identifier => parse_identifier_expr(parser).map(Some),
        TokenKind::Separator => {
            parser.advance()?;
            parser.set_precedence(LOOSEST);
            Ok(None)
        }
        TokenKind::Operator if token.value == "-" || token.value == "!" => {
            parse_unary_expr(parser).map(Some)
        }
        _ => Err(parser.unexpected()),
    }
}

/// Accepts only nodes that may stand alone in a program, a block or a branch.
pub fn expect_statement(node: Node) -> Result<Node, Error> {
    if node.kind().is_statement() {
        Ok(node)
    } else {
        Err(Error::new(
            ErrorImpl::ExpectedStatement {
                node: node.kind().to_string(),
            },
            node.get_position(),
        ))
    }
}

/// Parses the one statement a branch or loop body consists of.
pub fn parse_statement(parser: &mut Parser) -> Result<Node, Error> {
    match parse_node(parser, None)? {
        Some(node) => expect_statement(node),
        None => Err(Error::new(
            ErrorImpl::ExpectedStatement {
                node: parser
                    .previous_token()
                    .map(|token| format!("{:?}", token.value))
                    .unwrap_or_default(),
            },
            parser.get_previous_position(),
        )),
    }
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let open = parser.advance()?;
    parser.open_brace(open.clone());

    let body = parser.with_loosest_precedence(|parser| {
        let mut body = vec![];

        loop {
            match parser.current_token() {
                None => {
                    return Err(Error::new(ErrorImpl::UnclosedBlock, open.get_position()));
                }
                Some(token) if token.is(TokenKind::Brace, "}") => break,
                Some(_) => {}
            }

            if let Some(node) = parse_node(parser, None)? {
                body.push(expect_statement(node)?);
            }
        }

        Ok(body)
    })?;

    parser.advance()?;
    parser.close_brace();

    Ok(Node::Block(BlockStmt {
        body,
        position: open.get_position(),
    }))
}

/// Element type of an array-valued initializer.
///
/// Literals carry their own. Named arrays are looked up in the side table by
/// variable name, or by property name for a `.property` access.
fn initializer_element_type(parser: &Parser, initializer: &Node) -> Option<ValueType> {
    match initializer {
        Node::Array(array) => Some(array.element_type),
        Node::Identifier(identifier) => parser.environment().get_element_type(&identifier.name),
        Node::Member(member) => match &member.property {
            MemberProperty::Named(name) => parser.environment().get_element_type(name),
            MemberProperty::Index(_) => None,
        },
        _ => None,
    }
}

/// Checks an initializer against the declared type and returns the type the
/// name ends up with.
fn check_initializer(
    parser: &mut Parser,
    name: &Token,
    operator: &Token,
    declared_type: ValueType,
    initializer: &Node,
) -> Result<ValueType, Error> {
    let value_type = initializer.value_type().ok_or_else(|| {
        Error::new(
            ErrorImpl::ExpectedValue {
                token: initializer.kind().to_string(),
            },
            initializer.get_position(),
        )
    })?;

    if value_type == ValueType::Array {
        let element_type = initializer_element_type(parser, initializer).ok_or_else(|| {
            Error::new(ErrorImpl::UnknownElementType, initializer.get_position())
        })?;
        check_element(declared_type, element_type, initializer.get_position())?;

        parser
            .environment_mut()
            .promote_to_array(&name.value, element_type);
        Ok(ValueType::Array)
    } else {
        check_assigned_value(declared_type, value_type, operator.get_position())?;
        Ok(declared_type)
    }
}

/// `num a = 1, b;` / `str s = "x";`
///
/// Each name is declared before its initializer is parsed. The closing `;`
/// is left for the separator rule.
pub fn parse_declare_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let keyword = parser.advance()?;
    let declared_type = match ValueType::from_keyword(&keyword.value) {
        Some(declared_type) => declared_type,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: keyword.value.clone(),
                },
                keyword.get_position(),
            ))
        }
    };

    let mut variables = vec![];

    loop {
        let name = match parser.current_token() {
            Some(token) if token.kind == TokenKind::Identifier => parser.advance()?,
            _ => return Err(parser.unexpected()),
        };

        parser.environment_mut().declare_variable(
            name.value.clone(),
            declared_type,
            name.get_position(),
        )?;

        let mut declarator = Declarator {
            name: name.value.clone(),
            value_type: declared_type,
            initializer: None,
            position: name.get_position(),
        };

        if parser.current_is("=") {
            let operator = parser.advance()?;
            let initializer = parse_value(parser, Some(declared_type))?;

            declarator.value_type =
                check_initializer(parser, &name, &operator, declared_type, &initializer)?;
            declarator.initializer = Some(initializer);
        }

        trace!(name = %declarator.name, value_type = %declarator.value_type, "declared");
        variables.push(declarator);

        match parser.current_token() {
            Some(token) if token.is(TokenKind::Separator, ",") => {
                parser.advance()?;
            }
            Some(token) if token.is(TokenKind::Separator, ";") => break,
            None => break,
            Some(_) => return Err(parser.unexpected()),
        }
    }

    Ok(Some(Node::Declare(DeclareStmt {
        declared_type,
        variables,
        position: keyword.get_position(),
    })))
}

/// `if <condition> <statement>`
///
/// The `if` is left pending so a following `else` can find it.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let keyword = parser.advance()?;

    let condition = parse_value(parser, None)?;
    let body = parse_statement(parser)?;

    let id = parser.advance_id();
    parser.push_pending_if(id);

    Ok(Some(Node::If(IfStmt {
        id,
        condition: Box::new(condition),
        body: Box::new(body),
        else_body: None,
        position: keyword.get_position(),
    })))
}

pub fn parse_else_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let keyword = parser.advance()?;

    let id = match parser.pop_pending_if() {
        Some(id) => id,
        None => return Err(Error::new(ErrorImpl::ElseWithoutIf, keyword.get_position())),
    };

    let branch = parse_statement(parser)?;
    parser.store_else_branch(id, branch);

    Ok(None)
}

/// `for (<init>; <test>; <update>) <statement>`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let keyword = parser.advance()?;

    parser.expect("(")?;
    let init = parse_statement(parser)?;
    parser.expect(";")?;
    let test = parse_value(parser, None)?;
    parser.expect(";")?;
    let update = parse_statement(parser)?;
    parser.expect(")")?;

    let body = parse_statement(parser)?;

    Ok(Some(Node::For(ForStmt {
        init: Box::new(init),
        test: Box::new(test),
        update: Box::new(update),
        body: Box::new(body),
        position: keyword.get_position(),
    })))
}

/// `break` is accepted anywhere, loop or not.
pub fn parse_break_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let keyword = parser.advance()?;

    Ok(Some(Node::Break(BreakStmt {
        position: keyword.get_position(),
    })))
}
