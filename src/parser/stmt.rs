use crate::{
    ast::{
        ast::{Expression, Statement},
        expressions::Identifier,
        statements::{BlockStatement, ExpressionStatement, ReturnStatement, VarStatement},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement, dispatching on the current token.
///
/// Leaves the parser on the last token of the statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// Parses one statement; on failure records the error, skips to the end of
/// the statement and returns `None`.
pub fn parse_stmt_recovering(parser: &mut Parser) -> Option<Statement> {
    match parse_stmt(parser) {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            parser.push_error(error);
            parser.synchronize();
            None
        }
    }
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    // The trailing semicolon is optional so single expressions typed into the
    // REPL parse without one.
    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Statement::Expression(ExpressionStatement { token, expression }))
}

pub fn parse_var_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name_token = parser.current_token().clone();
    let name = Identifier {
        value: name_token.literal.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assign)?;
    parser.advance();

    let value = parse_stmt_value(parser);

    Ok(Statement::Var(VarStatement { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let return_value = parse_stmt_value(parser);

    Ok(Statement::Return(ReturnStatement {
        token,
        return_value,
    }))
}

/// Parses the value of a `var` or `return` statement.
///
/// A failed value is recorded and comes back as `None` so the statement itself
/// is kept.
fn parse_stmt_value(parser: &mut Parser) -> Option<Expression> {
    match parse_expr(parser, BindingPower::Lowest) {
        Ok(value) => {
            if parser.peek_token_kind() == TokenKind::Semicolon {
                parser.advance();
            }
            Some(value)
        }
        Err(error) => {
            parser.push_error(error);
            parser.synchronize();
            None
        }
    }
}

/// Parses `{ ... }` starting on the `{` and ending on the `}`.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStatement, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut statements = vec![];

    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        if let Some(stmt) = parse_stmt_recovering(parser) {
            statements.push(stmt);
        }
        parser.advance();
    }

    if parser.current_token_kind() == TokenKind::EOF {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::CloseCurly,
                got: TokenKind::EOF,
            },
            parser.current_token().position,
        ));
    }

    Ok(BlockStatement { token, statements })
}
