//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - `var`, `return` and expression statements
//! - Literals, prefix and infix operators and their precedence
//! - `if` expressions, function literals and calls
//! - Error collection and statement level recovery

use crate::{
    ast::{
        ast::{Expression, Node, Program, Statement},
        expressions::Identifier,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
    Position,
};

use super::parser::{Parser, MAX_NESTING_DEPTH};

fn parse_source(source: &str) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    (parser, program)
}

fn parse_ok(source: &str) -> Program {
    let (parser, program) = parse_source(source);
    assert!(
        parser.errors().is_empty(),
        "parser had errors: {:?}",
        parser.error_messages()
    );

    program
}

fn single_expression(program: &Program) -> &Expression {
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn assert_identifier(expression: &Expression, expected: &str) {
    match expression {
        Expression::Identifier(Identifier { token, value }) => {
            assert_eq!(value, expected);
            assert_eq!(token.literal, expected);
        }
        other => panic!("expected an identifier, got {:?}", other),
    }
}

fn assert_integer(expression: &Expression, expected: i64) {
    match expression {
        Expression::Integer(integer) => {
            assert_eq!(integer.value, expected);
            assert_eq!(integer.token.literal, expected.to_string());
        }
        other => panic!("expected an integer, got {:?}", other),
    }
}

#[test]
fn test_parse_program() {
    let program = parse_ok("var x = 5;");

    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_parse_empty_program() {
    let program = parse_ok("");

    assert!(program.statements.is_empty());
    assert_eq!(program.token_literal(), "");
}

#[test]
fn test_var_statements() {
    let program = parse_ok(
        "
        var x = 5;
        var y = 10;
        var foo = 20;
        ",
    );

    assert_eq!(program.statements.len(), 3);

    let mut names = vec![];
    for statement in &program.statements {
        assert_eq!(statement.token_literal(), "var");
        match statement {
            Statement::Var(stmt) => names.push(stmt.name.value.clone()),
            other => panic!("expected a var statement, got {:?}", other),
        }
    }

    assert_eq!(names, vec!["x", "y", "foo"]);
}

#[test]
fn test_var_statement_values() {
    let program = parse_ok("var x = 5; var y = true; var foo = y;");

    let values: Vec<String> = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::Var(stmt) => stmt.value.as_ref().unwrap().to_string(),
            other => panic!("expected a var statement, got {:?}", other),
        })
        .collect();

    assert_eq!(values, vec!["5", "true", "y"]);
}

#[test]
fn test_return_statements() {
    let program = parse_ok(
        "
        return 5;
        return foo;
        ",
    );

    assert_eq!(program.statements.len(), 2);

    for statement in &program.statements {
        assert_eq!(statement.token_literal(), "return");
        assert!(matches!(statement, Statement::Return(_)));
    }

    match &program.statements[1] {
        Statement::Return(stmt) => assert_identifier(stmt.return_value.as_ref().unwrap(), "foo"),
        _ => unreachable!(),
    }
}

#[test]
fn test_identifier_expression() {
    let program = parse_ok("foobar;");

    assert_identifier(single_expression(&program), "foobar");
}

#[test]
fn test_integer_expression() {
    let program = parse_ok("5;");

    assert_integer(single_expression(&program), 5);
}

#[test]
fn test_boolean_expression() {
    let program = parse_ok("false;");

    match single_expression(&program) {
        Expression::Boolean(boolean) => {
            assert!(!boolean.value);
            assert_eq!(boolean.token_literal(), "false");
        }
        other => panic!("expected a boolean, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolons_are_tolerated() {
    let with = parse_ok("var x = 5; return x; x + 1;");
    let without = parse_ok("var x = 5\nreturn x\nx + 1");

    assert_eq!(with.statements.len(), 3);
    assert_eq!(with.to_string(), without.to_string());
}

#[test]
fn test_prefix_expressions() {
    let program = parse_ok("!5; -15;");

    let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered, vec!["(!5)", "(-15)"]);

    match &program.statements[1] {
        Statement::Expression(stmt) => match &stmt.expression {
            Expression::Prefix(prefix) => {
                assert_eq!(prefix.operator, "-");
                assert_integer(&prefix.right, 15);
            }
            other => panic!("expected a prefix expression, got {:?}", other),
        },
        _ => unreachable!(),
    }
}

#[test]
fn test_infix_expressions() {
    for operator in ["+", "-", "*", "/", ">", "<", "==", "!="] {
        let source = format!("5 {} 6;", operator);
        let program = parse_ok(&source);

        match single_expression(&program) {
            Expression::Infix(infix) => {
                assert_integer(&infix.left, 5);
                assert_eq!(infix.operator, operator);
                assert_eq!(infix.token_literal(), operator);
                assert_integer(&infix.right, 6);
            }
            other => panic!("expected an infix expression, got {:?}", other),
        }
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true != false", "(true != false)"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("3 + 4; -5 * 5", "(3 + 4)\n((-5) * 5)"),
    ];

    for (source, expected) in cases {
        let program = parse_ok(source);
        assert_eq!(program.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_if_expression() {
    let program = parse_ok("if (x < y) { x }");

    match single_expression(&program) {
        Expression::If(if_expr) => {
            assert_eq!(if_expr.condition.to_string(), "(x < y)");
            assert_eq!(if_expr.consequence.statements.len(), 1);
            assert_eq!(if_expr.consequence.to_string(), "{ x }");
            assert!(if_expr.alternative.is_none());
        }
        other => panic!("expected an if expression, got {:?}", other),
    }
}

#[test]
fn test_if_else_expression() {
    let program = parse_ok("if (x < y) { x } else { y; }");

    match single_expression(&program) {
        Expression::If(if_expr) => {
            let alternative = if_expr.alternative.as_ref().unwrap();
            assert_eq!(alternative.statements.len(), 1);
        }
        other => panic!("expected an if expression, got {:?}", other),
    }
    assert_eq!(program.to_string(), "if (x < y) { x } else { y }");
}

#[test]
fn test_if_condition_keeps_parentheses() {
    let tests = vec![
        ("if (x) { y }", "if (x) { y }"),
        ("if (true) { 1 } else { 2 }", "if (true) { 1 } else { 2 }"),
        ("if (f(x)) { y }", "if (f(x)) { y }"),
        ("if (!x) { y }", "if (!x) { y }"),
        ("if ((x)) { y }", "if (x) { y }"),
    ];

    for (input, expected) in tests {
        let rendered = parse_ok(input).to_string();
        assert_eq!(rendered, expected);
        assert_eq!(parse_ok(&rendered).to_string(), rendered);
    }
}

#[test]
fn test_function_literal() {
    let program = parse_ok("function(x, y) { x + y; }");

    match single_expression(&program) {
        Expression::Function(function) => {
            let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(names, vec!["x", "y"]);
            assert_eq!(function.body.statements.len(), 1);
            assert_eq!(function.body.to_string(), "{ (x + y) }");
        }
        other => panic!("expected a function literal, got {:?}", other),
    }
}

#[test]
fn test_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("function() {};", &[]),
        ("function(x) {};", &["x"]),
        ("function(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (source, expected) in cases {
        let program = parse_ok(source);
        match single_expression(&program) {
            Expression::Function(function) => {
                let names: Vec<&str> =
                    function.parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(names, expected);
            }
            other => panic!("expected a function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_call_expression() {
    let program = parse_ok("add(1, 2 * 3, 4 + 5);");

    match single_expression(&program) {
        Expression::Call(call) => {
            assert_identifier(&call.function, "add");
            assert_eq!(call.arguments.len(), 3);
            assert_integer(&call.arguments[0], 1);
            assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
            assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
        }
        other => panic!("expected a call expression, got {:?}", other),
    }
}

#[test]
fn test_call_without_arguments() {
    let program = parse_ok("run();");

    match single_expression(&program) {
        Expression::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("expected a call expression, got {:?}", other),
    }
}

#[test]
fn test_parse_errors() {
    let (parser, program) = parse_source("var x 5;");

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be ASSIGN, got INTEGER"]
    );
    assert!(program.statements.is_empty());
}

#[test]
fn test_missing_identifier() {
    let (parser, _) = parse_source("var = 5;");

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be IDENTIFIER, got ASSIGN"]
    );
}

#[test]
fn test_error_isolation() {
    let (parser, program) = parse_source("var x 5; var y = 10;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Var(stmt) => {
            assert_eq!(stmt.name.value, "y");
            assert_integer(stmt.value.as_ref().unwrap(), 10);
        }
        other => panic!("expected a var statement, got {:?}", other),
    }
}

#[test]
fn test_error_isolation_without_semicolons() {
    let (parser, program) = parse_source("var x 5\nvar y = 10;\nreturn y;");

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be ASSIGN, got INTEGER"]
    );
    assert_eq!(
        parser.errors()[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assign,
            got: TokenKind::Integer,
        }
    );
    assert_eq!(program.to_string(), "var y = 10;\nreturn y;");

    let (parser, program) = parse_source("var = 1\nvar y = 10");
    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be IDENTIFIER, got ASSIGN"]
    );
    assert_eq!(program.to_string(), "var y = 10;");

    let (parser, program) = parse_source("return @\nreturn 2");
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.to_string(), "return;\nreturn 2;");
}

#[test]
fn test_multiple_errors_are_collected() {
    let (parser, program) = parse_source("var = 1; var y 2; return @;");

    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be IDENTIFIER, got ASSIGN",
            "expected next token to be ASSIGN, got INTEGER",
            "no prefix parse function for ILLEGAL found",
        ]
    );
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Statement::Return(stmt) => assert!(stmt.return_value.is_none()),
        other => panic!("expected a return statement, got {:?}", other),
    }
}

#[test]
fn test_absent_var_value_keeps_statement() {
    let (parser, program) = parse_source("var x = ; var y = 2;");

    assert_eq!(
        parser.error_messages(),
        vec!["no prefix parse function for SEMICOLON found"]
    );
    assert_eq!(program.statements.len(), 2);
    match &program.statements[0] {
        Statement::Var(stmt) => {
            assert_eq!(stmt.name.value, "x");
            assert!(stmt.value.is_none());
        }
        other => panic!("expected a var statement, got {:?}", other),
    }
}

#[test]
fn test_no_prefix_parse_function() {
    let (parser, program) = parse_source("5 + ;");

    assert_eq!(
        parser.error_messages(),
        vec!["no prefix parse function for SEMICOLON found"]
    );
    assert!(program.statements.is_empty());
}

#[test]
fn test_integer_overflow_is_reported() {
    let (parser, program) = parse_source("99999999999999999999;");

    assert_eq!(
        parser.error_messages(),
        vec!["could not parse 99999999999999999999 as integer"]
    );
    assert!(program.statements.is_empty());
}

#[test]
fn test_unclosed_group() {
    let (parser, _) = parse_source("(1 + 2;");

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be RPAREN, got SEMICOLON"]
    );
}

#[test]
fn test_deep_nesting_is_reported() {
    let depth = 10_000;
    let source = format!("{}1{}; var y = 2;", "(".repeat(depth), ")".repeat(depth));
    let (parser, program) = parse_source(&source);

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(
        parser.errors()[0].get_kind(),
        &ErrorImpl::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
    assert_eq!(
        parser.errors()[0].get_position(),
        &Position(1, MAX_NESTING_DEPTH as u32 + 1)
    );
    assert_eq!(program.to_string(), "var y = 2;");

    let (parser, program) = parse_source(&format!("{}x", "-".repeat(depth)));
    assert_eq!(
        parser.error_messages(),
        vec![format!(
            "expression nested deeper than {} levels",
            MAX_NESTING_DEPTH
        )]
    );
    assert!(program.statements.is_empty());
}

#[test]
fn test_nesting_below_the_limit_parses() {
    let depth = MAX_NESTING_DEPTH - 1;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse_ok(&source).to_string(), "1");
}

#[test]
fn test_unclosed_block() {
    let (parser, program) = parse_source("if (x) { y");

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be RBRACE, got EOF"]
    );
    assert!(program.statements.is_empty());
}

#[test]
fn test_errors_inside_block_recover() {
    let (parser, program) = parse_source("function(x) { var = 1; x }; var y = 2;");

    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.to_string(), "function(x) { x }\nvar y = 2;");
}

#[test]
fn test_error_positions() {
    let (parser, _) = parse_source("var a = 1;\nvar b 2;");

    let position = parser.errors()[0].get_position();
    assert_eq!((position.line(), position.column()), (2, 7));
}

#[test]
fn test_parse_program_is_single_use() {
    let (mut parser, program) = parse_source("var x = 1; var 2;");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(parser.errors().len(), 1);

    let again = parser.parse_program();
    assert!(again.statements.is_empty());
    assert_eq!(parser.errors().len(), 1);
}
