use crate::lexer::prelude::Token;

use super::prelude::{
    parse_error, parse_program, BinaryOperator, Expression, ParseError,
    ParseErrorType, Program, Statement,
};

fn parse(input: &str) -> Program {
    parse_program(input).expect("input should parse")
}

fn single_expression(input: &str) -> Expression {
    let program = parse(input);

    assert_eq!(program.statements.len(), 1, "expected one statement");

    match program.statements.into_iter().next() {
        Some(Statement::Expression(expression)) => expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() -> Result<(), ParseError> {
    let expression = single_expression("1 + 2 * 3;");

    match expression {
        Expression::Binary { left, operator, right, .. } => {
            assert_eq!(operator, BinaryOperator::Add);
            assert!(matches!(*left, Expression::NumericLiteral { value, .. } if value == 1.0));

            match *right {
                Expression::Binary { left, operator, right, .. } => {
                    assert_eq!(operator, BinaryOperator::Multiply);
                    assert!(matches!(*left, Expression::NumericLiteral { value, .. } if value == 2.0));
                    assert!(matches!(*right, Expression::NumericLiteral { value, .. } if value == 3.0));
                },
                other => panic!("expected binary right operand, got {other:?}"),
            }
        },
        other => panic!("expected binary expression, got {other:?}"),
    }

    Ok(())
}

#[test]
fn additive_operators_fold_left() {
    let expression = single_expression("1 - 2 - 3;");

    // (1 - 2) - 3
    match expression {
        Expression::Binary { left, operator, right, .. } => {
            assert_eq!(operator, BinaryOperator::Subtract);
            assert!(matches!(*left, Expression::Binary { .. }));
            assert!(matches!(*right, Expression::NumericLiteral { value, .. } if value == 3.0));
        },
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn assignment_is_right_associative() {
    let expression = single_expression("a = b = 1;");

    // a = (b = 1)
    match expression {
        Expression::Assignment { assignee, value, .. } => {
            assert!(matches!(*assignee, Expression::Identifier(_)));
            assert!(matches!(*value, Expression::Assignment { .. }));
        },
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn parses_var_declarations() {
    let program = parse("let x = 5; const y = 10; let z;");

    let declarations = program.statements.iter()
        .map(|statement| match statement {
            Statement::VarDeclaration(declaration) => (
                declaration.name.value.as_str(),
                declaration.value.is_some(),
                declaration.constant,
            ),
            other => panic!("expected declaration, got {other:?}"),
        })
        .collect::<Vec<_>>();

    assert_eq!(declarations, vec![
        ("x", true, false),
        ("y", true, true),
        ("z", false, false),
    ]);
}

#[test]
fn const_requires_an_initializer() {
    let error = parse_program("const x;").expect_err("`const x;` should not parse");

    assert_eq!(error.error, ParseErrorType::MissingConstInitializer);
}

#[test]
fn declaration_requires_a_semicolon() {
    let error = parse_program("let x = 1").expect_err("unterminated declaration should not parse");

    assert!(matches!(
        error.error,
        ParseErrorType::UnexpectedToken { token: Token::Eof, .. }
    ));
}

#[test]
fn parses_function_declarations() {
    let program = parse("fn add(a, b) { a + b }");

    match &program.statements[0] {
        Statement::FunctionDeclaration(declaration) => {
            assert_eq!(declaration.name.value, "add");
            assert_eq!(
                declaration.parameters.iter()
                    .map(|parameter| parameter.value.as_str())
                    .collect::<Vec<_>>(),
                vec!["a", "b"]
            );
            assert_eq!(declaration.body.len(), 1);
        },
        other => panic!("expected function declaration, got {other:?}"),
    }
}

#[test]
fn function_parameters_must_be_identifiers() {
    let error = parse_program("fn f(1) { }").expect_err("numeric parameter should not parse");

    assert_eq!(error.error, ParseErrorType::ExpectedParameterName);
}

#[test]
fn parses_object_literals_with_shorthand() {
    let expression = single_expression("{ a: 1, b, c: 2, };");

    match expression {
        Expression::ObjectLiteral { properties, .. } => {
            let properties = properties.iter()
                .map(|property| (property.key.as_str(), property.value.is_some()))
                .collect::<Vec<_>>();

            assert_eq!(properties, vec![("a", true), ("b", false), ("c", true)]);
        },
        other => panic!("expected object literal, got {other:?}"),
    }
}

#[test]
fn member_and_call_expressions_chain() {
    let expression = single_expression("add(1, 2)(3);");

    match expression {
        Expression::Call { caller, arguments, .. } => {
            assert_eq!(arguments.len(), 1);
            assert!(matches!(*caller, Expression::Call { .. }));
        },
        other => panic!("expected call expression, got {other:?}"),
    }

    let expression = single_expression("a.b.c;");

    match expression {
        Expression::Member { object, computed, .. } => {
            assert!(!computed);
            assert!(matches!(*object, Expression::Member { .. }));
        },
        other => panic!("expected member expression, got {other:?}"),
    }
}

#[test]
fn computed_members_take_full_expressions() {
    let expression = single_expression("a[1 + 2];");

    match expression {
        Expression::Member { property, computed, .. } => {
            assert!(computed);
            assert!(matches!(*property, Expression::Binary { .. }));
        },
        other => panic!("expected member expression, got {other:?}"),
    }
}

#[test]
fn dot_suffix_must_be_an_identifier() {
    let error = parse_program("a.1;").expect_err("`a.1` should not parse");

    assert_eq!(error.error, ParseErrorType::ExpectedPropertyName);
}

#[test]
fn method_style_calls_parse() {
    let expression = single_expression("a.b();");

    match expression {
        Expression::Call { caller, .. } => {
            assert!(matches!(*caller, Expression::Member { .. }));
        },
        other => panic!("expected call expression, got {other:?}"),
    }
}

#[test]
fn grouping_parens_produce_no_node() {
    let expression = single_expression("(1 + 2) * 3;");

    match expression {
        Expression::Binary { left, operator, .. } => {
            assert_eq!(operator, BinaryOperator::Multiply);
            assert!(matches!(*left, Expression::Binary { .. }));
        },
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn reparsing_yields_identical_trees() {
    let input = "let x = 5; fn get(a) { a } get(x) + 1; { y: 2, z }; x = 1;";

    assert_eq!(parse(input), parse(input));
}

#[test]
fn lexical_errors_win_over_parse_errors() {
    let error = parse_program("let x = ?;").expect_err("`?` should not lex");

    assert!(matches!(error.error, ParseErrorType::LexError { .. }));
}

#[test]
fn programs_render_back_to_source() {
    let program = parse("let x = 5; fn get() { x } get();");

    assert_eq!(program.to_string(), "let x = 5; fn get() { x; } get();");
}

#[test]
fn parse_error_helper_carries_span() {
    let result: Result<(), ParseError> = parse_error(
        ParseErrorType::UnexpectedEof,
        crate::utils::prelude::SrcSpan { start: 0, end: 0 }
    );

    assert!(result.is_err());
}
