use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{
    environment::prelude::{global_environment, EnvironmentError, Value},
    parser::prelude::parse_program,
    utils::prelude::{NullOutputEmitterIO, VectorOutputEmitterIO},
};

use super::error::{RuntimeError, RuntimeErrorType};
use super::{interpret, Evaluator};

fn eval_source(input: &str) -> Result<Value, RuntimeError> {
    let program = parse_program(input).expect("input should parse");
    let env = global_environment();
    let evaluator = Evaluator::new(Rc::new(NullOutputEmitterIO));

    evaluator.eval_program(&program, &env)
}

fn eval_value(input: &str) -> Value {
    eval_source(input).expect("input should evaluate")
}

fn eval_error(input: &str) -> RuntimeErrorType {
    eval_source(input).expect_err("input should fail").error
}

fn number(value: f64) -> Value {
    Value::Number { value }
}

#[test]
fn declared_variables_can_be_reassigned_and_read() {
    assert_eq!(eval_value("let x = 5; x = x + 1; x;"), number(6.0));
}

#[test]
fn reassigning_a_constant_fails() {
    assert_eq!(
        eval_error("const x = 1; x = 2;"),
        RuntimeErrorType::Environment(EnvironmentError::ReassignToConstant {
            name: "x".to_string()
        })
    );
}

#[test]
fn uninitialized_let_is_null() {
    assert_eq!(eval_value("let x; x;"), Value::Null);
}

#[test]
fn assigning_an_undeclared_variable_fails() {
    assert_eq!(
        eval_error("x = 1;"),
        RuntimeErrorType::Environment(EnvironmentError::UnresolvedName {
            name: "x".to_string()
        })
    );
}

#[test]
fn reading_an_undeclared_variable_fails() {
    assert_eq!(
        eval_error("missing;"),
        RuntimeErrorType::Environment(EnvironmentError::UnresolvedName {
            name: "missing".to_string()
        })
    );
}

#[test]
fn assignment_target_must_be_an_identifier() {
    assert_eq!(eval_error("1 = 2;"), RuntimeErrorType::InvalidAssignmentTarget);
}

#[test]
fn assignment_evaluates_to_the_assigned_value() {
    assert_eq!(eval_value("let x = 1; x = 5;"), number(5.0));
}

#[test]
fn program_value_is_the_last_statement_value() {
    assert_eq!(eval_value("1; 2;"), number(2.0));
}

#[test]
fn empty_program_is_null() {
    assert_eq!(eval_value(""), Value::Null);
}

#[test]
fn global_bindings_resolve() {
    assert_eq!(eval_value("true;"), Value::Boolean { value: true });
    assert_eq!(eval_value("false;"), Value::Boolean { value: false });
    assert_eq!(eval_value("null;"), Value::Null);
}

#[test]
fn global_bindings_are_constant() {
    assert_eq!(
        eval_error("true = false;"),
        RuntimeErrorType::Environment(EnvironmentError::ReassignToConstant {
            name: "true".to_string()
        })
    );
}

#[test]
fn division_follows_ieee_semantics() {
    assert_eq!(eval_value("10 / 0;"), number(f64::INFINITY));
    assert!(matches!(
        eval_value("0 / 0;"),
        Value::Number { value } if value.is_nan()
    ));
}

#[test]
fn remainder_applies_to_numbers() {
    assert_eq!(eval_value("10 % 3;"), number(1.0));
}

#[test]
fn non_numeric_operands_collapse_to_null() {
    assert_eq!(eval_value("true + 1;"), Value::Null);
    assert_eq!(eval_value("null * 2;"), Value::Null);
    assert_eq!(eval_value("fn f() { } f - f;"), Value::Null);
}

#[test]
fn function_calls_return_the_last_body_statement() {
    assert_eq!(eval_value("fn add(a, b) { a + b } add(2, 3);"), number(5.0));
}

#[test]
fn empty_function_bodies_return_null() {
    assert_eq!(eval_value("fn nothing() { } nothing();"), Value::Null);
}

#[test]
fn redeclaring_in_the_same_scope_fails() {
    assert_eq!(
        eval_error("let y = 10; fn get() { y } let y = 20; get();"),
        RuntimeErrorType::Environment(EnvironmentError::DuplicateDeclaration {
            name: "y".to_string()
        })
    );
}

#[test]
fn function_names_are_constant_bindings() {
    assert_eq!(
        eval_error("fn get() { 1 } get = 2;"),
        RuntimeErrorType::Environment(EnvironmentError::ReassignToConstant {
            name: "get".to_string()
        })
    );
}

#[test]
fn closures_read_their_declaration_scope() {
    assert_eq!(eval_value("let x = 10; fn get() { x } get();"), number(10.0));
}

#[test]
fn closures_survive_escaping_their_call() {
    let input = "fn make() { let y = 7; fn get() { y } get } let f = make(); f();";

    assert_eq!(eval_value(input), number(7.0));
}

#[test]
fn assignments_inside_calls_reach_outer_scopes() {
    assert_eq!(eval_value("let x = 1; fn set() { x = 5 } set(); x;"), number(5.0));
}

#[test]
fn parameters_shadow_outer_bindings() {
    assert_eq!(eval_value("let x = 1; fn bump(x) { x + 1 } bump(41);"), number(42.0));
}

#[test]
fn chained_calls_invoke_returned_functions() {
    assert_eq!(eval_value("fn make() { fn one() { 1 } one } make()();"), number(1.0));
}

#[test]
fn calling_a_non_function_fails() {
    assert!(matches!(
        eval_error("let x = 1; x();"),
        RuntimeErrorType::NotCallable { .. }
    ));
}

#[test]
fn missing_arguments_fail() {
    assert_eq!(
        eval_error("fn add(a, b) { a + b } add(1);"),
        RuntimeErrorType::ArityMismatch { expected: 2, got: 1 }
    );
}

#[test]
fn extra_arguments_are_ignored() {
    assert_eq!(eval_value("fn first(a) { a } first(1, 2, 3);"), number(1.0));
}

#[test]
fn arguments_evaluate_before_the_caller() {
    assert_eq!(eval_value("let x = 1; fn id(a) { a } id(x = 2); x;"), number(2.0));
}

#[test]
fn object_literals_evaluate_their_properties() {
    let mut properties = BTreeMap::new();
    properties.insert("a".to_string(), number(1.0));
    properties.insert("b".to_string(), number(2.0));

    assert_eq!(
        eval_value("let a = 1; { a, b: 1 + 1 };"),
        Value::Object { properties }
    );
}

#[test]
fn object_shorthand_requires_a_binding() {
    assert_eq!(
        eval_error("{ a };"),
        RuntimeErrorType::Environment(EnvironmentError::UnresolvedName {
            name: "a".to_string()
        })
    );
}

#[test]
fn member_expressions_do_not_evaluate() {
    assert_eq!(
        eval_error("let o = { a: 1 }; o.a;"),
        RuntimeErrorType::UnsupportedMemberExpr
    );
}

#[test]
fn print_writes_through_the_output_sink() {
    let output = VectorOutputEmitterIO::new();
    let program = parse_program("print(1 + 2, true); print();")
        .expect("input should parse");

    let env = global_environment();
    let evaluator = Evaluator::new(Rc::new(output.clone()));

    let result = evaluator.eval_program(&program, &env)
        .expect("program should evaluate");

    assert_eq!(result, Value::Null);
    assert_eq!(output.take(), vec!["3 true".to_string(), "".to_string()]);
}

#[test]
fn interpret_runs_a_source_file() {
    let path = std::env::temp_dir().join("brio-interpret-test.brio");
    std::fs::write(&path, "let x = 20; x * 2;").expect("write test source");

    let result = interpret(path, Rc::new(NullOutputEmitterIO))
        .expect("file should run");

    assert_eq!(result, number(40.0));
}

#[test]
fn time_returns_a_millisecond_number() {
    assert!(matches!(
        eval_value("time();"),
        Value::Number { value } if value > 0.0
    ));
}
