pub mod error;

pub mod prelude {
    pub use super::error::*;
    pub use super::{interpret, interpret_from_stream, Evaluator};
}

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{
        global_environment, Environment, NativeContext, Value
    },
    parser::prelude::{
        parse_program, parse_program_from_stream, BinaryOperator, Expression,
        FunctionDeclaration, Program, Property, Statement, VarDeclaration
    },
    utils::prelude::{Error, OutputEmitterIO, SrcSpan}
};

use error::{RuntimeError, RuntimeErrorType};

// Walks the tree. Holds nothing but the output sink `print` writes
// through; all program state lives in the environment chain.
pub struct Evaluator {
    output: Rc<dyn OutputEmitterIO>,
}

impl Evaluator {
    pub fn new(output: Rc<dyn OutputEmitterIO>) -> Self {
        Self { output }
    }

    // The value of a program is the value of its last statement, null
    // when there are none.
    pub fn eval_program(
        &self,
        program: &Program,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let mut result = Value::Null;

        for statement in &program.statements {
            result = self.eval_statement(statement, env)?;
        }

        Ok(result)
    }

    fn eval_statement(
        &self,
        statement: &Statement,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        match statement {
            Statement::VarDeclaration(declaration) => {
                self.eval_var_declaration(declaration, env)
            },
            Statement::FunctionDeclaration(declaration) => {
                self.eval_function_declaration(declaration, env)
            },
            Statement::Expression(expression) => {
                self.eval_expression(expression, env)
            }
        }
    }

    fn eval_var_declaration(
        &self,
        declaration: &VarDeclaration,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let value = match &declaration.value {
            Some(expression) => self.eval_expression(expression, env)?,
            None => Value::Null
        };

        env.borrow_mut()
            .declare(declaration.name.value.clone(), value, declaration.constant)
            .map_err(|error| RuntimeError {
                error: error.into(),
                location: declaration.location
            })
    }

    // Functions are always declared constant, and they capture the scope
    // they are declared in, not the one they are called from.
    fn eval_function_declaration(
        &self,
        declaration: &FunctionDeclaration,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let function = Value::Function {
            name: declaration.name.value.clone(),
            parameters: declaration.parameters.iter()
                .map(|parameter| parameter.value.clone())
                .collect(),
            body: Rc::new(declaration.body.clone()),
            env: env.clone(),
        };

        env.borrow_mut()
            .declare(declaration.name.value.clone(), function, true)
            .map_err(|error| RuntimeError {
                error: error.into(),
                location: declaration.location
            })
    }

    fn eval_expression(
        &self,
        expression: &Expression,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        match expression {
            Expression::NumericLiteral { value, .. } => {
                Ok(Value::Number { value: *value })
            },
            Expression::Identifier(ident) => {
                env.borrow()
                    .lookup(&ident.value)
                    .map_err(|error| RuntimeError {
                        error: error.into(),
                        location: ident.location
                    })
            },
            Expression::ObjectLiteral { properties, .. } => {
                self.eval_object_literal(properties, env)
            },
            Expression::Assignment { assignee, value, location } => {
                self.eval_assignment(assignee, value, *location, env)
            },
            Expression::Binary { left, operator, right, .. } => {
                self.eval_binary(left, *operator, right, env)
            },
            Expression::Call { caller, arguments, location } => {
                self.eval_call(caller, arguments, *location, env)
            },
            Expression::Member { location, .. } => {
                // Member syntax is in the grammar but the evaluator
                // deliberately has no case for it; fail loudly instead
                // of inventing a property semantics.
                Err(RuntimeError {
                    error: RuntimeErrorType::UnsupportedMemberExpr,
                    location: *location
                })
            }
        }
    }

    fn eval_object_literal(
        &self,
        properties: &[Property],
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let mut object = BTreeMap::new();

        for property in properties {
            let value = match &property.value {
                Some(expression) => self.eval_expression(expression, env)?,
                // Shorthand `{ key }` resolves the key as a variable.
                None => env.borrow()
                    .lookup(&property.key)
                    .map_err(|error| RuntimeError {
                        error: error.into(),
                        location: property.location
                    })?
            };

            object.insert(property.key.clone(), value);
        }

        Ok(Value::Object { properties: object })
    }

    // Left first, then right; the order is observable through
    // assignments nested in either operand.
    fn eval_binary(
        &self,
        left: &Expression,
        operator: BinaryOperator,
        right: &Expression,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(left, env)?;
        let right = self.eval_expression(right, env)?;

        Ok(match numeric_operands(&left, &right) {
            Some((lhs, rhs)) => Value::Number {
                value: match operator {
                    BinaryOperator::Add => lhs + rhs,
                    BinaryOperator::Subtract => lhs - rhs,
                    BinaryOperator::Multiply => lhs * rhs,
                    BinaryOperator::Divide => lhs / rhs,
                    BinaryOperator::Remainder => lhs % rhs,
                }
            },
            None => Value::Null
        })
    }

    fn eval_assignment(
        &self,
        assignee: &Expression,
        value: &Expression,
        location: SrcSpan,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let name = match assignee {
            Expression::Identifier(ident) => &ident.value,
            other => return Err(RuntimeError {
                error: RuntimeErrorType::InvalidAssignmentTarget,
                location: other.location()
            })
        };

        let value = self.eval_expression(value, env)?;

        env.borrow_mut()
            .assign(name, value)
            .map_err(|error| RuntimeError {
                error: error.into(),
                location
            })
    }

    // Arguments first, left to right, then the caller.
    fn eval_call(
        &self,
        caller: &Expression,
        arguments: &[Expression],
        location: SrcSpan,
        env: &Rc<RefCell<Environment>>
    ) -> Result<Value, RuntimeError> {
        let mut args = Vec::with_capacity(arguments.len());

        for argument in arguments {
            args.push(self.eval_expression(argument, env)?);
        }

        let callee = self.eval_expression(caller, env)?;

        match callee {
            Value::NativeFunction { function } => {
                let context = NativeContext {
                    env: env.clone(),
                    output: self.output.clone()
                };

                Ok((function.func)(&args, &context))
            },
            Value::Function { parameters, body, env: declaration_env, .. } => {
                if args.len() < parameters.len() {
                    return Err(RuntimeError {
                        error: RuntimeErrorType::ArityMismatch {
                            expected: parameters.len(),
                            got: args.len()
                        },
                        location
                    });
                }

                let scope = Rc::new(RefCell::new(
                    Environment::with_parent(declaration_env)
                ));

                // Positional binding; surplus arguments were already
                // evaluated and are dropped here.
                for (parameter, value) in parameters.into_iter().zip(args) {
                    scope.borrow_mut()
                        .declare(parameter, value, false)
                        .map_err(|error| RuntimeError {
                            error: error.into(),
                            location
                        })?;
                }

                let mut result = Value::Null;

                for statement in body.iter() {
                    result = self.eval_statement(statement, &scope)?;
                }

                Ok(result)
            },
            other => Err(RuntimeError {
                error: RuntimeErrorType::NotCallable { found: other.kind() },
                location: caller.location()
            })
        }
    }
}

// The whole arithmetic policy in one place: binary operators only act on
// two numbers, every other combination makes the expression null.
fn numeric_operands(left: &Value, right: &Value) -> Option<(f64, f64)> {
    match (left, right) {
        (
            Value::Number { value: lhs },
            Value::Number { value: rhs }
        ) => Some((*lhs, *rhs)),
        _ => None
    }
}

pub fn interpret(
    path: PathBuf,
    output: Rc<dyn OutputEmitterIO>
) -> Result<Value, Error> {
    let src = match std::fs::read_to_string(path.clone()) {
        Ok(src) => src,
        Err(err) => {
            return Err(Error::StdIo { err: err.kind() })
        }
    };

    let program = match parse_program(&src) {
        Ok(program) => program,
        Err(error) => {
            return Err(Error::Parse { path, src, error })
        }
    };

    let env = global_environment();
    let evaluator = Evaluator::new(output);

    match evaluator.eval_program(&program, &env) {
        Ok(value) => Ok(value),
        Err(error) => Err(Error::Runtime { path, src, error })
    }
}

pub fn interpret_from_stream(
    path: PathBuf,
    output: Rc<dyn OutputEmitterIO>
) -> Result<Value, Error> {
    let file = match std::fs::File::open(path.clone()) {
        Ok(file) => file,
        Err(err) => {
            return Err(Error::StdIo { err: err.kind() })
        }
    };

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    // The source is accumulated while it streams so diagnostics can
    // point into it afterwards.
    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);
    let stream = reader.chars()
        .map(|c| {
            let c = c.expect("read source character");
            src.push(c);
            c
        });

    let program = match parse_program_from_stream(stream) {
        Ok(program) => program,
        Err(error) => {
            return Err(Error::Parse { path, src, error })
        }
    };

    let env = global_environment();
    let evaluator = Evaluator::new(output);

    match evaluator.eval_program(&program, &env) {
        Ok(value) => Ok(value),
        Err(error) => Err(Error::Runtime { path, src, error })
    }
}
