use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::environment::Environment;
use super::value::{NativeContext, NativeFunction, Value, FALSE, NULL, TRUE};

// The root scope every program runs against. All bindings here are
// constant; user code can shadow them in nested scopes but never
// reassign or redeclare them at the top level.
pub fn global_environment() -> Rc<RefCell<Environment>> {
    let env = Rc::new(RefCell::new(Environment::new()));

    {
        let mut env = env.borrow_mut();

        env.declare("true".to_string(), TRUE, true)
            .expect("declare builtin `true`");
        env.declare("false".to_string(), FALSE, true)
            .expect("declare builtin `false`");
        env.declare("null".to_string(), NULL, true)
            .expect("declare builtin `null`");

        env.declare(
            "print".to_string(),
            Value::NativeFunction {
                function: NativeFunction { name: "print", func: native_print }
            },
            true
        ).expect("declare builtin `print`");

        env.declare(
            "time".to_string(),
            Value::NativeFunction {
                function: NativeFunction { name: "time", func: native_time }
            },
            true
        ).expect("declare builtin `time`");
    }

    env
}

// print(args...) writes its arguments space-separated as one line and
// evaluates to null.
fn native_print(args: &[Value], context: &NativeContext) -> Value {
    let line = args.iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    context.output.emit(&line);

    Value::Null
}

// time() ignores its arguments and returns the Unix time in milliseconds.
fn native_time(_args: &[Value], _context: &NativeContext) -> Value {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    Value::Number { value: now.as_millis() as f64 }
}
