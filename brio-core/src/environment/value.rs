use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::parser::prelude::Statement;
use crate::utils::prelude::OutputEmitterIO;

use super::environment::Environment;

pub const NULL: Value = Value::Null;
pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };

// Everything a native function gets to see of the interpreter: the scope
// the call happened in and the sink `print` writes through.
pub struct NativeContext {
    pub env: Rc<RefCell<Environment>>,
    pub output: Rc<dyn OutputEmitterIO>,
}

pub type NativeFn = fn(&[Value], &NativeContext) -> Value;

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.func == other.func
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean {
        value: bool
    },
    Number {
        value: f64
    },
    Object {
        properties: BTreeMap<String, Value>
    },
    NativeFunction {
        function: NativeFunction
    },
    Function {
        name: String,
        parameters: Vec<String>,
        body: Rc<Vec<Statement>>,
        // The scope the function was declared in, not the one it is
        // called from.
        env: Rc<RefCell<Environment>>,
    },
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean { .. } => ValueKind::Boolean,
            Self::Number { .. } => ValueKind::Number,
            Self::Object { .. } => ValueKind::Object,
            Self::NativeFunction { .. } => ValueKind::NativeFunction,
            Self::Function { .. } => ValueKind::Function
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Number { value } => write!(f, "{value}"),
            Value::Object { properties } => {
                let properties = properties.iter()
                    .map(|(key, value)| format!("{key}: {value}"))
                    .collect::<Vec<String>>();

                write!(f, "{{ {} }}", properties.join(", "))
            },
            Value::NativeFunction { function } => {
                write!(f, "<native fn {}>", function.name)
            },
            Value::Function { name, parameters, .. } => {
                write!(f, "<fn {}({})>", name, parameters.join(", "))
            }
        }
    }
}

// A function value sits inside the very scope it captured, so comparing
// and printing must not walk through `env`. Scopes compare by identity,
// everything else by structure.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (
                Value::Boolean { value: left },
                Value::Boolean { value: right }
            ) => left == right,
            (
                Value::Number { value: left },
                Value::Number { value: right }
            ) => left == right,
            (
                Value::Object { properties: left },
                Value::Object { properties: right }
            ) => left == right,
            (
                Value::NativeFunction { function: left },
                Value::NativeFunction { function: right }
            ) => left == right,
            (
                Value::Function { name: left, parameters: left_params, env: left_env, .. },
                Value::Function { name: right, parameters: right_params, env: right_env, .. }
            ) => {
                left == right
                    && left_params == right_params
                    && Rc::ptr_eq(left_env, right_env)
            },
            _ => false
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Boolean { value } => {
                f.debug_struct("Boolean").field("value", value).finish()
            },
            Value::Number { value } => {
                f.debug_struct("Number").field("value", value).finish()
            },
            Value::Object { properties } => {
                f.debug_struct("Object").field("properties", properties).finish()
            },
            Value::NativeFunction { function } => {
                f.debug_struct("NativeFunction").field("name", &function.name).finish()
            },
            Value::Function { name, parameters, .. } => {
                f.debug_struct("Function")
                    .field("name", name)
                    .field("parameters", parameters)
                    .finish_non_exhaustive()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    Object,
    NativeFunction,
    Function
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Object => "object",
            Self::NativeFunction => "native function",
            Self::Function => "function"
        };

        write!(f, "{kind}")
    }
}
