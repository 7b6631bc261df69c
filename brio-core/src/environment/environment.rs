use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::error::EnvironmentError;
use super::value::Value;

// One lexical scope. Scopes chain through `parent`; the chain is shared,
// never owned, because every function value keeps its declaration scope
// alive for as long as the function itself lives.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    parent: Option<Rc<RefCell<Environment>>>,
    store: HashMap<String, Value>,
    constants: HashSet<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            parent: None,
            store: HashMap::new(),
            constants: HashSet::new()
        }
    }

    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Self {
            parent: Some(parent),
            store: HashMap::new(),
            constants: HashSet::new()
        }
    }

    // Declaration only ever touches the local frame: shadowing an outer
    // name is fine, redeclaring within the same frame is not.
    pub fn declare(
        &mut self,
        name: String,
        value: Value,
        constant: bool
    ) -> Result<Value, EnvironmentError> {
        if self.store.contains_key(&name) {
            return Err(EnvironmentError::DuplicateDeclaration { name });
        }

        self.store.insert(name.clone(), value.clone());

        if constant {
            self.constants.insert(name);
        }

        Ok(value)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, EnvironmentError> {
        if self.store.contains_key(name) {
            if self.constants.contains(name) {
                return Err(EnvironmentError::ReassignToConstant {
                    name: name.to_string()
                });
            }

            self.store.insert(name.to_string(), value.clone());

            return Ok(value);
        }

        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(EnvironmentError::UnresolvedName {
                name: name.to_string()
            })
        }
    }

    pub fn lookup(&self, name: &str) -> Result<Value, EnvironmentError> {
        if let Some(value) = self.store.get(name) {
            return Ok(value.clone());
        }

        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => Err(EnvironmentError::UnresolvedName {
                name: name.to_string()
            })
        }
    }
}
