use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

/// Shared handle to a scope frame.  Parents are shared by sibling blocks and
/// by every closure that captured them, so frames are reference counted.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope: a flat name → value map chained to its enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wraps the frame in a fresh shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Inserts or overwrites a binding in this frame.  Redeclaration rules are
    /// enforced by the resolver, not here.
    pub fn define(&mut self, name: &str, value: Value) {
        trace!("define '{}' = {}", name, value);
        self.values.insert(name.to_string(), value);
    }

    /// Looks `name` up here, then in each enclosing frame.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined_variable(name))
        }
    }

    /// Overwrites the innermost existing binding of `name`.  Never creates one.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined_variable(name))
        }
    }

    /// Reads `name` from the frame exactly `distance` links up.  `None` means
    /// the resolver and interpreter disagree about the scope layout.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        if distance == 0 {
            self.values.get(name).cloned()
        } else {
            self.enclosing
                .as_ref()?
                .borrow()
                .get_at(distance - 1, name)
        }
    }

    /// Writes `name` in the frame exactly `distance` links up.  Returns
    /// `false` when that frame has no such binding.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value) -> bool {
        if distance == 0 {
            match self.values.get_mut(name) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        } else {
            match &self.enclosing {
                Some(enclosing) => enclosing.borrow_mut().assign_at(distance - 1, name, value),
                None => false,
            }
        }
    }
}

pub(crate) fn undefined_variable(name: &Token) -> LoxError {
    LoxError::runtime(name.line, format!("Undefined variable '{}'.", name.lexeme))
}
