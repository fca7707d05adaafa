//! Callable runtime objects: user functions, host natives, and the
//! [`Callable`] view the interpreter dispatches calls through.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::ast::FunctionDecl;
use crate::class::{LoxClass, LoxInstance};
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::interpreter::{Interpreter, Signal};
use crate::value::Value;

/// Host‑provided function bound as a global.  Errors are plain messages; the
/// interpreter attaches the call site's line.
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub func: fn(&[Value]) -> std::result::Result<Value, String>,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// A user function or method: its declaration plus the environment that was
/// active where it was defined.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef, is_initializer: bool) -> Self {
        Self {
            declaration,
            closure,
            is_initializer,
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// A copy of this method whose closure has `this` bound to `instance`.
    pub fn bind(&self, instance: Rc<RefCell<LoxInstance>>) -> LoxFunction {
        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        environment.define("this", Value::Instance(instance));

        LoxFunction::new(
            Rc::clone(&self.declaration),
            environment.into_ref(),
            self.is_initializer,
        )
    }

    pub fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        debug!("Calling function '{}'", self.name());

        let mut environment = Environment::with_enclosing(Rc::clone(&self.closure));
        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            environment.define(&param.lexeme, argument);
        }

        let signal = interpreter.execute_block(&self.declaration.body, environment.into_ref())?;

        // Constructors always hand back the instance, even after a bare `return;`.
        if self.is_initializer {
            return self.closure.borrow().get_at(0, "this").ok_or_else(|| {
                LoxError::runtime(self.declaration.name.line, "Initializer has no bound 'this'.")
            });
        }

        match signal {
            Signal::Return(value) => Ok(value),
            Signal::Normal | Signal::Break => Ok(Value::Nil),
        }
    }
}

impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}

/// Borrowed view of any value that can appear in call position.
#[derive(Clone, Copy)]
pub enum Callable<'v> {
    Native(&'v NativeFunction),
    Function(&'v LoxFunction),
    Class(&'v Rc<LoxClass>),
}

impl Callable<'_> {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Native(native) => native.arity,
            Callable::Function(function) => function.arity(),
            Callable::Class(class) => class.arity(),
        }
    }

    /// Invokes the callable.  Arity has already been checked by the caller.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        line: usize,
    ) -> Result<Value> {
        match self {
            Callable::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                (native.func)(&arguments).map_err(|message| LoxError::runtime(line, message))
            }
            Callable::Function(function) => function.call(interpreter, arguments),
            Callable::Class(class) => LoxClass::instantiate(class, interpreter, arguments),
        }
    }
}
