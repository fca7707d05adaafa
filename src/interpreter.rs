//! Tree‑walking evaluator.
//!
//! Statements execute for effect and report a [`Signal`] so `return` and
//! `break` unwind through ordinary return values: a function call is the only
//! place a `Return` is consumed and a loop the only place a `Break` is.
//! Runtime errors travel separately as `Err(LoxError::Runtime { .. })` and
//! abort the whole run.

use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info, warn};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::class::{LoxClass, LoxInstance, INITIALIZER};
use crate::environment::{undefined_variable, EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::function::LoxFunction;
use crate::natives;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Normal,
    Return(Value),
    Break,
}

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    /// Scope distances recorded by the resolver; absent ⇒ global.
    locals: HashMap<ExprId, usize>,
    output: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// An interpreter printing to `output`.  Native functions are defined in
    /// the fresh global scope.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let mut globals = Environment::new();
        natives::install(&mut globals);
        let globals = globals.into_ref();

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Records that the expression `id` refers to a binding `depth` scopes out.
    pub fn resolve(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Interprets a list of statements (a "program").  Stops at the first
    /// runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        let result = self.run_top_level(statements);
        self.output.flush()?;

        if result.is_ok() {
            info!("Interpretation completed successfully");
        }
        result
    }

    fn run_top_level(&mut self, statements: &[Stmt]) -> Result<()> {
        for stmt in statements {
            match self.execute(stmt)? {
                Signal::Normal => {}
                // The resolver rejects top-level `return` and stray `break`.
                signal => warn!("Control signal {:?} escaped to top level", signal),
            }
        }
        Ok(())
    }

    /// Evaluates a lone expression against the globals and flushes output.
    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value> {
        let value = self.evaluate(expr);
        self.output.flush()?;
        value
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────────────────

    pub fn execute(&mut self, stmt: &Stmt) -> Result<Signal> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value)?;
            }

            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}'", name.lexeme);
                self.environment.borrow_mut().define(&name.lexeme, value);
            }

            Stmt::Block(statements) => {
                let environment = Environment::with_enclosing(Rc::clone(&self.environment));
                return self.execute_block(statements, environment.into_ref());
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    return self.execute(then_branch);
                } else if let Some(else_branch) = else_branch {
                    return self.execute(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Signal::Normal => {}
                        Signal::Break => break,
                        signal @ Signal::Return(_) => return Ok(signal),
                    }
                }
            }

            Stmt::Break { .. } => return Ok(Signal::Break),

            Stmt::Function(declaration) => {
                debug!("Defining function '{}'", declaration.name.lexeme);
                let function =
                    LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment
                    .borrow_mut()
                    .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                return Ok(Signal::Return(value));
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods)?,
        }

        Ok(Signal::Normal)
    }

    /// Runs `statements` inside `environment`, restoring the previous
    /// environment on every exit path.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> Result<Signal> {
        let previous = std::mem::replace(&mut self.environment, environment);
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Signal> {
        for stmt in statements {
            match self.execute(stmt)? {
                Signal::Normal => {}
                signal => return Ok(signal),
            }
        }
        Ok(Signal::Normal)
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<()> {
        debug!("Defining class '{}'", name.lexeme);

        let superclass = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    // The parser only produces a variable here.
                    let line = match expr {
                        Expr::Variable { name: super_name, .. } => super_name.line,
                        _ => name.line,
                    };
                    return Err(LoxError::runtime(line, "Superclass must be a class."));
                }
            },
            None => None,
        };

        // Defined first so method bodies can refer to the class by name.
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        let method_env = match &superclass {
            Some(superclass) => {
                let mut environment = Environment::with_enclosing(Rc::clone(&self.environment));
                environment.define("super", Value::Class(Rc::clone(superclass)));
                environment.into_ref()
            }
            None => Rc::clone(&self.environment),
        };

        let methods = methods
            .iter()
            .map(|declaration| {
                let is_initializer = declaration.name.lexeme == INITIALIZER;
                let function =
                    LoxFunction::new(Rc::clone(declaration), Rc::clone(&method_env), is_initializer);
                (declaration.name.lexeme.clone(), function)
            })
            .collect();

        let class = LoxClass::new(name.lexeme.clone(), superclass, methods);
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Class(Rc::new(class)));

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────────────────

    /// Evaluates an expression and returns a Value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::from(s.as_str()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;

                let short_circuit = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        let assigned = self.environment.borrow_mut().assign_at(
                            distance,
                            &name.lexeme,
                            value.clone(),
                        );
                        if !assigned {
                            return Err(undefined_variable(name));
                        }
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut values = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                let Some(callable) = callee.as_callable() else {
                    return Err(LoxError::runtime(
                        paren.line,
                        "Can only call functions and classes.",
                    ));
                };

                if values.len() != callable.arity() {
                    return Err(LoxError::runtime(
                        paren.line,
                        format!(
                            "Expected {} arguments but got {}.",
                            callable.arity(),
                            values.len()
                        ),
                    ));
                }

                callable.call(self, values, paren.line)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => LoxInstance::get(&instance, name),
                _ => Err(LoxError::runtime(
                    name.line,
                    "Only instances have properties.",
                )),
            },

            Expr::Set {
                object,
                name,
                value,
            } => {
                let Value::Instance(instance) = self.evaluate(object)? else {
                    return Err(LoxError::runtime(name.line, "Only instances have fields."));
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }

            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),

            Expr::Super {
                id,
                keyword,
                method,
            } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => self
                .environment
                .borrow()
                .get_at(distance, &name.lexeme)
                .ok_or_else(|| undefined_variable(name)),
            None => self.globals.borrow().get(name),
        }
    }

    /// `super` lives one scope outside the `this` scope of the bound method.
    fn evaluate_super(&self, id: ExprId, keyword: &Token, method: &Token) -> Result<Value> {
        let distance = self
            .locals
            .get(&id)
            .copied()
            .ok_or_else(|| undefined_variable(keyword))?;

        let environment = self.environment.borrow();

        let superclass = match environment.get_at(distance, "super") {
            Some(Value::Class(class)) => class,
            _ => return Err(undefined_variable(keyword)),
        };

        let instance = match distance.checked_sub(1).and_then(|d| environment.get_at(d, "this")) {
            Some(Value::Instance(instance)) => instance,
            _ => {
                return Err(LoxError::runtime(
                    keyword.line,
                    "Undefined variable 'this'.",
                ))
            }
        };

        let function = superclass.find_method(&method.lexeme).ok_or_else(|| {
            LoxError::runtime(
                method.line,
                format!("Undefined property '{}'.", method.lexeme),
            )
        })?;

        Ok(Value::Function(Rc::new(function.bind(instance))))
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value> {
        let right = self.evaluate(right)?;

        match operator.token_type {
            TokenType::MINUS => match right {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(LoxError::runtime(
                    operator.line,
                    "Operand must be a number.",
                )),
            },
            TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
            _ => Err(LoxError::runtime(
                operator.line,
                format!("Invalid unary operator '{}'.", operator.lexeme),
            )),
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Value> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        let numbers = || -> Result<(f64, f64)> {
            match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
                _ => Err(LoxError::runtime(operator.line, "Operands must be numbers.")),
            }
        };

        match operator.token_type {
            TokenType::PLUS => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                // Either side being a string turns `+` into concatenation.
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::from(format!("{}{}", left, right)))
                }
                _ => Err(LoxError::runtime(
                    operator.line,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => numbers().map(|(a, b)| Value::Number(a - b)),

            TokenType::STAR => numbers().map(|(a, b)| Value::Number(a * b)),

            TokenType::SLASH => {
                let (a, b) = numbers()?;
                if b == 0.0 {
                    return Err(LoxError::runtime(operator.line, "Divisor cannot be zero."));
                }
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => numbers().map(|(a, b)| Value::Bool(a > b)),

            TokenType::GREATER_EQUAL => numbers().map(|(a, b)| Value::Bool(a >= b)),

            TokenType::LESS => numbers().map(|(a, b)| Value::Bool(a < b)),

            TokenType::LESS_EQUAL => numbers().map(|(a, b)| Value::Bool(a <= b)),

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => Err(LoxError::runtime(
                operator.line,
                format!("Invalid binary operator '{}'.", operator.lexeme),
            )),
        }
    }
}
