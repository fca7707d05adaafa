//! One interpreter run: scan → parse → resolve → interpret, with the
//! error bookkeeping the binary maps to exit codes.

use std::io::{self, Write};

use log::{debug, info};

use crate::ast::ExprId;
use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_all;

/// Exit status for a script with static (scan/parse/resolve) errors.
pub const EXIT_STATIC_ERROR: i32 = 65;

/// Exit status for a script that raised an uncaught runtime error.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// A long‑lived interpreter plus its diagnostics stream and error flags.
///
/// Globals persist across [`Session::run`] calls, so a REPL can define a
/// function on one line and call it on the next.
pub struct Session {
    interpreter: Interpreter,
    errors: Box<dyn Write>,
    next_id: ExprId,
    had_error: bool,
    had_runtime_error: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Program output to stdout, diagnostics to stderr.
    pub fn new() -> Self {
        Self::with_streams(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_streams(output: Box<dyn Write>, errors: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
            errors,
            next_id: 0,
            had_error: false,
            had_runtime_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears the static‑error flag; the REPL does this after every line.
    pub fn reset_error(&mut self) {
        self.had_error = false;
    }

    /// Process exit status implied by the flags, if any.
    pub fn exit_code(&self) -> Option<i32> {
        if self.had_error {
            Some(EXIT_STATIC_ERROR)
        } else if self.had_runtime_error {
            Some(EXIT_RUNTIME_ERROR)
        } else {
            None
        }
    }

    /// Runs `source` to completion.  Lox errors are reported to the error
    /// stream and recorded in the flags; only I/O failures are returned.
    pub fn run(&mut self, source: &str) -> Result<()> {
        info!("Running {} bytes of source", source.len());

        let (tokens, lex_errors) = scan_all(source.as_bytes());
        self.report_all(lex_errors)?;

        let mut parser = Parser::new(&tokens).with_first_id(self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.next_id();

        let statements = match parsed {
            Ok(statements) => statements,
            Err(errors) => return self.report_all(errors),
        };

        if self.had_error {
            debug!("Skipping execution after scan errors");
            return Ok(());
        }

        let resolved = Resolver::new(&mut self.interpreter).resolve(&statements);
        if let Err(errors) = resolved {
            return self.report_all(errors);
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Ok(()),
            Err(e @ LoxError::Runtime { .. }) => {
                debug!("Runtime error: {:?}", e);
                self.had_runtime_error = true;
                writeln!(self.errors, "{}", e)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn report_all(&mut self, errors: Vec<LoxError>) -> Result<()> {
        for error in errors {
            self.had_error = true;
            writeln!(self.errors, "{}", error)?;
        }
        Ok(())
    }
}
