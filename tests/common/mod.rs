#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::session::Session;

/// A `Write` sink that stays readable after being boxed into a session.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Everything observable about one script run.
pub struct Outcome {
    pub stdout: String,
    pub stderr: String,
    pub had_error: bool,
    pub had_runtime_error: bool,
    pub exit_code: Option<i32>,
}

/// Runs `sources` one after another in a fresh session, like REPL lines.
pub fn run_lines(sources: &[&str]) -> Outcome {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let mut session = Session::with_streams(Box::new(out.clone()), Box::new(err.clone()));

    for source in sources {
        session.run(source).expect("no I/O errors on in-memory streams");
    }

    Outcome {
        stdout: out.contents(),
        stderr: err.contents(),
        had_error: session.had_error(),
        had_runtime_error: session.had_runtime_error(),
        exit_code: session.exit_code(),
    }
}

pub fn run(source: &str) -> Outcome {
    run_lines(&[source])
}

/// Runs `source` and asserts it printed exactly `expected` with no errors.
pub fn assert_prints(source: &str, expected: &str) {
    let outcome = run(source);
    assert_eq!(outcome.stderr, "", "unexpected diagnostics for:\n{}", source);
    assert_eq!(outcome.stdout, expected, "running:\n{}", source);
}
