//! Shared harness: an interpreter wired to a scripted host so tests can
//! assert on exact stdout and feed `input` lines.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use minipy::interpreter::{parse_and_run, Host, Interpreter};
use minipy::MiniPyError;

#[allow(dead_code)]
pub struct ScriptedHost {
    out: Rc<RefCell<String>>,
    input: VecDeque<String>,
}

impl Host for ScriptedHost {
    fn write(&mut self, text: &str) {
        self.out.borrow_mut().push_str(text);
    }

    fn write_line(&mut self, text: &str) {
        self.out.borrow_mut().push_str(text);
        self.out.borrow_mut().push('\n');
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

#[allow(dead_code)]
pub fn run_with_input(source: &str, input: &[&str]) -> Result<String, MiniPyError> {
    let out = Rc::new(RefCell::new(String::new()));
    let host = ScriptedHost {
        out: out.clone(),
        input: input.iter().map(|s| s.to_string()).collect(),
    };
    let mut interpreter = Interpreter::with_host(Box::new(host));
    parse_and_run(source, &mut interpreter)?;
    let captured = out.borrow().clone();
    Ok(captured)
}

#[allow(dead_code)]
pub fn run(source: &str) -> Result<String, MiniPyError> {
    run_with_input(source, &[])
}

/// Captured stdout of a program expected to succeed.
#[allow(dead_code)]
pub fn run_ok(source: &str) -> String {
    match run(source) {
        Ok(output) => output,
        Err(e) => panic!("Program failed: {}", e),
    }
}

/// Display text of the error a program is expected to raise.
#[allow(dead_code)]
pub fn run_err(source: &str) -> String {
    match run(source) {
        Ok(output) => panic!("Program unexpectedly succeeded with output {:?}", output),
        Err(e) => e.to_string(),
    }
}
