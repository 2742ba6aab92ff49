use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::parser::ParseError;
use crate::lexer::LexError;

/// Umbrella error for the pipeline entry points: a program fails in
/// exactly one of the three stages.
#[derive(Debug)]
pub enum MiniPyError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl MiniPyError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            MiniPyError::Lex(e) => e.to_diagnostic(),
            MiniPyError::Parse(e) => e.to_diagnostic(),
            MiniPyError::Runtime(e) => e.to_diagnostic(),
        }
    }
}

impl fmt::Display for MiniPyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiniPyError::Lex(e) => write!(f, "{}", e),
            MiniPyError::Parse(e) => write!(f, "{}", e),
            MiniPyError::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl From<LexError> for MiniPyError {
    fn from(e: LexError) -> Self {
        MiniPyError::Lex(e)
    }
}

impl From<ParseError> for MiniPyError {
    fn from(e: ParseError) -> Self {
        MiniPyError::Parse(e)
    }
}

impl From<RuntimeError> for MiniPyError {
    fn from(e: RuntimeError) -> Self {
        MiniPyError::Runtime(e)
    }
}

impl std::error::Error for MiniPyError {}
