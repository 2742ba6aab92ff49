use crate::diagnostic::{Diagnostic, Label, Span};

#[derive(Debug, Clone)]
pub enum RuntimeError {
    UndefinedVariable { name: String, span: Span },
    TypeError { message: String, span: Span },
    IndexOutOfRange { index: i64, length: usize, span: Span },
    KeyNotFound { key: String, span: Span },
    DivisionByZero { span: Span },
    InvalidOperation { message: String, span: Span },
}

impl RuntimeError {
    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into(), span: Span::dummy() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError { message: message.into(), span: Span::dummy() }
    }

    pub fn index_out_of_range(index: i64, length: usize) -> Self {
        Self::IndexOutOfRange { index, length, span: Span::dummy() }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into(), span: Span::dummy() }
    }

    pub fn division_by_zero() -> Self {
        Self::DivisionByZero { span: Span::dummy() }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation { message: message.into(), span: Span::dummy() }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UndefinedVariable { span, .. } => *span,
            Self::TypeError { span, .. } => *span,
            Self::IndexOutOfRange { span, .. } => *span,
            Self::KeyNotFound { span, .. } => *span,
            Self::DivisionByZero { span } => *span,
            Self::InvalidOperation { span, .. } => *span,
        }
    }

    /// Attach a span to an error created without one. Errors that already
    /// point somewhere keep their original location.
    pub fn at(mut self, at: Span) -> Self {
        let span = match &mut self {
            Self::UndefinedVariable { span, .. } => span,
            Self::TypeError { span, .. } => span,
            Self::IndexOutOfRange { span, .. } => span,
            Self::KeyNotFound { span, .. } => span,
            Self::DivisionByZero { span } => span,
            Self::InvalidOperation { span, .. } => span,
        };
        if span.is_dummy() {
            *span = at;
        }
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::UndefinedVariable { name, span } => {
                Diagnostic::error(self.to_string())
                    .with_code("E0301")
                    .with_label(Label::new(*span, "not defined"))
                    .with_help(format!("the variable `{}` has no binding here", name))
            }
            Self::TypeError { span, .. } => Diagnostic::error(self.to_string())
                .with_code("E0302")
                .with_label(Label::new(*span, "wrong operand type")),
            Self::IndexOutOfRange { index, length, span } => {
                Diagnostic::error(self.to_string())
                    .with_code("E0303")
                    .with_label(Label::new(
                        *span,
                        format!("index {} outside [0..{})", index, length),
                    ))
            }
            Self::KeyNotFound { span, .. } => Diagnostic::error(self.to_string())
                .with_code("E0304")
                .with_label(Label::new(*span, "no such key")),
            Self::DivisionByZero { span } => Diagnostic::error(self.to_string())
                .with_code("E0305")
                .with_label(Label::new(*span, "attempt to divide by zero")),
            Self::InvalidOperation { span, .. } => Diagnostic::error(self.to_string())
                .with_code("E0306")
                .with_label(Label::new(*span, "invalid here")),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name, .. } => write!(f, "Undefined variable: {}", name),
            Self::TypeError { message, .. } => write!(f, "Type error: {}", message),
            Self::IndexOutOfRange { index, length, .. } => {
                write!(f, "Index out of range: {} (length {})", index, length)
            }
            Self::KeyNotFound { key, .. } => write!(f, "Key not found: {}", key),
            Self::DivisionByZero { .. } => write!(f, "Division by zero"),
            Self::InvalidOperation { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for RuntimeError {}
