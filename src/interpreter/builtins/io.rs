//! Input built-in. The prompt is written without a newline, and the line
//! read back is handed to the program without its terminator.

use super::super::error::RuntimeError;
use super::super::host::Host;
use crate::value::{value_to_string, Value};

pub fn builtin_input(args: &[Value], host: &mut dyn Host) -> Result<Value, RuntimeError> {
    if args.len() > 1 {
        return Err(RuntimeError::invalid_operation(format!(
            "input() expects at most 1 argument, got {}",
            args.len()
        )));
    }
    if let Some(prompt) = args.first() {
        host.write(&value_to_string(prompt));
    }
    match host.read_line() {
        Ok(Some(line)) => Ok(Value::str(line)),
        Ok(None) => Ok(Value::str("")),
        Err(e) => Err(RuntimeError::invalid_operation(format!(
            "Failed to read input: {}",
            e
        ))),
    }
}
