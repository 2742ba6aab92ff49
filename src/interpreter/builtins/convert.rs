//! Type coercion built-ins and `len`.

use super::super::error::RuntimeError;
use super::require_args;
use crate::value::{value_to_string, Value};

pub fn builtin_str(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "str");
    Ok(Value::str(value_to_string(&args[0])))
}

pub fn builtin_int(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "int");
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(f) => {
            let truncated = f.trunc();
            if !truncated.is_finite()
                || truncated < i64::MIN as f64
                || truncated > i64::MAX as f64
            {
                return Err(RuntimeError::invalid_operation(format!(
                    "Invalid conversion: int({}) out of range",
                    f
                )));
            }
            Ok(Value::Int(truncated as i64))
        }
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::Str(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            RuntimeError::invalid_operation(format!("Invalid conversion: int(\"{}\")", s))
        }),
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        Value::Dict(entries) => Ok(Value::Int(entries.borrow().len() as i64)),
        Value::Unit => Err(RuntimeError::type_error("int() cannot convert none")),
    }
}

pub fn builtin_float(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "float");
    match &args[0] {
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
            RuntimeError::invalid_operation(format!("Invalid conversion: float(\"{}\")", s))
        }),
        other => Err(RuntimeError::type_error(format!(
            "float() cannot convert {}",
            other.type_name()
        ))),
    }
}

pub fn builtin_bool(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "bool");
    Ok(Value::Bool(args[0].is_truthy()))
}

pub fn builtin_len(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "len");
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        Value::Dict(entries) => Ok(Value::Int(entries.borrow().len() as i64)),
        other => Err(RuntimeError::type_error(format!(
            "len() requires a string, list, or dict, got {}",
            other.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_of_scalars() {
        assert_eq!(builtin_str(&[Value::Int(5)]).unwrap(), Value::str("5"));
        assert_eq!(builtin_str(&[Value::Float(2.5)]).unwrap(), Value::str("2.5"));
        assert_eq!(
            builtin_str(&[Value::Bool(false)]).unwrap(),
            Value::str("false")
        );
        assert_eq!(builtin_str(&[Value::str("s")]).unwrap(), Value::str("s"));
    }

    #[test]
    fn test_int_truncates_toward_zero() {
        assert_eq!(builtin_int(&[Value::Float(2.9)]).unwrap(), Value::Int(2));
        assert_eq!(builtin_int(&[Value::Float(-2.9)]).unwrap(), Value::Int(-2));
    }

    #[test]
    fn test_int_of_string() {
        assert_eq!(builtin_int(&[Value::str("42")]).unwrap(), Value::Int(42));
        assert_eq!(builtin_int(&[Value::str(" -7 ")]).unwrap(), Value::Int(-7));
        assert!(builtin_int(&[Value::str("abc")]).is_err());
    }

    #[test]
    fn test_int_of_aggregates_is_size() {
        let list = Value::new_list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(builtin_int(&[list]).unwrap(), Value::Int(2));
    }

    #[test]
    fn test_float_of_string() {
        assert_eq!(
            builtin_float(&[Value::str("2.5")]).unwrap(),
            Value::Float(2.5)
        );
        assert!(builtin_float(&[Value::str("nope")]).is_err());
    }

    #[test]
    fn test_len() {
        assert_eq!(builtin_len(&[Value::str("héllo")]).unwrap(), Value::Int(5));
        assert!(builtin_len(&[Value::Int(5)]).is_err());
    }

    #[test]
    fn test_arity_is_exact() {
        assert!(builtin_str(&[]).is_err());
        assert!(builtin_len(&[Value::Int(1), Value::Int(2)]).is_err());
    }
}
