//! Dict built-ins. `keys` and `values` return fresh lists in insertion
//! order; `del_key` removes the entry and hands back its value.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use super::super::error::RuntimeError;
use super::{require_args, with_dict};
use crate::value::{value_to_string, Key, Value};

fn key_from(value: &Value, what: &str) -> Result<Key, RuntimeError> {
    Key::from_value(value).ok_or_else(|| {
        RuntimeError::type_error(format!(
            "{} key must be a string, int, float, or bool, got {}",
            what,
            value.type_name()
        ))
    })
}

pub fn builtin_keys(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "keys");
    with_dict!(args, "keys", |entries: &Rc<RefCell<IndexMap<Key, Value>>>| {
        let keys = entries.borrow().keys().map(Key::to_value).collect();
        Ok(Value::new_list(keys))
    })
}

pub fn builtin_values(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 1, "values");
    with_dict!(args, "values", |entries: &Rc<RefCell<IndexMap<Key, Value>>>| {
        let values = entries.borrow().values().cloned().collect();
        Ok(Value::new_list(values))
    })
}

pub fn builtin_has_key(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 2, "has_key");
    let key = key_from(&args[1], "has_key()")?;
    with_dict!(args, "has_key", |entries: &Rc<RefCell<IndexMap<Key, Value>>>| {
        Ok(Value::Bool(entries.borrow().contains_key(&key)))
    })
}

pub fn builtin_del_key(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 2, "del_key");
    let key = key_from(&args[1], "del_key()")?;
    with_dict!(args, "del_key", |entries: &Rc<RefCell<IndexMap<Key, Value>>>| {
        entries
            .borrow_mut()
            .shift_remove(&key)
            .ok_or_else(|| RuntimeError::key_not_found(value_to_string(&args[1])))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dict() -> Value {
        let mut entries = IndexMap::new();
        entries.insert(Key::Str(Rc::from("x")), Value::Int(1));
        entries.insert(Key::Str(Rc::from("a")), Value::Int(2));
        Value::new_dict(entries)
    }

    #[test]
    fn test_keys_in_insertion_order() {
        let keys = builtin_keys(&[sample_dict()]).unwrap();
        assert_eq!(
            keys,
            Value::new_list(vec![Value::str("x"), Value::str("a")])
        );
    }

    #[test]
    fn test_values_in_insertion_order() {
        let values = builtin_values(&[sample_dict()]).unwrap();
        assert_eq!(
            values,
            Value::new_list(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_has_key() {
        let dict = sample_dict();
        assert_eq!(
            builtin_has_key(&[dict.clone(), Value::str("x")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            builtin_has_key(&[dict, Value::str("missing")]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_del_key_returns_removed_value() {
        let dict = sample_dict();
        assert_eq!(
            builtin_del_key(&[dict.clone(), Value::str("x")]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            builtin_has_key(&[dict, Value::str("x")]).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_del_key_missing() {
        let err = builtin_del_key(&[sample_dict(), Value::str("nope")]).unwrap_err();
        assert_eq!(err.to_string(), "Key not found: nope");
    }

    #[test]
    fn test_list_key_is_rejected() {
        let err = builtin_has_key(&[sample_dict(), Value::new_list(vec![])]).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_keys_requires_dict() {
        assert!(builtin_keys(&[Value::Int(1)]).is_err());
    }
}
