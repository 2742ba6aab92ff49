//! List mutation built-ins. Both mutate the list in place through its
//! shared handle, so every alias observes the change.

use std::cell::RefCell;
use std::rc::Rc;

use super::super::error::RuntimeError;
use super::{require_args, with_list};
use crate::value::Value;

pub fn builtin_append(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 2, "append");
    with_list!(args, "append", |items: &Rc<RefCell<Vec<Value>>>| {
        items.borrow_mut().push(args[1].clone());
        Ok(Value::Unit)
    })
}

pub fn builtin_remove(args: &[Value]) -> Result<Value, RuntimeError> {
    require_args!(args, 2, "remove");
    let index = match &args[1] {
        Value::Int(n) => *n,
        other => {
            return Err(RuntimeError::type_error(format!(
                "remove() index must be an integer, got {}",
                other.type_name()
            )))
        }
    };
    with_list!(args, "remove", |items: &Rc<RefCell<Vec<Value>>>| {
        let mut items = items.borrow_mut();
        let len = items.len();
        let normalized = if index < 0 { index + len as i64 } else { index };
        if normalized < 0 || normalized >= len as i64 {
            return Err(RuntimeError::index_out_of_range(index, len));
        }
        Ok(items.remove(normalized as usize))
    })
}
