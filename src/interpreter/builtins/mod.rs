//! Built-in functions.
//!
//! One module per category:
//! - **convert**: type coercions (`str`, `int`, `float`, `bool`) and `len`
//! - **list**: list mutation (`append`, `remove`)
//! - **dict**: dict queries and mutation (`keys`, `values`, `has_key`, `del_key`)
//! - **io**: `input`
//!
//! Dispatch by name lives in the evaluator.

mod convert;
mod dict;
mod io;
mod list;

pub use convert::*;
pub use dict::*;
pub use io::*;
pub use list::*;

#[allow(unused_imports)]
use super::error::RuntimeError;
#[allow(unused_imports)]
use crate::value::Value;

macro_rules! require_args {
    ($args:expr, $n:expr, $name:expr) => {
        if $args.len() != $n {
            return Err(RuntimeError::invalid_operation(format!(
                "{}() expects {} argument(s), got {}",
                $name,
                $n,
                $args.len()
            )));
        }
    };
}

macro_rules! with_list {
    ($args:expr, $name:expr, $body:expr) => {
        match &$args[0] {
            Value::List(items) => $body(items),
            other => Err(RuntimeError::type_error(format!(
                "{}() requires a list, got {}",
                $name,
                other.type_name()
            ))),
        }
    };
}

macro_rules! with_dict {
    ($args:expr, $name:expr, $body:expr) => {
        match &$args[0] {
            Value::Dict(entries) => $body(entries),
            other => Err(RuntimeError::type_error(format!(
                "{}() requires a dict, got {}",
                $name,
                other.type_name()
            ))),
        }
    };
}

pub(crate) use require_args;
pub(crate) use with_dict;
pub(crate) use with_list;
