use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum Value {
    /// Statement result sentinel; not constructible from source.
    Unit,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<IndexMap<Key, Value>>>),
}

/// Dict keys are restricted to the hashable scalar cases.
///
/// A float key with an integral value normalizes to an `Int` key so that
/// numeric cross-equality carries over to lookups: `d[1.0]` addresses the
/// same entry as `d[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Float(OrderedFloat<f64>),
    Bool(bool),
    Str(Rc<str>),
}

impl Key {
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(Key::Int(*f as i64))
                } else {
                    Some(Key::Float(OrderedFloat(*f)))
                }
            }
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Str(s) => Some(Key::Str(s.clone())),
            Value::Unit | Value::List(_) | Value::Dict(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(n) => Value::Int(*n),
            Key::Float(f) => Value::Float(f.into_inner()),
            Key::Bool(b) => Value::Bool(*b),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl Value {
    pub fn new_list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn new_dict(entries: IndexMap<Key, Value>) -> Value {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    pub fn str(s: impl AsRef<str>) -> Value {
        Value::Str(Rc::from(s.as_ref()))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Unit => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Dict(entries) => !entries.borrow().is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "none",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

/// Structural equality: same case and equal contents, except that Int and
/// Float cross-compare by numeric value. Mismatched cases are unequal
/// rather than an error.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Unit, Value::Unit) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Dict(a), Value::Dict(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let a = a.borrow();
            let b = b.borrow();
            a.len() == b.len()
                && a.iter().all(|(k, va)| match b.get(k) {
                    Some(vb) => values_equal(va, vb),
                    None => false,
                })
        }
        _ => false,
    }
}

/// Canonical printable form, as produced by `str()` and `print`.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Unit => "none".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Value::Str(s) => s.to_string(),
        Value::List(items) => {
            let rendered: Vec<String> = items.borrow().iter().map(value_to_display).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Dict(entries) => {
            let rendered: Vec<String> = entries
                .borrow()
                .iter()
                .map(|(k, v)| format!("{}: {}", value_to_display(&k.to_value()), value_to_display(v)))
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
    }
}

/// Like `value_to_string`, but strings are quoted. Used for elements inside
/// aggregates and for the REPL `vars` listing.
pub fn value_to_display(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{}\"", s),
        _ => value_to_string(value),
    }
}
