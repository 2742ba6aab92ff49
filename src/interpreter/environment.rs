use indexmap::IndexMap;

use crate::value::Value;

/// The single global binding table. MiniPyLang has no nested scopes:
/// `if` and `while` bodies read and write the same environment.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    pub fn set(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn delete(&mut self, name: &str) -> Option<Value> {
        self.bindings.shift_remove(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bindings in insertion order, for the REPL `vars` command.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn reset(&mut self) {
        self.bindings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut env = Environment::new();
        env.set("x".to_string(), Value::Int(42));
        assert_eq!(env.get("x"), Some(Value::Int(42)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::new();
        env.set("x".to_string(), Value::Int(1));
        env.set("x".to_string(), Value::str("two"));
        assert_eq!(env.get("x"), Some(Value::str("two")));
    }

    #[test]
    fn test_delete() {
        let mut env = Environment::new();
        env.set("x".to_string(), Value::Int(1));
        assert_eq!(env.delete("x"), Some(Value::Int(1)));
        assert_eq!(env.delete("x"), None);
        assert!(!env.is_defined("x"));
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let mut env = Environment::new();
        env.set("b".to_string(), Value::Int(2));
        env.set("a".to_string(), Value::Int(1));
        let names: Vec<String> = env.snapshot().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_reset() {
        let mut env = Environment::new();
        env.set("x".to_string(), Value::Int(1));
        env.reset();
        assert!(env.snapshot().is_empty());
    }

    #[test]
    fn test_aggregates_alias_between_bindings() {
        let mut env = Environment::new();
        let list = Value::new_list(vec![Value::Int(1)]);
        env.set("a".to_string(), list.clone());
        env.set("b".to_string(), env.get("a").unwrap());

        if let Some(Value::List(items)) = env.get("a") {
            items.borrow_mut().push(Value::Int(2));
        }
        if let Some(Value::List(items)) = env.get("b") {
            assert_eq!(items.borrow().len(), 2);
        } else {
            panic!("Expected list");
        }
    }
}
