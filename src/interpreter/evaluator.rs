use indexmap::IndexMap;
use std::cmp::Ordering;

use crate::ast::{BinaryOp, Expr, ExprKind, Stmt, UnaryOp};
use crate::diagnostic::Span;
use crate::error::MiniPyError;
use crate::value::{value_to_string, values_equal, Key, Value};

use super::builtins;
use super::environment::Environment;
use super::error::RuntimeError;
use super::host::{Host, StdioHost};
use super::parser::TokenParser;

/// Tree-walking evaluator over the global environment. Terminal I/O goes
/// through the `Host` so drivers and tests control both ends.
pub struct Interpreter {
    env: Environment,
    host: Box<dyn Host>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_host(Box::new(StdioHost))
    }

    pub fn with_host(host: Box<dyn Host>) -> Self {
        Self {
            env: Environment::new(),
            host,
        }
    }

    pub fn run(&mut self, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.execute_statement(stmt)?;
        }
        Ok(())
    }

    /// Environment snapshot for the REPL `vars` command.
    pub fn bindings(&self) -> Vec<(String, Value)> {
        self.env.snapshot()
    }

    /// Wipe the environment, for the REPL `clear` command.
    pub fn reset(&mut self) {
        self.env.reset();
    }

    fn execute_statement(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Assign { target, value } => match &target.kind {
                ExprKind::Var(name) => {
                    let val = self.evaluate(value)?;
                    self.env.set(name.to_string(), val);
                    Ok(())
                }
                ExprKind::Index {
                    target: container,
                    index,
                } => {
                    let container_val = self.evaluate(container)?;
                    let index_val = self.evaluate(index)?;
                    let val = self.evaluate(value)?;
                    self.assign_index(&container_val, &index_val, val, target.span)
                }
                _ => Err(RuntimeError::invalid_operation("Invalid assignment target")
                    .at(target.span)),
            },
            Stmt::Print(expr) => {
                let val = self.evaluate(expr)?;
                self.host.write_line(&value_to_string(&val));
                Ok(())
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.run(then_branch)
                } else if let Some(else_stmts) = else_branch {
                    self.run(else_stmts)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.run(body)?;
                }
                Ok(())
            }
            Stmt::Del(target) => match &target.kind {
                ExprKind::Var(name) => self
                    .env
                    .delete(name)
                    .map(|_| ())
                    .ok_or_else(|| {
                        RuntimeError::undefined_variable(name.to_string()).at(target.span)
                    }),
                ExprKind::Index {
                    target: container,
                    index,
                } => {
                    let container_val = self.evaluate(container)?;
                    let key_val = self.evaluate(index)?;
                    match container_val {
                        Value::Dict(entries) => {
                            let key = dict_key(&key_val, target.span)?;
                            entries
                                .borrow_mut()
                                .shift_remove(&key)
                                .map(|_| ())
                                .ok_or_else(|| {
                                    RuntimeError::key_not_found(value_to_string(&key_val))
                                        .at(target.span)
                                })
                        }
                        other => Err(RuntimeError::type_error(format!(
                            "del requires a dict entry, got {}",
                            other.type_name()
                        ))
                        .at(target.span)),
                    }
                }
                _ => Err(RuntimeError::invalid_operation("Invalid del target").at(target.span)),
            },
            Stmt::Expr(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal(val) => Ok(val.clone()),

            ExprKind::Var(name) => self.env.get(name).ok_or_else(|| {
                RuntimeError::undefined_variable(name.to_string()).at(expr.span)
            }),

            ExprKind::List(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.evaluate(element)?);
                }
                Ok(Value::new_list(items))
            }

            ExprKind::Dict(entries) => {
                let mut map = IndexMap::new();
                for (key_expr, value_expr) in entries {
                    let key_val = self.evaluate(key_expr)?;
                    let key = dict_key(&key_val, key_expr.span)?;
                    let val = self.evaluate(value_expr)?;
                    map.insert(key, val);
                }
                Ok(Value::new_dict(map))
            }

            ExprKind::Index { target, index } => {
                let container = self.evaluate(target)?;
                let idx = self.evaluate(index)?;
                self.get_index(&container, &idx, expr.span)
            }

            ExprKind::Unary { op, operand } => {
                let val = self.evaluate(operand)?;
                eval_unary_op(*op, &val).map_err(|e| e.at(expr.span))
            }

            // `and`/`or` short-circuit: the right operand is untouched when
            // the left decides the result.
            ExprKind::Binary {
                left,
                op: BinaryOp::And,
                right,
            } => {
                if !self.evaluate(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.evaluate(right)?.is_truthy()))
            }

            ExprKind::Binary {
                left,
                op: BinaryOp::Or,
                right,
            } => {
                if self.evaluate(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.evaluate(right)?.is_truthy()))
            }

            ExprKind::Binary { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                eval_binary_op(&left_val, *op, &right_val).map_err(|e| e.at(expr.span))
            }

            ExprKind::Call { name, args } => {
                let mut arg_vals = Vec::with_capacity(args.len());
                for arg in args {
                    arg_vals.push(self.evaluate(arg)?);
                }
                self.call_function(name, &arg_vals).map_err(|e| e.at(expr.span))
            }
        }
    }

    fn call_function(&mut self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        match name {
            "str" => builtins::builtin_str(args),
            "int" => builtins::builtin_int(args),
            "float" => builtins::builtin_float(args),
            "bool" => builtins::builtin_bool(args),
            "len" => builtins::builtin_len(args),
            "append" => builtins::builtin_append(args),
            "remove" => builtins::builtin_remove(args),
            "keys" => builtins::builtin_keys(args),
            "values" => builtins::builtin_values(args),
            "has_key" => builtins::builtin_has_key(args),
            "del_key" => builtins::builtin_del_key(args),
            "input" => builtins::builtin_input(args, self.host.as_mut()),
            _ => Err(RuntimeError::invalid_operation(format!(
                "Unknown function: {}",
                name
            ))),
        }
    }

    fn get_index(
        &self,
        container: &Value,
        index: &Value,
        span: Span,
    ) -> Result<Value, RuntimeError> {
        match (container, index) {
            (Value::List(items), Value::Int(i)) => {
                let items = items.borrow();
                let idx = normalize_index(*i, items.len())
                    .ok_or_else(|| RuntimeError::index_out_of_range(*i, items.len()).at(span))?;
                Ok(items[idx].clone())
            }
            (Value::List(_), other) => Err(RuntimeError::type_error(format!(
                "List index must be an integer, got {}",
                other.type_name()
            ))
            .at(span)),
            (Value::Str(s), Value::Int(i)) => {
                let chars: Vec<char> = s.chars().collect();
                let idx = normalize_index(*i, chars.len())
                    .ok_or_else(|| RuntimeError::index_out_of_range(*i, chars.len()).at(span))?;
                Ok(Value::str(chars[idx].to_string()))
            }
            (Value::Str(_), other) => Err(RuntimeError::type_error(format!(
                "String index must be an integer, got {}",
                other.type_name()
            ))
            .at(span)),
            (Value::Dict(entries), key_val) => {
                let key = dict_key(key_val, span)?;
                entries.borrow().get(&key).cloned().ok_or_else(|| {
                    RuntimeError::key_not_found(value_to_string(key_val)).at(span)
                })
            }
            (other, _) => Err(RuntimeError::type_error(format!(
                "Cannot index {}",
                other.type_name()
            ))
            .at(span)),
        }
    }

    fn assign_index(
        &mut self,
        container: &Value,
        index: &Value,
        value: Value,
        span: Span,
    ) -> Result<(), RuntimeError> {
        match container {
            Value::List(items) => {
                let i = match index {
                    Value::Int(n) => *n,
                    other => {
                        return Err(RuntimeError::type_error(format!(
                            "List index must be an integer, got {}",
                            other.type_name()
                        ))
                        .at(span))
                    }
                };
                let mut items = items.borrow_mut();
                let len = items.len();
                let idx = normalize_index(i, len)
                    .ok_or_else(|| RuntimeError::index_out_of_range(i, len).at(span))?;
                items[idx] = value;
                Ok(())
            }
            Value::Dict(entries) => {
                let key = dict_key(index, span)?;
                entries.borrow_mut().insert(key, value);
                Ok(())
            }
            other => Err(RuntimeError::type_error(format!(
                "Cannot assign into {}",
                other.type_name()
            ))
            .at(span)),
        }
    }
}

/// `i < 0` counts from the end; `None` means out of range either way.
fn normalize_index(i: i64, len: usize) -> Option<usize> {
    let idx = if i < 0 { i + len as i64 } else { i };
    if idx < 0 || idx >= len as i64 {
        None
    } else {
        Some(idx as usize)
    }
}

fn dict_key(value: &Value, span: Span) -> Result<Key, RuntimeError> {
    Key::from_value(value).ok_or_else(|| {
        RuntimeError::type_error(format!(
            "Dict key must be a string, int, float, or bool, got {}",
            value.type_name()
        ))
        .at(span)
    })
}

fn eval_binary_op(left: &Value, op: BinaryOp, right: &Value) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => arith(left, right, "-", i64::checked_sub, |a, b| a - b),
        BinaryOp::Mul => arith(left, right, "*", i64::checked_mul, |a, b| a * b),
        BinaryOp::Div => eval_div(left, right),
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
            eval_comparison(left, op, right)
        }
        // Normally handled with short-circuiting in `evaluate`.
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

fn eval_add(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => {
            let mut combined = String::with_capacity(a.len() + b.len());
            combined.push_str(a);
            combined.push_str(b);
            Ok(Value::str(combined))
        }
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::new_list(items))
        }
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            arith(left, right, "+", i64::checked_add, |a, b| a + b)
        }
        _ => Err(RuntimeError::type_error(format!(
            "Cannot add {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn arith(
    left: &Value,
    right: &Value,
    symbol: &str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_op(*a, *b).map(Value::Int).ok_or_else(|| {
            RuntimeError::invalid_operation(format!("Integer overflow in '{}'", symbol))
        }),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_op(*a as f64, *b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_op(*a, *b as f64))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(*a, *b))),
        _ => Err(RuntimeError::type_error(format!(
            "Operator '{}' requires numbers, got {} and {}",
            symbol,
            left.type_name(),
            right.type_name()
        ))),
    }
}

// Division always yields a float, except Int/Int dividing exactly.
fn eval_div(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(RuntimeError::division_by_zero());
            }
            match (a.checked_div(*b), a.checked_rem(*b)) {
                (Some(quotient), Some(0)) => Ok(Value::Int(quotient)),
                _ => Ok(Value::Float(*a as f64 / *b as f64)),
            }
        }
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let a = match left {
                Value::Int(n) => *n as f64,
                Value::Float(f) => *f,
                _ => unreachable!(),
            };
            let b = match right {
                Value::Int(n) => *n as f64,
                Value::Float(f) => *f,
                _ => unreachable!(),
            };
            if b == 0.0 {
                return Err(RuntimeError::division_by_zero());
            }
            Ok(Value::Float(a / b))
        }
        _ => Err(RuntimeError::type_error(format!(
            "Operator '/' requires numbers, got {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn eval_comparison(left: &Value, op: BinaryOp, right: &Value) -> Result<Value, RuntimeError> {
    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => {
            return Err(RuntimeError::type_error(format!(
                "Operator '{}' requires numbers or strings, got {} and {}",
                op.symbol(),
                left.type_name(),
                right.type_name()
            )))
        }
    };
    // NaN compares false against everything.
    let ordering = match ordering {
        Some(ord) => ord,
        None => return Ok(Value::Bool(false)),
    };
    let result = match op {
        BinaryOp::Less => ordering == Ordering::Less,
        BinaryOp::LessEq => ordering != Ordering::Greater,
        BinaryOp::Greater => ordering == Ordering::Greater,
        BinaryOp::GreaterEq => ordering != Ordering::Less,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

fn eval_unary_op(op: UnaryOp, val: &Value) -> Result<Value, RuntimeError> {
    match (op, val) {
        (UnaryOp::Pos, Value::Int(n)) => Ok(Value::Int(*n)),
        (UnaryOp::Pos, Value::Float(f)) => Ok(Value::Float(*f)),
        (UnaryOp::Neg, Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(|| {
            RuntimeError::invalid_operation("Integer overflow in '-'")
        }),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (op, v) => Err(RuntimeError::type_error(format!(
            "Operator '{}' requires a number, got {}",
            op.symbol(),
            v.type_name()
        ))),
    }
}

/// Lex and parse a source string into a program.
pub fn parse_program(source: &str) -> Result<Vec<Stmt>, MiniPyError> {
    let tokens = crate::lexer::lex(source)?;
    let mut parser = TokenParser::new(tokens);
    Ok(parser.parse()?)
}

/// Full pipeline against an existing interpreter (the REPL reuses one so
/// the environment persists across submissions).
pub fn parse_and_run(source: &str, interpreter: &mut Interpreter) -> Result<(), MiniPyError> {
    let stmts = parse_program(source)?;
    interpreter.run(&stmts)?;
    Ok(())
}
