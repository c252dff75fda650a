use thiserror::Error;

use crate::ast::{BinOp, Node, PathComponent, UnaryOp};
use crate::value::{Context, Value};

/// Errors that can occur while evaluating an expression.
///
/// Strict evaluators propagate these to the caller; safe evaluators catch
/// them, report them to the diagnostic sink, and substitute a default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Invalid operation for the operand types
    #[error("type error: {0}")]
    TypeError(String),

    /// Invalid member or subscript access
    #[error("access error: {0}")]
    AccessError(String),

    /// A Bind or Pipe target did not resolve to a callable
    #[error("'{0}' is not callable")]
    NotCallable(String),
}

/// Returns a human-readable type name for a Value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Undefined => "undefined",
        Value::Boolean(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Map(_) => "map",
        Value::Function(_) => "function",
    }
}

/// Evaluates a node against a context.
///
/// Purely structural tree walk: no state survives between calls, so the same
/// node may be evaluated repeatedly and concurrently against different
/// contexts.
pub fn eval(node: &Node, ctx: &Context) -> Result<Value, EvalError> {
    match node {
        Node::Literal(value) => Ok(value.clone()),
        Node::Reference { root, path } => {
            let mut value = ctx.get(root).cloned().unwrap_or(Value::Undefined);
            for component in path {
                value = match component {
                    PathComponent::Field(name) => read_field(&value, name)?,
                    PathComponent::Subscript(index) => {
                        let key = eval(index, ctx)?;
                        read_subscript(&value, &key)?
                    }
                };
            }
            Ok(value)
        }
        Node::Unary { op, operand } => {
            let value = eval(operand, ctx)?;
            Ok(apply_unary(*op, &value))
        }
        Node::Binary { op, left, right } => eval_binary(*op, left, right, ctx),
        Node::Bind { name, args } => {
            let target = ctx.get(name).cloned().unwrap_or(Value::Undefined);
            let Value::Function(function) = target else {
                return Err(EvalError::NotCallable(name.clone()));
            };
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, ctx)?);
            }
            function(&values)
        }
        Node::Pipe { left, right } => {
            let input = eval(left, ctx)?;
            let target = eval(right, ctx)?;
            let Value::Function(function) = target else {
                return Err(EvalError::NotCallable(type_name(&target).to_string()));
            };
            function(&[input])
        }
        Node::StaticFragment(text) => Ok(Value::String(text.clone())),
        Node::Interpolated(fragments) => {
            let mut result = String::new();
            for fragment in fragments {
                result.push_str(&eval(fragment, ctx)?.as_string());
            }
            Ok(Value::String(result))
        }
        Node::CollectionIteration { .. } | Node::DictionaryIteration { .. } => {
            Err(EvalError::TypeError(
                "iteration headers are expanded by the renderer, not evaluated".to_string(),
            ))
        }
    }
}

fn eval_binary(op: BinOp, left: &Node, right: &Node, ctx: &Context) -> Result<Value, EvalError> {
    // The logical operators short-circuit, so they cannot go through
    // apply_binary which needs both operand values.
    match op {
        BinOp::And => {
            let lhs = eval(left, ctx)?;
            if lhs.is_truthy() {
                eval(right, ctx)
            } else {
                Ok(lhs)
            }
        }
        BinOp::Or => {
            let lhs = eval(left, ctx)?;
            if lhs.is_truthy() {
                Ok(lhs)
            } else {
                eval(right, ctx)
            }
        }
        BinOp::Nullish => {
            let lhs = eval(left, ctx)?;
            if matches!(lhs, Value::Undefined) {
                eval(right, ctx)
            } else {
                Ok(lhs)
            }
        }
        _ => {
            let lhs = eval(left, ctx)?;
            let rhs = eval(right, ctx)?;
            apply_binary(op, &lhs, &rhs)
        }
    }
}

fn apply_unary(op: UnaryOp, value: &Value) -> Value {
    match op {
        UnaryOp::Plus => Value::Number(value.as_number()),
        UnaryOp::Minus => Value::Number(-value.as_number()),
        UnaryOp::Not => Value::Boolean(!value.is_truthy()),
    }
}

fn apply_binary(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match op {
        BinOp::Add => match (left, right) {
            (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!(
                "{}{}",
                left.as_string(),
                right.as_string()
            ))),
            _ => Ok(Value::Number(left.as_number() + right.as_number())),
        },
        BinOp::Subtract => Ok(Value::Number(left.as_number() - right.as_number())),
        BinOp::Multiply => Ok(Value::Number(left.as_number() * right.as_number())),
        BinOp::Divide => Ok(Value::Number(left.as_number() / right.as_number())),
        BinOp::Modulo => Ok(Value::Number(left.as_number() % right.as_number())),
        BinOp::Power => Ok(Value::Number(left.as_number().powf(right.as_number()))),

        BinOp::ShiftLeft => Ok(Value::Number(
            (to_int32(left) << (to_uint32(right) & 31)) as f64,
        )),
        BinOp::ShiftRight => Ok(Value::Number(
            (to_int32(left) >> (to_uint32(right) & 31)) as f64,
        )),
        BinOp::ShiftRightUnsigned => Ok(Value::Number(
            (to_uint32(left) >> (to_uint32(right) & 31)) as f64,
        )),

        BinOp::LessThan => Ok(Value::Boolean(
            left.compare(right) == Some(std::cmp::Ordering::Less),
        )),
        BinOp::LessEqual => Ok(Value::Boolean(matches!(
            left.compare(right),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        ))),
        BinOp::GreaterThan => Ok(Value::Boolean(
            left.compare(right) == Some(std::cmp::Ordering::Greater),
        )),
        BinOp::GreaterEqual => Ok(Value::Boolean(matches!(
            left.compare(right),
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        ))),

        BinOp::Equal => Ok(Value::Boolean(left.loose_equals(right))),
        BinOp::NotEqual => Ok(Value::Boolean(!left.loose_equals(right))),
        BinOp::StrictEqual => Ok(Value::Boolean(left.strict_equals(right))),
        BinOp::StrictNotEqual => Ok(Value::Boolean(!left.strict_equals(right))),

        BinOp::In => match right {
            Value::Map(map) => Ok(Value::Boolean(map.contains_key(&left.as_string()))),
            Value::List(items) => Ok(Value::Boolean(
                items.iter().any(|item| item.strict_equals(left)),
            )),
            other => Err(EvalError::TypeError(format!(
                "cannot test membership in {}",
                type_name(other)
            ))),
        },

        BinOp::And | BinOp::Or | BinOp::Nullish => unreachable!("handled in eval_binary"),
    }
}

fn read_field(value: &Value, name: &str) -> Result<Value, EvalError> {
    match value {
        Value::Map(map) => Ok(map.get(name).cloned().unwrap_or(Value::Undefined)),
        Value::List(items) if name == "length" => Ok(Value::Number(items.len() as f64)),
        Value::String(s) if name == "length" => Ok(Value::Number(s.chars().count() as f64)),
        Value::List(_) | Value::String(_) => Ok(Value::Undefined),
        other => Err(EvalError::AccessError(format!(
            "cannot read '{}' of {}",
            name,
            type_name(other)
        ))),
    }
}

fn read_subscript(value: &Value, key: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Map(map) => Ok(map.get(&key.as_string()).cloned().unwrap_or(Value::Undefined)),
        Value::List(items) => Ok(index_of(key, items.len())
            .and_then(|i| items.get(i).cloned())
            .unwrap_or(Value::Undefined)),
        Value::String(s) => Ok(index_of(key, s.chars().count())
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Undefined)),
        other => Err(EvalError::AccessError(format!(
            "cannot index {} with {}",
            type_name(other),
            type_name(key)
        ))),
    }
}

/// Interprets a subscript key as a non-negative in-range element index.
fn index_of(key: &Value, len: usize) -> Option<usize> {
    let n = key.as_number();
    if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && (n as usize) < len {
        Some(n as usize)
    } else {
        None
    }
}

/// 32-bit signed integer conversion for the shift operators.
fn to_int32(value: &Value) -> i32 {
    to_uint32(value) as i32
}

/// 32-bit unsigned integer conversion for the shift operators.
fn to_uint32(value: &Value) -> u32 {
    let n = value.as_number();
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let m = n.trunc() % 4_294_967_296.0;
    let m = if m < 0.0 { m + 4_294_967_296.0 } else { m };
    m as u32
}
