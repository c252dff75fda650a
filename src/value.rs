use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::evaluator::EvalError;

/// A host-supplied callable, invocable through `Bind` and `Pipe` nodes.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// The string-keyed mapping supplied to a compiled expression at call time.
pub type Context = HashMap<String, Value>;

/// A dynamically-typed runtime value.
///
/// Every literal, context entry, and operator result is one of these
/// variants. Coercion between them follows conventional dynamic scripting
/// rules and is always explicit: truthiness via [`Value::is_truthy`], numeric
/// coercion via [`Value::as_number`], string form via [`Value::as_string`].
///
/// # Examples
///
/// ```
/// use sprig_lang::Value;
///
/// let n = Value::Number(42.0);
/// assert!(n.is_truthy());
/// assert_eq!(n.as_string(), "42");
///
/// assert_eq!(Value::String("3".into()).as_number(), 3.0);
/// assert!(Value::Undefined.as_number().is_nan());
/// ```
#[derive(Clone)]
pub enum Value {
    /// Absent value; what missing context keys and fields resolve to
    Undefined,

    /// Boolean
    Boolean(bool),

    /// Number (double-precision float; integer literals parse into this too)
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    List(Vec<Value>),

    /// String-keyed mapping
    Map(HashMap<String, Value>),

    /// Host-supplied callable
    Function(NativeFn),
}

impl Value {
    /// Conventional truthiness: `undefined`, `false`, `0`, `NaN`, and the
    /// empty string are falsy; everything else (including empty lists and
    /// maps) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Function(_) => true,
        }
    }

    /// Numeric coercion. Booleans become 0/1, numeric strings parse (the
    /// empty string is 0), everything else is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(true) => 1.0,
            Value::Boolean(false) => 0.0,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Value::Undefined | Value::List(_) | Value::Map(_) | Value::Function(_) => f64::NAN,
        }
    }

    /// String coercion. Whole numbers render without a fractional part so
    /// interpolated templates read naturally ("2", not "2.0"). Lists join
    /// their elements with commas.
    pub fn as_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.as_string()).collect();
                parts.join(",")
            }
            Value::Map(_) => "[object]".to_string(),
            Value::Function(_) => "[function]".to_string(),
        }
    }

    /// Coercing equality (`==`): identical types compare strictly, while
    /// number/string/boolean combinations compare numerically.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Undefined, _) | (_, Value::Undefined) => false,
            (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Boolean(_), Value::Boolean(_)) => self.strict_equals(other),
            (
                Value::Number(_) | Value::String(_) | Value::Boolean(_),
                Value::Number(_) | Value::String(_) | Value::Boolean(_),
            ) => {
                let (a, b) = (self.as_number(), other.as_number());
                a == b && !a.is_nan()
            }
            _ => self.strict_equals(other),
        }
    }

    /// Strict equality (`===`): no coercion, deep for lists and maps,
    /// pointer identity for functions. NaN is not equal to itself.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_equals(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|w| v.strict_equals(w)))
            }
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering for `< <= > >=`: two strings compare lexicographically,
    /// anything else compares numerically. None when a NaN is involved.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => self.as_number().partial_cmp(&other.as_number()),
        }
    }

    /// Sequence coercion: lists pass through, any other value becomes a
    /// single-element list.
    pub fn into_list(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            other => vec![other],
        }
    }
}

/// Render a number the way template output expects: integral values without
/// a fractional part, non-finite values spelled out.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.strict_equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Value::Function(_) => write!(f, "Function(..)"),
        }
    }
}
