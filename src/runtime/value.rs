use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::Closure;

/// Runtime value and program node representation
///
/// The same type serves as syntax and as data: a `List` handed to the
/// evaluator is an operation invocation, a `List` returned by `quote` is data.
#[derive(Debug, Clone)]
pub enum Value {
    /// Empty value, also the only false value
    Nil,
    /// Boolean true (`t`); false is represented by `Nil`
    True,
    /// Numeric scalar
    Number(f64),
    /// Symbol naming a variable or operation; string literals are symbols too
    Symbol(String),
    /// Ordered sequence of values (reference-counted, never mutated in place)
    List(Arc<Vec<Value>>),
    /// User-defined operation created by `lambda`
    Closure(Arc<Closure>),
}

impl Value {
    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Arc::new(values))
    }

    /// Creates a symbol value
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Maps a host boolean onto `True` / `Nil`
    pub fn from_bool(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::Nil
        }
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::True => "bool",
            Value::Number(_) => "number",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Closure(_) => "closure",
        }
    }

    /// Returns true for `Nil`
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Everything except `Nil` is truthy (including `0` and the empty list)
    pub fn is_truthy(&self) -> bool {
        !self.is_nil()
    }

    /// Returns the number, or `InvalidResult` attributed to `operation`
    pub fn as_number(&self, operation: &str) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(Error::invalid_result(operation, "number", self.type_name())),
        }
    }

    /// Returns the list elements, or `InvalidResult` attributed to `operation`
    pub fn as_list(&self, operation: &str) -> Result<&Arc<Vec<Value>>> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(Error::invalid_result(operation, "list", self.type_name())),
        }
    }

    /// Returns the symbol name, or `InvalidResult` attributed to `operation`
    pub fn as_symbol(&self, operation: &str) -> Result<&str> {
        match self {
            Value::Symbol(name) => Ok(name),
            _ => Err(Error::invalid_result(operation, "symbol", self.type_name())),
        }
    }

    /// Converts a JSON document into a program node
    ///
    /// `false` becomes `Nil` since `Nil` is the only false value.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Null | serde_json::Value::Bool(false) => Ok(Value::Nil),
            serde_json::Value::Bool(true) => Ok(Value::True),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| Error::UnsupportedNode(format!("number {}", n))),
            serde_json::Value::String(s) => Ok(Value::Symbol(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Value::list),
            serde_json::Value::Object(_) => Err(Error::UnsupportedNode(
                "JSON objects have no program node form".to_string(),
            )),
        }
    }

    /// Parses JSON text into a program node
    pub fn parse_json(source: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(source)?;
        Value::from_json(json)
    }

    /// Converts the value back into JSON
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Value::Nil => Ok(serde_json::Value::Null),
            Value::True => Ok(serde_json::Value::Bool(true)),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| Error::UnsupportedNode(format!("non-finite number {}", n))),
            Value::Symbol(s) => Ok(serde_json::Value::String(s.clone())),
            Value::List(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Closure(_) => Err(Error::UnsupportedNode(
                "closures cannot be serialized".to_string(),
            )),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::True => write!(f, "t"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, ")")
            }
            Value::Closure(closure) => write!(f, "<lambda({})>", closure.params().join(" ")),
        }
    }
}

// Structural equality; closures compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::True, Value::True) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<Vec<Value>> for Value {
    fn eq(&self, other: &Vec<Value>) -> bool {
        match self {
            Value::List(items) => items.as_ref() == other,
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Symbol(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Symbol(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = Error;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        Value::from_json(json)
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.to_json()
    }
}
