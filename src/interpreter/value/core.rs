use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::value::{function::Function, object::Object},
};

/// Represents a runtime value in the interpreter.
///
/// Values have copy semantics: reading a variable or passing an argument
/// clones the value, so a binding can never be changed through another
/// binding. Functions, objects and exceptions are immutable once built and
/// are shared behind an `Rc`.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, returned by statements such as block loops.
    Null,
    /// A 64-bit signed integer. Comparisons and logical operators produce
    /// `Int(1)` for true and `Int(0)` for false.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Self>),
    /// A user-defined or built-in function.
    Function(Rc<Function>),
    /// An object template or instance.
    Object(Rc<Object>),
    /// An error returned as a value by a built-in function.
    Exception(Rc<RuntimeError>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Int(n) => Self::Int(*n),
            LiteralValue::Float(r) => Self::Float(*r),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl Value {
    /// The name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::List(_) => "List",
            Self::Function(_) => "Function",
            Self::Object(_) => "Object",
            Self::Exception(_) => "Exception",
        }
    }

    /// Whether the value counts as true in conditions.
    ///
    /// `null` and exceptions are false. Numbers are true when non-zero,
    /// strings and lists when non-empty. Functions and objects are always
    /// true.
    ///
    /// # Example
    /// ```
    /// use sympl::interpreter::value::core::Value;
    ///
    /// assert!(Value::Float(0.5).is_true());
    /// assert!(!Value::Int(0).is_true());
    /// assert!(!Value::List(vec![]).is_true());
    /// ```
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self {
            Self::Null | Self::Exception(_) => false,
            Self::Int(n) => *n != 0,
            Self::Float(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(elements) => !elements.is_empty(),
            Self::Function(_) | Self::Object(_) => true,
        }
    }

    /// Returns the integer if the value is an `Int`.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Structural equality.
///
/// Numbers are only equal to numbers of the same type here; the `==` operator
/// additionally compares integers with floats. Functions and objects are equal
/// when they are the same definition or instance.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Exception(a), Self::Exception(b)) => a == b,
            _ => false,
        }
    }
}
