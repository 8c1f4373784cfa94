use std::fmt;

use crate::interpreter::value::{
    core::Value,
    function::Function,
};

impl fmt::Display for Value {
    /// Formats the value the way `Print` and `Str` show it.
    ///
    /// Floats always carry a decimal point so that `Str(2.0)` reads back as a
    /// float. Strings are written raw; inside lists they are quoted so that
    /// `["1", 1]` stays distinguishable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            _ => write_repr(self, f),
        }
    }
}

impl Value {
    /// The quoted form of a value, as shown for list elements.
    ///
    /// # Example
    /// ```
    /// use sympl::interpreter::value::core::Value;
    ///
    /// let text = Value::from("say \"hi\"");
    /// assert_eq!(text.to_string(), "say \"hi\"");
    /// assert_eq!(text.repr(), "\"say \\\"hi\\\"\"");
    ///
    /// let list = Value::from(vec![Value::Float(2.0), Value::from("a")]);
    /// assert_eq!(list.to_string(), "[2.0, \"a\"]");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        struct Repr<'a>(&'a Value);

        impl fmt::Display for Repr<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_repr(self.0, f)
            }
        }

        Repr(self).to_string()
    }
}

fn write_repr(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Int(n) => write!(f, "{n}"),
        Value::Float(r) => write_float(*r, f),
        Value::Str(s) => write_quoted(s, f),
        Value::List(elements) => {
            write!(f, "[")?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_repr(element, f)?;
            }
            write!(f, "]")
        },
        Value::Function(function) => match function.as_ref() {
            Function::User(user) => write!(f, "<function {}>", user.name),
            Function::Builtin(builtin) => write!(f, "<built-in function {}>", builtin.name),
        },
        Value::Object(object) => {
            if object.instance {
                write!(f, "<object {} instance>", object.name)
            } else {
                write!(f, "<object {}>", object.name)
            }
        },
        Value::Exception(error) => write!(f, "<exception: {error}>"),
    }
}

fn write_float(r: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if r.is_finite() && r.fract() == 0.0 {
        write!(f, "{r:.1}")
    } else {
        write!(f, "{r}")
    }
}

fn write_quoted(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"")?;
    for character in s.chars() {
        match character {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            _ => write!(f, "{character}")?,
        }
    }
    write!(f, "\"")
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::value::function::BuiltinFunction;

    #[test]
    fn floats_always_show_a_decimal_point() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(-0.25).to_string(), "-0.25");
        assert_eq!(Value::Float(1e16).to_string(), "10000000000000000.0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn nested_lists_quote_strings() {
        let value = Value::from(vec![Value::Null,
                                     Value::from(vec![Value::from("a\nb")]),
                                     Value::Int(3)]);
        assert_eq!(value.to_string(), "[null, [\"a\\nb\"], 3]");
    }

    #[test]
    fn functions_show_their_name() {
        let print = BuiltinFunction { name:   "Print",
                                      params: &["value"], };
        let value = Value::Function(Rc::new(Function::Builtin(print)));
        assert_eq!(value.to_string(), "<built-in function Print>");
    }
}
