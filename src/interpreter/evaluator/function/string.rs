use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::BuiltinCall,
        },
        value::core::Value,
    },
    util::num::usize_to_i64_checked,
};

/// Converts a value to its display form.
///
/// Floats keep their decimal point, so `Str(2.0)` is `"2.0"` and reads back
/// as a float.
#[allow(clippy::unnecessary_wraps)]
pub fn stringify(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    Ok(Value::Str(call.arg("value").to_string()))
}

/// The number of elements of a list or characters of a string.
pub fn length(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let length = match call.arg("value") {
        Value::List(elements) => elements.len(),
        Value::Str(text) => text.chars().count(),
        other => return Ok(call.invalid_argument("value", "a List or a String", &other)),
    };
    let length = usize_to_i64_checked(length, call.error(RuntimeErrorKind::IntegerOverflow))?;
    Ok(Value::Int(length))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{evaluator::core::tests::eval, value::core::Value};

    #[test]
    fn str_uses_the_display_form() {
        assert_eq!(eval("Str(2.0)").unwrap(), Value::from("2.0"));
        assert_eq!(eval("Str([\"a\", 1])").unwrap(), Value::from("[\"a\", 1]"));
        assert_eq!(eval("Str(\"plain\")").unwrap(), Value::from("plain"));
    }

    #[test]
    fn length_counts_elements_and_characters() {
        assert_eq!(eval("Length([1, [2, 3]])").unwrap(), Value::Int(2));
        assert_eq!(eval("Length(\"héllo\")").unwrap(), Value::Int(5));
        assert!(matches!(eval("Length(3)").unwrap(), Value::Exception(_)));
    }
}
