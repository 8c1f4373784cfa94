use std::io::Write;

use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::core::BuiltinCall,
        },
        value::core::Value,
    },
};

/// Writes a value and a newline to the interpreter's output.
///
/// Strings are written without quotes; every other value uses its display
/// form.
///
/// # Returns
/// `null`.
///
/// # Errors
/// `Io` if the output stream fails.
pub fn print(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let value = call.arg("value");
    writeln!(interpreter.output, "{value}")
        .map_err(|e| call.error(RuntimeErrorKind::Io(e.to_string())))?;
    Ok(Value::Null)
}

/// Returns the text `Print` would write, without the newline.
#[allow(clippy::unnecessary_wraps)]
pub fn print_ret(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    Ok(Value::Str(call.arg("value").to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{
        evaluator::core::tests::{eval, interpreter_with_input},
        value::core::Value,
    };

    #[test]
    fn print_writes_display_form() {
        let (mut interpreter, output) = interpreter_with_input("");
        interpreter.run("<test>", "Print(\"a\")\nPrint([1, \"b\", 2.0])\nPrint(null)")
                   .unwrap();
        assert_eq!(output.contents(), "a\n[1, \"b\", 2.0]\nnull\n");
    }

    #[test]
    fn print_ret_returns_the_text() {
        assert_eq!(eval("PrintRet(1 / 2.0)").unwrap(), Value::from("0.5"));
    }
}
