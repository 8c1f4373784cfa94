use std::io::{BufRead, Write};

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

/// Reads one line from the interpreter's input.
///
/// Returns `None` at end of input. The line terminator is stripped.
fn read_line(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Option<String>> {
    let mut line = String::new();
    let read = interpreter.input
                          .read_line(&mut line)
                          .map_err(|e| call.error(RuntimeErrorKind::Io(e.to_string())))?;
    if read == 0 {
        return Ok(None);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Reads a line of text.
///
/// # Returns
/// The line without its terminator; an empty string at end of input.
pub fn input(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    Ok(Value::Str(read_line(interpreter, call)?.unwrap_or_default()))
}

/// Reads lines until one holds an integer.
///
/// Every other line is answered with `'<line>' must be an integer. Try
/// again!` on the output.
///
/// # Returns
/// The integer, or an exception if the input ends first.
pub fn input_int(interpreter: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    loop {
        let Some(line) = read_line(interpreter, call)? else {
            return Ok(call.exception(RuntimeErrorKind::Io("end of input while reading an integer"
                                                              .to_string())));
        };

        let text = line.trim();
        if let Ok(number) = text.parse::<i64>() {
            return Ok(Value::Int(number));
        }

        writeln!(interpreter.output, "'{text}' must be an integer. Try again!")
            .map_err(|e| call.error(RuntimeErrorKind::Io(e.to_string())))?;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{evaluator::core::tests::interpreter_with_input, value::core::Value};

    #[test]
    fn input_reads_lines() {
        let (mut interpreter, _) = interpreter_with_input("first line\r\nsecond\n");
        let result = interpreter.run("<test>", "[Input(), Input(), Input()]").unwrap();
        assert_eq!(result,
                   Value::from(vec![Value::from(vec!["first line".into(),
                                                     "second".into(),
                                                     "".into()])]));
    }

    #[test]
    fn input_int_asks_again() {
        let (mut interpreter, output) = interpreter_with_input("abc\n 42 \n");
        let result = interpreter.run("<test>", "InputInt() + 1").unwrap();
        assert_eq!(result, Value::from(vec![Value::Int(43)]));
        assert_eq!(output.contents(), "'abc' must be an integer. Try again!\n");
    }

    #[test]
    fn input_int_at_end_of_input_is_an_exception() {
        let (mut interpreter, _) = interpreter_with_input("x\n");
        let result = interpreter.run("<test>", "InputInt()").unwrap();
        let Value::List(values) = result else {
            panic!("expected the statement list");
        };
        assert!(matches!(values[0], Value::Exception(_)));
    }
}
