use crate::interpreter::{
    evaluator::{
        core::{EvalResult, Interpreter},
        function::core::BuiltinCall,
    },
    value::{arithmetic::list_position, core::Value},
};

/// Returns the list argument named `param`, or the exception to return
/// instead.
fn list_arg(call: &BuiltinCall<'_>, param: &str) -> Result<Vec<Value>, Value> {
    match call.arg(param) {
        Value::List(elements) => Ok(elements),
        other => Err(call.invalid_argument(param, "a List", &other)),
    }
}

/// Returns `list` with `value` added at the end.
#[allow(clippy::unnecessary_wraps)]
pub fn append(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let mut elements = match list_arg(call, "list") {
        Ok(elements) => elements,
        Err(exception) => return Ok(exception),
    };
    elements.push(call.arg("value"));
    Ok(Value::List(elements))
}

/// Returns `list` without the element at `index`.
///
/// Negative indices count from the end. A bad index is returned as an
/// exception like any other bad argument.
#[allow(clippy::unnecessary_wraps)]
pub fn remove(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let mut elements = match list_arg(call, "list") {
        Ok(elements) => elements,
        Err(exception) => return Ok(exception),
    };
    let index = match call.arg("index") {
        Value::Int(index) => index,
        other => return Ok(call.invalid_argument("index", "an Int", &other)),
    };

    match list_position(index, elements.len()) {
        Ok(position) => {
            elements.remove(position);
            Ok(Value::List(elements))
        },
        Err(kind) => Ok(call.exception(kind)),
    }
}

/// Returns the concatenation of `listA` and `listB`.
#[allow(clippy::unnecessary_wraps)]
pub fn extend(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let (mut first, second) = match (list_arg(call, "listA"), list_arg(call, "listB")) {
        (Ok(first), Ok(second)) => (first, second),
        (Err(exception), _) | (_, Err(exception)) => return Ok(exception),
    };
    first.extend(second);
    Ok(Value::List(first))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::RuntimeErrorKind,
        interpreter::{evaluator::core::tests::eval, value::core::Value},
    };

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    fn exception_kind(text: &str) -> RuntimeErrorKind {
        match eval(text).unwrap() {
            Value::Exception(error) => error.kind.clone(),
            other => panic!("expected an exception, got {other:?}"),
        }
    }

    #[test]
    fn list_functions_return_new_lists() {
        assert_eq!(eval("var a = [1]\nvar b = Append(a, 2)\n[a, b]").unwrap(),
                   Value::from(vec![ints(&[1]), ints(&[1, 2])]));
        assert_eq!(eval("Remove([1, 2, 3], -1)").unwrap(), ints(&[1, 2]));
        assert_eq!(eval("Extend([1], [2, 3])").unwrap(), ints(&[1, 2, 3]));
    }

    #[test]
    fn bad_arguments_become_exceptions() {
        assert_eq!(exception_kind("Append(1, 2)"),
                   RuntimeErrorKind::InvalidArgument { function: "Append".into(),
                                                       param:    "list".into(),
                                                       expected: "a List".into(),
                                                       found:    "Int".into(), });
        assert_eq!(exception_kind("Remove([1], 5)"),
                   RuntimeErrorKind::IndexOutOfRange { index:  5,
                                                       length: 1, });
        assert!(matches!(exception_kind("Extend([], \"x\")"),
                         RuntimeErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn exceptions_do_not_stop_the_program() {
        assert_eq!(eval("var e = Remove(\"abc\", 0)\nIsList(e)").unwrap(), Value::Int(0));
        assert_eq!(eval("if Append(0, 0) then 1 else 2").unwrap(), Value::Int(2));
    }
}
