use crate::interpreter::{
    evaluator::{
        core::{EvalResult, Interpreter},
        function::core::BuiltinCall,
    },
    value::core::Value,
};

/// Generates a built-in that tests the type of its `value` argument.
///
/// The generated functions return `Int(1)` when the pattern matches and
/// `Int(0)` otherwise.
macro_rules! type_predicate {
    ($fname:ident, $pattern:pat) => {
        #[allow(clippy::unnecessary_wraps)]
        pub fn $fname(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
            Ok(Value::from(matches!(call.arg("value"), $pattern)))
        }
    };
}

type_predicate!(is_number, Value::Int(_) | Value::Float(_));
type_predicate!(is_string, Value::Str(_));
type_predicate!(is_list, Value::List(_));
type_predicate!(is_function, Value::Function(_));

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{evaluator::core::tests::eval, value::core::Value};

    #[test]
    fn predicates_check_the_value_type() {
        let text = "[IsNumber(1), IsNumber(1.5), IsNumber(\"1\"), IsString(\"\"), IsList([]), \
                    IsFunction(Print), IsFunction(func() -> 1), IsList(null)]";
        let expected = [1, 1, 0, 1, 1, 1, 1, 0].map(Value::Int).to_vec();
        assert_eq!(eval(text).unwrap(), Value::from(expected));
    }
}
