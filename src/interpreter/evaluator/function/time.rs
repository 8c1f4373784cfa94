use std::time::{SystemTime, UNIX_EPOCH};

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

/// Seconds since the UNIX epoch, as a float.
pub fn time(_: &mut Interpreter, call: &BuiltinCall<'_>) -> EvalResult<Value> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_err(|e| call.error(RuntimeErrorKind::Io(e.to_string())))?;
    Ok(Value::Float(elapsed.as_secs_f64()))
}

#[cfg(test)]
mod tests {
    use crate::interpreter::{evaluator::core::tests::eval, value::core::Value};

    #[test]
    fn time_moves_forward() {
        let Value::Float(seconds) = eval("var a = Time()\nvar b = Time()\nb - a").unwrap() else {
            panic!("Time() should return a float");
        };
        assert!(seconds >= 0.0);
        assert!(matches!(eval("Time()").unwrap(), Value::Float(now) if now > 1.0e9));
    }
}
