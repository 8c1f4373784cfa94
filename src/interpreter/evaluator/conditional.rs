use std::rc::Rc;

use crate::{
    ast::{ElseCase, IfCase},
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates an `if`/`elif`/`else` chain.
    ///
    /// Conditions are tried in order and the body of the first true one is
    /// evaluated. Without a matching case the `else` body runs, if present.
    /// A branch yields its body's value, or `null` when it is a block body.
    /// Without any taken branch the result is `null`.
    ///
    /// # Parameters
    /// - `cases`: The `if` and `elif` branches.
    /// - `else_case`: The optional `else` branch.
    /// - `context`: Evaluation context.
    ///
    /// # Example
    /// ```
    /// use sympl::{
    ///     config::InterpreterConfig,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(InterpreterConfig::default());
    /// let result = interpreter.run("<doc>", "if 0 then 1 elif 2 then 3 else 4").unwrap();
    /// assert_eq!(result, Value::from(vec![Value::Int(3)]));
    /// ```
    pub fn eval_if(&mut self,
                   cases: &[IfCase],
                   else_case: Option<&ElseCase>,
                   context: &Rc<Context>)
                   -> EvalResult<Value> {
        for case in cases {
            if self.evaluate(&case.condition, context)?.is_true() {
                let value = self.evaluate(&case.body, context)?;
                return Ok(if case.discard_value { Value::Null } else { value });
            }
        }

        if let Some(else_case) = else_case {
            let value = self.evaluate(&else_case.body, context)?;
            return Ok(if else_case.discard_value { Value::Null } else { value });
        }

        Ok(Value::Null)
    }
}
