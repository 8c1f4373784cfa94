use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{LoopStep, count_iteration, error, loop_step},
        },
        value::core::Value,
    },
    source::Span,
};

impl Interpreter {
    /// Evaluates a `for` loop.
    ///
    /// `for i = start to end step n then body` counts from `start` towards
    /// the exclusive `end`. A non-negative step counts up while `i < end`, a
    /// negative step counts down while `i > end`; the step defaults to `1`.
    /// A zero step only fails when it would never reach `end`, so
    /// `for i = 3 to 0 step 0` is empty.
    /// The loop variable is assigned in the current context before every
    /// iteration, so it stays visible after the loop.
    ///
    /// `continue` skips the rest of the body (its value is not collected) and
    /// `break` leaves the loop. Errors and `return` abort the loop.
    ///
    /// # Parameters
    /// - `var_name`: The loop variable.
    /// - `start`, `end`, `step`: Bound expressions, evaluated once.
    /// - `body`: Evaluated once per iteration.
    /// - `discard_value`: Block bodies yield `null` instead of the list of
    ///   iteration values.
    /// - `span`: Span of the loop, used for errors.
    /// - `context`: Evaluation context.
    ///
    /// # Errors
    /// - `ForLoopBounds` if `start` or `end` is not an integer.
    /// - `ForLoopStep` if `step` is not an integer, or is zero while
    ///   `start < end`.
    /// - `LoopLimit` after too many iterations.
    ///
    /// # Example
    /// ```
    /// use sympl::{
    ///     config::InterpreterConfig,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(InterpreterConfig::default());
    /// let result = interpreter.run("<doc>", "for i = 5 to 0 step -2 then i * 10").unwrap();
    ///
    /// let values = vec![Value::Int(50), Value::Int(30), Value::Int(10)];
    /// assert_eq!(result, Value::from(vec![Value::from(values)]));
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn eval_for(&mut self,
                    var_name: &str,
                    start: &Node,
                    end: &Node,
                    step: Option<&Node>,
                    body: &Node,
                    discard_value: bool,
                    span: &Span,
                    context: &Rc<Context>)
                    -> EvalResult<Value> {
        let start = self.evaluate(start, context)?;
        let end = self.evaluate(end, context)?;
        let (Some(mut current), Some(end)) = (start.as_integer(), end.as_integer()) else {
            return Err(error(RuntimeErrorKind::ForLoopBounds, span, context).into());
        };

        let step = match step {
            Some(node) => match self.evaluate(node, context)?.as_integer() {
                Some(step) if step != 0 || current >= end => step,
                _ => return Err(error(RuntimeErrorKind::ForLoopStep, node.span(), context).into()),
            },
            None => 1,
        };

        let mut values = Vec::new();
        let mut iterations = 0;

        loop {
            let running = if step >= 0 { current < end } else { current > end };
            if !running {
                break;
            }
            count_iteration(&mut iterations, self.config.max_loop_iterations, span, context)?;

            context.assign(var_name, Value::Int(current))
                   .map_err(|kind| error(kind, span, context))?;

            match loop_step(self.evaluate(body, context))? {
                LoopStep::Value(value) if !discard_value => values.push(value),
                LoopStep::Value(_) | LoopStep::Continue => {},
                LoopStep::Break => break,
            }

            let Some(next) = current.checked_add(step) else {
                break;
            };
            current = next;
        }

        Ok(if discard_value { Value::Null } else { Value::List(values) })
    }
}
