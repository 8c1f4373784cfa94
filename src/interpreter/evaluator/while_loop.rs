use std::rc::Rc;

use crate::{
    ast::Node,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{LoopStep, count_iteration, loop_step},
        },
        value::core::Value,
    },
    source::Span,
};

impl Interpreter {
    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration. Signal handling
    /// matches `for`: `continue` skips the value of the current iteration,
    /// `break` leaves the loop and everything else propagates. The loop
    /// fails with `LoopLimit` once it exceeds the configured iteration
    /// count.
    pub fn eval_while(&mut self,
                      condition: &Node,
                      body: &Node,
                      discard_value: bool,
                      span: &Span,
                      context: &Rc<Context>)
                      -> EvalResult<Value> {
        let mut values = Vec::new();
        let mut iterations = 0;

        while self.evaluate(condition, context)?.is_true() {
            count_iteration(&mut iterations, self.config.max_loop_iterations, span, context)?;

            match loop_step(self.evaluate(body, context))? {
                LoopStep::Value(value) if !discard_value => values.push(value),
                LoopStep::Value(_) | LoopStep::Continue => {},
                LoopStep::Break => break,
            }
        }

        Ok(if discard_value { Value::Null } else { Value::List(values) })
    }
}
