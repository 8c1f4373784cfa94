use std::rc::Rc;

use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::at,
        },
        value::core::Value,
    },
    source::Span,
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// `-x` is evaluated as `x * -1`, so it is defined exactly where
    /// multiplication by an integer is: numbers negate, strings and lists
    /// fail as a negative repetition.
    pub fn eval_unary(&mut self,
                      op: UnaryOperator,
                      operand: &Node,
                      span: &Span,
                      context: &Rc<Context>)
                      -> EvalResult<Value> {
        let value = self.evaluate(operand, context)?;
        at(value.unary(op), span, context)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        error::RuntimeErrorKind,
        interpreter::{
            evaluator::core::tests::{eval, runtime_error},
            value::core::Value,
        },
    };

    #[test]
    fn negation_multiplies_by_minus_one() {
        assert_eq!(eval("-(2 + 3)").unwrap(), Value::Int(-5));
        assert_eq!(eval("--1.5").unwrap(), Value::Float(1.5));
        assert_eq!(runtime_error("-\"abc\""), RuntimeErrorKind::NegativeRepetition(-1));
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(eval("!\"\"").unwrap(), Value::Int(1));
        assert_eq!(eval("not [0]").unwrap(), Value::Int(0));
        assert_eq!(eval("+7").unwrap(), Value::Int(7));
    }
}
