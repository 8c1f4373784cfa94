use std::rc::Rc;

use crate::{
    ast::{BinaryOperator, Node},
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
    /// Evaluates a binary operation.
    ///
    /// Both operands are always evaluated, left first; `and` and `or` do not
    /// short-circuit. The operator is then applied as a method of the left
    /// value with the right value as argument:
    /// - `+ - * / ^` go to [`Value::arithmetic`],
    /// - comparisons go to [`Value::compare`],
    /// - `and`/`or` go to [`Value::logical`].
    ///
    /// # Parameters
    /// - `left`: Left operand node.
    /// - `op`: The operator.
    /// - `right`: Right operand node.
    /// - `span`: Span of the whole operation, used for errors.
    /// - `context`: Evaluation context.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Example
    /// ```
    /// use sympl::{
    ///     config::InterpreterConfig,
    ///     interpreter::{evaluator::core::Interpreter, parser::parse_source, value::core::Value},
    /// };
    ///
    /// let mut interpreter = Interpreter::new(InterpreterConfig::default());
    /// let program = parse_source("<doc>", "\"ab\" * 2 == \"abab\"").unwrap();
    /// let globals = interpreter.globals().clone();
    ///
    /// let result = interpreter.execute(&program, &globals).unwrap();
    /// assert_eq!(result, Value::from(vec![Value::Int(1)]));
    /// ```
    pub fn eval_binary(&mut self,
                       left: &Node,
                       op: BinaryOperator,
                       right: &Node,
                       span: &Span,
                       context: &Rc<Context>)
                       -> EvalResult<Value> {
        let lhs = self.evaluate(left, context)?;
        let rhs = self.evaluate(right, context)?;

        let result = match op {
            BinaryOperator::And | BinaryOperator::Or => lhs.logical(op, &rhs),
            _ if op.is_comparison() => lhs.compare(op, &rhs),
            _ => lhs.arithmetic(op, &rhs),
        };
        at(result, span, context)
    }
}
