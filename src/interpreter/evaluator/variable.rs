use std::rc::Rc;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::error,
        },
        value::core::Value,
    },
    source::Span,
};

impl Interpreter {
    /// Reads a variable.
    ///
    /// The name is resolved through the context's symbol table chain. The
    /// returned value is a copy; changing it never changes the binding.
    ///
    /// # Errors
    /// `UndefinedVariable` if no table in the chain binds `name`.
    pub fn eval_var_access(name: &str, span: &Span, context: &Context) -> EvalResult<Value> {
        context.lookup(name).ok_or_else(|| {
                                error(RuntimeErrorKind::UndefinedVariable(name.to_string()),
                                      span,
                                      context).into()
                            })
    }

    /// Evaluates `var name = value` and `name = value`.
    ///
    /// Assignment always writes the current context's own table. A binding
    /// of the same name in an outer scope is shadowed, never changed.
    ///
    /// # Returns
    /// The assigned value.
    ///
    /// # Errors
    /// `ImmutableBinding` if the local binding is immutable.
    pub fn eval_var_assign(&mut self,
                           name: &str,
                           value: &Node,
                           span: &Span,
                           context: &Rc<Context>)
                           -> EvalResult<Value> {
        let value = self.evaluate(value, context)?;
        context.assign(name, value.clone())
               .map_err(|kind| error(kind, span, context))?;
        Ok(value)
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
    fn assignment_yields_the_value() {
        assert_eq!(eval("var a = b = 3\na + b").unwrap(), Value::Int(6));
    }

    #[test]
    fn undefined_names_are_errors() {
        assert_eq!(runtime_error("var y = x + 1"),
                   RuntimeErrorKind::UndefinedVariable("x".into()));
    }

    #[test]
    fn values_are_copied_on_read() {
        assert_eq!(eval("var a = [1]\nvar b = a\nb = b + 2\na").unwrap(),
                   Value::from(vec![Value::Int(1)]));
    }
}
