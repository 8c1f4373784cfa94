use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter},
            utils::{error, stray_signal_error},
        },
        value::{core::Value, object::Object},
    },
    source::Span,
};

impl Interpreter {
    /// Evaluates `object Name ... end`.
    ///
    /// Binds `Name` to a template in the current context. The member
    /// statements are not evaluated until the template is instantiated.
    pub fn eval_object_def(name: &str,
                           body: &Rc<Node>,
                           span: &Span,
                           context: &Rc<Context>)
                           -> EvalResult<Value> {
        let template = Value::Object(Rc::new(Object::template(name, body, context)));
        context.assign(name, template.clone())
               .map_err(|kind| error(kind, span, context))?;
        Ok(template)
    }

    /// Evaluates `new Name`.
    ///
    /// Creates a member context entered from the current one and evaluates
    /// the template's member statements in it. Names the members do not
    /// define themselves resolve through the instantiating context.
    ///
    /// # Errors
    /// - `UndefinedVariable` if `Name` is not bound.
    /// - `NotAnObject` if it is bound to something other than an object.
    /// - Any error raised by a member statement.
    pub fn eval_new_object(&mut self,
                           name: &str,
                           span: &Span,
                           context: &Rc<Context>)
                           -> EvalResult<Value> {
        let value = context.lookup(name).ok_or_else(|| {
                                            error(RuntimeErrorKind::UndefinedVariable(name.to_string()),
                                                  span,
                                                  context)
                                        })?;
        let Value::Object(template) = value else {
            return Err(error(RuntimeErrorKind::NotAnObject(name.to_string()), span, context).into());
        };

        trace!(object = name, "instantiating object");
        let members = Context::nested(format!("<object {name}>"),
                                      context,
                                      span.clone(),
                                      Some(Rc::clone(&context.symbols)));

        self.enter(span, context)?;
        let result = self.evaluate(&template.body, &members);
        self.leave();

        if let Err(signal) = result {
            return Err(stray_signal_error(signal, span, &members).into());
        }
        Ok(Value::Object(Rc::new(template.instantiate(members))))
    }

    /// Evaluates `object.member` and `object.member = value`.
    ///
    /// `object` must name an instance. Reads look only at the instance's own
    /// members. Writes evaluate the value in the current context and store it
    /// in the instance, where every copy of the instance sees it.
    ///
    /// # Errors
    /// - `UndefinedVariable` if `object` is not bound.
    /// - `NotAnInstance` if it is not bound to an object instance.
    /// - `UnknownMember` when reading a member the instance does not have.
    pub fn eval_scope_access(&mut self,
                             object: &str,
                             member: &str,
                             value: Option<&Node>,
                             span: &Span,
                             context: &Rc<Context>)
                             -> EvalResult<Value> {
        let instance = match context.lookup(object) {
            Some(Value::Object(instance)) if instance.instance => instance,
            Some(_) => {
                return Err(error(RuntimeErrorKind::NotAnInstance(object.to_string()),
                                 span,
                                 context).into());
            },
            None => {
                return Err(error(RuntimeErrorKind::UndefinedVariable(object.to_string()),
                                 span,
                                 context).into());
            },
        };

        if let Some(node) = value {
            let value = self.evaluate(node, context)?;
            instance.context
                    .assign(member, value.clone())
                    .map_err(|kind| error(kind, span, context))?;
            return Ok(value);
        }

        instance.context.lookup_local(member).ok_or_else(|| {
            error(RuntimeErrorKind::UnknownMember { object: object.to_string(),
                                                    member: member.to_string(), },
                  span,
                  context).into()
        })
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

    const POINT: &str = "object Point\n  var x = 1\n  var y = 2\n  func sum() -> x + y\nend\n";

    #[test]
    fn members_are_initialized_per_instance() {
        let text = format!("{POINT}var a = new Point\nvar b = new Point\na.x = 10\n[a.x, b.x]");
        assert_eq!(eval(&text).unwrap(), Value::from(vec![Value::Int(10), Value::Int(1)]));
    }

    #[test]
    fn methods_see_the_instance_members() {
        let text = format!("{POINT}var p = new Point\np.y = 5\np.sum()");
        assert_eq!(eval(&text).unwrap(), Value::Int(6));
    }

    #[test]
    fn copies_of_an_instance_share_members() {
        let text = format!("{POINT}var p = new Point\nvar q = p\nq.x = 7\np.x");
        assert_eq!(eval(&text).unwrap(), Value::Int(7));
    }

    #[test]
    fn member_initializers_see_the_instantiating_context() {
        let text = "var start = 3\nobject Counter\n  var count = start\nend\nvar c = new Counter\nc.count";
        assert_eq!(eval(text).unwrap(), Value::Int(3));
    }

    #[test]
    fn access_errors() {
        assert_eq!(runtime_error(&format!("{POINT}var p = new Point\np.z")),
                   RuntimeErrorKind::UnknownMember { object: "p".into(),
                                                     member: "z".into(), });
        assert_eq!(runtime_error(&format!("{POINT}Point.x")),
                   RuntimeErrorKind::NotAnInstance("Point".into()));
        assert_eq!(runtime_error("var n = 1\nnew n"), RuntimeErrorKind::NotAnObject("n".into()));
        assert_eq!(runtime_error("object Bad\n  return 1\nend\nnew Bad"),
                   RuntimeErrorKind::ReturnOutsideFunction);
    }
}
