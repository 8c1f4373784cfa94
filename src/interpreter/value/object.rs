use std::rc::Rc;

use crate::{ast::Node, interpreter::context::Context};

/// An object template created by `object Name ... end`, or an instance
/// created from one with `new Name`.
///
/// Templates keep their member statements unevaluated. Every instantiation
/// evaluates them against a fresh member context; dotted access reads and
/// writes that context.
#[derive(Debug)]
pub struct Object {
    /// The template name.
    pub name:     String,
    /// Member statements, shared by the template and all its instances.
    pub body:     Rc<Node>,
    /// `false` for templates, `true` for instances.
    pub instance: bool,
    /// For templates, the defining context. For instances, the member
    /// context.
    pub context:  Rc<Context>,
}

impl Object {
    /// Creates a template.
    #[must_use]
    pub fn template(name: &str, body: &Rc<Node>, context: &Rc<Context>) -> Self {
        Self { name:     name.to_string(),
               body:     Rc::clone(body),
               instance: false,
               context:  Rc::clone(context), }
    }

    /// Creates an instance of this object whose members live in `members`.
    #[must_use]
    pub fn instantiate(&self, members: Rc<Context>) -> Self {
        Self { name:     self.name.clone(),
               body:     Rc::clone(&self.body),
               instance: true,
               context:  members, }
    }
}
