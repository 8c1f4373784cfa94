use std::rc::Rc;

use crate::{ast::Node, interpreter::context::Context};

/// A callable value.
///
/// User functions and built-ins share one call contract: exact arity, a fresh
/// call context with one binding per parameter, then evaluation.
#[derive(Debug)]
pub enum Function {
    /// Defined with `func` in Sympl source.
    User(UserFunction),
    /// Implemented natively by the interpreter.
    Builtin(BuiltinFunction),
}

/// A function defined in Sympl source.
#[derive(Debug)]
pub struct UserFunction {
    /// Bound name, or `<anonymous>`.
    pub name:        String,
    /// Parameter names.
    pub params:      Vec<String>,
    /// The body node, shared with the AST.
    pub body:        Rc<Node>,
    /// The context the function was defined in; calls resolve free names
    /// through it.
    pub closure:     Rc<Context>,
    /// Whether the body's value is returned without an explicit `return`.
    pub auto_return: bool,
}

/// A native function from the built-in catalog.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFunction {
    /// Name the function is registered under.
    pub name:   &'static str,
    /// Parameter names, bound in the call context before the native
    /// implementation runs.
    pub params: &'static [&'static str],
}

impl Function {
    /// The function's name, as shown in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User(function) => &function.name,
            Self::Builtin(function) => function.name,
        }
    }

    /// The parameter names in declaration order.
    #[must_use]
    pub fn params(&self) -> Vec<&str> {
        match self {
            Self::User(function) => function.params.iter().map(String::as_str).collect(),
            Self::Builtin(function) => function.params.to_vec(),
        }
    }
}
