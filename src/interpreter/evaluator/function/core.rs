use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeErrorKind,
    interpreter::{
        context::Context,
        evaluator::{
            core::{EvalResult, Interpreter, Signal},
            function::{input, list, module, predicates, print, string, time},
            utils::{error, stray_signal_error},
        },
        value::{
            core::Value,
            function::{BuiltinFunction, Function, UserFunction},
        },
    },
    source::Span,
};

/// Type alias for built-in function handlers.
///
/// A built-in receives the interpreter and the call, whose context already
/// binds every declared parameter to its argument.
pub type BuiltinFn = fn(&mut Interpreter, &BuiltinCall<'_>) -> EvalResult<Value>;

/// A running call of a built-in function.
pub struct BuiltinCall<'a> {
    /// The built-in's name.
    pub name:    &'static str,
    /// The call context holding the arguments.
    pub context: Rc<Context>,
    /// Span of the call expression.
    pub span:    &'a Span,
}

impl BuiltinCall<'_> {
    /// The argument bound to `param`.
    #[must_use]
    pub fn arg(&self, param: &str) -> Value {
        self.context.lookup_local(param).unwrap_or(Value::Null)
    }

    /// Wraps an error in an exception value raised at the call site.
    #[must_use]
    pub fn exception(&self, kind: RuntimeErrorKind) -> Value {
        Value::Exception(Rc::new(error(kind, self.span, &self.context)))
    }

    /// The exception returned for an argument of the wrong type.
    #[must_use]
    pub fn invalid_argument(&self, param: &str, expected: &str, found: &Value) -> Value {
        self.exception(RuntimeErrorKind::InvalidArgument { function: self.name.to_string(),
                                                           param:    param.to_string(),
                                                           expected: expected.to_string(),
                                                           found:    found.type_name()
                                                                          .to_string(), })
    }

    /// A runtime error raised at the call site.
    #[must_use]
    pub fn error(&self, kind: RuntimeErrorKind) -> Signal {
        Signal::Error(error(kind, self.span, &self.context))
    }
}

/// Defines built-in functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the declared parameter names,
/// - a function pointer implementing the built-in.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of built-in names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:   &'static str,
            params: &'static [&'static str],
            func:   BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        /// Names of all built-in functions, in registration order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "Print"      => { params: ["value"],          func: print::print },
    "PrintRet"   => { params: ["value"],          func: print::print_ret },
    "Input"      => { params: [],                 func: input::input },
    "InputInt"   => { params: [],                 func: input::input_int },
    "IsNumber"   => { params: ["value"],          func: predicates::is_number },
    "IsString"   => { params: ["value"],          func: predicates::is_string },
    "IsList"     => { params: ["value"],          func: predicates::is_list },
    "IsFunction" => { params: ["value"],          func: predicates::is_function },
    "Append"     => { params: ["list", "value"],  func: list::append },
    "Remove"     => { params: ["list", "index"],  func: list::remove },
    "Extend"     => { params: ["listA", "listB"], func: list::extend },
    "Length"     => { params: ["value"],          func: string::length },
    "Str"        => { params: ["value"],          func: string::stringify },
    "Time"       => { params: [],                 func: time::time },
    "Export"     => { params: ["value"],          func: module::export },
    "Include"    => { params: ["file"],           func: module::include },
    "Run"        => { params: ["file"],           func: module::run },
}

/// Binds every built-in function in `globals`.
///
/// The bindings are mutable: a script may shadow a built-in with its own
/// definition.
pub fn register_builtins(globals: &Context) {
    for def in BUILTIN_TABLE {
        let function = BuiltinFunction { name:   def.name,
                                         params: def.params, };
        globals.define(def.name, Value::Function(Rc::new(Function::Builtin(function))), true);
    }
}

/// Checks that a call passes exactly as many arguments as `function`
/// declares.
///
/// # Errors
/// `TooManyArgs` or `TooFewArgs` with the size of the difference.
pub fn check_arity(function: &Function, count: usize) -> Result<(), RuntimeErrorKind> {
    let expected = function.params().len();
    let name = function.name().to_string();

    if count > expected {
        return Err(RuntimeErrorKind::TooManyArgs { count: count - expected,
                                                   name });
    }
    if count < expected {
        return Err(RuntimeErrorKind::TooFewArgs { count: expected - count,
                                                  name });
    }
    Ok(())
}

impl Interpreter {
    /// Evaluates a function definition.
    ///
    /// The new function closes over `context`. A named function is also bound
    /// in `context` right away, so its body can call itself.
    ///
    /// # Returns
    /// The function value.
    pub fn eval_func_def(name: Option<&str>,
                         params: &[String],
                         body: &Rc<Node>,
                         auto_return: bool,
                         span: &Span,
                         context: &Rc<Context>)
                         -> EvalResult<Value> {
        let function = UserFunction { name: name.unwrap_or("<anonymous>").to_string(),
                                      params: params.to_vec(),
                                      body: Rc::clone(body),
                                      closure: Rc::clone(context),
                                      auto_return };
        let value = Value::Function(Rc::new(Function::User(function)));

        if let Some(name) = name {
            context.assign(name, value.clone())
                   .map_err(|kind| error(kind, span, context))?;
        }
        Ok(value)
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// The first error stops evaluation before the function runs.
    pub fn eval_call(&mut self,
                     callee: &Node,
                     arguments: &[Node],
                     span: &Span,
                     context: &Rc<Context>)
                     -> EvalResult<Value> {
        let callee = self.evaluate(callee, context)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.evaluate(argument, context)?);
        }

        self.call_function(&callee, args, span, context)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// User functions and built-ins share the same contract: the arity must
    /// match exactly, then a fresh call context binds each parameter to its
    /// argument and the function runs in it.
    ///
    /// # Parameters
    /// - `callee`: The value being called.
    /// - `args`: Argument values in parameter order.
    /// - `span`: Span of the call expression.
    /// - `context`: The caller's context.
    ///
    /// # Errors
    /// - `NotCallable` if `callee` is not a function.
    /// - `TooManyArgs`/`TooFewArgs` on an arity mismatch; the body does not
    ///   run.
    /// - `RecursionLimit` when the configured call depth is exceeded.
    /// - Any error raised by the function.
    pub fn call_function(&mut self,
                         callee: &Value,
                         args: Vec<Value>,
                         span: &Span,
                         context: &Rc<Context>)
                         -> EvalResult<Value> {
        let Value::Function(function) = callee else {
            return Err(error(RuntimeErrorKind::NotCallable(callee.repr()), span, context).into());
        };

        check_arity(function, args.len()).map_err(|kind| error(kind, span, context))?;

        self.enter(span, context)?;
        let result = match function.as_ref() {
            Function::User(user) => self.call_user_function(user, args, span, context),
            Function::Builtin(builtin) => self.call_builtin(*builtin, args, span, context),
        };
        self.leave();
        result
    }

    /// Runs a user function's body in a new call context.
    ///
    /// The call context is entered from the caller, which is what tracebacks
    /// show, but its symbol table falls back to the closure's table: free
    /// names resolve where the function was defined, never in the caller.
    fn call_user_function(&mut self,
                          function: &UserFunction,
                          args: Vec<Value>,
                          span: &Span,
                          context: &Rc<Context>)
                          -> EvalResult<Value> {
        trace!(function = %function.name, depth = self.call_depth, "calling function");

        let call_context = Context::nested(function.name.clone(),
                                           context,
                                           span.clone(),
                                           Some(Rc::clone(&function.closure.symbols)));
        for (param, arg) in function.params.iter().zip(args) {
            call_context.define(param, arg, true);
        }

        match self.evaluate(&function.body, &call_context) {
            Ok(value) if function.auto_return => Ok(value),
            Ok(_) => Ok(Value::Null),
            Err(Signal::Return(value)) => Ok(value),
            Err(signal) => Err(stray_signal_error(signal, span, &call_context).into()),
        }
    }

    /// Runs a built-in function.
    ///
    /// The call context has no parent table: a built-in only sees its own
    /// parameters.
    fn call_builtin(&mut self,
                    builtin: BuiltinFunction,
                    args: Vec<Value>,
                    span: &Span,
                    context: &Rc<Context>)
                    -> EvalResult<Value> {
        let Some(def) = BUILTIN_TABLE.iter().find(|def| def.name == builtin.name) else {
            return Err(error(RuntimeErrorKind::NoMethodDefined(builtin.name.to_string()),
                             span,
                             context).into());
        };

        trace!(function = builtin.name, "calling built-in");

        let call_context = Context::nested(builtin.name, context, span.clone(), None);
        for (param, arg) in builtin.params.iter().zip(args) {
            call_context.define(param, arg, true);
        }

        let call = BuiltinCall { name: builtin.name,
                                 context: call_context,
                                 span };
        (def.func)(self, &call)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::InterpreterConfig,
        error::SymplError,
        interpreter::evaluator::core::tests::{eval, interpreter_with_input, runtime_error},
    };

    #[test]
    fn every_builtin_is_registered() {
        let globals = Interpreter::create_globals();
        for name in BUILTIN_FUNCTIONS {
            assert!(matches!(globals.lookup(name), Some(Value::Function(_))), "{name} missing");
        }
        assert_eq!(BUILTIN_FUNCTIONS.len(), 17);
    }

    #[test]
    fn arrow_functions_return_their_body() {
        assert_eq!(eval("func add(a, b) -> a + b\nadd(2, 3)").unwrap(), Value::Int(5));
        assert_eq!(eval("var square = func(x) -> x * x\nsquare(4)").unwrap(), Value::Int(16));
    }

    #[test]
    fn block_functions_need_return() {
        assert_eq!(eval("func f()\n  1\nend\nf()").unwrap(), Value::Null);
        assert_eq!(eval("func f(x)\n  if x > 0 then return \"pos\"\n  return \"neg\"\nend\nf(-1)")
                       .unwrap(),
                   Value::from("neg"));
    }

    #[test]
    fn arity_is_exact() {
        assert_eq!(runtime_error("func f(a, b) -> a\nf(1)"),
                   RuntimeErrorKind::TooFewArgs { count: 1,
                                                  name:  "f".into(), });
        assert_eq!(runtime_error("func f(a, b) -> a\nf(1, 2, 3)"),
                   RuntimeErrorKind::TooManyArgs { count: 1,
                                                   name:  "f".into(), });
    }

    #[test]
    fn arity_errors_do_not_run_the_body() {
        let (mut interpreter, output) = interpreter_with_input("");
        let result = interpreter.run("<test>", "func f(a, b)\n  Print(\"ran\")\nend\nf(1)");
        assert!(result.is_err());
        assert_eq!(output.contents(), "");
    }

    #[test]
    fn free_names_resolve_in_the_closure() {
        let text = "var x = \"outer\"\nfunc show() -> x\nfunc caller()\n  var x = \
                    \"caller\"\n  return show()\nend\ncaller()";
        assert_eq!(eval(text).unwrap(), Value::from("outer"));
    }

    #[test]
    fn assignment_in_a_function_shadows() {
        assert_eq!(eval("var x = 1\nfunc f()\n  x = 2\n  return x\nend\n[f(), x]").unwrap(),
                   Value::from(vec![Value::Int(2), Value::Int(1)]));
    }

    #[test]
    fn closures_capture_their_defining_call() {
        let text = "func adder(n) -> func(x) -> x + n\nvar add2 = adder(2)\nadd2(40)";
        assert_eq!(eval(text).unwrap(), Value::Int(42));
    }

    #[test]
    fn recursion_works_and_is_bounded() {
        let text = "func count(n) -> if n == 0 then 0 else 1 + count(n - 1)\ncount(300)";
        assert_eq!(eval(text).unwrap(), Value::Int(300));

        let config = InterpreterConfig::default().with_max_call_depth(20);
        let mut interpreter = Interpreter::new(config);
        let Err(SymplError::Runtime(error)) = interpreter.run("<test>", "func f() -> f()\nf()")
        else {
            panic!("expected the recursion to be stopped");
        };
        assert_eq!(error.kind, RuntimeErrorKind::RecursionLimit(20));
        assert_eq!(interpreter.call_depth, 0);
    }

    #[test]
    fn loop_signals_do_not_cross_functions() {
        assert_eq!(runtime_error("func f()\n  break\nend\nfor i = 0 to 3 then f()"),
                   RuntimeErrorKind::BreakOutsideLoop);
    }

    #[test]
    fn only_functions_are_callable() {
        assert_eq!(runtime_error("var x = 3\nx()"), RuntimeErrorKind::NotCallable("3".into()));
        assert_eq!(runtime_error("\"f\"(1)"), RuntimeErrorKind::NotCallable("\"f\"".into()));
    }

    #[test]
    fn builtins_are_ordinary_values() {
        assert_eq!(eval("var show = Str\nshow(1.0)").unwrap(), Value::from("1.0"));
        assert_eq!(eval("func Str(x) -> \"mine\"\nStr(1)").unwrap(), Value::from("mine"));
    }
}
