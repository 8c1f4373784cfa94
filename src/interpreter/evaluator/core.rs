use std::{
    io::{self, BufRead, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::Node,
    config::InterpreterConfig,
    error::{RuntimeError, RuntimeErrorKind, SymplError},
    interpreter::{
        context::Context,
        evaluator::{
            function::core::register_builtins,
            utils::{ensure_sufficient_stack, error, stray_signal_error},
        },
        parser::parse_source,
        value::core::Value,
    },
    source::Span,
};

/// Why evaluation of a node stopped early.
///
/// Every evaluation step returns `Err(signal)` instead of a value when it
/// cannot finish normally, and `?` carries the signal outwards until a
/// construct that handles it: loops consume `Break` and `Continue`, calls
/// consume `Return`. Errors travel all the way to the caller of
/// [`Interpreter::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Evaluation failed.
    Error(RuntimeError),
    /// `return` ran, carrying the returned value.
    Return(Value),
    /// `break` ran at the given position.
    Break(Span),
    /// `continue` ran at the given position.
    Continue(Span),
}

impl From<RuntimeError> for Signal {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// [`Signal`] that interrupted them.
pub type EvalResult<T> = Result<T, Signal>;

/// Runs Sympl programs.
///
/// An interpreter owns its global context, its configuration and the streams
/// `Print` and `Input` talk to. The global context survives between calls to
/// [`run`](Self::run), which is how the REPL keeps variables alive from one
/// line to the next.
///
/// ## Usage
///
/// ```
/// use sympl::{
///     config::{CapturedOutput, InterpreterConfig},
///     interpreter::{evaluator::core::Interpreter, value::core::Value},
/// };
///
/// let output = CapturedOutput::default();
/// let mut interpreter =
///     Interpreter::with_io(InterpreterConfig::default(), Box::new(output.clone()), Box::new(&b""[..]));
///
/// interpreter.run("<stdin>", "var x = 2 + 3 * 4").unwrap();
/// let result = interpreter.run("<stdin>", "Print(x); x - 4").unwrap();
///
/// assert_eq!(output.contents(), "14\n");
/// assert_eq!(result, Value::from(vec![Value::Null, Value::Int(10)]));
/// ```
pub struct Interpreter {
    pub(crate) config:     InterpreterConfig,
    pub(crate) output:     Box<dyn Write>,
    pub(crate) input:      Box<dyn BufRead>,
    globals:               Rc<Context>,
    pub(crate) call_depth: usize,
    /// Value passed to `Export` by the script currently running.
    pub(crate) export:     Option<Value>,
}

impl Interpreter {
    /// Creates an interpreter that prints to stdout and reads from stdin.
    #[must_use]
    pub fn new(config: InterpreterConfig) -> Self {
        Self::with_io(config, Box::new(io::stdout()), Box::new(io::stdin().lock()))
    }

    /// Creates an interpreter with custom output and input streams.
    ///
    /// # Parameters
    /// - `config`: Limits and the base directory for `Run`/`Include`.
    /// - `output`: Receives everything `Print` writes.
    /// - `input`: Lines read by `Input` and `InputInt`.
    #[must_use]
    pub fn with_io(config: InterpreterConfig,
                   output: Box<dyn Write>,
                   input: Box<dyn BufRead>)
                   -> Self {
        Self { config,
               output,
               input,
               globals: Self::create_globals(),
               call_depth: 0,
               export: None }
    }

    /// The global context programs run in.
    #[must_use]
    pub const fn globals(&self) -> &Rc<Context> {
        &self.globals
    }

    /// Creates a fresh global context.
    ///
    /// It holds the immutable constants `null`, `true` and `false` and one
    /// mutable binding per built-in function.
    #[must_use]
    pub fn create_globals() -> Rc<Context> {
        let globals = Context::root("<program>");
        globals.define("null", Value::Null, false);
        globals.define("true", Value::from(true), false);
        globals.define("false", Value::from(false), false);
        register_builtins(&globals);
        globals
    }

    /// Lexes, parses and evaluates `text` in the global context.
    ///
    /// The program is a list of statements, so on success the result is a
    /// `List` with one value per top-level statement. A top-level `return`
    /// stops the program early and its value becomes the result instead.
    ///
    /// # Parameters
    /// - `file_name`: Shown in error messages and tracebacks.
    /// - `text`: The source code.
    ///
    /// # Errors
    /// The first lexing, parsing or runtime error.
    pub fn run(&mut self, file_name: &str, text: &str) -> Result<Value, SymplError> {
        let globals = Rc::clone(&self.globals);
        self.run_in(file_name, text, &globals)
    }

    /// Like [`run`](Self::run), but evaluates in `context`.
    ///
    /// # Errors
    /// The first lexing, parsing or runtime error.
    pub fn run_in(&mut self,
                  file_name: &str,
                  text: &str,
                  context: &Rc<Context>)
                  -> Result<Value, SymplError> {
        debug!(file = file_name, context = %context.name, "running script");
        let root = parse_source(file_name, text)?;
        Ok(self.execute(&root, context)?)
    }

    /// Evaluates a parsed program in `context`.
    ///
    /// Control signals that reach the top level are resolved here: `return`
    /// yields its value, `break` and `continue` are errors.
    ///
    /// # Errors
    /// The runtime error that stopped the program.
    pub fn execute(&mut self, root: &Node, context: &Rc<Context>) -> Result<Value, RuntimeError> {
        match self.evaluate(root, context) {
            Ok(value) | Err(Signal::Return(value)) => Ok(value),
            Err(signal) => Err(stray_signal_error(signal, root.span(), context)),
        }
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for node evaluation; it dispatches on
    /// the node variant. Each variant's semantics live in their own module:
    /// operators in `binary`/`unary`, `if` in `conditional`, loops in
    /// `for_loop`/`while_loop`, variables in `variable`, objects in `object`
    /// and functions in `function`.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `context`: The context names are resolved in and assigned to.
    ///
    /// # Returns
    /// The node's value, or the signal that interrupted it.
    pub fn evaluate(&mut self, node: &Node, context: &Rc<Context>) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.dispatch(node, context))
    }

    fn dispatch(&mut self, node: &Node, context: &Rc<Context>) -> EvalResult<Value> {
        match node {
            Node::Literal { value, .. } => Ok(Value::from(value)),
            Node::UnaryOp { op, operand, span } => self.eval_unary(*op, operand, span, context),
            Node::BinaryOp { left,
                             op,
                             right,
                             span, } => self.eval_binary(left, *op, right, span, context),
            Node::List { elements, .. } => self.eval_list(elements, context),
            Node::If { cases, else_case, .. } => {
                self.eval_if(cases, else_case.as_deref(), context)
            },
            Node::For { var_name,
                        start,
                        end,
                        step,
                        body,
                        discard_value,
                        span, } => self.eval_for(var_name,
                                                 start,
                                                 end,
                                                 step.as_deref(),
                                                 body,
                                                 *discard_value,
                                                 span,
                                                 context),
            Node::While { condition,
                          body,
                          discard_value,
                          span, } => self.eval_while(condition, body, *discard_value, span, context),
            Node::VarAccess { name, span } => Self::eval_var_access(name, span, context),
            Node::VarAssign { name, value, span } => {
                self.eval_var_assign(name, value, span, context)
            },
            Node::ScopeAccess { object,
                                member,
                                value,
                                span, } => {
                self.eval_scope_access(object, member, value.as_deref(), span, context)
            },
            Node::FuncDef { name,
                            params,
                            body,
                            auto_return,
                            span, } => {
                Self::eval_func_def(name.as_deref(), params, body, *auto_return, span, context)
            },
            Node::Call { callee,
                         arguments,
                         span, } => self.eval_call(callee, arguments, span, context),
            Node::ObjectDef { name, body, span } => {
                Self::eval_object_def(name, body, span, context)
            },
            Node::NewObject { name, span } => self.eval_new_object(name, span, context),
            Node::Return { value, .. } => {
                let value = match value {
                    Some(node) => self.evaluate(node, context)?,
                    None => Value::Null,
                };
                Err(Signal::Return(value))
            },
            Node::Break { span } => Err(Signal::Break(span.clone())),
            Node::Continue { span } => Err(Signal::Continue(span.clone())),
        }
    }

    /// Evaluates a list literal or a statement sequence, left to right.
    ///
    /// The first signal stops evaluation of the remaining elements.
    fn eval_list(&mut self, elements: &[Node], context: &Rc<Context>) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.evaluate(element, context)?);
        }
        Ok(Value::List(values))
    }

    /// Enters a function call or object body, failing when the configured
    /// depth is reached.
    pub(crate) fn enter(&mut self, span: &Span, context: &Context) -> EvalResult<()> {
        if self.call_depth >= self.config.max_call_depth {
            debug!(depth = self.call_depth, "call depth limit reached");
            return Err(error(RuntimeErrorKind::RecursionLimit(self.config.max_call_depth),
                             span,
                             context).into());
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Leaves a function call or object body entered with [`Self::enter`].
    pub(crate) fn leave(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::CapturedOutput;

    /// Creates an interpreter reading `input` and writing into the returned
    /// buffer.
    pub fn interpreter_with_input(input: &'static str) -> (Interpreter, CapturedOutput) {
        let output = CapturedOutput::default();
        let interpreter = Interpreter::with_io(InterpreterConfig::default(),
                                               Box::new(output.clone()),
                                               Box::new(input.as_bytes()));
        (interpreter, output)
    }

    /// Runs `text` and returns the value of its last statement.
    pub fn eval(text: &str) -> Result<Value, SymplError> {
        let (mut interpreter, _) = interpreter_with_input("");
        match interpreter.run("<test>", text)? {
            Value::List(mut values) => Ok(values.pop().unwrap_or(Value::Null)),
            value => Ok(value),
        }
    }

    /// Runs `text` and returns the kind of the runtime error it fails with.
    pub fn runtime_error(text: &str) -> RuntimeErrorKind {
        match eval(text) {
            Err(SymplError::Runtime(error)) => error.kind,
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn program_yields_one_value_per_statement() {
        let (mut interpreter, _) = interpreter_with_input("");
        assert_eq!(interpreter.run("<test>", "1\n\"a\"; 2.5").unwrap(),
                   Value::from(vec![Value::Int(1), "a".into(), Value::Float(2.5)]));
    }

    #[test]
    fn top_level_return_stops_the_program() {
        let (mut interpreter, output) = interpreter_with_input("");
        let result = interpreter.run("<test>", "Print(1)\nreturn 7\nPrint(2)").unwrap();
        assert_eq!(result, Value::Int(7));
        assert_eq!(output.contents(), "1\n");
    }

    #[test]
    fn top_level_break_is_an_error() {
        assert_eq!(runtime_error("break"), RuntimeErrorKind::BreakOutsideLoop);
        assert_eq!(runtime_error("1; continue"), RuntimeErrorKind::ContinueOutsideLoop);
    }

    #[test]
    fn globals_persist_between_runs() {
        let (mut interpreter, _) = interpreter_with_input("");
        interpreter.run("<stdin>", "var counter = 1").unwrap();
        interpreter.run("<stdin>", "counter = counter + 1").unwrap();
        assert_eq!(interpreter.globals().lookup("counter"), Some(Value::Int(2)));
    }

    #[test]
    fn constants_are_immutable() {
        assert_eq!(runtime_error("true = 0"), RuntimeErrorKind::ImmutableBinding("true".into()));
        assert_eq!(runtime_error("var null = 1"),
                   RuntimeErrorKind::ImmutableBinding("null".into()));
        assert_eq!(eval("false").unwrap(), Value::Int(0));
    }

    #[test]
    fn precedence_is_respected() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), Value::Int(14));
        assert_eq!(eval("(2 + 3) * 4").unwrap(), Value::Int(20));
        assert_eq!(eval("2 ^ 3 ^ 2").unwrap(), Value::Int(512));
    }

    #[test]
    fn runtime_errors_carry_a_traceback() {
        let Err(SymplError::Runtime(error)) = eval("func f(x) -> x / 0\nf(1)") else {
            panic!("expected a runtime error");
        };
        assert_eq!(error.kind, RuntimeErrorKind::DivisionByZero);
        let contexts: Vec<_> = error.traceback.iter().map(|frame| frame.context.as_str()).collect();
        assert_eq!(contexts, ["<program>", "f"]);
        assert_eq!(error.traceback[0].line, 2);
        assert_eq!(error.traceback[1].line, 1);
    }
}
