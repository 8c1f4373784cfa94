use std::fmt::Write as _;

use thiserror::Error;

use crate::source::Span;

/// An error raised while evaluating the AST.
///
/// Besides the failing source range, a runtime error carries the chain of
/// contexts (function calls, object instantiations, module runs) that were
/// active when it was raised, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Runtime Error at {span}: {kind}")]
pub struct RuntimeError {
    /// What went wrong.
    pub kind:      RuntimeErrorKind,
    /// The node that failed.
    pub span:      Span,
    /// Active contexts, outermost first.
    pub traceback: Vec<TraceFrame>,
}

/// One entry of a runtime traceback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// File the frame's position belongs to.
    pub file:    String,
    /// 1-based line inside `file`.
    pub line:    usize,
    /// Human readable name of the context, such as `<program>` or a function
    /// name.
    pub context: String,
}

impl RuntimeError {
    /// Creates a runtime error with the given traceback.
    #[must_use]
    pub const fn new(kind: RuntimeErrorKind, span: Span, traceback: Vec<TraceFrame>) -> Self {
        Self { kind,
               span,
               traceback }
    }

    /// Renders the traceback, the error line and the offending source.
    ///
    /// # Example
    /// ```text
    /// Traceback (most recent call last):
    ///   File <stdin>, line 1, in <program>
    /// Runtime Error at Line 1 (9, 14): Division by zero
    ///
    /// var x = 1 / 0
    ///         ^^^^^
    /// ```
    #[must_use]
    pub fn report(&self) -> String {
        let mut report = String::from("Traceback (most recent call last):\n");
        for frame in &self.traceback {
            let _ = writeln!(report,
                             "  File {}, line {}, in {}",
                             frame.file, frame.line, frame.context);
        }
        let _ = write!(report, "{self}\n\n{}", self.span.underline());
        report
    }
}

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// Tried to read a name with no binding in the context chain.
    #[error("'{0}' is not defined")]
    UndefinedVariable(String),
    /// Tried to reassign an immutable binding such as `null` or `true`.
    #[error("'{0}' is not a mutable value")]
    ImmutableBinding(String),
    /// A call passed more arguments than the function declares.
    #[error("{count} too many args passed into '{name}'")]
    TooManyArgs {
        /// Number of surplus arguments.
        count: usize,
        /// Function name.
        name:  String,
    },
    /// A call passed fewer arguments than the function declares.
    #[error("{count} too few args passed into '{name}'")]
    TooFewArgs {
        /// Number of missing arguments.
        count: usize,
        /// Function name.
        name:  String,
    },
    /// Integer or float division by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// An operator was applied to operand types that do not support it.
    #[error("Illegal operation: {0}")]
    IllegalOperation(String),
    /// A list index outside `0..length`.
    #[error("Index out of range: {index} is not within a list of length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index:  i64,
        /// Length of the list.
        length: usize,
    },
    /// String or list repetition with a negative count.
    #[error("Cannot repeat a value {0} times")]
    NegativeRepetition(i64),
    /// String or list repetition whose result would exceed the length limit.
    #[error("Cannot repeat a value {0} times: the result would be too large")]
    RepetitionTooLarge(i64),
    /// Integer arithmetic left the 64-bit range.
    #[error("Integer overflow")]
    IntegerOverflow,
    /// `for` start or end did not evaluate to an integer.
    #[error("For loop bounds must be integers")]
    ForLoopBounds,
    /// `for` step did not evaluate to a non-zero integer.
    #[error("For loop step must be a non-zero integer")]
    ForLoopStep,
    /// A loop ran more iterations than the interpreter allows.
    #[error("Loop exceeded the limit of {0} iterations")]
    LoopLimit(u64),
    /// Too many nested function calls.
    #[error("Maximum call depth of {0} exceeded")]
    RecursionLimit(usize),
    /// The callee of a call expression is not a function.
    #[error("{0} is not callable")]
    NotCallable(String),
    /// `new` was used with a name that is not bound to an object.
    #[error("'{0}' is not an object")]
    NotAnObject(String),
    /// Dotted access on a name that is not bound to an object instance.
    #[error("'{0}' is not an object instance")]
    NotAnInstance(String),
    /// Dotted read of a member the instance does not have.
    #[error("'{member}' is not a member of '{object}'")]
    UnknownMember {
        /// The instance variable name.
        object: String,
        /// The requested member.
        member: String,
    },
    /// A built-in function value has no native implementation.
    #[error("No execute_{0} method defined")]
    NoMethodDefined(String),
    /// `break` evaluated outside any loop.
    #[error("'break' outside of a loop")]
    BreakOutsideLoop,
    /// `continue` evaluated outside any loop.
    #[error("'continue' outside of a loop")]
    ContinueOutsideLoop,
    /// `return` evaluated in an object body.
    #[error("'return' outside of a function")]
    ReturnOutsideFunction,
    /// A built-in was called with an argument it cannot work with. Built-ins
    /// return this wrapped in an exception value instead of failing.
    #[error("'{param}' of '{function}' must be {expected}, found {found}")]
    InvalidArgument {
        /// The built-in's name.
        function: String,
        /// The parameter name.
        param:    String,
        /// What the parameter accepts, e.g. `a List`.
        expected: String,
        /// The type or value that was passed.
        found:    String,
    },
    /// Reading from the input or writing to the output failed.
    #[error("IO error: {0}")]
    Io(String),
    /// A script passed to `Run` or `Include` could not be read.
    #[error("Failed to load script '{path}': {reason}")]
    ModuleLoad {
        /// Resolved path of the script.
        path:   String,
        /// Description of the failure.
        reason: String,
    },
    /// A script passed to `Run` or `Include` failed to lex, parse or run.
    #[error("Script '{path}' failed:\n{message}")]
    ModuleFailed {
        /// Resolved path of the script.
        path:    String,
        /// The nested error, already formatted.
        message: String,
    },
}
