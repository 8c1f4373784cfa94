use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        context::Context,
        evaluator::core::{EvalResult, Signal},
        value::{arithmetic::OpResult, core::Value},
    },
    source::Span,
};

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the native stack first if less than the red zone is
/// left.
///
/// Every Sympl call and every nested expression recurses on the host stack,
/// so the evaluator wraps its dispatch in this.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// Builds a runtime error raised at `span` while evaluating in `context`.
///
/// The traceback is taken from the context chain at the time of the call.
#[must_use]
pub fn error(kind: RuntimeErrorKind, span: &Span, context: &Context) -> RuntimeError {
    RuntimeError::new(kind, span.clone(), context.traceback(span))
}

/// Attaches position information to the result of a value operation.
pub fn at(result: OpResult, span: &Span, context: &Context) -> EvalResult<Value> {
    result.map_err(|kind| Signal::Error(error(kind, span, context)))
}

/// What a loop does after one evaluation of its body.
pub enum LoopStep {
    /// The body finished normally with this value.
    Value(Value),
    /// `continue` ran; go on with the next iteration.
    Continue,
    /// `break` ran; leave the loop.
    Break,
}

/// Sorts the outcome of a loop body into the loop's own signals and
/// everything that has to propagate further (errors and `return`).
pub fn loop_step(result: EvalResult<Value>) -> EvalResult<LoopStep> {
    match result {
        Ok(value) => Ok(LoopStep::Value(value)),
        Err(Signal::Continue(_)) => Ok(LoopStep::Continue),
        Err(Signal::Break(_)) => Ok(LoopStep::Break),
        Err(signal) => Err(signal),
    }
}

/// Counts one more loop iteration, failing once `limit` is exceeded.
pub fn count_iteration(iterations: &mut u64,
                       limit: u64,
                       span: &Span,
                       context: &Context)
                       -> EvalResult<()> {
    *iterations += 1;
    if *iterations > limit {
        tracing::debug!(limit, "loop iteration limit reached");
        return Err(error(RuntimeErrorKind::LoopLimit(limit), span, context).into());
    }
    Ok(())
}

/// Turns a signal that escaped the construct meant to handle it into an
/// error.
///
/// `break` and `continue` escaping a loop and `return` escaping a function
/// end up here. Errors pass through unchanged. A stray `return` is reported
/// at `boundary`, the construct it escaped from.
pub fn stray_signal_error(signal: Signal, boundary: &Span, context: &Context) -> RuntimeError {
    match signal {
        Signal::Error(error) => error,
        Signal::Break(span) => error(RuntimeErrorKind::BreakOutsideLoop, &span, context),
        Signal::Continue(span) => error(RuntimeErrorKind::ContinueOutsideLoop, &span, context),
        Signal::Return(_) => error(RuntimeErrorKind::ReturnOutsideFunction, boundary, context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Position, SourceFile};

    fn span() -> Span {
        let file = SourceFile::new("<test>", "break");
        let mut end = Position::start();
        end.advance_to("break", 5);
        Span::new(file, Position::start(), end)
    }

    #[test]
    fn loop_step_keeps_errors_and_returns() {
        assert!(matches!(loop_step(Err(Signal::Break(span()))), Ok(LoopStep::Break)));
        assert!(matches!(loop_step(Err(Signal::Return(Value::Int(1)))),
                         Err(Signal::Return(Value::Int(1)))));
    }

    #[test]
    fn escaped_break_becomes_an_error() {
        let context = Context::root("<program>");
        let error = stray_signal_error(Signal::Break(span()), &span(), &context);
        assert_eq!(error.kind, RuntimeErrorKind::BreakOutsideLoop);
        assert_eq!(error.traceback.len(), 1);
    }
}
