use std::{
    cell::RefCell,
    io::{self, Write},
    path::PathBuf,
    rc::Rc,
    sync::Once,
};

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;
/// Default limit on iterations of a single loop.
pub const DEFAULT_MAX_LOOP_ITERATIONS: u64 = 10_000_000;

/// Limits and environment of one interpreter instance.
///
/// Every [`Interpreter`](crate::interpreter::evaluator::core::Interpreter)
/// owns its configuration; nothing here is process-wide, so several
/// interpreters with different limits can run side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum number of nested function calls before evaluation fails.
    pub max_call_depth:      usize,
    /// Maximum number of iterations any single `for` or `while` loop may
    /// run.
    pub max_loop_iterations: u64,
    /// Directory that relative paths passed to `Run` and `Include` are
    /// resolved against.
    pub base_dir:            PathBuf,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { max_call_depth:      DEFAULT_MAX_CALL_DEPTH,
               max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
               base_dir:            PathBuf::from("."), }
    }
}

impl InterpreterConfig {
    /// Returns the configuration with a different call depth limit.
    #[must_use]
    pub const fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Returns the configuration with a different loop iteration limit.
    #[must_use]
    pub const fn with_max_loop_iterations(mut self, iterations: u64) -> Self {
        self.max_loop_iterations = iterations;
        self
    }

    /// Returns the configuration with a different base directory.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }
}

static TRACING_INIT: Once = Once::new();

/// Initializes `tracing` output for the command line binary.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=sympl=debug`. Safe
/// to call more than once. Library users install their own subscriber
/// instead.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)
                                                            .with_target(true)
                                                            .with_level(true))
                                          .with(filter)
                                          .init();
        }
    });
}

/// An output sink that keeps everything written to it.
///
/// Clones share the same buffer, so a host can hand one clone to the
/// interpreter and read the output through another.
///
/// # Example
/// ```
/// use sympl::{config::{CapturedOutput, InterpreterConfig}, interpreter::evaluator::core::Interpreter};
///
/// let output = CapturedOutput::default();
/// let mut interpreter =
///     Interpreter::with_io(InterpreterConfig::default(), Box::new(output.clone()), Box::new(&b""[..]));
///
/// interpreter.run("<test>", "Print(\"hi\")").unwrap();
/// assert_eq!(output.contents(), "hi\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_output_is_shared_between_clones() {
        let output = CapturedOutput::default();
        let mut writer = output.clone();
        write!(writer, "a{}", 1).unwrap();
        assert_eq!(output.contents(), "a1");
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = InterpreterConfig::default().with_max_call_depth(8)
                                                 .with_max_loop_iterations(3)
                                                 .with_base_dir("scripts");
        assert_eq!(config.max_call_depth, 8);
        assert_eq!(config.max_loop_iterations, 3);
        assert_eq!(config.base_dir, PathBuf::from("scripts"));
    }
}
