//! # sympl
//!
//! sympl is an embeddable tree-walking interpreter for the Sympl scripting
//! language. Sympl is dynamically typed and has integers, floats, strings,
//! lists, first-class functions and simple objects. Source text is lexed,
//! parsed into an AST and evaluated against a global context that lives as
//! long as the [`Interpreter`](interpreter::evaluator::core::Interpreter).

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    config::InterpreterConfig,
    error::SymplError,
    interpreter::{evaluator::core::Interpreter, value::core::Value},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Attaches source spans to AST nodes for error reporting.
pub mod ast;
/// Interpreter limits, captured output and logging setup.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running code. Each
/// error carries its kind and the source span it points at; runtime errors
/// also carry a traceback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Formats errors as `<Error Name> at Line L (C1, C2): details`.
/// - Renders reports with the offending source line underlined.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and the runtime
/// values. It exposes the public API for running programs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source files, positions and spans.
pub mod source;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides conversion routines used throughout the interpreter.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u32`, `usize` and `f64` without silent
///   data loss.
/// - Resolve possibly negative list indices.
pub mod util;

/// Runs a complete program in a fresh interpreter.
///
/// The interpreter writes to stdout, reads from stdin and uses the default
/// [`InterpreterConfig`].
///
/// # Returns
/// A `List` with the value of every top-level statement, or the value of a
/// top-level `return`.
///
/// # Errors
/// Returns the first lexing, parsing or runtime error.
///
/// # Examples
/// ```
/// use sympl::{interpreter::value::core::Value, run_source};
///
/// let result = run_source("<doc>", "var x = 2 + 3 * 4\nx - 4").unwrap();
/// assert_eq!(result, Value::from(vec![Value::Int(14), Value::Int(10)]));
///
/// // 'y' is not defined
/// assert!(run_source("<doc>", "var x = y + 1").is_err());
/// ```
pub fn run_source(file_name: &str, text: &str) -> Result<Value, SymplError> {
    Interpreter::new(InterpreterConfig::default()).run(file_name, text)
}
