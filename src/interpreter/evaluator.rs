/// Core evaluation logic.
///
/// Contains the [`Interpreter`](core::Interpreter), the control flow
/// [`Signal`](core::Signal) and the node dispatcher.
pub mod core;

/// Binary operator evaluation.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements `+x`, `-x` and `not x`.
pub mod unary;

/// Evaluation of `if`/`elif`/`else`.
pub mod conditional;

/// Evaluation of for-loop expressions.
///
/// Manages the loop variable, the step and the collected values.
pub mod for_loop;

/// Evaluation of while-loop expressions.
pub mod while_loop;

/// Variable reads and assignments.
pub mod variable;

/// Object templates, instantiation and member access.
pub mod object;

/// Function evaluation.
///
/// Handles function definitions, user-defined and built-in function calls,
/// argument checking and the built-in function catalog.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;
