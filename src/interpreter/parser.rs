/// Parser entry points and shared parsing routines.
///
/// Defines [`ParseResult`], the program-level [`parse`] function, the
/// expression entry point and `if` parsing.
pub mod core;

/// Unary operator, call suffix and atom parsing.
///
/// Handles prefix `+`/`-`, chained calls, literals, list literals, member
/// access and dispatches to the keyword constructs.
pub mod unary;

/// Binary operator parsing.
///
/// Implements one function per precedence level on top of a shared
/// left-associative folding helper.
pub mod binary;

/// Statement sequence parsing.
///
/// Parses newline/semicolon separated statements and the single-line or
/// block bodies of conditionals and loops.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token lookahead helpers, expectation checks and comma-separated
/// list parsing.
pub mod utils;

/// Statement and keyword construct parsing.
///
/// Implements `return`/`break`/`continue`, loops, function definitions and
/// object templates.
pub mod statement;

pub use core::{ParseResult, parse, parse_source};
