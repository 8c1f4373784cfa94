/// Runtime contexts and symbol tables.
///
/// A context is one frame of execution: the program itself, a function call
/// or an object instance. It owns a symbol table and remembers where it was
/// entered from so errors can print a traceback.
pub mod context;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST produced by the parser, applies operators,
/// manages variables, runs loops and calls functions and built-ins. It is
/// the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every AST node kind.
/// - Propagates `return`, `break` and `continue` to the construct that
///   handles them.
/// - Reports runtime errors with the span and traceback of the failure.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a language element such as a number, a string, an
/// identifier, a keyword or an operator. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input text into tokens with their source span.
/// - Handles numeric and string literals, identifiers and keywords.
/// - Rejects the whole input on the first character no token starts with.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the token stream produced by the lexer with recursive
/// descent, one function per precedence level, and builds the AST the
/// evaluator runs.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Validates the grammar, reporting the first syntax error with its span.
pub mod parser;
/// The value module defines the runtime data types.
///
/// Declares the `Value` enum (numbers, strings, lists, functions, objects and
/// exceptions) and implements the operators, comparisons and display forms
/// the evaluator applies to them.
pub mod value;
