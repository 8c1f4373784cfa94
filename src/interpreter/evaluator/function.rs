/// Function definitions, calls and the built-in function table.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod core;

/// The `Print` and `PrintRet` functions.
///
/// Output goes to the interpreter's output stream.
pub mod print;
/// The `Input` and `InputInt` functions.
pub mod input;
/// The `IsNumber`, `IsString`, `IsList` and `IsFunction` type checks.
pub mod predicates;
/// The `Append`, `Remove` and `Extend` list functions.
///
/// Each returns a new list; the argument is left untouched.
pub mod list;
/// The `Str` and `Length` functions.
pub mod string;
/// The `Time` function.
pub mod time;
/// The `Export`, `Include` and `Run` functions for multi-file programs.
pub mod module;
