/// Core value definitions.
///
/// Declares the `Value` enum, its conversions, truthiness and structural
/// equality.
pub mod core;
/// Function values.
///
/// User-defined functions keep their body and closure context; built-ins are
/// a name plus declared parameters that the evaluator dispatches on.
pub mod function;
/// Object templates and instances.
pub mod object;
/// Arithmetic on values.
///
/// Implements `+ - * / ^` with operand-left dispatch: the left operand's type
/// decides what an operator means.
pub mod arithmetic;
/// Comparisons, logical operators and unary operators.
pub mod comparison;
/// Display and quoted representation.
pub mod display;
