use crate::{
    ast::BinaryOperator,
    error::RuntimeErrorKind,
    interpreter::value::core::Value,
    util::num::{i64_to_f64, i64_to_u32_checked, i64_to_usize_checked, resolve_index},
};

/// Result of an operation on two values.
///
/// Operations only know the operands, so failures are reported as a bare
/// [`RuntimeErrorKind`]; the evaluator attaches the span and traceback.
pub type OpResult = Result<Value, RuntimeErrorKind>;

impl Value {
    /// Applies an arithmetic operator with `self` as the left operand.
    ///
    /// Dispatch is on the left operand's type: `Int + Float` and
    /// `Float + Int` are both floats, but `String + Int` is illegal while
    /// `List + Int` appends.
    ///
    /// | left    | right | operators                                      |
    /// |---------|-------|------------------------------------------------|
    /// | Int     | Int   | `+ - * /` (truncating) `^`, checked for overflow |
    /// | Int     | Float | all, as floats                                 |
    /// | Float   | number| all, as floats                                 |
    /// | String  | String| `+` concatenates                               |
    /// | String  | Int   | `*` repeats                                    |
    /// | List    | List  | `+` concatenates                               |
    /// | List    | any   | `+` appends                                    |
    /// | List    | Int   | `*` repeats, `-` removes an index, `/` indexes |
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Pow`.
    /// - `rhs`: The right operand.
    ///
    /// # Example
    /// ```
    /// use sympl::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let sum = Value::Int(7).arithmetic(BinaryOperator::Div, &Value::Int(2)).unwrap();
    /// assert_eq!(sum, Value::Int(3));
    ///
    /// let list = Value::from(vec![Value::Int(1)]);
    /// let appended = list.arithmetic(BinaryOperator::Add, &Value::from("a")).unwrap();
    /// assert_eq!(appended, Value::from(vec![Value::Int(1), Value::from("a")]));
    /// ```
    pub fn arithmetic(&self, op: BinaryOperator, rhs: &Self) -> OpResult {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => integer_arithmetic(op, *a, *b),
            (Self::Int(a), Self::Float(b)) => float_arithmetic(op, i64_to_f64(*a), *b),
            (Self::Float(a), Self::Int(b)) => float_arithmetic(op, *a, i64_to_f64(*b)),
            (Self::Float(a), Self::Float(b)) => float_arithmetic(op, *a, *b),
            (Self::Str(a), _) => string_arithmetic(op, a, rhs),
            (Self::List(elements), _) => list_arithmetic(op, elements, rhs),
            _ => Err(illegal(self.type_name(), op, rhs.type_name())),
        }
    }

    /// Negates a value by multiplying it with `-1`.
    ///
    /// Any value whose multiplication by an integer is defined can be negated
    /// this way; for strings and lists this fails as a negative repetition.
    pub fn negate(&self) -> OpResult {
        self.arithmetic(BinaryOperator::Mul, &Self::Int(-1))
    }
}

fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64) -> OpResult {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div => {
            if b == 0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            a.checked_div(b)
        },
        BinaryOperator::Pow => {
            if b < 0 {
                return float_arithmetic(op, i64_to_f64(a), i64_to_f64(b));
            }
            match a {
                0 | 1 if b > 0 => Some(a),
                -1 => Some(if b % 2 == 0 { 1 } else { -1 }),
                _ => a.checked_pow(i64_to_u32_checked(b, RuntimeErrorKind::IntegerOverflow)?),
            }
        },
        _ => return Err(illegal("Int", op, "Int")),
    };
    result.map(Value::Int)
          .ok_or(RuntimeErrorKind::IntegerOverflow)
}

fn float_arithmetic(op: BinaryOperator, a: f64, b: f64) -> OpResult {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div => {
            if b == 0.0 {
                return Err(RuntimeErrorKind::DivisionByZero);
            }
            a / b
        },
        BinaryOperator::Pow => a.powf(b),
        _ => return Err(illegal("Float", op, "Float")),
    };
    Ok(Value::Float(result))
}

fn string_arithmetic(op: BinaryOperator, text: &str, rhs: &Value) -> OpResult {
    match (op, rhs) {
        (BinaryOperator::Add, Value::Str(other)) => Ok(Value::Str(format!("{text}{other}"))),
        (BinaryOperator::Mul, Value::Int(count)) => {
            Ok(Value::Str(text.repeat(repetition_count(*count, text.len())?)))
        },
        _ => Err(illegal("String", op, rhs.type_name())),
    }
}

fn list_arithmetic(op: BinaryOperator, elements: &[Value], rhs: &Value) -> OpResult {
    match (op, rhs) {
        (BinaryOperator::Add, Value::List(other)) => {
            Ok(Value::List(elements.iter().chain(other).cloned().collect()))
        },
        (BinaryOperator::Add, other) => {
            let mut result = elements.to_vec();
            result.push(other.clone());
            Ok(Value::List(result))
        },
        (BinaryOperator::Mul, Value::Int(count)) => {
            let count = repetition_count(*count, elements.len())?;
            Ok(Value::List((0..count).flat_map(|_| elements.iter().cloned()).collect()))
        },
        (BinaryOperator::Sub, Value::Int(index)) => {
            let position = list_position(*index, elements.len())?;
            let mut result = elements.to_vec();
            result.remove(position);
            Ok(Value::List(result))
        },
        (BinaryOperator::Div, Value::Int(index)) => {
            let position = list_position(*index, elements.len())?;
            Ok(elements[position].clone())
        },
        _ => Err(illegal("List", op, rhs.type_name())),
    }
}

/// Resolves `index` in a list of `length` elements or reports it out of
/// range.
pub(crate) fn list_position(index: i64, length: usize) -> Result<usize, RuntimeErrorKind> {
    resolve_index(index, length).ok_or(RuntimeErrorKind::IndexOutOfRange { index, length })
}

/// Upper bound on the bytes of a repeated string or the elements of a
/// repeated list.
pub const MAX_REPETITION_LENGTH: usize = 1 << 24;

/// Checks that repeating `length` items `count` times stays within
/// [`MAX_REPETITION_LENGTH`]. Empty operands repeat to nothing for any
/// non-negative count.
fn repetition_count(count: i64, length: usize) -> Result<usize, RuntimeErrorKind> {
    let repetitions = i64_to_usize_checked(count, RuntimeErrorKind::NegativeRepetition(count))?;
    if length == 0 {
        return Ok(0);
    }
    repetitions.checked_mul(length)
               .filter(|total| *total <= MAX_REPETITION_LENGTH)
               .map(|_| repetitions)
               .ok_or(RuntimeErrorKind::RepetitionTooLarge(count))
}

/// Builds the error for an operator that is not defined on its operands.
pub(crate) fn illegal(lhs: &str, op: impl std::fmt::Display, rhs: &str) -> RuntimeErrorKind {
    RuntimeErrorKind::IllegalOperation(format!("{lhs} {op} {rhs}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn apply(lhs: Value, op: BinaryOperator, rhs: Value) -> OpResult {
        lhs.arithmetic(op, &rhs)
    }

    #[test]
    fn integer_results_stay_integers() {
        assert_eq!(apply(Value::Int(2), BinaryOperator::Add, Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(apply(Value::Int(-7), BinaryOperator::Div, Value::Int(2)), Ok(Value::Int(-3)));
        assert_eq!(apply(Value::Int(2), BinaryOperator::Pow, Value::Int(10)),
                   Ok(Value::Int(1024)));
    }

    #[test]
    fn negative_integer_exponent_gives_float() {
        assert_eq!(apply(Value::Int(2), BinaryOperator::Pow, Value::Int(-1)),
                   Ok(Value::Float(0.5)));
    }

    #[test]
    fn mixed_numbers_become_floats() {
        assert_eq!(apply(Value::Int(1), BinaryOperator::Add, Value::Float(0.5)),
                   Ok(Value::Float(1.5)));
        assert_eq!(apply(Value::Float(3.0), BinaryOperator::Div, Value::Int(2)),
                   Ok(Value::Float(1.5)));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(apply(Value::Int(1), BinaryOperator::Div, Value::Int(0)),
                   Err(RuntimeErrorKind::DivisionByZero));
        assert_eq!(apply(Value::Float(1.0), BinaryOperator::Div, Value::Int(0)),
                   Err(RuntimeErrorKind::DivisionByZero));
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(apply(Value::Int(i64::MAX), BinaryOperator::Add, Value::Int(1)),
                   Err(RuntimeErrorKind::IntegerOverflow));
        assert_eq!(Value::Int(i64::MIN).negate(), Err(RuntimeErrorKind::IntegerOverflow));
    }

    #[test]
    fn strings_concatenate_and_repeat() {
        assert_eq!(apply("ab".into(), BinaryOperator::Add, "cd".into()), Ok("abcd".into()));
        assert_eq!(apply("ab".into(), BinaryOperator::Mul, Value::Int(3)), Ok("ababab".into()));
        assert_eq!(apply("ab".into(), BinaryOperator::Sub, Value::Int(1)),
                   Err(RuntimeErrorKind::IllegalOperation("String - Int".into())));
    }

    #[test]
    fn lists_operate_on_elements() {
        let list = || Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(apply(list(), BinaryOperator::Div, Value::Int(-1)), Ok(Value::Int(3)));
        assert_eq!(apply(list(), BinaryOperator::Sub, Value::Int(0)),
                   Ok(Value::from(vec![Value::Int(2), Value::Int(3)])));
        assert_eq!(apply(list(), BinaryOperator::Div, Value::Int(3)),
                   Err(RuntimeErrorKind::IndexOutOfRange { index:  3,
                                                           length: 3, }));
        assert_eq!(apply(Value::from(vec![Value::Int(1)]), BinaryOperator::Mul, Value::Int(2)),
                   Ok(Value::from(vec![Value::Int(1), Value::Int(1)])));
    }

    #[test]
    fn trivial_bases_take_any_exponent() {
        for (base, exponent, expected) in [(1, 5_000_000_000, 1),
                                           (0, 5_000_000_000, 0),
                                           (-1, 5_000_000_000, 1),
                                           (-1, 5_000_000_001, -1),
                                           (0, 0, 1)]
        {
            assert_eq!(apply(Value::Int(base), BinaryOperator::Pow, Value::Int(exponent)),
                       Ok(Value::Int(expected)),
                       "{base} ^ {exponent}");
        }
        assert_eq!(apply(Value::Int(2), BinaryOperator::Pow, Value::Int(5_000_000_000)),
                   Err(RuntimeErrorKind::IntegerOverflow));
    }

    #[test]
    fn oversized_repetition_is_an_error() {
        assert_eq!(apply("ab".into(), BinaryOperator::Mul, Value::Int(i64::MAX)),
                   Err(RuntimeErrorKind::RepetitionTooLarge(i64::MAX)));
        assert_eq!(apply(Value::from(vec![Value::Int(1)]),
                         BinaryOperator::Mul,
                         Value::Int(4_611_686_018_427_387_904)),
                   Err(RuntimeErrorKind::RepetitionTooLarge(4_611_686_018_427_387_904)));
        assert_eq!(apply("".into(), BinaryOperator::Mul, Value::Int(i64::MAX)), Ok("".into()));
        assert_eq!(apply(Value::List(Vec::new()), BinaryOperator::Mul, Value::Int(i64::MAX)),
                   Ok(Value::List(Vec::new())));
        assert_eq!(apply("ab".into(), BinaryOperator::Mul, Value::Int(-2)),
                   Err(RuntimeErrorKind::NegativeRepetition(-2)));
    }

    #[test]
    fn negation_multiplies_by_minus_one() {
        assert_eq!(Value::Float(2.5).negate(), Ok(Value::Float(-2.5)));
        assert_eq!(Value::from("x").negate(), Err(RuntimeErrorKind::NegativeRepetition(-1)));
        assert_eq!(Value::Null.negate(),
                   Err(RuntimeErrorKind::IllegalOperation("Null * Int".into())));
    }
}
