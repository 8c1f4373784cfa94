use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::value::{arithmetic::{OpResult, illegal}, core::Value},
    util::num::i64_to_f64,
};

impl Value {
    /// Applies a comparison operator with `self` as the left operand.
    ///
    /// The result is `Int(1)` or `Int(0)`. Both operands are brought to the
    /// right operand's type before comparing: an `Int` compared with a
    /// `Float` is compared as a float, and a `Float` compared with an `Int`
    /// compares the integer as a float as well. Strings order
    /// lexicographically.
    ///
    /// `==` and `!=` accept any pair of values. Lists and `null` compare
    /// structurally, functions and objects by identity, and values of
    /// unrelated types are simply unequal. Ordering operators on anything but
    /// two numbers or two strings are illegal.
    ///
    /// # Parameters
    /// - `op`: One of the six comparison operators.
    /// - `rhs`: The right operand.
    ///
    /// # Example
    /// ```
    /// use sympl::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let lt = Value::Int(2).compare(BinaryOperator::Less, &Value::Float(2.5)).unwrap();
    /// assert_eq!(lt, Value::Int(1));
    ///
    /// let eq = Value::from("a").compare(BinaryOperator::Equal, &Value::Int(1)).unwrap();
    /// assert_eq!(eq, Value::Int(0));
    /// ```
    pub fn compare(&self, op: BinaryOperator, rhs: &Self) -> OpResult {
        let ordering = match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Float(b)) => i64_to_f64(*a).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&i64_to_f64(*b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            _ => {
                return match op {
                    BinaryOperator::Equal => Ok(Self::from(self == rhs)),
                    BinaryOperator::NotEqual => Ok(Self::from(self != rhs)),
                    _ => Err(illegal(self.type_name(), op, rhs.type_name())),
                };
            },
        };

        // NaN is unordered: every comparison but `!=` is false.
        let Some(ordering) = ordering else {
            return Ok(Self::from(op == BinaryOperator::NotEqual));
        };

        let result = match op {
            BinaryOperator::Less => ordering == Ordering::Less,
            BinaryOperator::Greater => ordering == Ordering::Greater,
            BinaryOperator::LessEqual => ordering != Ordering::Greater,
            BinaryOperator::GreaterEqual => ordering != Ordering::Less,
            BinaryOperator::Equal => ordering == Ordering::Equal,
            BinaryOperator::NotEqual => ordering != Ordering::Equal,
            _ => return Err(illegal(self.type_name(), op, rhs.type_name())),
        };
        Ok(Self::from(result))
    }

    /// Applies `and` or `or` to the truthiness of both operands.
    ///
    /// Both operands have already been evaluated by the time this runs; the
    /// result is `Int(1)` or `Int(0)`.
    pub fn logical(&self, op: BinaryOperator, rhs: &Self) -> OpResult {
        match op {
            BinaryOperator::And => Ok(Self::from(self.is_true() && rhs.is_true())),
            BinaryOperator::Or => Ok(Self::from(self.is_true() || rhs.is_true())),
            _ => Err(illegal(self.type_name(), op, rhs.type_name())),
        }
    }

    /// Logical negation: `Int(1)` for false values, `Int(0)` for true ones.
    #[must_use]
    pub fn logical_not(&self) -> Self {
        Self::from(!self.is_true())
    }

    /// Applies a unary operator.
    ///
    /// `+x` returns the operand unchanged and `-x` multiplies it with `-1`.
    pub fn unary(&self, op: UnaryOperator) -> OpResult {
        match op {
            UnaryOperator::Plus => Ok(self.clone()),
            UnaryOperator::Negate => self.negate(),
            UnaryOperator::Not => Ok(self.logical_not()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::RuntimeErrorKind;

    fn compare(lhs: Value, op: BinaryOperator, rhs: Value) -> OpResult {
        lhs.compare(op, &rhs)
    }

    #[test]
    fn numbers_compare_across_types() {
        assert_eq!(compare(Value::Int(2), BinaryOperator::Equal, Value::Float(2.0)),
                   Ok(Value::Int(1)));
        assert_eq!(compare(Value::Float(1.5), BinaryOperator::GreaterEqual, Value::Int(2)),
                   Ok(Value::Int(0)));
        assert_eq!(compare(Value::Int(3), BinaryOperator::LessEqual, Value::Int(3)),
                   Ok(Value::Int(1)));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(compare("apple".into(), BinaryOperator::Less, "banana".into()),
                   Ok(Value::Int(1)));
        assert_eq!(compare("a".into(), BinaryOperator::NotEqual, "a".into()), Ok(Value::Int(0)));
    }

    #[test]
    fn equality_is_structural_for_lists_and_null() {
        let list = || Value::from(vec![Value::Int(1), "x".into()]);
        assert_eq!(compare(list(), BinaryOperator::Equal, list()), Ok(Value::Int(1)));
        assert_eq!(compare(Value::Null, BinaryOperator::Equal, Value::Null), Ok(Value::Int(1)));
        assert_eq!(compare(Value::Null, BinaryOperator::Equal, Value::Int(0)), Ok(Value::Int(0)));
    }

    #[test]
    fn ordering_unrelated_types_is_illegal() {
        assert_eq!(compare(Value::from(vec![]), BinaryOperator::Less, Value::Int(1)),
                   Err(RuntimeErrorKind::IllegalOperation("List < Int".into())));
        assert_eq!(compare("a".into(), BinaryOperator::Greater, Value::Int(1)),
                   Err(RuntimeErrorKind::IllegalOperation("String > Int".into())));
    }

    #[test]
    fn nan_is_unordered() {
        let nan = || Value::Float(f64::NAN);
        assert_eq!(compare(nan(), BinaryOperator::Equal, nan()), Ok(Value::Int(0)));
        assert_eq!(compare(nan(), BinaryOperator::NotEqual, nan()), Ok(Value::Int(1)));
    }

    #[test]
    fn logical_operators_use_truthiness() {
        assert_eq!(Value::Int(2).logical(BinaryOperator::And, &"x".into()), Ok(Value::Int(1)));
        assert_eq!(Value::Null.logical(BinaryOperator::Or, &Value::Float(0.0)),
                   Ok(Value::Int(0)));
        assert_eq!(Value::from(vec![]).logical_not(), Value::Int(1));
    }

    #[test]
    fn unary_plus_is_identity() {
        assert_eq!(Value::from("s").unary(UnaryOperator::Plus), Ok("s".into()));
        assert_eq!(Value::Int(4).unary(UnaryOperator::Negate), Ok(Value::Int(-4)));
    }
}
