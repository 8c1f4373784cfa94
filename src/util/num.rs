/// Converts an `i64` to the nearest `f64`.
///
/// Integers with a magnitude above `2^53` are rounded; mixed integer/float
/// arithmetic accepts that rounding the same way a float literal of that
/// size would.
///
/// ## Example
/// ```
/// use sympl::util::num::i64_to_f64;
///
/// assert_eq!(i64_to_f64(-42), -42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Converts a `usize` (such as a length) to `i64`.
///
/// ## Errors
/// Returns `Err(error)` if the value does not fit.
pub fn usize_to_i64_checked<E>(value: usize, error: E) -> Result<i64, E> {
    i64::try_from(value).map_err(|_| error)
}

/// Converts a non-negative `i64` (such as a repetition count) to `usize`.
///
/// ## Errors
/// Returns `Err(error)` for negative values or values that do not fit.
pub fn i64_to_usize_checked<E>(value: i64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_err(|_| error)
}

/// Converts a non-negative `i64` exponent to `u32`.
///
/// ## Errors
/// Returns `Err(error)` for negative exponents or exponents above
/// `u32::MAX`.
pub fn i64_to_u32_checked<E>(value: i64, error: E) -> Result<u32, E> {
    u32::try_from(value).map_err(|_| error)
}

/// Resolves a list index against a list of `length` elements.
///
/// Non-negative indices count from the front, negative indices from the back
/// (`-1` is the last element).
///
/// ## Returns
/// `Some(position)` if the index addresses an element, `None` otherwise.
///
/// ## Example
/// ```
/// use sympl::util::num::resolve_index;
///
/// assert_eq!(resolve_index(1, 3), Some(1));
/// assert_eq!(resolve_index(-1, 3), Some(2));
/// assert_eq!(resolve_index(3, 3), None);
/// assert_eq!(resolve_index(-4, 3), None);
/// ```
#[must_use]
pub fn resolve_index(index: i64, length: usize) -> Option<usize> {
    let position = if index < 0 {
        length.checked_sub(usize::try_from(index.unsigned_abs()).ok()?)?
    } else {
        usize::try_from(index).ok()?
    };
    (position < length).then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_conversions_reject_out_of_range_values() {
        assert_eq!(i64_to_usize_checked(-1, "negative"), Err("negative"));
        assert_eq!(i64_to_u32_checked(i64::from(u32::MAX) + 1, "big"), Err("big"));
        assert_eq!(usize_to_i64_checked(7, "big"), Ok(7));
    }

    #[test]
    fn resolve_index_handles_empty_lists() {
        assert_eq!(resolve_index(0, 0), None);
        assert_eq!(resolve_index(-1, 0), None);
        assert_eq!(resolve_index(i64::MIN, 2), None);
    }
}
