/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus list index
/// resolution. Use these helpers whenever a Sympl integer is used as a Rust
/// length, count or exponent.
///
/// Checked functions return a `Result`, which is `Ok` if the conversion is
/// lossless and valid, or the caller's error if the value is out of range.
pub mod num;
