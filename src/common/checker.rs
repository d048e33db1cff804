//! This file defines some functions that checks some pre-conditions
//! of the training instances.


/// Check whether every value of a Bernoulli instance is `0` or `1`.
/// Returns the position and the value of the first offending entry.
#[inline(always)]
pub(crate) fn check_binary(values: &[i64]) -> Result<(), (usize, i64)> {
    match values.iter().position(|v| !matches!(v, 0 | 1)) {
        Some(i) => Err((i, values[i])),
        None => Ok(()),
    }
}
