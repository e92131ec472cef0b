//! Circular backward priority scan.

use crate::bits::BitVector;

/// Find the nearest requesting index at or below `start`, wrapping from 0 to
/// `width - 1`. Positions past the end of `requests` are idle.
///
/// Returns `None` when nothing within `width` is requesting. At most `width`
/// positions are visited.
pub fn priority_scan(requests: &BitVector, start: usize, width: usize) -> Option<usize> {
    if width == 0 || start >= width {
        return None;
    }
    (0..width)
        .map(|step| (start + width - step) % width)
        .find(|&i| requests.bit(i) == Some(true))
}
