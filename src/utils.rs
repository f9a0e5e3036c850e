//! Utility functions.

/// Advances `value` to the next multiple of `align` past it.
/// `align` must be a power of two.
///
/// Unlike a plain round-up, a value that already sits on a boundary still
/// moves to the following one, so the result is always strictly greater
/// than an aligned input. This guarantees a planned section can never share
/// a byte with whatever ends exactly at `value`.
pub fn next_boundary(value: u64, align: u64) -> u64 {
    assert!(align.is_power_of_two());
    (value / align + 1) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_value_advances_a_full_quantum() {
        assert_eq!(next_boundary(0x1000, 0x1000), 0x2000);
        assert_eq!(next_boundary(0, 0x1000), 0x1000);
    }

    #[test]
    fn unaligned_value_rounds_up() {
        assert_eq!(next_boundary(0x1001, 0x1000), 0x2000);
        assert_eq!(next_boundary(0xFFF, 0x1000), 0x1000);
        assert_eq!(next_boundary(1, 0x1000), 0x1000);
    }

    #[test]
    #[should_panic]
    fn rejects_non_power_of_two() {
        next_boundary(10, 3);
    }
}
