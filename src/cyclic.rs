//! Wrapping index arithmetic shared by the cyclic sliders.

/// Index after `index` in a ring of `count` positions.
///
/// A ring of one position (or an empty one) never moves.
pub fn advance(index: usize, count: usize) -> usize {
    if count <= 1 {
        return index;
    }
    (index + 1) % count
}

/// Index before `index` in a ring of `count` positions.
pub fn retreat(index: usize, count: usize) -> usize {
    if count <= 1 {
        return index;
    }
    (index + count - 1) % count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_both_ends() {
        assert_eq!(advance(4, 5), 0);
        assert_eq!(retreat(0, 5), 4);
        assert_eq!(advance(2, 5), 3);
        assert_eq!(retreat(2, 5), 1);
    }

    #[test]
    fn advance_then_retreat_is_identity() {
        for count in 1..8 {
            for index in 0..count {
                assert_eq!(retreat(advance(index, count), count), index);
                assert_eq!(advance(retreat(index, count), count), index);
            }
        }
    }

    #[test]
    fn single_position_ring_is_fixed() {
        assert_eq!(advance(0, 1), 0);
        assert_eq!(retreat(0, 1), 0);
    }
}
