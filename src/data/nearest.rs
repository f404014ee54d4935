//! Nearest-value lookup in sorted samples

/// Index of the value in `sorted` closest to `target`.
///
/// `sorted` must be ascending. When `target` lies exactly halfway between two
/// entries the smaller one wins. Returns `None` for an empty slice.
pub fn closest_index(sorted: &[f64], target: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    let pos = sorted.partition_point(|&v| v < target);
    if pos == 0 {
        return Some(0);
    }
    if pos == sorted.len() {
        return Some(sorted.len() - 1);
    }
    let before = sorted[pos - 1];
    let after = sorted[pos];
    if after - target < target - before {
        Some(pos)
    } else {
        Some(pos - 1)
    }
}

/// Value in `sorted` closest to `target`, ties going to the smaller value
pub fn take_closest(sorted: &[f64], target: f64) -> Option<f64> {
    closest_index(sorted, target).map(|i| sorted[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_prefers_smaller() {
        assert_eq!(take_closest(&[1.0, 2.0, 3.0, 4.0], 2.5), Some(2.0));
        assert_eq!(closest_index(&[1.0, 2.0, 3.0, 4.0], 2.5), Some(1));
    }

    #[test]
    fn test_picks_nearer_neighbour() {
        let sorted = [0.0, 10.0, 20.0];
        assert_eq!(take_closest(&sorted, 14.0), Some(10.0));
        assert_eq!(take_closest(&sorted, 16.0), Some(20.0));
        assert_eq!(take_closest(&sorted, 10.0), Some(10.0));
    }

    #[test]
    fn test_out_of_range_clamps_to_ends() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(closest_index(&sorted, -50.0), Some(0));
        assert_eq!(closest_index(&sorted, 50.0), Some(2));
    }

    #[test]
    fn test_empty() {
        assert_eq!(take_closest(&[], 1.0), None);
    }
}
