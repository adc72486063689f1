//! Shared helpers for bar-chart algorithms.

use algoviz_core::Snapshot;
use rand::rngs::StdRng;
use rand::Rng;

/// Default number of bars.
pub const DEFAULT_SIZE: usize = 20;

const MIN_SIZE: usize = 2;
const MAX_SIZE: usize = 100;

fn clamp_size(size: Option<usize>) -> usize {
    size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE)
}

/// Random values in `10..=89`.
pub fn random_values(size: Option<usize>, rng: &mut StdRng) -> Vec<i64> {
    (0..clamp_size(size)).map(|_| rng.gen_range(10..=89)).collect()
}

/// Evenly spaced ascending values from 5 to 95.
pub fn ascending_values(size: Option<usize>, _rng: &mut StdRng) -> Vec<i64> {
    let n = clamp_size(size);
    (0..n).map(|i| (i * 90 / (n - 1)) as i64 + 5).collect()
}

/// Snapshot of the current array.
pub fn frame(values: &[i64]) -> Snapshot<Vec<i64>> {
    Snapshot::domain(values.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_values_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = random_values(None, &mut rng);
        assert_eq!(values.len(), DEFAULT_SIZE);
        assert!(values.iter().all(|v| (10..=89).contains(v)));
    }

    #[test]
    fn sizes_clamp() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_values(Some(0), &mut rng).len(), 2);
        assert_eq!(random_values(Some(1000), &mut rng).len(), 100);
    }

    #[test]
    fn ascending_spans_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = ascending_values(Some(20), &mut rng);
        assert_eq!(values.first(), Some(&5));
        assert_eq!(values.last(), Some(&95));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}
