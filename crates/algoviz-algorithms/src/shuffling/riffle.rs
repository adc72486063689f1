use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};
use rand::Rng;

use crate::bars::{ascending_values, frame};

const RIFFLES: usize = 3;

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "riffle-shuffle",
            "Riffle Shuffle",
            Category::Shuffling,
            Visualizer::BarChart,
            "A simulation of the common method of shuffling cards. The deck is cut into two halves, which are then interleaved. A single riffle shuffle is not sufficient to randomize a deck; typically 7 are required for a 52-card deck.",
        ),
        ascending_values,
        run,
    )
}

/// Cut near the middle, within a tenth of the deck either way.
fn cut_point(len: usize, rng: &mut impl Rng) -> usize {
    let spread = len / 5;
    let jitter = if spread == 0 { 0 } else { rng.gen_range(0..spread) };
    (len / 2 + jitter).saturating_sub(len / 10).min(len)
}

/// Interleave two piles, dropping from each with probability proportional
/// to its remaining size.
fn interleave(left: &[i64], right: &[i64], rng: &mut impl Rng) -> Vec<i64> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let (mut l, mut r) = (0, 0);
    while l < left.len() || r < right.len() {
        let left_rest = left.len() - l;
        let right_rest = right.len() - r;
        let pick_left = match (left_rest, right_rest) {
            (_, 0) => true,
            (0, _) => false,
            _ => rng.gen_bool(left_rest as f64 / (left_rest + right_rest) as f64),
        };
        if pick_left {
            out.push(left[l]);
            l += 1;
        } else {
            out.push(right[r]);
            r += 1;
        }
    }
    out
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut arr = state.get();

        y.emit(frame(&arr).describe("Starting: Sorted array")).await;

        for round in 1..=RIFFLES {
            let cut = cut_point(arr.len(), &mut rng);
            let highlight = (cut < arr.len()).then_some(cut);
            y.emit(
                frame(&arr)
                    .highlight(highlight)
                    .describe(format!("Riffle {round}: Cutting deck at index {cut}")),
            )
            .await;

            let (left, right) = arr.split_at(cut);
            arr = interleave(left, right, &mut rng);
            y.emit(frame(&arr).describe(format!("Riffle {round} completed"))).await;
        }

        y.emit(frame(&arr).describe("Shuffling completed!")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn interleave_keeps_pile_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let out = interleave(&[1, 2, 3], &[10, 20], &mut rng);
        assert_eq!(out.len(), 5);

        let lefts: Vec<_> = out.iter().copied().filter(|v| *v < 10).collect();
        let rights: Vec<_> = out.iter().copied().filter(|v| *v >= 10).collect();
        assert_eq!(lefts, vec![1, 2, 3]);
        assert_eq!(rights, vec![10, 20]);
    }

    #[test]
    fn cut_stays_near_middle() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let cut = cut_point(20, &mut rng);
            assert!((8..=13).contains(&cut), "{cut}");
        }
        assert_eq!(cut_point(2, &mut rng), 1);
    }
}
