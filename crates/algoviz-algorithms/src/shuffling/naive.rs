use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};
use rand::Rng;

use crate::bars::{ascending_values, frame};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "naive-shuffle",
            "Naive Shuffle (Biased)",
            Category::Shuffling,
            Visualizer::BarChart,
            "A common incorrect implementation of shuffling. It swaps each element with a random element from the *entire* array (instead of just the remaining unshuffled portion). This results in n^n permutations rather than n!, leading to a statistically biased result.",
        ),
        ascending_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut arr = state.get();
        let n = arr.len();

        y.emit(frame(&arr).describe("Starting: Sorted array")).await;

        for i in 0..n {
            // The whole array, not just the unshuffled tail
            let j = rng.gen_range(0..n);
            y.emit(
                frame(&arr)
                    .highlight([i, j])
                    .describe(format!("i={i}: Swapping with random index {j} (from whole array)")),
            )
            .await;

            arr.swap(i, j);
            y.emit(
                frame(&arr)
                    .highlight([i, j])
                    .describe(format!("Swapped elements at {i} and {j}")),
            )
            .await;
        }

        y.emit(frame(&arr).describe("Shuffling completed (with likely bias)")).await;
    })
}
