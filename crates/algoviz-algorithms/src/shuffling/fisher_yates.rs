use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};
use rand::Rng;

use crate::bars::{ascending_values, frame};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "fisher-yates-shuffle",
            "Fisher-Yates Shuffle",
            Category::Shuffling,
            Visualizer::BarChart,
            "The Fisher-Yates shuffle (or Knuth shuffle) is an algorithm for generating a random permutation of a finite sequence. It is unbiased, meaning that every permutation is equally likely.",
        ),
        ascending_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut arr = state.get();

        y.emit(frame(&arr).describe("Starting: Sorted array")).await;

        for i in (1..arr.len()).rev() {
            let j = rng.gen_range(0..=i);
            y.emit(
                frame(&arr)
                    .highlight([i, j])
                    .describe(format!("Selected index {i} and random index {j}")),
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

        y.emit(frame(&arr).describe("Shuffling completed!")).await;
    })
}
