use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};
use rand::Rng;

use crate::bars::{ascending_values, frame};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "sattolo-shuffle",
            "Sattolo’s Algorithm",
            Category::Shuffling,
            Visualizer::BarChart,
            "A variation of Fisher-Yates that generates a random cyclic permutation. The key difference is that an element is swapped with a random element from the lower indices *excluding* itself. This guarantees that no element ends up in its original position.",
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
            let j = rng.gen_range(0..i);
            y.emit(
                frame(&arr)
                    .highlight([i, j])
                    .describe(format!("Selected index {i} and random index {j} (excluding {i})")),
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

        y.emit(frame(&arr).describe("Cyclic shuffle completed!")).await;
    })
}
