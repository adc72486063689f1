use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "insertion-sort",
            "Insertion Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "Builds the final sorted array one item at a time. It is much less efficient on large lists than more advanced algorithms such as quicksort, heapsort, or merge sort.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();

        y.emit(frame(&arr).describe("Starting Insertion Sort")).await;

        for i in 1..arr.len() {
            let key = arr[i];
            y.emit(frame(&arr).highlight([i]).describe(format!("Selected key: {key}"))).await;

            // `hole` is the slot the key will land in
            let mut hole = i;
            while hole > 0 && arr[hole - 1] > key {
                y.emit(
                    frame(&arr)
                        .highlight([hole - 1, hole])
                        .describe(format!("{} is larger than {key}, moving right", arr[hole - 1])),
                )
                .await;
                arr[hole] = arr[hole - 1];
                hole -= 1;
                y.emit(frame(&arr).highlight([hole]).describe("Shifted")).await;
            }
            arr[hole] = key;

            y.emit(
                frame(&arr)
                    .highlight([hole])
                    .describe(format!("Inserted {key} at correct position")),
            )
            .await;
        }

        y.emit(frame(&arr).describe("Sorted!")).await;
    })
}
