use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "bubble-sort",
            "Bubble Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "A simple sorting algorithm that repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();
        let n = arr.len();

        y.emit(frame(&arr).describe("Starting: Unsorted array")).await;

        for i in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - i - 1 {
                y.emit(
                    frame(&arr)
                        .highlight([j, j + 1])
                        .describe(format!("Comparing {} and {}", arr[j], arr[j + 1])),
                )
                .await;

                if arr[j] > arr[j + 1] {
                    arr.swap(j, j + 1);
                    swapped = true;
                    y.emit(
                        frame(&arr)
                            .highlight([j, j + 1])
                            .describe(format!("Swapping {} and {}", arr[j + 1], arr[j])),
                    )
                    .await;
                }
            }
            if !swapped {
                break;
            }
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}
