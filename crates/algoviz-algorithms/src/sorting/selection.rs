use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "selection-sort",
            "Selection Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "Divides the input list into two parts: a sorted sublist of items which is built up from left to right and a sublist of the remaining unsorted items.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();
        let n = arr.len();

        y.emit(frame(&arr).describe("Starting Selection Sort")).await;

        for i in 0..n {
            let mut min = i;
            y.emit(
                frame(&arr)
                    .highlight([i])
                    .describe(format!("Looking for minimum value starting from index {i}")),
            )
            .await;

            for j in i + 1..n {
                y.emit(
                    frame(&arr)
                        .highlight([min, j])
                        .describe(format!("Comparing current min {} with {}", arr[min], arr[j])),
                )
                .await;
                if arr[j] < arr[min] {
                    min = j;
                    y.emit(
                        frame(&arr)
                            .highlight([min])
                            .describe(format!("New minimum found: {}", arr[min])),
                    )
                    .await;
                }
            }

            if min != i {
                arr.swap(i, min);
                y.emit(
                    frame(&arr)
                        .highlight([i, min])
                        .describe(format!("Swapped minimum {} to correct position", arr[i])),
                )
                .await;
            }
        }

        y.emit(frame(&arr).describe("Sorted!")).await;
    })
}
