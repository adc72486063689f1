use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "cocktail-shaker-sort",
            "Cocktail Shaker Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "A variation of Bubble Sort that sorts in both directions on each pass through the list. While marginally more efficient than Bubble Sort, it is still O(n²).",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();
        let mut start = 0;
        let mut end = arr.len().saturating_sub(1);

        y.emit(frame(&arr).describe("Starting Cocktail Shaker Sort")).await;

        loop {
            let mut swapped = false;
            for i in start..end {
                y.emit(
                    frame(&arr)
                        .highlight([i, i + 1])
                        .describe(format!("Forward: Comparing {} and {}", arr[i], arr[i + 1])),
                )
                .await;
                if arr[i] > arr[i + 1] {
                    arr.swap(i, i + 1);
                    swapped = true;
                    y.emit(
                        frame(&arr)
                            .highlight([i, i + 1])
                            .describe(format!("Forward: Swapping {} and {}", arr[i], arr[i + 1])),
                    )
                    .await;
                }
            }
            if !swapped {
                break;
            }

            swapped = false;
            end -= 1;

            for i in (start..end).rev() {
                y.emit(
                    frame(&arr)
                        .highlight([i, i + 1])
                        .describe(format!("Backward: Comparing {} and {}", arr[i], arr[i + 1])),
                )
                .await;
                if arr[i] > arr[i + 1] {
                    arr.swap(i, i + 1);
                    swapped = true;
                    y.emit(
                        frame(&arr)
                            .highlight([i, i + 1])
                            .describe(format!("Backward: Swapping {} and {}", arr[i], arr[i + 1])),
                    )
                    .await;
                }
            }
            start += 1;
            if !swapped {
                break;
            }
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}
