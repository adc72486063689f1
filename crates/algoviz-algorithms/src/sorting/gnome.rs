use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "gnome-sort",
            "Gnome Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "A sorting algorithm originally proposed by Hamid Sarbazi-Azad (called Stupid sort). It is similar to insertion sort, except that moving an element to its proper place is accomplished by a series of swaps.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();
        let n = arr.len();
        let mut index = 0;

        y.emit(frame(&arr).describe("Starting Gnome Sort")).await;

        while index < n {
            if index == 0 {
                index = 1;
                continue;
            }

            y.emit(
                frame(&arr)
                    .highlight([index, index - 1])
                    .describe(format!("Comparing index {} and {}", index, index - 1)),
            )
            .await;

            if arr[index] >= arr[index - 1] {
                index += 1;
            } else {
                arr.swap(index, index - 1);
                y.emit(
                    frame(&arr)
                        .highlight([index, index - 1])
                        .describe(format!("Swapping {} and {}", arr[index], arr[index - 1])),
                )
                .await;
                index -= 1;
            }
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}
