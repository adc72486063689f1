use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer};

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "shell-sort",
            "Shell Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "An in-place comparison sort. It starts by sorting pairs of elements far apart from each other, then progressively reducing the gap between elements to be compared.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();
        let n = arr.len();

        y.emit(frame(&arr).describe("Starting Shell Sort")).await;

        let mut gap = n / 2;
        while gap > 0 {
            y.emit(frame(&arr).describe(format!("Gap size: {gap}"))).await;

            for i in gap..n {
                let temp = arr[i];
                y.emit(frame(&arr).highlight([i]).describe(format!("Current element: {temp}"))).await;

                let mut j = i;
                while j >= gap && arr[j - gap] > temp {
                    y.emit(
                        frame(&arr)
                            .highlight([j, j - gap])
                            .describe(format!("Comparing {} > {temp}", arr[j - gap])),
                    )
                    .await;
                    arr[j] = arr[j - gap];
                    y.emit(
                        frame(&arr)
                            .highlight([j, j - gap])
                            .describe(format!("Moving {} to position {j}", arr[j])),
                    )
                    .await;
                    j -= gap;
                }

                arr[j] = temp;
                y.emit(
                    frame(&arr)
                        .highlight([j])
                        .describe(format!("Placed {temp} at position {j}")),
                )
                .await;
            }
            gap /= 2;
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}
