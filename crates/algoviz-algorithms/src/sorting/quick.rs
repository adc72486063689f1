use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer, Yielder};
use futures::future::BoxFuture;

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "quick-sort",
            "Quick Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "An efficient, divide-and-conquer sorting algorithm. It works by selecting a \"pivot\" element and partitioning the other elements into two sub-arrays, according to whether they are less than or greater than the pivot.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();

        y.emit(frame(&arr).describe("Starting Quick Sort")).await;

        if !arr.is_empty() {
            let last = arr.len() - 1;
            sort_range(&y, &mut arr, 0, last).await;
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}

fn sort_range<'a>(y: &'a Yielder<Vec<i64>>, arr: &'a mut [i64], low: usize, high: usize) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        if low >= high {
            return;
        }
        let pivot = partition(y, arr, low, high).await;
        if pivot > low {
            sort_range(y, arr, low, pivot - 1).await;
        }
        sort_range(y, arr, pivot + 1, high).await;
    })
}

/// Lomuto partition around `arr[high]`; returns the pivot's final index.
async fn partition(y: &Yielder<Vec<i64>>, arr: &mut [i64], low: usize, high: usize) -> usize {
    let pivot = arr[high];
    let mut store = low;

    y.emit(frame(arr).highlight([high]).describe(format!("Pivot selected: {pivot}"))).await;

    for j in low..high {
        y.emit(
            frame(arr)
                .highlight([j, high])
                .describe(format!("Comparing {} with pivot {pivot}", arr[j])),
        )
        .await;

        if arr[j] < pivot {
            arr.swap(store, j);
            y.emit(
                frame(arr)
                    .highlight([store, j])
                    .describe(format!("Swapping {} and {}", arr[store], arr[j])),
            )
            .await;
            store += 1;
        }
    }

    arr.swap(store, high);
    y.emit(
        frame(arr)
            .highlight([store, high])
            .describe("Moving pivot to correct position"),
    )
    .await;

    store
}
