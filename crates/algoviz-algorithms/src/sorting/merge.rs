use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer, Yielder};
use futures::future::BoxFuture;

use crate::bars::{frame, random_values};

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "merge-sort",
            "Merge Sort",
            Category::Sorting,
            Visualizer::BarChart,
            "An efficient, stable, divide-and-conquer sorting algorithm. It divides the input array into two halves, calls itself for the two halves, and then merges the two sorted halves.",
        ),
        random_values,
        run,
    )
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let mut arr = ctx.state.get();

        y.emit(frame(&arr).describe("Starting Merge Sort")).await;

        if !arr.is_empty() {
            let last = arr.len() - 1;
            sort_range(&y, &mut arr, 0, last).await;
        }

        y.emit(frame(&arr).describe("Sorting completed!")).await;
    })
}

fn sort_range<'a>(y: &'a Yielder<Vec<i64>>, arr: &'a mut [i64], left: usize, right: usize) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        if left >= right {
            return;
        }
        let mid = left + (right - left) / 2;
        sort_range(y, arr, left, mid).await;
        sort_range(y, arr, mid + 1, right).await;
        merge(y, arr, left, mid, right).await;
    })
}

async fn merge(y: &Yielder<Vec<i64>>, arr: &mut [i64], left: usize, mid: usize, right: usize) {
    let lower = arr[left..=mid].to_vec();
    let upper = arr[mid + 1..=right].to_vec();
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lower.len() && j < upper.len() {
        y.emit(
            frame(arr)
                .highlight([left + i, mid + 1 + j])
                .describe(format!("Comparing {} and {}", lower[i], upper[j])),
        )
        .await;

        if lower[i] <= upper[j] {
            arr[k] = lower[i];
            i += 1;
        } else {
            arr[k] = upper[j];
            j += 1;
        }
        y.emit(
            frame(arr)
                .highlight([k])
                .describe(format!("Merging: Placed {} at index {k}", arr[k])),
        )
        .await;
        k += 1;
    }

    for &value in &lower[i..] {
        arr[k] = value;
        y.emit(
            frame(arr)
                .highlight([k])
                .describe(format!("Merging remaining L: Placed {value} at index {k}")),
        )
        .await;
        k += 1;
    }

    for &value in &upper[j..] {
        arr[k] = value;
        y.emit(
            frame(arr)
                .highlight([k])
                .describe(format!("Merging remaining R: Placed {value} at index {k}")),
        )
        .await;
        k += 1;
    }
}
