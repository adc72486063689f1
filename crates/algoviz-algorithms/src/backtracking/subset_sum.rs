use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Producer, Visualizer, Yielder};
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::Rng;

use crate::bars::frame;

const DEFAULT_SIZE: usize = 10;
const MIN_SIZE: usize = 2;
const MAX_SIZE: usize = 20;

pub fn definition() -> AlgorithmDefinition<Vec<i64>> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "subset-sum",
            "Subset Sum",
            Category::Backtracking,
            Visualizer::BarChart,
            "Finds a subset of numbers that add up to a specific target. The target is randomly generated from the input data to guarantee a solution exists.",
        ),
        random_weights,
        run,
    )
}

/// Random values in `1..=20`.
pub fn random_weights(size: Option<usize>, rng: &mut StdRng) -> Vec<i64> {
    let n = size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE);
    (0..n).map(|_| rng.gen_range(1..=20)).collect()
}

/// Sum of a coin-flipped subset, so at least one solution exists.
fn pick_target(values: &[i64], rng: &mut impl Rng) -> i64 {
    let picked: Vec<i64> = values.iter().copied().filter(|_| rng.gen_bool(0.5)).collect();
    if picked.is_empty() {
        values.first().copied().unwrap_or(0)
    } else {
        picked.iter().sum()
    }
}

struct Search<'a> {
    y: &'a Yielder<Vec<i64>>,
    values: &'a [i64],
    target: i64,
}

impl Search<'_> {
    fn backtrack<'s>(&'s self, index: usize, sum: i64, path: &'s mut Vec<usize>) -> BoxFuture<'s, bool> {
        Box::pin(async move {
            let (highlight, checking) = match self.values.get(index) {
                Some(value) => (
                    path.iter().copied().chain([index]).collect::<Vec<_>>(),
                    format!("Checking index {index} ({value})"),
                ),
                None => (path.clone(), "End of list".to_string()),
            };
            self.y
                .emit(frame(self.values).highlight(highlight).describe(format!(
                    "Target: {} | Current Sum: {sum} | {checking}",
                    self.target
                )))
                .await;

            if sum == self.target {
                self.y
                    .emit(
                        frame(self.values)
                            .highlight(path.iter().copied())
                            .describe(format!("SOLUTION FOUND! Subset sums to {}.", self.target)),
                    )
                    .await;
                return true;
            }

            let Some(&value) = self.values.get(index) else {
                return false;
            };
            if sum > self.target {
                return false;
            }

            path.push(index);
            if self.backtrack(index + 1, sum + value, path).await {
                return true;
            }
            path.pop();
            self.backtrack(index + 1, sum, path).await
        })
    }
}

fn run(ctx: Context<Vec<i64>>) -> Producer<Vec<i64>> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let values = state.get();
        let target = pick_target(&values, &mut rng);

        y.emit(frame(&values).describe(format!("Generated Target: {target}. Looking for subset..."))).await;

        let search = Search {
            y: &y,
            values: &values,
            target,
        };
        let mut path = Vec::new();
        if !search.backtrack(0, 0, &mut path).await {
            y.emit(frame(&values).describe("No solution found (Search exhausted).")).await;
        }
    })
}
