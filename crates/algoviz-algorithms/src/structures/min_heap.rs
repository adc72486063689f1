use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Domain, GraphEdge, GraphNode, GraphView, Producer,
    Projection, Tone, Visualizer,
};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::show;

const DEFAULT_SIZE: usize = 12;
const MIN_SIZE: usize = 5;
/// Five full levels.
const MAX_SIZE: usize = 31;

const CANVAS_WIDTH: f64 = 800.0;

/// Values to be inserted into the heap, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapInput(pub Vec<i64>);

impl Domain for HeapInput {
    fn project(&self) -> Projection {
        draw(&self.0, &[], false).into()
    }
}

pub fn definition() -> AlgorithmDefinition<HeapInput> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "min-heap",
            "Binary Min-Heap",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "A Binary Heap is a complete binary tree where the parent is always smaller than its children (Min-Heap). It is efficiently stored as an array but visualized as a tree. Watch how elements \"bubble up\" or \"sift down\" to maintain the order.",
        )
        .with_controls([Control::input("Elements", "size", DEFAULT_SIZE as i64)]),
        random_input,
        run,
    )
}

pub fn random_input(size: Option<usize>, rng: &mut StdRng) -> HeapInput {
    let n = size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE);
    HeapInput((0..n).map(|_| rng.gen_range(1..=99)).collect())
}

/// Canvas position of array slot `index` in the implicit tree.
fn position(index: usize) -> (f64, f64) {
    let level = (index + 1).ilog2();
    let first_in_level = (1usize << level) - 1;
    let slice = CANVAS_WIDTH / ((1usize << level) + 1) as f64;
    let x = slice * (index - first_in_level + 1) as f64;
    let y = 50.0 + 70.0 * level as f64;
    (x, y)
}

fn draw(heap: &[i64], active: &[usize], complete: bool) -> GraphView {
    let nodes = heap
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let (x, y) = position(i);
            let mut node = GraphNode::new(i.to_string(), value.to_string(), x, y);
            node.active = active.contains(&i);
            node.color = if complete {
                Some(Tone::Green)
            } else {
                node.active.then_some(Tone::Yellow)
            };
            node
        })
        .collect();
    let edges = (1..heap.len())
        .map(|i| GraphEdge::new(((i - 1) / 2).to_string(), i.to_string()).with_color(Tone::Fixed))
        .collect();
    GraphView::new(nodes, edges, false)
}

fn run(ctx: Context<HeapInput>) -> Producer<HeapInput> {
    Producer::new(move |y| async move {
        let HeapInput(values) = ctx.state.get();
        let mut heap: Vec<i64> = Vec::with_capacity(values.len());

        for value in values {
            heap.push(value);
            let mut current = heap.len() - 1;
            y.emit(show(
                draw(&heap, &[current], false),
                format!("Insert {value} at the next available position (Index {current})"),
            ))
            .await;

            while current > 0 {
                let parent = (current - 1) / 2;
                y.emit(show(
                    draw(&heap, &[current, parent], false),
                    format!("Compare Child ({}) with Parent ({})", heap[current], heap[parent]),
                ))
                .await;

                if heap[current] >= heap[parent] {
                    break;
                }
                heap.swap(current, parent);
                y.emit(show(
                    draw(&heap, &[current, parent], false),
                    format!("Swap! {} < {}, so bubble up.", heap[parent], heap[current]),
                ))
                .await;
                current = parent;
            }
        }

        y.emit(show(
            draw(&heap, &[], true),
            "Min-Heap Construction Complete! Root is the minimum element.",
        ))
        .await;
        if heap.is_empty() {
            return;
        }

        y.emit(show(draw(&heap, &[0], true), "Now, let's remove the Minimum (Root)...")).await;
        let minimum = heap.swap_remove(0);
        debug!(minimum, remaining = heap.len(), "extracted heap root");
        if let Some(&root) = heap.first() {
            y.emit(show(
                draw(&heap, &[0], false),
                format!("Replaced root with last element ({root}). Now Sift Down."),
            ))
            .await;
        }

        let mut current = 0;
        loop {
            let smallest = [2 * current + 1, 2 * current + 2]
                .into_iter()
                .filter(|&child| child < heap.len())
                .fold(current, |best, child| if heap[child] < heap[best] { child } else { best });
            if smallest == current {
                break;
            }
            y.emit(show(
                draw(&heap, &[current, smallest], false),
                format!("Swapping with smaller child ({})", heap[smallest]),
            ))
            .await;
            heap.swap(current, smallest);
            current = smallest;
        }

        y.emit(show(draw(&heap, &[], true), "Root removed. Heap property restored.")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Payload, Snapshot};
    use rand::SeedableRng;

    fn labels(snap: &Snapshot<HeapInput>) -> Vec<i64> {
        match &snap.data {
            Payload::Projection(Projection::Graph(graph)) => {
                graph.nodes.iter().map(|n| n.label.parse().unwrap()).collect()
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    fn is_min_heap(heap: &[i64]) -> bool {
        (1..heap.len()).all(|i| heap[(i - 1) / 2] <= heap[i])
    }

    #[test]
    fn builds_then_extracts_minimum() {
        let input = HeapInput(vec![5, 3, 8, 1, 9, 2]);
        let frames: Vec<_> = definition()
            .simulate(input, StdRng::seed_from_u64(0))
            .expect("autonomous")
            .collect();

        let built = frames
            .iter()
            .find(|s| s.description.as_deref().is_some_and(|d| d.starts_with("Min-Heap Construction Complete")))
            .expect("construction frame");
        let built = labels(built);
        assert!(is_min_heap(&built));
        assert_eq!(built[0], 1);

        let last = frames.last().expect("frames");
        assert_eq!(last.description.as_deref(), Some("Root removed. Heap property restored."));
        let remaining = labels(last);
        assert!(is_min_heap(&remaining));
        let mut sorted = remaining.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![2, 3, 5, 8, 9]);
    }

    #[test]
    fn tree_layout_levels() {
        assert_eq!(position(0), (400.0, 50.0));
        let (left, y1) = position(1);
        let (right, y2) = position(2);
        assert_eq!(y1, 120.0);
        assert_eq!(y1, y2);
        assert!(left < 400.0 && right > 400.0);
        assert_eq!(position(3).1, 190.0);
    }

    #[test]
    fn input_size_clamps() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_input(None, &mut rng).0.len(), 12);
        assert_eq!(random_input(Some(1), &mut rng).0.len(), 5);
        assert_eq!(random_input(Some(64), &mut rng).0.len(), 31);
        assert!(random_input(None, &mut rng).0.iter().all(|v| (1..=99).contains(v)));
    }
}
