use std::collections::VecDeque;

use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Domain, GraphEdge, GraphNode, GraphView, OperationFn,
    Producer, Projection, Snapshot, Tone, Visualizer,
};
use rand::rngs::StdRng;

use super::show;

const START_X: f64 = 100.0;
const ROW_Y: f64 = 200.0;
const SPACING: f64 = 70.0;

/// FIFO queue, front first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue(pub VecDeque<i64>);

impl Queue {
    /// Horizontal row, front on the left. The front is green, `active`
    /// entries red.
    fn draw(&self, active: Option<usize>) -> GraphView {
        let id = |idx: usize, value: i64| format!("q-{idx}-{value}");
        let values: Vec<i64> = self.0.iter().copied().collect();

        let nodes = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                let mut node = GraphNode::new(id(idx, value), value.to_string(), START_X + idx as f64 * SPACING, ROW_Y);
                node.active = active == Some(idx);
                node.color = if node.active {
                    Some(Tone::Red)
                } else {
                    (idx == 0).then_some(Tone::Green)
                };
                node
            })
            .collect();
        let edges = values
            .windows(2)
            .enumerate()
            .map(|(idx, pair)| GraphEdge::new(id(idx, pair[0]), id(idx + 1, pair[1])).directed())
            .collect();

        GraphView::new(nodes, edges, true)
    }
}

impl Domain for Queue {
    fn project(&self) -> Projection {
        self.draw(None).into()
    }
}

pub fn definition() -> AlgorithmDefinition<Queue> {
    AlgorithmDefinition::interactive(
        AlgorithmInfo::new(
            "queue-interactive",
            "Queue",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "FIFO Structure: First In, First Out.",
        )
        .with_controls([
            Control::input("Val", "val", 5),
            Control::button("Enqueue", "enq", "enqueue"),
            Control::button("Dequeue", "deq", "dequeue"),
        ]),
        seeded,
        [("enqueue", enqueue as OperationFn<_>), ("dequeue", dequeue)],
    )
}

fn seeded(_size: Option<usize>, _rng: &mut StdRng) -> Queue {
    Queue(VecDeque::from([10, 20, 30]))
}

fn enqueue(ctx: Context<Queue>, args: &[i64]) -> Producer<Queue> {
    let value = args.first().copied();
    Producer::new(move |y| async move {
        let Some(value) = value else {
            let graph = ctx.state.read(|queue| queue.draw(None));
            y.emit(show(graph, "Enqueue needs a value.")).await;
            return;
        };

        let graph = ctx.state.write(|queue| {
            queue.0.push_back(value);
            queue.draw(Some(queue.0.len() - 1))
        });
        y.emit(show(graph, format!("Enqueued {value} at the rear."))).await;
        y.emit(Snapshot::domain(ctx.state.get()).describe("Ready")).await;
    })
}

fn dequeue(ctx: Context<Queue>, _args: &[i64]) -> Producer<Queue> {
    Producer::new(move |y| async move {
        let Some(value) = ctx.state.read(|queue| queue.0.front().copied()) else {
            let graph = ctx.state.read(|queue| queue.draw(None));
            y.emit(show(graph, "Queue Underflow!")).await;
            return;
        };

        let graph = ctx.state.read(|queue| queue.draw(Some(0)));
        y.emit(show(graph, format!("Dequeuing front value: {value}"))).await;

        let graph = ctx.state.write(|queue| {
            queue.0.pop_front();
            queue.draw(None)
        });
        y.emit(show(graph, format!("Removed {value}. Elements shifted."))).await;
    })
}
