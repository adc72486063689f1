use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Domain, GraphEdge, GraphNode, GraphView, OperationFn,
    Producer, Projection, Snapshot, Tone, Visualizer,
};
use rand::rngs::StdRng;

use super::show;

const BASE_Y: f64 = 350.0;
const SPACING: f64 = 50.0;

/// LIFO stack, bottom first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack(pub Vec<i64>);

impl Stack {
    /// Vertical tower growing upwards from the bottom of the canvas.
    fn draw(&self, active: Option<usize>) -> GraphView {
        let id = |idx: usize| format!("node-{idx}");
        let nodes = self
            .0
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let mut node = GraphNode::new(id(idx), value.to_string(), 400.0, BASE_Y - idx as f64 * SPACING);
                node.active = active == Some(idx);
                node.color = node.active.then_some(Tone::Yellow);
                node
            })
            .collect();
        let edges = (1..self.0.len())
            .map(|idx| GraphEdge::new(id(idx - 1), id(idx)).with_color(Tone::Slate).directed())
            .collect();
        GraphView::new(nodes, edges, true)
    }
}

impl Domain for Stack {
    fn project(&self) -> Projection {
        self.draw(None).into()
    }
}

pub fn definition() -> AlgorithmDefinition<Stack> {
    AlgorithmDefinition::interactive(
        AlgorithmInfo::new(
            "stack-interactive",
            "Stack",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "LIFO Structure: Last In, First Out.",
        )
        .with_controls([
            Control::input("Value", "val", 10),
            Control::button("Push", "push", "push"),
            Control::button("Pop", "pop", "pop"),
        ]),
        empty,
        [("push", push as OperationFn<_>), ("pop", pop)],
    )
}

fn empty(_size: Option<usize>, _rng: &mut StdRng) -> Stack {
    Stack::default()
}

fn push(ctx: Context<Stack>, args: &[i64]) -> Producer<Stack> {
    let value = args.first().copied();
    Producer::new(move |y| async move {
        let Some(value) = value else {
            let graph = ctx.state.read(|stack| stack.draw(None));
            y.emit(show(graph, "Push needs a value.")).await;
            return;
        };

        let graph = ctx.state.write(|stack| {
            stack.0.push(value);
            stack.draw(Some(stack.0.len() - 1))
        });
        y.emit(show(graph, format!("Pushed {value} to the top."))).await;
        y.emit(Snapshot::domain(ctx.state.get()).describe("Ready")).await;
    })
}

fn pop(ctx: Context<Stack>, _args: &[i64]) -> Producer<Stack> {
    Producer::new(move |y| async move {
        let Some((top, value)) = ctx.state.read(|stack| stack.0.last().map(|&v| (stack.0.len() - 1, v))) else {
            let graph = ctx.state.read(|stack| stack.draw(None));
            y.emit(show(graph, "Stack Underflow! (Empty)")).await;
            return;
        };

        let graph = ctx.state.read(|stack| stack.draw(Some(top)));
        y.emit(show(graph, format!("Popping top value: {value}"))).await;

        let (graph, new_top) = ctx.state.write(|stack| {
            stack.0.pop();
            (stack.draw(None), stack.0.last().copied())
        });
        let new_top = new_top.map_or_else(|| "none".to_string(), |v| v.to_string());
        y.emit(show(graph, format!("Removed {value}. New top is {new_top}"))).await;
    })
}
