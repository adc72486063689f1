//! Shared helpers for graph algorithms.

use algoviz_core::{GraphNode, GraphView, Snapshot};
use rand::rngs::StdRng;
use rand::Rng;

/// Uppercase letter label for the `index`-th node (`A`, `B`, ...).
pub fn letter(index: usize) -> String {
    char::from_u32('A' as u32 + index as u32)
        .map(String::from)
        .unwrap_or_else(|| index.to_string())
}

/// Node at a random position inside the 800x400 canvas margins.
pub fn scattered_node(index: usize, label: impl Into<String>, rng: &mut StdRng) -> GraphNode {
    let x = rng.gen_range(100..700) as f64;
    let y = rng.gen_range(50..350) as f64;
    GraphNode::new(index.to_string(), label, x, y)
}

/// Index of the node with the given id.
pub fn index_of(graph: &GraphView, id: &str) -> Option<usize> {
    graph.nodes.iter().position(|n| n.id == id)
}

/// Projection snapshot of the graph with a description.
pub fn view<T>(graph: &GraphView, description: impl Into<String>) -> Snapshot<T> {
    Snapshot::projection(graph.clone()).describe(description)
}
