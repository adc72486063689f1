use std::f64::consts::{FRAC_PI_2, TAU};

use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, GraphEdge, GraphNode, GraphView, Producer, Tone,
    Visualizer, Yielder,
};
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::Rng;

use crate::graph::{letter, view};

const PALETTE: [Tone; 4] = [Tone::Red, Tone::Green, Tone::Blue, Tone::Yellow];

const DEFAULT_NODES: usize = 6;
const MIN_NODES: usize = 4;
const MAX_NODES: usize = 12;

const CENTER: (f64, f64) = (400.0, 200.0);
const RADIUS: f64 = 130.0;
const CHORD_CHANCE: f64 = 0.45;

pub fn definition() -> AlgorithmDefinition<GraphView> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "m-coloring",
            "Graph Coloring",
            Category::Backtracking,
            Visualizer::PrimitiveGraph,
            "Assign colors to nodes such that no two adjacent nodes share the same color.",
        )
        .with_controls([Control::input("Nodes", "size", DEFAULT_NODES as i64)]),
        generate_graph,
        run,
    )
}

/// Nodes on a jittered circle, joined in a ring plus random chords.
pub fn generate_graph(size: Option<usize>, rng: &mut StdRng) -> GraphView {
    let n = size.unwrap_or(DEFAULT_NODES).clamp(MIN_NODES, MAX_NODES);

    let nodes = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * TAU - FRAC_PI_2 + rng.gen_range(-0.25..0.25);
            let radius = RADIUS + rng.gen_range(-30.0..30.0);
            GraphNode::new(
                i.to_string(),
                letter(i),
                CENTER.0 + radius * angle.cos(),
                CENTER.1 + radius * angle.sin(),
            )
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..n {
        edges.push(GraphEdge::new(i.to_string(), ((i + 1) % n).to_string()));
        for j in i + 2..n {
            // 0 and n-1 are already joined by the ring
            if i == 0 && j == n - 1 {
                continue;
            }
            if rng.gen_bool(CHORD_CHANCE) {
                edges.push(GraphEdge::new(i.to_string(), j.to_string()));
            }
        }
    }

    GraphView::new(nodes, edges, false)
}

fn is_safe(graph: &GraphView, index: usize, tone: Tone) -> bool {
    let id = &graph.nodes[index].id;
    !graph
        .neighbors(id)
        .filter_map(|other| graph.node(other))
        .any(|neighbor| neighbor.color == Some(tone))
}

fn solve<'a>(y: &'a Yielder<GraphView>, graph: &'a mut GraphView, index: usize) -> BoxFuture<'a, bool> {
    Box::pin(async move {
        if index == graph.nodes.len() {
            return true;
        }
        let label = graph.nodes[index].label.clone();

        for tone in PALETTE {
            graph.nodes[index].active = true;
            y.emit(view(graph, format!("Trying color for Node {label}"))).await;

            if is_safe(graph, index, tone) {
                graph.nodes[index].color = Some(tone);
                graph.nodes[index].active = false;
                y.emit(view(graph, "Color valid so far")).await;

                if solve(y, graph, index + 1).await {
                    return true;
                }

                graph.nodes[index].active = true;
                y.emit(view(graph, format!("Backtracking Node {label}"))).await;
                graph.nodes[index].color = None;
            }
        }
        graph.nodes[index].active = false;
        false
    })
}

fn run(ctx: Context<GraphView>) -> Producer<GraphView> {
    Producer::new(move |y| async move {
        let mut graph = ctx.state.get();
        let start = format!(
            "Starting: color {} nodes with {} colors",
            graph.nodes.len(),
            PALETTE.len()
        );
        y.emit(view(&graph, start)).await;
        solve(&y, &mut graph, 0).await;
        y.emit(view(&graph, "Finished!")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Payload, Projection};
    use rand::SeedableRng;

    fn last_graph(graph: GraphView) -> GraphView {
        let snap = definition()
            .simulate(graph, StdRng::seed_from_u64(0))
            .expect("autonomous")
            .last()
            .expect("frames");
        assert_eq!(snap.description.as_deref(), Some("Finished!"));
        match snap.data {
            Payload::Projection(Projection::Graph(graph)) => graph,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn opens_with_uncolored_graph() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = generate_graph(Some(6), &mut rng);
        let first = definition()
            .simulate(graph, StdRng::seed_from_u64(0))
            .expect("autonomous")
            .next()
            .expect("frames");

        assert_eq!(first.description.as_deref(), Some("Starting: color 6 nodes with 4 colors"));
        let Some(Projection::Graph(shown)) = first.projection_value() else {
            panic!("expected a graph");
        };
        assert!(shown.nodes.iter().all(|n| n.color.is_none()));
    }

    #[test]
    fn generated_graphs_color_properly() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_graph(Some(8), &mut rng);
            let colored = last_graph(graph);

            if colored.nodes.iter().all(|n| n.color.is_some()) {
                for edge in &colored.edges {
                    let a = colored.node(&edge.from).and_then(|n| n.color);
                    let b = colored.node(&edge.to).and_then(|n| n.color);
                    assert_ne!(a, b, "seed {seed}: {} - {}", edge.from, edge.to);
                }
            }
        }
    }

    #[test]
    fn complete_graph_on_five_exhausts_palette() {
        let nodes = (0..5).map(|i| GraphNode::new(i.to_string(), letter(i), 0.0, 0.0)).collect();
        let mut edges = Vec::new();
        for i in 0..5 {
            for j in i + 1..5 {
                edges.push(GraphEdge::new(i.to_string(), j.to_string()));
            }
        }
        let colored = last_graph(GraphView::new(nodes, edges, false));
        assert!(colored.nodes.iter().all(|n| n.color.is_none()));
    }

    #[test]
    fn generator_shapes() {
        let mut rng = StdRng::seed_from_u64(9);
        let graph = generate_graph(None, &mut rng);
        assert_eq!(graph.nodes.len(), 6);
        assert!(graph.edges.len() >= 6);
        assert_eq!(generate_graph(Some(1), &mut rng).nodes.len(), 4);
        assert_eq!(generate_graph(Some(40), &mut rng).nodes.len(), 12);

        let mut pairs: Vec<_> = graph
            .edges
            .iter()
            .map(|e| {
                let (a, b) = (e.from.parse::<usize>().unwrap(), e.to.parse::<usize>().unwrap());
                (a.min(b), a.max(b))
            })
            .collect();
        let total = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), total);
    }
}
