use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, GraphEdge, GraphNode, GraphView, Producer, Tone,
    Visualizer,
};
use rand::rngs::StdRng;

use crate::graph::{scattered_node, view};

const DEFAULT_POINTS: usize = 10;
const MIN_POINTS: usize = 5;
const MAX_POINTS: usize = 50;

pub fn definition() -> AlgorithmDefinition<GraphView> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "convex-hull",
            "Convex Hull (Jarvis March)",
            Category::Greedy,
            Visualizer::PrimitiveGraph,
            "Computes the convex hull of a set of points. Intuitively, it mimics wrapping a rubber band around the outer boundary of the points.",
        )
        .with_controls([Control::input("Points", "n", DEFAULT_POINTS as i64)]),
        random_points,
        run,
    )
}

/// Unlabeled points scattered over the canvas.
pub fn random_points(size: Option<usize>, rng: &mut StdRng) -> GraphView {
    let n = size.unwrap_or(DEFAULT_POINTS).clamp(MIN_POINTS, MAX_POINTS);
    let nodes = (0..n)
        .map(|i| {
            let mut node = scattered_node(i, "", rng);
            node.color = Some(Tone::Slate);
            node
        })
        .collect();
    GraphView::new(nodes, Vec::new(), true)
}

/// Z component of `(a - o) x (b - o)`.
fn cross(o: &GraphNode, a: &GraphNode, b: &GraphNode) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn leftmost(nodes: &[GraphNode]) -> usize {
    (1..nodes.len()).fold(0, |best, i| {
        let (a, b) = (&nodes[i], &nodes[best]);
        if a.x < b.x || (a.x == b.x && a.y < b.y) {
            i
        } else {
            best
        }
    })
}

fn hull_edge(from: usize, to: usize, tone: Tone) -> GraphEdge {
    GraphEdge::new(from.to_string(), to.to_string()).with_color(tone).directed()
}

fn run(ctx: Context<GraphView>) -> Producer<GraphView> {
    Producer::new(move |y| async move {
        let mut graph = ctx.state.get();
        graph.edges.clear();
        let n = graph.nodes.len();
        if n < 2 {
            y.emit(view(&graph, "Convex Hull wrapping complete!")).await;
            return;
        }

        let start = leftmost(&graph.nodes);
        graph.nodes[start].color = Some(Tone::Green);
        graph.nodes[start].active = true;
        y.emit(view(&graph, "Starting at leftmost point")).await;
        graph.nodes[start].active = false;

        let mut hull: Vec<GraphEdge> = Vec::new();
        let mut p = start;
        loop {
            let mut q = (p + 1) % n;
            for i in (0..n).filter(|&i| i != p) {
                graph.edges = hull.clone();
                graph.edges.push(hull_edge(p, i, Tone::Yellow));

                let turn = cross(&graph.nodes[p], &graph.nodes[i], &graph.nodes[q]);
                let farther = graph.nodes[p].distance_to(&graph.nodes[i]) > graph.nodes[p].distance_to(&graph.nodes[q]);
                if turn < 0.0 || (turn == 0.0 && farther) {
                    q = i;
                }

                if i % 3 == 0 {
                    y.emit(view(&graph, "Scanning points...")).await;
                }
            }

            hull.push(hull_edge(p, q, Tone::Green));
            graph.edges = hull.clone();
            graph.nodes[q].color = Some(Tone::Green);
            graph.nodes[q].active = true;
            y.emit(view(&graph, format!("Found hull edge to Point {q}"))).await;
            graph.nodes[q].active = false;

            p = q;
            if p == start || hull.len() >= n {
                break;
            }
        }

        y.emit(view(&graph, "Convex Hull wrapping complete!")).await;
    })
}
