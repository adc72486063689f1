use std::collections::HashSet;

use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, GraphEdge, GraphView, Producer, Tone, Visualizer,
};
use rand::rngs::StdRng;

use crate::graph::{letter, scattered_node, view};

const DEFAULT_NODES: usize = 8;
const MIN_NODES: usize = 5;
const MAX_NODES: usize = 15;

/// Points farther apart than this are left unconnected.
const MAX_LINK: f64 = 350.0;

pub fn definition() -> AlgorithmDefinition<GraphView> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "prims-mst",
            "Prim’s MST",
            Category::Greedy,
            Visualizer::PrimitiveGraph,
            "Finds the Minimum Spanning Tree (MST) of a graph. It starts from an arbitrary node and repeatedly adds the shortest edge connecting the tree to a node not yet in the tree. Imagine laying fiber-optic cables to connect cities with the least amount of wire.",
        )
        .with_controls([Control::input("Nodes", "count", DEFAULT_NODES as i64)]),
        generate_network,
        run,
    )
}

/// Scattered cities, linked when close enough, weighted by distance.
pub fn generate_network(size: Option<usize>, rng: &mut StdRng) -> GraphView {
    let n = size.unwrap_or(DEFAULT_NODES).clamp(MIN_NODES, MAX_NODES);
    let nodes: Vec<_> = (0..n).map(|i| scattered_node(i, letter(i), rng)).collect();

    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            let dist = nodes[i].distance_to(&nodes[j]);
            if dist < MAX_LINK {
                edges.push(
                    GraphEdge::new(i.to_string(), j.to_string())
                        .with_color(Tone::Slate)
                        .with_weight(dist.floor() as u32),
                );
            }
        }
    }

    GraphView::new(nodes, edges, false)
}

fn length(graph: &GraphView, edge: &GraphEdge) -> f64 {
    match (graph.node(&edge.from), graph.node(&edge.to)) {
        (Some(a), Some(b)) => a.distance_to(b),
        _ => f64::INFINITY,
    }
}

fn run(ctx: Context<GraphView>) -> Producer<GraphView> {
    Producer::new(move |y| async move {
        let mut graph = ctx.state.get();
        let Some(root) = graph.nodes.first().map(|n| n.id.clone()) else {
            y.emit(view(&graph, "MST Complete! Minimum wire length achieved.")).await;
            return;
        };

        let mut visited: HashSet<String> = HashSet::from([root]);
        graph.nodes[0].color = Some(Tone::Green);
        graph.nodes[0].active = true;
        let start = format!("Starting Prim's Algorithm at Node {}", graph.nodes[0].label);
        y.emit(view(&graph, start)).await;
        graph.nodes[0].active = false;

        while visited.len() < graph.nodes.len() {
            let mut best: Option<(usize, f64, String)> = None;

            for i in 0..graph.edges.len() {
                let from_in = visited.contains(&graph.edges[i].from);
                let to_in = visited.contains(&graph.edges[i].to);
                let selected = graph.edges[i].color == Some(Tone::Green);

                if from_in != to_in {
                    if !selected {
                        graph.edges[i].color = Some(Tone::Yellow);
                    }
                    let dist = length(&graph, &graph.edges[i]);
                    if best.as_ref().map_or(true, |(_, d, _)| dist < *d) {
                        let edge = &graph.edges[i];
                        let target = if from_in { &edge.to } else { &edge.from };
                        best = Some((i, dist, target.clone()));
                    }
                } else if !from_in {
                    graph.edges[i].color = Some(Tone::Slate);
                } else if !selected {
                    graph.edges[i].color = Some(Tone::Faint);
                }
            }

            y.emit(view(&graph, "Searching for shortest connection...")).await;

            // no crossing edge: the rest of the graph is unreachable
            let Some((edge, dist, target)) = best else {
                break;
            };
            graph.edges[edge].color = Some(Tone::Green);
            let Some(index) = graph.nodes.iter().position(|n| n.id == target) else {
                break;
            };
            visited.insert(target);
            graph.nodes[index].color = Some(Tone::Green);
            graph.nodes[index].active = true;
            let connected = format!("Connected Node {} (Dist: {})", graph.nodes[index].label, dist.floor());
            y.emit(view(&graph, connected)).await;
            graph.nodes[index].active = false;
        }

        let unreachable = graph.nodes.len() - visited.len();
        let summary = if unreachable == 0 {
            "MST Complete! Minimum wire length achieved.".to_string()
        } else {
            format!("Graph is disconnected: {unreachable} nodes unreachable.")
        };
        y.emit(view(&graph, summary)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{GraphNode, Payload, Projection};
    use rand::SeedableRng;

    fn final_frame(graph: GraphView) -> (GraphView, Option<String>) {
        let snap = definition()
            .simulate(graph, StdRng::seed_from_u64(0))
            .expect("autonomous")
            .last()
            .expect("frames");
        match snap.data {
            Payload::Projection(Projection::Graph(graph)) => (graph, snap.description),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    fn final_graph(graph: GraphView) -> GraphView {
        final_frame(graph).0
    }

    /// Kruskal over the same edges, for comparison.
    fn kruskal_total(graph: &GraphView) -> (usize, f64) {
        let mut parent: Vec<usize> = (0..graph.nodes.len()).collect();
        fn find(parent: &mut [usize], x: usize) -> usize {
            if parent[x] != x {
                let root = find(parent, parent[x]);
                parent[x] = root;
            }
            parent[x]
        }

        let mut edges: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (length(graph, e), e.from.parse::<usize>().unwrap(), e.to.parse::<usize>().unwrap()))
            .collect();
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (mut count, mut total) = (0, 0.0);
        for (w, a, b) in edges {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
                count += 1;
                total += w;
            }
        }
        (count, total)
    }

    #[test]
    fn matches_kruskal_on_connected_networks() {
        for seed in 0..15 {
            let mut rng = StdRng::seed_from_u64(seed);
            let network = generate_network(Some(10), &mut rng);
            let (count, total) = kruskal_total(&network);
            if count != network.nodes.len() - 1 {
                continue;
            }

            let mst = final_graph(network);
            let chosen: Vec<_> = mst.edges.iter().filter(|e| e.color == Some(Tone::Green)).collect();
            assert_eq!(chosen.len(), count, "seed {seed}");
            let weight: f64 = chosen.iter().map(|e| length(&mst, e)).sum();
            assert!((weight - total).abs() < 1e-6, "seed {seed}: {weight} vs {total}");
            assert!(mst.nodes.iter().all(|n| n.color == Some(Tone::Green)));
        }
    }

    #[test]
    fn disconnected_graph_stops_early() {
        let nodes = vec![
            GraphNode::new("0", "A", 0.0, 0.0),
            GraphNode::new("1", "B", 10.0, 0.0),
            GraphNode::new("2", "C", 500.0, 0.0),
        ];
        let edges = vec![GraphEdge::new("0", "1")];
        let (mst, description) = final_frame(GraphView::new(nodes, edges, false));
        assert_eq!(mst.nodes[1].color, Some(Tone::Green));
        assert_eq!(mst.nodes[2].color, None);
        assert_eq!(description.as_deref(), Some("Graph is disconnected: 1 nodes unreachable."));
    }

    #[test]
    fn long_links_are_dropped() {
        let mut rng = StdRng::seed_from_u64(4);
        let network = generate_network(Some(15), &mut rng);
        assert!(network.edges.iter().all(|e| length(&network, e) < MAX_LINK));
        assert_eq!(generate_network(Some(2), &mut rng).nodes.len(), 5);
    }
}
