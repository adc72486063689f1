use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, GraphEdge, GraphNode, GraphView, Producer, Tone,
    Visualizer,
};
use rand::rngs::StdRng;
use rand::Rng;

use crate::graph::{index_of, view};

const DEFAULT_ROUTERS: usize = 6;
const MIN_ROUTERS: usize = 4;
const MAX_ROUTERS: usize = 10;

const MIN_SPACING: f64 = 90.0;
const PLACEMENT_ATTEMPTS: usize = 50;
const LINK_RANGE: f64 = 250.0;

pub fn definition() -> AlgorithmDefinition<GraphView> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "ospf-routing",
            "Network Routing (OSPF)",
            Category::Greedy,
            Visualizer::PrimitiveGraph,
            "Simulates a Router running the OSPF (Link State) protocol. It uses Dijkstra’s algorithm to calculate the \"Shortest Path Tree\" from the Source Router (A) to all other subnets. Link costs represent bandwidth (1 = Fast, 10 = Slow).",
        )
        .with_controls([Control::input("Routers", "count", DEFAULT_ROUTERS as i64)]),
        generate_network,
        run,
    )
}

/// Link cost: mostly 10, sometimes a fast 1 or a slow 50.
fn link_cost(rng: &mut StdRng) -> u32 {
    let roll: f64 = rng.gen();
    if roll > 0.8 {
        1
    } else if roll < 0.3 {
        50
    } else {
        10
    }
}

/// R0 on the left, the other routers spaced apart, nearby routers linked.
pub fn generate_network(size: Option<usize>, rng: &mut StdRng) -> GraphView {
    let n = size.unwrap_or(DEFAULT_ROUTERS).clamp(MIN_ROUTERS, MAX_ROUTERS);

    let mut source = GraphNode::new("0", "R0", 150.0, 200.0);
    source.color = Some(Tone::Green);
    let mut nodes = vec![source];

    for i in 1..n {
        let mut spot = (0.0, 0.0);
        for _ in 0..PLACEMENT_ATTEMPTS {
            spot = (rng.gen_range(200..700) as f64, rng.gen_range(50..350) as f64);
            let crowded = nodes
                .iter()
                .any(|node| (node.x - spot.0).hypot(node.y - spot.1) < MIN_SPACING);
            if !crowded {
                break;
            }
        }
        nodes.push(GraphNode::new(i.to_string(), format!("R{i}"), spot.0, spot.1));
    }

    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            // R0 always reaches R1 and R2
            if nodes[i].distance_to(&nodes[j]) < LINK_RANGE || (i == 0 && j < 3) {
                edges.push(
                    GraphEdge::new(i.to_string(), j.to_string())
                        .with_color(Tone::Slate)
                        .with_weight(link_cost(rng)),
                );
            }
        }
    }

    GraphView::new(nodes, edges, false)
}

/// Point the edge from `parent` to `child` and mark it as a route.
fn lock_route(edge: &mut GraphEdge, parent: &str) {
    if edge.from != parent {
        std::mem::swap(&mut edge.from, &mut edge.to);
    }
    edge.color = Some(Tone::Green);
    edge.directed = true;
}

fn run(ctx: Context<GraphView>) -> Producer<GraphView> {
    Producer::new(move |y| async move {
        let mut graph = ctx.state.get();
        let n = graph.nodes.len();
        let ends: Vec<(usize, usize)> = graph
            .edges
            .iter()
            .map(|e| {
                let end = |id: &str| index_of(&graph, id).unwrap_or(usize::MAX);
                (end(&e.from), end(&e.to))
            })
            .collect();

        let mut dist = vec![u64::MAX; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        if let Some(d) = dist.first_mut() {
            *d = 0;
        }

        y.emit(view(&graph, "OSPF Init: Router R0 detects neighbors...")).await;

        loop {
            let next = (0..n)
                .filter(|&i| !visited[i] && dist[i] != u64::MAX)
                .min_by_key(|&i| (dist[i], i));
            let Some(u) = next else {
                break;
            };
            visited[u] = true;

            graph.nodes[u].active = true;
            if let Some(edge) = parent[u] {
                let via = if ends[edge].0 == u { ends[edge].1 } else { ends[edge].0 };
                let via_id = graph.nodes[via].id.clone();
                lock_route(&mut graph.edges[edge], &via_id);
            }
            let processing = format!(
                "Router {} processing Link State Advertisements. Metric: {}",
                graph.nodes[u].label, dist[u]
            );
            y.emit(view(&graph, processing)).await;
            graph.nodes[u].active = false;

            for edge in 0..graph.edges.len() {
                let (a, b) = ends[edge];
                let v = match (a == u, b == u) {
                    (true, _) => b,
                    (_, true) => a,
                    _ => continue,
                };
                if v >= n || visited[v] {
                    continue;
                }

                let cost = graph.edges[edge].weight.unwrap_or(1);
                if graph.edges[edge].color != Some(Tone::Green) {
                    graph.edges[edge].color = Some(Tone::Yellow);
                }
                let checking = format!(
                    "{} checks link to {} (Cost {cost}). Total: {} + {cost}",
                    graph.nodes[u].label, graph.nodes[v].label, dist[u]
                );
                y.emit(view(&graph, checking)).await;

                let candidate = dist[u] + u64::from(cost);
                if candidate < dist[v] {
                    dist[v] = candidate;
                    if let Some(old) = parent[v].replace(edge) {
                        graph.edges[old].color = Some(Tone::Slate);
                    }
                    let improved = format!(
                        "New best route found to {}! Metric updated to {candidate}",
                        graph.nodes[v].label
                    );
                    y.emit(view(&graph, improved)).await;
                } else if graph.edges[edge].color != Some(Tone::Green) {
                    graph.edges[edge].color = Some(Tone::Slate);
                }
            }
        }

        let unreachable = visited.iter().filter(|&&seen| !seen).count();
        let summary = if unreachable == 0 {
            "OSPF Converged. Routing Table Built.".to_string()
        } else {
            format!("Network partitioned: {unreachable} routers unreachable from R0.")
        };
        y.emit(view(&graph, summary)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::{Payload, Projection};
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

    /// Bellman-Ford distances from node 0.
    fn reference_distances(graph: &GraphView) -> Vec<Option<u64>> {
        let n = graph.nodes.len();
        let mut dist = vec![None; n];
        dist[0] = Some(0);
        for _ in 0..n {
            for e in &graph.edges {
                let (a, b) = (index_of(graph, &e.from).unwrap(), index_of(graph, &e.to).unwrap());
                let w = u64::from(e.weight.unwrap_or(1));
                for (s, t) in [(a, b), (b, a)] {
                    if let Some(ds) = dist[s] {
                        if dist[t].map_or(true, |dt| ds + w < dt) {
                            dist[t] = Some(ds + w);
                        }
                    }
                }
            }
        }
        dist
    }

    /// Walk green edges back to R0, summing link costs.
    fn route_cost(graph: &GraphView, mut id: String) -> Option<u64> {
        let mut total = 0;
        for _ in 0..graph.nodes.len() {
            if id == "0" {
                return Some(total);
            }
            let edge = graph
                .edges
                .iter()
                .find(|e| e.color == Some(Tone::Green) && e.directed && e.to == id)?;
            total += u64::from(edge.weight.unwrap_or(1));
            id = edge.from.clone();
        }
        None
    }

    #[test]
    fn routes_follow_shortest_paths() {
        for seed in 0..15 {
            let mut rng = StdRng::seed_from_u64(seed);
            let network = generate_network(Some(8), &mut rng);
            let expected = reference_distances(&network);
            let tree = final_graph(network);

            for (i, node) in tree.nodes.iter().enumerate() {
                assert_eq!(route_cost(&tree, node.id.clone()), expected[i], "seed {seed}: {}", node.label);
            }
        }
    }

    #[test]
    fn isolated_router_is_reported() {
        let nodes = vec![
            GraphNode::new("0", "R0", 150.0, 200.0),
            GraphNode::new("1", "R1", 300.0, 200.0),
            GraphNode::new("2", "R2", 600.0, 100.0),
        ];
        let edges = vec![GraphEdge::new("0", "1").with_weight(10)];
        let (tree, description) = final_frame(GraphView::new(nodes, edges, false));

        assert_eq!(route_cost(&tree, "1".into()), Some(10));
        assert_eq!(route_cost(&tree, "2".into()), None);
        assert_eq!(
            description.as_deref(),
            Some("Network partitioned: 1 routers unreachable from R0.")
        );
    }

    #[test]
    fn converged_network_says_so() {
        let mut rng = StdRng::seed_from_u64(2);
        let network = generate_network(Some(6), &mut rng);
        let reachable = reference_distances(&network).iter().all(Option::is_some);
        let (_, description) = final_frame(network);
        if reachable {
            assert_eq!(description.as_deref(), Some("OSPF Converged. Routing Table Built."));
        } else {
            assert!(description.is_some_and(|d| d.starts_with("Network partitioned")));
        }
    }

    #[test]
    fn source_always_has_two_links() {
        let mut rng = StdRng::seed_from_u64(11);
        let network = generate_network(None, &mut rng);
        assert_eq!(network.nodes.len(), 6);
        assert!(network.edges.iter().any(|e| e.from == "0" && e.to == "1"));
        assert!(network.edges.iter().any(|e| e.from == "0" && e.to == "2"));
        assert!(network.edges.iter().all(|e| matches!(e.weight, Some(1 | 10 | 50))));
    }
}
