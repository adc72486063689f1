use std::collections::VecDeque;

use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Domain, GraphEdge, GraphNode, GraphView, OperationFn,
    Producer, Projection, Snapshot, Tone, Visualizer,
};
use rand::rngs::StdRng;

use super::show;

const START_X: f64 = 100.0;
const ROW_Y: f64 = 200.0;
const SPACING: f64 = 120.0;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ListNode {
    id: u64,
    value: i64,
}

/// Doubly linked list. Links are implied by order; every node keeps a
/// stable id so the renderer can follow it across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkedList {
    nodes: VecDeque<ListNode>,
    next_id: u64,
}

impl LinkedList {
    /// Values from head to tail.
    pub fn values(&self) -> Vec<i64> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn make(&mut self, value: i64) -> ListNode {
        self.next_id += 1;
        ListNode {
            id: self.next_id,
            value,
        }
    }

    /// Insert at the head, returning the new node's id.
    pub fn push_front(&mut self, value: i64) -> u64 {
        let node = self.make(value);
        let id = node.id;
        self.nodes.push_front(node);
        id
    }

    /// Insert at the tail, returning the new node's id.
    pub fn push_back(&mut self, value: i64) -> u64 {
        let node = self.make(value);
        let id = node.id;
        self.nodes.push_back(node);
        id
    }

    pub fn pop_front(&mut self) -> Option<i64> {
        self.nodes.pop_front().map(|n| n.value)
    }

    fn head(&self) -> Option<&ListNode> {
        self.nodes.front()
    }

    /// Row of nodes with a next arrow and a prev arrow between neighbors.
    /// Head is purple, tail pink.
    fn draw(&self, active: Option<u64>) -> GraphView {
        let key = |node: &ListNode| format!("dll-{}", node.id);
        let last = self.nodes.len().saturating_sub(1);

        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let mut view = GraphNode::new(key(node), node.value.to_string(), START_X + idx as f64 * SPACING, ROW_Y);
                view.active = active == Some(node.id);
                view.color = if idx == 0 {
                    Some(Tone::Purple)
                } else if idx == last {
                    Some(Tone::Pink)
                } else {
                    None
                };
                view
            })
            .collect();

        let mut edges = Vec::new();
        for (a, b) in self.nodes.iter().zip(self.nodes.iter().skip(1)) {
            edges.push(GraphEdge::new(key(a), key(b)).with_color(Tone::Fixed).directed());
            edges.push(GraphEdge::new(key(b), key(a)).with_color(Tone::Slate).directed());
        }

        GraphView::new(nodes, edges, true)
    }
}

impl Domain for LinkedList {
    fn project(&self) -> Projection {
        self.draw(None).into()
    }
}

pub fn definition() -> AlgorithmDefinition<LinkedList> {
    AlgorithmDefinition::interactive(
        AlgorithmInfo::new(
            "doubly-linked-list",
            "Doubly Linked List",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "Nodes have pointers to both next and previous nodes.",
        )
        .with_controls([
            Control::input("Val", "val", 99),
            Control::button("Prepend", "prepend", "prepend"),
            Control::button("Append", "append", "append"),
            Control::button("Delete Head", "delHead", "deleteHead"),
        ]),
        seeded,
        [
            ("prepend", prepend as OperationFn<_>),
            ("append", append),
            ("deleteHead", delete_head),
        ],
    )
}

fn seeded(_size: Option<usize>, _rng: &mut StdRng) -> LinkedList {
    let mut list = LinkedList::default();
    for value in [10, 20, 30] {
        list.push_back(value);
    }
    list
}

fn prepend(ctx: Context<LinkedList>, args: &[i64]) -> Producer<LinkedList> {
    insert(ctx, args.first().copied(), End::Head)
}

fn append(ctx: Context<LinkedList>, args: &[i64]) -> Producer<LinkedList> {
    insert(ctx, args.first().copied(), End::Tail)
}

#[derive(Clone, Copy)]
enum End {
    Head,
    Tail,
}

fn insert(ctx: Context<LinkedList>, value: Option<i64>, end: End) -> Producer<LinkedList> {
    Producer::new(move |y| async move {
        let Some(value) = value else {
            let graph = ctx.state.read(|list| list.draw(None));
            y.emit(show(graph, "Insert needs a value.")).await;
            return;
        };

        let (graph, description) = ctx.state.write(|list| match end {
            End::Head => {
                let id = list.push_front(value);
                (list.draw(Some(id)), format!("Prepended {value} to Head"))
            }
            End::Tail => {
                let id = list.push_back(value);
                (list.draw(Some(id)), format!("Appended {value} to Tail"))
            }
        });
        y.emit(show(graph, description)).await;
        y.emit(Snapshot::domain(ctx.state.get()).describe("Ready")).await;
    })
}

fn delete_head(ctx: Context<LinkedList>, _args: &[i64]) -> Producer<LinkedList> {
    Producer::new(move |y| async move {
        let Some((id, value)) = ctx.state.read(|list| list.head().map(|n| (n.id, n.value))) else {
            let graph = ctx.state.read(|list| list.draw(None));
            y.emit(show(graph, "List is empty. Nothing to delete.")).await;
            return;
        };

        let graph = ctx.state.read(|list| list.draw(Some(id)));
        y.emit(show(graph, format!("Deleting Head: {value}"))).await;

        let graph = ctx.state.write(|list| {
            list.pop_front();
            list.draw(None)
        });
        y.emit(show(graph, "Head deleted")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn starts_with_three_nodes() {
        let list = seeded(None, &mut StdRng::seed_from_u64(0));
        assert_eq!(list.values(), vec![10, 20, 30]);
    }

    #[test]
    fn ids_stay_stable_across_inserts() {
        let mut list = seeded(None, &mut StdRng::seed_from_u64(0));
        let before = list.draw(None);
        list.push_front(5);
        let after = list.draw(None);
        assert_eq!(before.nodes[0].id, after.nodes[1].id);
        assert_eq!(after.nodes[0].color, Some(Tone::Purple));
        assert_eq!(after.nodes[3].color, Some(Tone::Pink));
    }

    #[test]
    fn both_directions_are_drawn() {
        let graph = seeded(None, &mut StdRng::seed_from_u64(0)).draw(None);
        assert_eq!(graph.edges.len(), 4);
        assert_eq!(graph.edges[0].from, graph.edges[1].to);
        assert_eq!(graph.edges[0].to, graph.edges[1].from);
    }

    #[test]
    fn single_node_is_head_colored() {
        let mut list = LinkedList::default();
        list.push_back(1);
        assert_eq!(list.draw(None).nodes[0].color, Some(Tone::Purple));
        assert_eq!(list.pop_front(), Some(1));
        assert!(list.is_empty());
    }
}
