use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Domain, GraphEdge, GraphNode, GraphView, OperationFn,
    Producer, Projection, Snapshot, Tone, Visualizer,
};
use rand::rngs::StdRng;

use super::show;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeNode {
    value: i64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced binary search tree stored as an arena; the root is slot 0.
/// Equal values go right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl SearchTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Values in sorted order.
    pub fn in_order(&self) -> Vec<i64> {
        fn walk(tree: &SearchTree, idx: Option<usize>, out: &mut Vec<i64>) {
            if let Some(node) = idx.and_then(|i| tree.nodes.get(i)) {
                walk(tree, node.left, out);
                out.push(node.value);
                walk(tree, node.right, out);
            }
        }
        let mut out = Vec::with_capacity(self.nodes.len());
        walk(self, (!self.nodes.is_empty()).then_some(0), &mut out);
        out
    }

    /// Number of levels.
    pub fn height(&self) -> usize {
        fn depth(tree: &SearchTree, idx: Option<usize>) -> usize {
            idx.and_then(|i| tree.nodes.get(i))
                .map_or(0, |node| 1 + depth(tree, node.left).max(depth(tree, node.right)))
        }
        depth(self, (!self.nodes.is_empty()).then_some(0))
    }

    fn child(&self, idx: usize, side: Side) -> Option<usize> {
        let node = &self.nodes[idx];
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    fn attach(&mut self, parent: usize, side: Side, value: i64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(TreeNode {
            value,
            left: None,
            right: None,
        });
        match side {
            Side::Left => self.nodes[parent].left = Some(idx),
            Side::Right => self.nodes[parent].right = Some(idx),
        }
        idx
    }

    fn draw(&self, active: Option<usize>) -> GraphView {
        fn place(
            tree: &SearchTree,
            idx: usize,
            (x, y): (f64, f64),
            offset: f64,
            active: Option<usize>,
            graph: &mut GraphView,
        ) {
            let node = &tree.nodes[idx];
            let mut view = GraphNode::new(format!("node-{idx}"), node.value.to_string(), x, y);
            view.active = active == Some(idx);
            view.color = view.active.then_some(Tone::Yellow);
            graph.nodes.push(view);

            for (child, dx) in [(node.left, -offset), (node.right, offset)] {
                if let Some(child) = child {
                    graph.edges.push(GraphEdge::new(format!("node-{idx}"), format!("node-{child}")));
                    place(tree, child, (x + dx, y + 60.0), offset / 1.6, active, graph);
                }
            }
        }

        let mut graph = GraphView::new(Vec::new(), Vec::new(), true);
        if !self.nodes.is_empty() {
            place(self, 0, (400.0, 50.0), 180.0, active, &mut graph);
        }
        graph
    }
}

impl Domain for SearchTree {
    fn project(&self) -> Projection {
        self.draw(None).into()
    }
}

pub fn definition() -> AlgorithmDefinition<SearchTree> {
    AlgorithmDefinition::interactive(
        AlgorithmInfo::new(
            "bst-interactive",
            "Binary Search Tree",
            Category::DataStructures,
            Visualizer::PrimitiveGraph,
            "Construct a BST by inserting nodes manually.",
        )
        .with_controls([
            Control::input("Value", "value", 50),
            Control::button("Insert", "btn-insert", "insert"),
        ]),
        empty,
        [("insert", insert as OperationFn<_>)],
    )
}

fn empty(_size: Option<usize>, _rng: &mut StdRng) -> SearchTree {
    SearchTree::default()
}

fn insert(ctx: Context<SearchTree>, args: &[i64]) -> Producer<SearchTree> {
    let value = args.first().copied();
    Producer::new(move |y| async move {
        let Some(value) = value else {
            let graph = ctx.state.read(|tree| tree.draw(None));
            y.emit(show(graph, "Insert needs a value.")).await;
            return;
        };

        if ctx.state.read(SearchTree::is_empty) {
            let root = ctx.state.write(|tree| {
                tree.nodes.push(TreeNode {
                    value,
                    left: None,
                    right: None,
                });
                tree.clone()
            });
            y.emit(
                Snapshot::domain(root)
                    .focus("node-0")
                    .describe(format!("Tree empty. {value} becomes Root.")),
            )
            .await;
            y.emit(Snapshot::domain(ctx.state.get()).describe("Ready")).await;
            return;
        }

        let mut current = 0;
        loop {
            let (graph, here) = ctx.state.read(|tree| (tree.draw(Some(current)), tree.nodes[current].value));
            y.emit(show(graph, format!("Comparing {value} vs {here}"))).await;

            let side = if value < here { Side::Left } else { Side::Right };
            match ctx.state.read(|tree| tree.child(current, side)) {
                Some(next) => current = next,
                None => {
                    let graph = ctx.state.write(|tree| {
                        let idx = tree.attach(current, side, value);
                        tree.draw(Some(idx))
                    });
                    let description = match side {
                        Side::Left => "Inserted Left",
                        Side::Right => "Inserted Right",
                    };
                    y.emit(show(graph, description)).await;
                    break;
                }
            }
        }

        y.emit(Snapshot::domain(ctx.state.get()).describe("Ready")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(values: &[i64]) -> SearchTree {
        let mut tree = SearchTree::default();
        for &value in values {
            if tree.is_empty() {
                tree.nodes.push(TreeNode {
                    value,
                    left: None,
                    right: None,
                });
                continue;
            }
            let mut current = 0;
            loop {
                let side = if value < tree.nodes[current].value { Side::Left } else { Side::Right };
                match tree.child(current, side) {
                    Some(next) => current = next,
                    None => {
                        tree.attach(current, side, value);
                        break;
                    }
                }
            }
        }
        tree
    }

    #[test]
    fn in_order_is_sorted() {
        let tree = tree(&[50, 30, 70, 20, 40, 60, 80, 30]);
        assert_eq!(tree.in_order(), vec![20, 30, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn layout_spreads_children() {
        let graph = tree(&[50, 30, 70]).draw(Some(2));
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);
        let root = graph.node("node-0").unwrap();
        let left = graph.node("node-1").unwrap();
        let right = graph.node("node-2").unwrap();
        assert!(left.x < root.x && root.x < right.x);
        assert_eq!(left.y, root.y + 60.0);
        assert!(right.active);
    }

    #[test]
    fn empty_tree_draws_nothing() {
        let graph = SearchTree::default().draw(None);
        assert!(graph.nodes.is_empty());
        assert_eq!(SearchTree::default().height(), 0);
    }
}
