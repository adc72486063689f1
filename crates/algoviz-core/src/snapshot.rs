//! Snapshots and the renderable shapes they carry.

use serde::{Deserialize, Serialize};

use crate::algorithm::Visualizer;

/// Display tone attached to grid cells, graph nodes and graph edges.
///
/// Renderers map tones to concrete colors; producers only state intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Confirmed / selected (queen placed, MST edge, route locked in)
    Green,
    /// Under inspection
    Yellow,
    /// Conflict or backtrack
    Red,
    Blue,
    /// List head
    Purple,
    /// List tail
    Pink,
    /// Unselected edge
    Slate,
    /// Discarded edge
    Faint,
    /// Light chessboard square
    Board,
    /// Dark chessboard square
    BoardAlt,
    /// Pre-filled puzzle cell
    Fixed,
}

impl Tone {
    /// Hex color used by the web frontend.
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Green => "#22c55e",
            Tone::Yellow => "#fbbf24",
            Tone::Red => "#ef4444",
            Tone::Blue => "#3b82f6",
            Tone::Purple => "#8b5cf6",
            Tone::Pink => "#ec4899",
            Tone::Slate => "#334155",
            Tone::Faint => "#1e293b",
            Tone::Board => "#1e293b",
            Tone::BoardAlt => "#0f172a",
            Tone::Fixed => "#475569",
        }
    }
}

/// One cell of a 2-D grid projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// Best known distance from the start (pathfinding only)
    pub distance: Option<u32>,
    /// Predecessor on the best known path
    pub previous: Option<(usize, usize)>,
    /// Text drawn inside the cell (queen glyph, sudoku digit)
    pub value: Option<String>,
    pub tone: Option<Tone>,
}

impl Cell {
    /// Create a blank cell at the given position.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_start: false,
            is_end: false,
            is_wall: false,
            is_visited: false,
            is_path: false,
            distance: None,
            previous: None,
            value: None,
            tone: None,
        }
    }

    /// Key used for `Snapshot::active_node` (`"row-col"`).
    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Whether the cell shows the given text.
    pub fn shows(&self, text: &str) -> bool {
        self.value.as_deref() == Some(text)
    }
}

/// Rectangular grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid of blank cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|r| (0..cols).map(|c| Cell::new(r, c)).collect())
                .collect(),
        }
    }

    /// Create a grid, initializing every cell with `init`.
    pub fn from_fn(rows: usize, cols: usize, mut init: impl FnMut(usize, usize) -> Cell) -> Self {
        Self {
            rows: (0..rows)
                .map(|r| (0..cols).map(|c| init(r, c)).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flatten()
    }

    /// Count cells matching a predicate.
    pub fn count(&self, predicate: impl Fn(&Cell) -> bool) -> usize {
        self.cells().filter(|c| predicate(c)).count()
    }

    /// First cell matching a predicate.
    pub fn find(&self, predicate: impl Fn(&Cell) -> bool) -> Option<(usize, usize)> {
        self.cells().find(|c| predicate(c)).map(|c| (c.row, c.col))
    }

    /// Orthogonal neighbors in up, down, left, right order.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push((row - 1, col));
        }
        if row + 1 < self.height() {
            out.push((row + 1, col));
        }
        if col > 0 {
            out.push((row, col - 1));
        }
        if col + 1 < self.width() {
            out.push((row, col + 1));
        }
        out
    }
}

/// A positioned node of a graph projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub active: bool,
    pub color: Option<Tone>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            active: false,
            color: None,
        }
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &GraphNode) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An edge of a graph projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub color: Option<Tone>,
    pub weight: Option<u32>,
    pub directed: bool,
}

impl GraphEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            color: None,
            weight: None,
            directed: false,
        }
    }

    pub fn with_color(mut self, color: Tone) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    /// Whether this edge touches the given node.
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }

    /// The endpoint opposite `id`, if the edge touches it.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// Node/edge graph with positions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub directed: bool,
}

impl GraphView {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, directed: bool) -> Self {
        Self {
            nodes,
            edges,
            directed,
        }
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes adjacent to `id`.
    pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges.iter().filter_map(move |e| e.other(id))
    }
}

/// Square grid of heights in `0.0..=100.0`.
pub type Heightmap = Vec<Vec<f64>>;

/// A renderer-ready shape derived from a domain value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Projection {
    Bars(Vec<i64>),
    Grid(Grid),
    Graph(GraphView),
    Heightmap(Heightmap),
}

impl Projection {
    /// The visualizer able to draw this shape.
    pub fn visualizer(&self) -> Visualizer {
        match self {
            Projection::Bars(_) => Visualizer::BarChart,
            Projection::Grid(_) => Visualizer::Grid2d,
            Projection::Graph(_) => Visualizer::PrimitiveGraph,
            Projection::Heightmap(_) => Visualizer::Terrain3d,
        }
    }
}

impl From<Grid> for Projection {
    fn from(grid: Grid) -> Self {
        Projection::Grid(grid)
    }
}

impl From<GraphView> for Projection {
    fn from(graph: GraphView) -> Self {
        Projection::Graph(graph)
    }
}

/// A value usable as an algorithm's logical state.
///
/// Every domain value can be drawn, so a `Payload::Domain` snapshot is
/// always renderable.
pub trait Domain: Clone + Send + 'static {
    fn project(&self) -> Projection;
}

impl Domain for Vec<i64> {
    fn project(&self) -> Projection {
        Projection::Bars(self.clone())
    }
}

impl Domain for Heightmap {
    fn project(&self) -> Projection {
        Projection::Heightmap(self.clone())
    }
}

impl Domain for Grid {
    fn project(&self) -> Projection {
        Projection::Grid(self.clone())
    }
}

impl Domain for GraphView {
    fn project(&self) -> Projection {
        Projection::Graph(self.clone())
    }
}

/// Snapshot payload: the domain value itself, or a throwaway projection.
///
/// Only `Domain` payloads are written back into the logical state.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Domain(T),
    Projection(Projection),
}

/// One self-contained, rendering-ready state record.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Payload<T>,
    pub highlighted_indices: Vec<usize>,
    pub active_node: Option<String>,
    pub description: Option<String>,
}

impl<T> Snapshot<T> {
    /// Snapshot carrying the domain value.
    pub fn domain(value: T) -> Self {
        Self::with_payload(Payload::Domain(value))
    }

    /// Snapshot carrying a projection.
    pub fn projection(projection: impl Into<Projection>) -> Self {
        Self::with_payload(Payload::Projection(projection.into()))
    }

    fn with_payload(data: Payload<T>) -> Self {
        Self {
            data,
            highlighted_indices: Vec::new(),
            active_node: None,
            description: None,
        }
    }

    pub fn highlight(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted_indices = indices.into_iter().collect();
        self
    }

    pub fn focus(mut self, node: impl Into<String>) -> Self {
        self.active_node = Some(node.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The domain value, if this snapshot carries one.
    pub fn domain_value(&self) -> Option<&T> {
        match &self.data {
            Payload::Domain(value) => Some(value),
            Payload::Projection(_) => None,
        }
    }

    /// The projection, if this snapshot carries one.
    pub fn projection_value(&self) -> Option<&Projection> {
        match &self.data {
            Payload::Domain(_) => None,
            Payload::Projection(projection) => Some(projection),
        }
    }
}

impl<T: Domain> Snapshot<T> {
    /// Render-ready shape of this snapshot, projecting domain payloads.
    pub fn shape(&self) -> Projection {
        match &self.data {
            Payload::Domain(value) => value.project(),
            Payload::Projection(projection) => projection.clone(),
        }
    }
}

/// Type-erased snapshot sent to renderers and over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub data: Projection,
    pub highlighted_indices: Vec<usize>,
    pub active_node: Option<String>,
    pub description: Option<String>,
}

impl<T: Domain> From<&Snapshot<T>> for Frame {
    fn from(snapshot: &Snapshot<T>) -> Self {
        Self {
            data: snapshot.shape(),
            highlighted_indices: snapshot.highlighted_indices.clone(),
            active_node: snapshot.active_node.clone(),
            description: snapshot.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_neighbors_stay_in_bounds() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.neighbors(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(grid.neighbors(1, 1).len(), 4);
        assert_eq!(grid.neighbors(2, 3), vec![(1, 3), (2, 2)]);
    }

    #[test]
    fn domain_snapshot_projects_for_rendering() {
        let snap = Snapshot::domain(vec![3_i64, 1, 2])
            .highlight([0, 1])
            .describe("Comparing");

        assert_eq!(snap.domain_value(), Some(&vec![3, 1, 2]));
        let frame = Frame::from(&snap);
        assert_eq!(frame.data, Projection::Bars(vec![3, 1, 2]));
        assert_eq!(frame.highlighted_indices, vec![0, 1]);
        assert_eq!(frame.description.as_deref(), Some("Comparing"));
    }

    #[test]
    fn projection_snapshot_has_no_domain_value() {
        let snap: Snapshot<Vec<i64>> = Snapshot::projection(GraphView::default());
        assert!(snap.domain_value().is_none());
        assert_eq!(snap.shape().visualizer(), Visualizer::PrimitiveGraph);
    }

    #[test]
    fn frame_serialization() {
        let mut grid = Grid::new(1, 2);
        if let Some(cell) = grid.get_mut(0, 1) {
            cell.value = Some("♛".into());
            cell.tone = Some(Tone::Green);
        }
        let frame = Frame::from(&Snapshot::domain(grid).focus("0-1"));

        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"kind\":\"grid\""));
        assert!(json.contains("green"));

        let parsed: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn edge_other_endpoint() {
        let edge = GraphEdge::new("a", "b");
        assert_eq!(edge.other("a"), Some("b"));
        assert_eq!(edge.other("b"), Some("a"));
        assert_eq!(edge.other("c"), None);
    }
}
