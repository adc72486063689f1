//! Text renderers.
//!
//! Each renderer draws one projection shape. Drawing is a pure function
//! of the frame; nothing flows back into the engine.

use std::fmt::Write;

use algoviz_core::{Cell, Frame, GraphView, Heightmap, Projection, Tone, Visualizer};

use crate::error::RenderError;

/// Width of the longest bar, in characters.
pub const BAR_WIDTH: usize = 40;

/// Shade ramp from lowest to highest terrain.
const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// A display backend for one visualizer kind.
pub trait Renderer: Send + Sync {
    /// Visualizer this renderer draws.
    fn visualizer(&self) -> Visualizer;

    /// Draw the frame's projection.
    fn draw(&self, frame: &Frame) -> Result<String, RenderError>;
}

/// Horizontal bars, one row per value.
#[derive(Debug, Clone, Copy)]
pub struct BarChart {
    pub width: usize,
}

impl Default for BarChart {
    fn default() -> Self {
        Self { width: BAR_WIDTH }
    }
}

/// One character per grid cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridText;

/// Node and edge listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphText;

/// Shade ramp over a heightmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainShade;

fn mismatch(expected: Visualizer, frame: &Frame) -> RenderError {
    RenderError::CannotDisplay {
        expected,
        found: frame.data.visualizer(),
    }
}

impl Renderer for BarChart {
    fn visualizer(&self) -> Visualizer {
        Visualizer::BarChart
    }

    fn draw(&self, frame: &Frame) -> Result<String, RenderError> {
        let Projection::Bars(values) = &frame.data else {
            return Err(mismatch(self.visualizer(), frame));
        };

        let max = values.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        for (i, &value) in values.iter().enumerate() {
            let len = (value.max(0) as usize * self.width).div_ceil(max as usize);
            let highlighted = frame.highlighted_indices.contains(&i);
            let (marker, fill) = if highlighted { ('>', '▓') } else { (' ', '█') };
            let bar: String = std::iter::repeat(fill).take(len).collect();
            let _ = writeln!(out, "{marker}{value:>4} {bar}");
        }
        Ok(out)
    }
}

fn cell_char(cell: &Cell) -> char {
    if cell.is_start {
        'S'
    } else if cell.is_end {
        'E'
    } else if cell.is_wall {
        '#'
    } else if let Some(c) = cell.value.as_deref().and_then(|v| v.chars().next()) {
        c
    } else if cell.is_path {
        '*'
    } else if cell.is_visited {
        '.'
    } else {
        ' '
    }
}

impl Renderer for GridText {
    fn visualizer(&self) -> Visualizer {
        Visualizer::Grid2d
    }

    fn draw(&self, frame: &Frame) -> Result<String, RenderError> {
        let Projection::Grid(grid) = &frame.data else {
            return Err(mismatch(self.visualizer(), frame));
        };

        let mut out = String::new();
        for row in grid.rows() {
            out.extend(row.iter().map(cell_char));
            out.push('\n');
        }
        Ok(out)
    }
}

fn tone_name(tone: Option<Tone>) -> String {
    tone.map(|t| format!("{t:?}").to_lowercase()).unwrap_or_else(|| "-".into())
}

fn write_graph(out: &mut String, graph: &GraphView, active: Option<&str>) {
    let _ = writeln!(out, "nodes:");
    for node in &graph.nodes {
        let focus = node.active || active == Some(node.id.as_str());
        let _ = writeln!(
            out,
            "{} {:<10} {:<6} ({:>3.0},{:>3.0}) {}",
            if focus { '*' } else { ' ' },
            node.id,
            node.label,
            node.x,
            node.y,
            tone_name(node.color),
        );
    }

    let _ = writeln!(out, "edges:");
    for edge in &graph.edges {
        let arrow = if edge.directed || graph.directed { "->" } else { "--" };
        let weight = edge.weight.map(|w| format!(" w={w}")).unwrap_or_default();
        let _ = writeln!(out, "  {} {arrow} {}{weight} {}", edge.from, edge.to, tone_name(edge.color));
    }
}

impl Renderer for GraphText {
    fn visualizer(&self) -> Visualizer {
        Visualizer::PrimitiveGraph
    }

    fn draw(&self, frame: &Frame) -> Result<String, RenderError> {
        let Projection::Graph(graph) = &frame.data else {
            return Err(mismatch(self.visualizer(), frame));
        };

        let mut out = String::new();
        write_graph(&mut out, graph, frame.active_node.as_deref());
        Ok(out)
    }
}

fn shade(height: f64) -> char {
    let top = (SHADES.len() - 1) as f64;
    let index = (height.clamp(0.0, 100.0) / 100.0 * top).round() as usize;
    SHADES[index]
}

fn write_heightmap(out: &mut String, map: &Heightmap) {
    for row in map {
        out.extend(row.iter().map(|&h| shade(h)));
        out.push('\n');
    }
}

impl Renderer for TerrainShade {
    fn visualizer(&self) -> Visualizer {
        Visualizer::Terrain3d
    }

    fn draw(&self, frame: &Frame) -> Result<String, RenderError> {
        let Projection::Heightmap(map) = &frame.data else {
            return Err(mismatch(self.visualizer(), frame));
        };

        let mut out = String::new();
        write_heightmap(&mut out, map);
        Ok(out)
    }
}

/// Renderer for a visualizer kind.
pub fn renderer_for(visualizer: Visualizer) -> Box<dyn Renderer> {
    match visualizer {
        Visualizer::BarChart => Box::new(BarChart::default()),
        Visualizer::Grid2d => Box::new(GridText),
        Visualizer::PrimitiveGraph => Box::new(GraphText),
        Visualizer::Terrain3d => Box::new(TerrainShade),
    }
}

/// Draw a frame with its description as a caption.
pub fn render(visualizer: Visualizer, frame: &Frame) -> Result<String, RenderError> {
    let mut out = renderer_for(visualizer).draw(frame)?;
    if let Some(description) = &frame.description {
        let _ = writeln!(out, "» {description}");
    }
    Ok(out)
}
