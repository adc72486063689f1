//! Greedy graph algorithms over scattered points.

mod convex_hull;
mod ospf;
mod prims;

use algoviz_core::{AlgorithmDefinition, GraphView};

pub fn definitions() -> Vec<AlgorithmDefinition<GraphView>> {
    vec![convex_hull::definition(), prims::definition(), ospf::definition()]
}
