use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Grid, Producer, Snapshot, Visualizer};

use super::{generate_maze, is_open, key, mark_visited, prepare, trace_path};

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "dijkstra",
            "Dijkstra Algorithm",
            Category::Pathfinding,
            Visualizer::Grid2d,
            "Guarantees the shortest path. It visits nodes in order of their distance from the start node.",
        ),
        generate_maze,
        run,
    )
}

fn run(ctx: Context<Grid>) -> Producer<Grid> {
    Producer::new(move |y| async move {
        let (mut grid, start, end) = prepare(&ctx.state.get());
        if let Some(cell) = grid.get_mut(start.0, start.1) {
            cell.distance = Some(0);
        }

        y.emit(Snapshot::projection(grid.clone()).describe("Starting Dijkstra")).await;

        let mut frontier = BinaryHeap::from([Reverse((0_u32, start))]);
        let mut found = false;

        while let Some(Reverse((distance, current))) = frontier.pop() {
            if !is_open(&grid, current) {
                continue;
            }
            mark_visited(&mut grid, current);

            y.emit(
                Snapshot::projection(grid.clone())
                    .focus(key(current))
                    .describe(format!("Visiting [{}, {}] (Dist: {distance})", current.0, current.1)),
            )
            .await;

            if current == end {
                found = true;
                y.emit(Snapshot::projection(grid.clone()).describe("Target found!")).await;
                break;
            }

            for next in grid.neighbors(current.0, current.1) {
                if !is_open(&grid, next) {
                    continue;
                }
                let candidate = distance + 1;
                if let Some(cell) = grid.get_mut(next.0, next.1) {
                    if cell.distance.map_or(true, |d| candidate < d) {
                        cell.distance = Some(candidate);
                        cell.previous = Some(current);
                        frontier.push(Reverse((candidate, next)));
                    }
                }
            }
        }

        if found {
            trace_path(&y, &mut grid, start, end, "Reconstructing shortest path...", "Shortest Path Found!").await;
        } else {
            y.emit(Snapshot::projection(grid).describe("No path found.")).await;
        }
    })
}
