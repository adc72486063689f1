use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Grid, Producer, Snapshot, Visualizer};

use super::{generate_maze, is_open, key, mark_visited, prepare, trace_path};

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "astar",
            "A* Search",
            Category::Pathfinding,
            Visualizer::Grid2d,
            "A smart pathfinding algorithm that uses a heuristic to estimate the distance to the goal. It is generally faster than Dijkstra.",
        ),
        generate_maze,
        run,
    )
}

/// Manhattan distance.
fn heuristic(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

fn run(ctx: Context<Grid>) -> Producer<Grid> {
    Producer::new(move |y| async move {
        let (mut grid, start, end) = prepare(&ctx.state.get());
        if let Some(cell) = grid.get_mut(start.0, start.1) {
            cell.distance = Some(0);
        }

        y.emit(Snapshot::projection(grid.clone()).describe("Starting A*")).await;

        // Ordered by f, then by h so ties favor cells nearer the goal
        let h = heuristic(start, end);
        let mut open = BinaryHeap::from([Reverse((h, h, start))]);
        let mut found = false;

        while let Some(Reverse((f, _, current))) = open.pop() {
            if !is_open(&grid, current) {
                continue;
            }

            if current == end {
                found = true;
                mark_visited(&mut grid, current);
                y.emit(Snapshot::projection(grid.clone()).describe("Target found!")).await;
                break;
            }

            mark_visited(&mut grid, current);
            y.emit(
                Snapshot::projection(grid.clone())
                    .focus(key(current))
                    .describe(format!("Visiting [{}, {}] (F: {f})", current.0, current.1)),
            )
            .await;

            let g = grid.get(current.0, current.1).and_then(|c| c.distance).unwrap_or(0);
            for next in grid.neighbors(current.0, current.1) {
                if !is_open(&grid, next) {
                    continue;
                }
                let tentative = g + 1;
                if let Some(cell) = grid.get_mut(next.0, next.1) {
                    if cell.distance.map_or(true, |d| tentative < d) {
                        cell.distance = Some(tentative);
                        cell.previous = Some(current);
                        let h = heuristic(next, end);
                        open.push(Reverse((tentative + h, h, next)));
                    }
                }
            }
        }

        if found {
            trace_path(&y, &mut grid, start, end, "Reconstructing path...", "Shortest Path Found!").await;
        } else {
            y.emit(Snapshot::projection(grid).describe("No path found.")).await;
        }
    })
}
