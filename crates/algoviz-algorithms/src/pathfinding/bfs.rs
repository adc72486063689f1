use std::collections::VecDeque;

use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Grid, Producer, Snapshot, Visualizer};

use super::{generate_maze, is_open, key, mark_visited, prepare, trace_path};

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "bfs",
            "Breadth-First Search",
            Category::Pathfinding,
            Visualizer::Grid2d,
            "An algorithm for traversing or searching tree or graph data structures. It starts at the tree root and explores all of the neighbor nodes at the present depth prior to moving on to the nodes at the next depth level.",
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

        y.emit(Snapshot::projection(grid.clone()).describe("Starting BFS")).await;

        // Cells are claimed when queued so each is queued once
        let mut queue = VecDeque::from([start]);
        let mut found = false;

        while let Some(current) = queue.pop_front() {
            mark_visited(&mut grid, current);
            let depth = grid.get(current.0, current.1).and_then(|c| c.distance).unwrap_or(0);

            y.emit(
                Snapshot::projection(grid.clone())
                    .focus(key(current))
                    .describe(format!("Visiting [{}, {}] (Depth: {depth})", current.0, current.1)),
            )
            .await;

            if current == end {
                found = true;
                y.emit(Snapshot::projection(grid.clone()).describe("Target found!")).await;
                break;
            }

            for next in grid.neighbors(current.0, current.1) {
                let unclaimed = grid.get(next.0, next.1).is_some_and(|c| c.distance.is_none());
                if is_open(&grid, next) && unclaimed {
                    if let Some(cell) = grid.get_mut(next.0, next.1) {
                        cell.distance = Some(depth + 1);
                        cell.previous = Some(current);
                    }
                    queue.push_back(next);
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
