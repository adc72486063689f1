use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Grid, Producer, Snapshot, Visualizer};

use super::{generate_maze, is_open, key, mark_visited, prepare, trace_path};

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "dfs",
            "Depth-First Search",
            Category::Pathfinding,
            Visualizer::Grid2d,
            "Explores as far as possible along each branch before backtracking. It does not guarantee the shortest path.",
        ),
        generate_maze,
        run,
    )
}

/// Up, right, down, left.
fn push_order(grid: &Grid, (row, col): (usize, usize)) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(4);
    if row > 0 {
        out.push((row - 1, col));
    }
    if col + 1 < grid.width() {
        out.push((row, col + 1));
    }
    if row + 1 < grid.height() {
        out.push((row + 1, col));
    }
    if col > 0 {
        out.push((row, col - 1));
    }
    out
}

fn run(ctx: Context<Grid>) -> Producer<Grid> {
    Producer::new(move |y| async move {
        let (mut grid, start, end) = prepare(&ctx.state.get());

        y.emit(Snapshot::projection(grid.clone()).describe("Starting DFS")).await;

        let mut stack = vec![start];
        let mut found = false;

        while let Some(current) = stack.pop() {
            if grid.get(current.0, current.1).map_or(true, |c| c.is_visited) {
                continue;
            }
            mark_visited(&mut grid, current);

            y.emit(
                Snapshot::projection(grid.clone())
                    .focus(key(current))
                    .describe(format!("Visiting [{}, {}]", current.0, current.1)),
            )
            .await;

            if current == end {
                found = true;
                y.emit(Snapshot::projection(grid.clone()).describe("Target found!")).await;
                break;
            }

            for next in push_order(&grid, current) {
                if is_open(&grid, next) {
                    if let Some(cell) = grid.get_mut(next.0, next.1) {
                        cell.previous = Some(current);
                    }
                    stack.push(next);
                }
            }
        }

        if found {
            trace_path(&y, &mut grid, start, end, "Reconstructing path...", "Path Found!").await;
        } else {
            y.emit(Snapshot::projection(grid).describe("No path found.")).await;
        }
    })
}
