//! Grid pathfinding from a start cell to an end cell.
//!
//! Producers work on a private copy of the maze and emit projections, so
//! the logical state stays the generated maze until the next reset.

mod astar;
mod bfs;
mod dfs;
mod dijkstra;

use algoviz_core::{AlgorithmDefinition, Cell, Grid, Snapshot, Yielder};
use rand::rngs::StdRng;
use rand::Rng;

pub const ROWS: usize = 10;
pub const COLS: usize = 20;
pub const START: (usize, usize) = (1, 1);
pub const END: (usize, usize) = (8, 18);

const WALL_CHANCE: f64 = 0.2;

pub fn definitions() -> Vec<AlgorithmDefinition<Grid>> {
    vec![
        bfs::definition(),
        dfs::definition(),
        dijkstra::definition(),
        astar::definition(),
    ]
}

/// Grid with no walls.
pub fn open_grid() -> Grid {
    Grid::from_fn(ROWS, COLS, |row, col| {
        let mut cell = Cell::new(row, col);
        cell.is_start = (row, col) == START;
        cell.is_end = (row, col) == END;
        cell
    })
}

/// Maze with roughly a fifth of the cells walled. The size argument is
/// ignored; the board is always 10×20.
pub fn generate_maze(_size: Option<usize>, rng: &mut StdRng) -> Grid {
    let mut grid = open_grid();
    for cell in grid.cells_mut() {
        if !cell.is_start && !cell.is_end && rng.gen_bool(WALL_CHANCE) {
            cell.is_wall = true;
        }
    }
    grid
}

/// Copy of the maze with all search marks cleared.
pub(crate) fn prepare(maze: &Grid) -> (Grid, (usize, usize), (usize, usize)) {
    let mut grid = maze.clone();
    for cell in grid.cells_mut() {
        cell.distance = None;
        cell.is_visited = false;
        cell.is_path = false;
        cell.previous = None;
    }
    let start = grid.find(|c| c.is_start).unwrap_or(START);
    let end = grid.find(|c| c.is_end).unwrap_or(END);
    (grid, start, end)
}

pub(crate) fn is_open(grid: &Grid, (row, col): (usize, usize)) -> bool {
    grid.get(row, col).is_some_and(|c| !c.is_wall && !c.is_visited)
}

pub(crate) fn mark_visited(grid: &mut Grid, (row, col): (usize, usize)) {
    if let Some(cell) = grid.get_mut(row, col) {
        cell.is_visited = true;
    }
}

pub(crate) fn key((row, col): (usize, usize)) -> String {
    format!("{row}-{col}")
}

/// Walk predecessors back from `end`, emitting one snapshot per step.
pub(crate) async fn trace_path(
    y: &Yielder<Grid>,
    grid: &mut Grid,
    start: (usize, usize),
    end: (usize, usize),
    step: &str,
    done: &str,
) {
    let mut current = end;
    while let Some(previous) = grid.get(current.0, current.1).and_then(|c| c.previous) {
        if let Some(cell) = grid.get_mut(current.0, current.1) {
            cell.is_path = true;
        }
        current = previous;
        y.emit(Snapshot::projection(grid.clone()).describe(step)).await;
    }
    if let Some(cell) = grid.get_mut(start.0, start.1) {
        cell.is_path = true;
    }
    y.emit(Snapshot::projection(grid.clone()).describe(done)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn last_grid(def: &AlgorithmDefinition<Grid>, maze: Grid) -> (Grid, Option<String>) {
        let last = def
            .simulate(maze, StdRng::seed_from_u64(0))
            .expect("pathfinding is autonomous")
            .last()
            .expect("at least one snapshot");
        let grid = match last.projection_value() {
            Some(algoviz_core::Projection::Grid(grid)) => grid.clone(),
            other => panic!("expected grid projection, got {other:?}"),
        };
        (grid, last.description)
    }

    #[test]
    fn shortest_paths_on_open_grid() {
        for def in [bfs::definition(), dijkstra::definition(), astar::definition()] {
            let (grid, description) = last_grid(&def, open_grid());
            assert_eq!(grid.count(|c| c.is_path), 25, "{}", def.id());
            assert_eq!(description.as_deref(), Some("Shortest Path Found!"));
        }
    }

    #[test]
    fn target_cell_is_visited_when_reached() {
        for def in [bfs::definition(), dfs::definition(), dijkstra::definition(), astar::definition()] {
            let (grid, _) = last_grid(&def, open_grid());
            let (row, col) = grid.find(|c| c.is_end).expect("target cell");
            assert!(grid.get(row, col).is_some_and(|c| c.is_visited), "{}", def.id());
        }
    }

    #[test]
    fn dfs_finds_some_path() {
        let (grid, description) = last_grid(&dfs::definition(), open_grid());
        assert!(grid.count(|c| c.is_path) >= 25);
        assert_eq!(description.as_deref(), Some("Path Found!"));
    }

    #[test]
    fn astar_visits_no_more_than_bfs() {
        let (astar_grid, _) = last_grid(&astar::definition(), open_grid());
        let (bfs_grid, _) = last_grid(&bfs::definition(), open_grid());
        assert!(astar_grid.count(|c| c.is_visited) <= bfs_grid.count(|c| c.is_visited));
    }

    #[test]
    fn walled_off_target_reports_no_path() {
        let mut maze = open_grid();
        for (row, col) in [(7, 18), (9, 18), (8, 17), (8, 19)] {
            if let Some(cell) = maze.get_mut(row, col) {
                cell.is_wall = true;
            }
        }
        for def in definitions() {
            let (grid, description) = last_grid(&def, maze.clone());
            assert_eq!(description.as_deref(), Some("No path found."), "{}", def.id());
            assert_eq!(grid.count(|c| c.is_path), 0);
        }
    }

    #[test]
    fn paths_avoid_walls_on_random_mazes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let maze = generate_maze(None, &mut rng);
            for def in definitions() {
                let (grid, _) = last_grid(&def, maze.clone());
                assert!(grid.cells().all(|c| !(c.is_path && c.is_wall)), "{}", def.id());
            }
        }
    }

    #[test]
    fn maze_keeps_endpoints_clear() {
        let mut rng = StdRng::seed_from_u64(2);
        let maze = generate_maze(None, &mut rng);
        assert_eq!(maze.height(), ROWS);
        assert_eq!(maze.width(), COLS);
        assert!(maze.get(1, 1).is_some_and(|c| c.is_start && !c.is_wall));
        assert!(maze.get(8, 18).is_some_and(|c| c.is_end && !c.is_wall));
    }
}
