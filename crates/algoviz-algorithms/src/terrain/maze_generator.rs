use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Heightmap, Producer, Visualizer};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{flat, frame, FLOOR, WALL};

const DEFAULT_SIZE: usize = 21;
const MIN_SIZE: usize = 11;
const MAX_SIZE: usize = 45;

/// Height marking the digging head.
pub const MINER: f64 = 50.0;
/// Height marking the cell being backtracked to.
pub const BACKTRACK: f64 = 30.0;

const START: (usize, usize) = (1, 1);

pub fn definition() -> AlgorithmDefinition<Heightmap> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "maze-generator",
            "Maze Generator (Backtracker)",
            Category::Terrain,
            Visualizer::Terrain3d,
            "Generates a perfect maze using the Recursive Backtracker algorithm. Think of it as a \"miner\" digging tunnels: it moves to a random unvisited neighbor, carving a path, and backtracks when stuck to find new routes.",
        )
        .with_controls([Control::input("Size (Odd Number)", "size", DEFAULT_SIZE as i64)]),
        solid_rock,
        run,
    )
}

/// Odd-sided block of walls.
pub fn solid_rock(size: Option<usize>, _rng: &mut StdRng) -> Heightmap {
    let n = size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE) | 1;
    flat(n, WALL)
}

/// Uncarved cells two steps away, inside the outer border.
fn unvisited(map: &Heightmap, (row, col): (usize, usize)) -> Vec<(usize, usize)> {
    let n = map.len();
    let candidates = [
        row.checked_sub(2).map(|r| (r, col)),
        Some((row, col + 2)),
        Some((row + 2, col)),
        col.checked_sub(2).map(|c| (row, c)),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter(|&(r, c)| r > 0 && r < n - 1 && c > 0 && c < n - 1 && map[r][c] == WALL)
        .collect()
}

fn run(ctx: Context<Heightmap>) -> Producer<Heightmap> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut map = state.get();
        if map.len() < 3 {
            y.emit(frame(&map, "Maze Generation Complete!")).await;
            return;
        }

        map[START.0][START.1] = FLOOR;
        let mut stack = vec![START];
        y.emit(frame(&map, "Starting the Miner at (1,1)")).await;

        while let Some(&(row, col)) = stack.last() {
            map[row][col] = MINER;

            match unvisited(&map, (row, col)).choose(&mut rng).copied() {
                Some((next_row, next_col)) => {
                    map[(row + next_row) / 2][(col + next_col) / 2] = FLOOR;
                    map[row][col] = FLOOR;
                    map[next_row][next_col] = MINER;
                    stack.push((next_row, next_col));
                    y.emit(frame(&map, format!("Carving path to [{next_row}, {next_col}]"))).await;
                }
                None => {
                    map[row][col] = FLOOR;
                    stack.pop();
                    if let Some(&(prev_row, prev_col)) = stack.last() {
                        map[prev_row][prev_col] = BACKTRACK;
                        y.emit(frame(&map, "Dead end. Backtracking...")).await;
                        map[prev_row][prev_col] = FLOOR;
                    }
                }
            }
        }

        y.emit(frame(&map, "Maze Generation Complete!")).await;
    })
}
