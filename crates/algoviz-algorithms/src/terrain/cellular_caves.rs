use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Heightmap, Producer, Visualizer};
use rand::rngs::StdRng;
use rand::Rng;

use super::{frame, FLOOR, WALL};

const DEFAULT_SIZE: usize = 30;
const MIN_SIZE: usize = 10;
const MAX_SIZE: usize = 40;

const WALL_CHANCE: f64 = 0.45;
const STEPS: usize = 10;

pub fn definition() -> AlgorithmDefinition<Heightmap> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "cellular-caves",
            "Cellular Automata (Caves)",
            Category::Terrain,
            Visualizer::Terrain3d,
            "Generates cave-like structures using Cellular Automata (similar to Conway's Game of Life). It starts with random noise and iteratively smooths it out to form open caverns and solid walls.",
        )
        .with_controls([Control::input("Size", "size", DEFAULT_SIZE as i64)]),
        random_noise,
        run,
    )
}

/// Square of random walls and floors.
pub fn random_noise(size: Option<usize>, rng: &mut StdRng) -> Heightmap {
    let n = size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE);
    (0..n)
        .map(|_| (0..n).map(|_| if rng.gen_bool(WALL_CHANCE) { WALL } else { FLOOR }).collect())
        .collect()
}

/// Walls among the 8 neighbors; off-map counts as wall.
fn wall_neighbors(map: &Heightmap, row: usize, col: usize) -> usize {
    let n = map.len() as isize;
    let mut count = 0;
    for dr in -1..=1_isize {
        for dc in -1..=1_isize {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r < 0 || r >= n || c < 0 || c >= n || map[r as usize][c as usize] > 50.0 {
                count += 1;
            }
        }
    }
    count
}

fn smooth(map: &Heightmap) -> Heightmap {
    let mut next = map.clone();
    for (row, line) in next.iter_mut().enumerate() {
        for (col, height) in line.iter_mut().enumerate() {
            match wall_neighbors(map, row, col) {
                walls if walls > 4 => *height = WALL,
                walls if walls < 4 => *height = FLOOR,
                _ => {}
            }
        }
    }
    next
}

fn run(ctx: Context<Heightmap>) -> Producer<Heightmap> {
    Producer::new(move |y| async move {
        let mut map = ctx.state.get();
        y.emit(frame(&map, "Initial Random Noise")).await;

        for step in 1..=STEPS {
            map = smooth(&map);
            y.emit(frame(&map, format!("Step {step}/{STEPS}: Smoothing Walls"))).await;
        }

        y.emit(frame(&map, "Cave Generation Complete")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_wall_erodes() {
        let mut map = super::super::flat(10, FLOOR);
        map[5][5] = WALL;
        let next = smooth(&map);
        assert_eq!(next[5][5], FLOOR);
    }

    #[test]
    fn border_counts_as_wall() {
        let map = super::super::flat(10, FLOOR);
        assert_eq!(wall_neighbors(&map, 0, 0), 5);
        assert_eq!(wall_neighbors(&map, 0, 5), 3);
        // corners fill in from the implicit border, edges stay open
        let next = smooth(&map);
        assert_eq!(next[0][0], WALL);
        assert_eq!(next[0][5], FLOOR);
    }

    #[test]
    fn emits_every_smoothing_step() {
        let mut rng = <StdRng as rand::SeedableRng>::seed_from_u64(8);
        let map = random_noise(Some(12), &mut rng);
        let frames: Vec<_> = definition().simulate(map, rng).expect("autonomous").collect();
        assert_eq!(frames.len(), STEPS + 2);
        assert_eq!(frames[1].description.as_deref(), Some("Step 1/10: Smoothing Walls"));
    }
}
