use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Heightmap, Producer, Visualizer};
use rand::rngs::StdRng;
use rand::Rng;

use super::{flat, frame, WALL};

const DEFAULT_SIZE: usize = 20;
const MIN_SIZE: usize = 10;
const MAX_SIZE: usize = 40;

const SEA_LEVEL: f64 = 50.0;
const SHIFT: f64 = 1.5;
const NORMALIZE_EVERY: usize = 10;

pub fn definition() -> AlgorithmDefinition<Heightmap> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "fault-formation",
            "Fault Formation (Tectonics)",
            Category::Terrain,
            Visualizer::Terrain3d,
            "Simulates geological activity by repeatedly slicing the terrain with random \"fault lines\". One side of the line is uplifted, and the other is depressed, eventually forming distinct mountain ranges and valleys.",
        )
        .with_controls([Control::input("Size", "size", DEFAULT_SIZE as i64)]),
        flat_ground,
        run,
    )
}

pub fn flat_ground(size: Option<usize>, _rng: &mut StdRng) -> Heightmap {
    flat(size.unwrap_or(DEFAULT_SIZE).clamp(MIN_SIZE, MAX_SIZE), SEA_LEVEL)
}

/// Rescale heights to span `0..=100`. A flat map is left alone.
fn normalize(map: &mut Heightmap) {
    let (min, max) = map
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    if max <= min {
        return;
    }
    for height in map.iter_mut().flatten() {
        *height = (*height - min) / (max - min) * WALL;
    }
}

/// Raise one side of the line through two random points, lower the other.
fn fault(map: &mut Heightmap, rng: &mut StdRng) {
    let n = map.len() as f64;
    let (x1, y1) = (rng.gen::<f64>() * n, rng.gen::<f64>() * n);
    let (x2, y2) = (rng.gen::<f64>() * n, rng.gen::<f64>() * n);
    let (dx, dy) = (x2 - x1, y2 - y1);

    for (row, line) in map.iter_mut().enumerate() {
        for (col, height) in line.iter_mut().enumerate() {
            let side = (col as f64 - x1) * dy - (row as f64 - y1) * dx;
            *height += if side > 0.0 { SHIFT } else { -SHIFT };
        }
    }
}

fn run(ctx: Context<Heightmap>) -> Producer<Heightmap> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut map = state.get();
        let iterations = 60 + map.len() * 2;

        y.emit(frame(&map, "Starting with flat terrain...")).await;

        for i in 0..iterations {
            fault(&mut map, &mut rng);
            if i % NORMALIZE_EVERY == 0 {
                normalize(&mut map);
                y.emit(frame(&map, format!("Fault {i}/{iterations}: Tectonic Shift"))).await;
            }
        }

        normalize(&mut map);
        y.emit(frame(&map, "Simulation Complete: Tectonic Mountains")).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn normalize_spans_full_range() {
        let mut map = vec![vec![10.0, 20.0], vec![30.0, 50.0]];
        normalize(&mut map);
        assert_eq!(map, vec![vec![0.0, 25.0], vec![50.0, 100.0]]);

        let mut level = flat(3, 42.0);
        normalize(&mut level);
        assert_eq!(level, flat(3, 42.0));
    }

    #[test]
    fn iteration_count_scales_with_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let map = flat_ground(Some(10), &mut rng);
        let frames: Vec<_> = definition().simulate(map, rng).expect("autonomous").collect();
        // 80 faults, a frame every tenth, plus start and finish
        assert_eq!(frames.len(), 8 + 2);
        assert_eq!(frames[1].description.as_deref(), Some("Fault 0/80: Tectonic Shift"));
    }
}
