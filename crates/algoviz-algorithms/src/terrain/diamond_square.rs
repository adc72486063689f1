use algoviz_core::{AlgorithmDefinition, AlgorithmInfo, Category, Context, Control, Heightmap, Producer, Visualizer};
use rand::rngs::StdRng;
use rand::Rng;

use super::{flat, frame, FLOOR, WALL};

/// Side lengths of the form 2^k + 1.
const SIZES: [usize; 4] = [5, 9, 17, 33];
const DEFAULT_SIZE: usize = 17;
const ROUGHNESS: f64 = 40.0;

pub fn definition() -> AlgorithmDefinition<Heightmap> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "diamond-square",
            "Diamond-Square Terrain",
            Category::Terrain,
            Visualizer::Terrain3d,
            "A fractal algorithm used to generate realistic heightmaps for computer graphics. It works by recursively dividing a square into four smaller squares, adding random roughness at each step.",
        )
        .with_controls([Control::input("Size (Power of 2 + 1)", "size", DEFAULT_SIZE as i64)]),
        zeroed,
        run,
    )
}

/// Flat map whose side is the smallest supported size not below the request.
pub fn zeroed(size: Option<usize>, _rng: &mut StdRng) -> Heightmap {
    let wanted = size.unwrap_or(DEFAULT_SIZE);
    let n = SIZES.into_iter().find(|&s| s >= wanted).unwrap_or(33);
    flat(n, FLOOR)
}

fn jitter(rng: &mut StdRng, roughness: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * roughness
}

fn diamond_step(map: &mut Heightmap, chunk: usize, roughness: f64, rng: &mut StdRng) {
    let n = map.len();
    let half = chunk / 2;
    for y in (0..n - 1).step_by(chunk) {
        for x in (0..n - 1).step_by(chunk) {
            let corners = map[y][x] + map[y][x + chunk] + map[y + chunk][x] + map[y + chunk][x + chunk];
            map[y + half][x + half] = (corners / 4.0 + jitter(rng, roughness)).clamp(FLOOR, WALL);
        }
    }
}

fn square_step(map: &mut Heightmap, chunk: usize, roughness: f64, rng: &mut StdRng) {
    let n = map.len();
    let half = chunk / 2;
    for y in (0..n).step_by(half) {
        let shift = if y % chunk == 0 { half } else { 0 };
        for x in (shift..n).step_by(chunk) {
            let mut sum = 0.0;
            let mut count = 0.0;
            if y >= half {
                sum += map[y - half][x];
                count += 1.0;
            }
            if y + half < n {
                sum += map[y + half][x];
                count += 1.0;
            }
            if x >= half {
                sum += map[y][x - half];
                count += 1.0;
            }
            if x + half < n {
                sum += map[y][x + half];
                count += 1.0;
            }
            map[y][x] = (sum / count + jitter(rng, roughness)).clamp(FLOOR, WALL);
        }
    }
}

fn run(ctx: Context<Heightmap>) -> Producer<Heightmap> {
    Producer::new(move |y| async move {
        let Context { state, mut rng } = ctx;
        let mut map = state.get();
        let n = map.len();
        if n < 2 {
            y.emit(frame(&map, "Terrain Generation Complete!")).await;
            return;
        }

        for (r, c) in [(0, 0), (0, n - 1), (n - 1, 0), (n - 1, n - 1)] {
            map[r][c] = rng.gen_range(20.0..70.0);
        }
        y.emit(frame(&map, "Step 1: Initialize Corners")).await;

        let mut chunk = n - 1;
        let mut roughness = ROUGHNESS;
        while chunk > 1 {
            let half = chunk / 2;

            diamond_step(&mut map, chunk, roughness, &mut rng);
            let centers = format!("Diamond Step: Calculated centers (Roughness: {roughness:.1})");
            y.emit(frame(&map, centers)).await;

            square_step(&mut map, chunk, roughness, &mut rng);
            let edges = format!("Square Step: Filled edges (Chunk size: {chunk} -> {half})");
            y.emit(frame(&map, edges)).await;

            roughness /= 2.0;
            chunk = half;
        }

        y.emit(frame(&map, "Terrain Generation Complete!")).await;
    })
}
