//! Heightmap generators. Heights run from 0 (floor) to 100 (wall or peak).

mod cellular_caves;
mod diamond_square;
mod fault_formation;
mod maze_generator;

use algoviz_core::{AlgorithmDefinition, Heightmap, Snapshot};

pub const FLOOR: f64 = 0.0;
pub const WALL: f64 = 100.0;

pub fn definitions() -> Vec<AlgorithmDefinition<Heightmap>> {
    vec![
        cellular_caves::definition(),
        diamond_square::definition(),
        fault_formation::definition(),
        maze_generator::definition(),
    ]
}

/// Square map filled with one height.
pub(crate) fn flat(n: usize, height: f64) -> Heightmap {
    vec![vec![height; n]; n]
}

pub(crate) fn frame(map: &Heightmap, description: impl Into<String>) -> Snapshot<Heightmap> {
    Snapshot::domain(map.clone()).describe(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn heights_stay_in_range() {
        for def in definitions() {
            let mut rng = StdRng::seed_from_u64(5);
            let input = (def.generate_input)(None, &mut rng);
            let n = input.len();
            for snap in def.simulate(input, rng).expect("autonomous") {
                let map = snap.domain_value().expect("terrain emits heightmaps");
                assert_eq!(map.len(), n, "{}", def.id());
                assert!(map.iter().all(|row| row.len() == n));
                assert!(
                    map.iter().flatten().all(|h| (FLOOR..=WALL).contains(h)),
                    "{}: {:?}",
                    def.id(),
                    snap.description
                );
            }
        }
    }

    #[test]
    fn last_frame_is_narrated() {
        for def in definitions() {
            let mut rng = StdRng::seed_from_u64(2);
            let input = (def.generate_input)(Some(11), &mut rng);
            let last = def.simulate(input, rng).expect("autonomous").last().expect("frames");
            assert!(last.description.is_some_and(|d| d.contains("Complete")), "{}", def.id());
        }
    }
}
