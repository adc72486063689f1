//! Algoviz Algorithm Catalog
//!
//! Step-by-step simulations for sorting, shuffling, pathfinding,
//! backtracking, greedy graph algorithms, terrain generation and classic
//! data structures. Every algorithm is an [`AlgorithmDefinition`] whose
//! producer narrates each step as a [`Snapshot`](algoviz_core::Snapshot).
//!
//! # Usage
//!
//! ```ignore
//! let catalog = algoviz_algorithms::catalog();
//! let mut player = catalog.load("quick-sort", EngineConfig::seeded(7), Some(30))?;
//! ```

pub mod backtracking;
pub mod bars;
pub mod graph;
pub mod greedy;
pub mod pathfinding;
pub mod shuffling;
pub mod sorting;
pub mod structures;
pub mod terrain;

use algoviz_core::{AlgorithmDefinition, Catalog, Domain};

fn register_all<T: Domain>(catalog: &mut Catalog, definitions: Vec<AlgorithmDefinition<T>>) {
    for definition in definitions {
        catalog.register(definition);
    }
}

/// Every built-in algorithm, grouped by category.
pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    register_all(&mut catalog, sorting::definitions());
    register_all(&mut catalog, pathfinding::definitions());
    structures::register(&mut catalog);
    backtracking::register(&mut catalog);
    register_all(&mut catalog, greedy::definitions());
    register_all(&mut catalog, terrain::definitions());
    register_all(&mut catalog, shuffling::definitions());
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Category;

    #[test]
    fn catalog_is_complete() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 32);
        assert_eq!(catalog.in_category(Category::Sorting).count(), 8);
        assert_eq!(catalog.in_category(Category::Pathfinding).count(), 4);
        assert_eq!(catalog.in_category(Category::DataStructures).count(), 5);
        assert_eq!(catalog.in_category(Category::Backtracking).count(), 4);
        assert_eq!(catalog.in_category(Category::Greedy).count(), 3);
        assert_eq!(catalog.in_category(Category::Terrain).count(), 4);
        assert_eq!(catalog.in_category(Category::Shuffling).count(), 4);
    }

    #[test]
    fn buttons_name_real_operations() {
        let catalog = catalog();
        for info in catalog.iter() {
            for control in &info.controls {
                if let algoviz_core::Control::Button { method, .. } = control {
                    let player = catalog.load(info.id, Default::default(), None).unwrap();
                    assert!(
                        player.status().operations.iter().any(|op| op == method),
                        "{}: {method}",
                        info.id
                    );
                }
            }
        }
    }
}
