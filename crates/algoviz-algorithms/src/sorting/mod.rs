//! Comparison sorts over random bar values.

mod bubble;
mod cocktail_shaker;
mod gnome;
mod insertion;
mod merge;
mod quick;
mod selection;
mod shell;

use algoviz_core::AlgorithmDefinition;

/// Every sorting algorithm, in catalog order.
pub fn definitions() -> Vec<AlgorithmDefinition<Vec<i64>>> {
    vec![
        bubble::definition(),
        cocktail_shaker::definition(),
        gnome::definition(),
        insertion::definition(),
        merge::definition(),
        quick::definition(),
        selection::definition(),
        shell::definition(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Snapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run(def: &AlgorithmDefinition<Vec<i64>>, input: Vec<i64>) -> Vec<Snapshot<Vec<i64>>> {
        def.simulate(input, StdRng::seed_from_u64(0))
            .expect("sorts are autonomous")
            .collect()
    }

    #[test]
    fn every_sort_orders_small_input() {
        for def in definitions() {
            let steps = run(&def, vec![5, 3, 8, 1]);
            let last = steps.last().and_then(Snapshot::domain_value).cloned();
            assert_eq!(last, Some(vec![1, 3, 5, 8]), "{}", def.id());
        }
    }

    #[test]
    fn highlights_stay_in_bounds() {
        for def in definitions() {
            for snap in run(&def, vec![9, 2, 7, 2, 5, 1, 8]) {
                assert!(snap.highlighted_indices.iter().all(|&i| i < 7), "{}", def.id());
            }
        }
    }

    #[test]
    fn first_and_last_frames_are_narrated() {
        for def in definitions() {
            let steps = run(&def, vec![4, 1, 3]);
            let first = steps.first().and_then(|s| s.description.clone()).unwrap_or_default();
            assert!(first.starts_with("Starting"), "{}: {first}", def.id());
            assert!(steps.last().is_some_and(|s| s.highlighted_indices.is_empty()));
        }
    }

    #[test]
    fn sorted_and_tiny_inputs() {
        for def in definitions() {
            assert_eq!(
                run(&def, vec![1, 2, 3]).last().and_then(Snapshot::domain_value),
                Some(&vec![1, 2, 3])
            );
            assert_eq!(run(&def, vec![7]).last().and_then(Snapshot::domain_value), Some(&vec![7]));
            assert_eq!(run(&def, Vec::new()).len(), 2, "{}", def.id());
        }
    }

    #[test]
    fn bubble_narrates_comparisons() {
        let steps = run(&bubble::definition(), vec![2, 1]);
        let descriptions: Vec<_> = steps.iter().filter_map(|s| s.description.as_deref()).collect();
        assert_eq!(
            descriptions,
            vec!["Starting: Unsorted array", "Comparing 2 and 1", "Swapping 2 and 1", "Sorting completed!"]
        );
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = definitions().iter().map(|d| d.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
