//! Shuffles over an ascending bar sequence.

mod fisher_yates;
mod naive;
mod riffle;
mod sattolo;

use algoviz_core::AlgorithmDefinition;

pub fn definitions() -> Vec<AlgorithmDefinition<Vec<i64>>> {
    vec![
        fisher_yates::definition(),
        naive::definition(),
        riffle::definition(),
        sattolo::definition(),
    ]
}
