//! Backtracking searches. Each one narrates its tries and undos.

mod graph_coloring;
mod n_queens;
mod subset_sum;
mod sudoku;

use algoviz_core::Catalog;

pub use n_queens::QUEEN;

/// Register every backtracking algorithm.
pub fn register(catalog: &mut Catalog) {
    catalog
        .register(graph_coloring::definition())
        .register(n_queens::definition())
        .register(subset_sum::definition())
        .register(sudoku::definition());
}
