use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Cell, Context, Control, Grid, Producer, Snapshot, Tone, Visualizer,
    Yielder,
};
use futures::future::BoxFuture;
use rand::rngs::StdRng;

pub const QUEEN: &str = "♛";

const DEFAULT_N: usize = 4;
const MIN_N: usize = 4;
const MAX_N: usize = 10;

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "n-queens",
            "N-Queens Solver",
            Category::Backtracking,
            Visualizer::Grid2d,
            "Place N queens on an N×N chessboard so that no two queens attack each other.",
        )
        .with_controls([Control::input("Size (N)", "n", DEFAULT_N as i64)]),
        empty_board,
        run,
    )
}

fn shade(row: usize, col: usize) -> Tone {
    if (row + col) % 2 == 0 {
        Tone::Board
    } else {
        Tone::BoardAlt
    }
}

/// Empty N×N chessboard, N clamped to 4..=10.
pub fn empty_board(size: Option<usize>, _rng: &mut StdRng) -> Grid {
    let n = size.unwrap_or(DEFAULT_N).clamp(MIN_N, MAX_N);
    Grid::from_fn(n, n, |row, col| {
        let mut cell = Cell::new(row, col);
        cell.tone = Some(shade(row, col));
        cell
    })
}

fn has_queen(board: &Grid, row: usize, col: usize) -> bool {
    board.get(row, col).is_some_and(|c| c.shows(QUEEN))
}

/// Queens are placed column by column, so only the left side can attack.
fn is_safe(board: &Grid, row: usize, col: usize) -> bool {
    let n = board.height();
    let same_row = (0..col).any(|c| has_queen(board, row, c));
    let upper_diagonal = (0..=row.min(col)).any(|d| has_queen(board, row - d, col - d));
    let lower_diagonal = (0..=col).take_while(|d| row + d < n).any(|d| has_queen(board, row + d, col - d));
    !(same_row || upper_diagonal || lower_diagonal)
}

fn paint(board: &mut Grid, row: usize, col: usize, tone: Tone) {
    if let Some(cell) = board.get_mut(row, col) {
        cell.tone = Some(tone);
    }
}

fn set_queen(board: &mut Grid, row: usize, col: usize, placed: bool) {
    if let Some(cell) = board.get_mut(row, col) {
        cell.value = placed.then(|| QUEEN.to_string());
    }
}

fn view(board: &Grid, row: usize, col: usize) -> Snapshot<Grid> {
    Snapshot::projection(board.clone()).focus(format!("{row}-{col}"))
}

fn solve<'a>(y: &'a Yielder<Grid>, board: &'a mut Grid, col: usize) -> BoxFuture<'a, bool> {
    Box::pin(async move {
        let n = board.height();
        if col >= n {
            return true;
        }

        for row in 0..n {
            paint(board, row, col, Tone::Yellow);
            y.emit(view(board, row, col).describe(format!("Checking position [{row}, {col}]..."))).await;

            if is_safe(board, row, col) {
                set_queen(board, row, col, true);
                paint(board, row, col, Tone::Green);
                y.emit(view(board, row, col).describe(format!("Placed Queen at [{row}, {col}]"))).await;

                if solve(y, board, col + 1).await {
                    return true;
                }

                set_queen(board, row, col, false);
                paint(board, row, col, Tone::Red);
                y.emit(view(board, row, col).describe(format!("Backtracking from [{row}, {col}]"))).await;
            } else {
                paint(board, row, col, Tone::Red);
                y.emit(view(board, row, col).describe(format!("Conflict at [{row}, {col}]!"))).await;
            }
            paint(board, row, col, shade(row, col));
        }
        false
    })
}

fn run(ctx: Context<Grid>) -> Producer<Grid> {
    Producer::new(move |y| async move {
        let mut board = ctx.state.get();

        y.emit(Snapshot::projection(board.clone()).describe("Starting N-Queens")).await;

        let description = if solve(&y, &mut board, 0).await {
            "Solution Found!"
        } else {
            "No solution exists."
        };
        y.emit(Snapshot::projection(board).describe(description)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::Projection;
    use rand::SeedableRng;

    fn boards(n: usize) -> Vec<(Grid, String)> {
        let mut rng = StdRng::seed_from_u64(0);
        definition()
            .simulate(empty_board(Some(n), &mut rng), rng)
            .expect("autonomous")
            .filter_map(|s| match s.data {
                algoviz_core::Payload::Projection(Projection::Grid(grid)) => {
                    Some((grid, s.description.unwrap_or_default()))
                }
                _ => None,
            })
            .collect()
    }

    fn queens(board: &Grid) -> Vec<(usize, usize)> {
        board.cells().filter(|c| c.shows(QUEEN)).map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn four_queens_do_not_attack() {
        let frames = boards(4);
        let (last, description) = frames.last().expect("frames");
        assert_eq!(description, "Solution Found!");

        let placed = queens(last);
        assert_eq!(placed.len(), 4);
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert_ne!(a.0, b.0);
                assert_ne!(a.1, b.1);
                assert_ne!(a.0.abs_diff(b.0), a.1.abs_diff(b.1));
            }
        }
    }

    #[test]
    fn queens_persist_until_backtracked() {
        let frames = boards(5);
        for pair in frames.windows(2) {
            let (before, _) = &pair[0];
            let (after, description) = &pair[1];
            for (row, col) in queens(before) {
                if !has_queen(after, row, col) {
                    assert_eq!(description, &format!("Backtracking from [{row}, {col}]"));
                }
            }
        }
    }

    #[test]
    fn board_size_clamps() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(empty_board(Some(2), &mut rng).height(), 4);
        assert_eq!(empty_board(Some(50), &mut rng).width(), 10);
        assert_eq!(empty_board(None, &mut rng).height(), 4);
    }
}
