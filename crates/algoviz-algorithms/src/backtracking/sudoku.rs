use algoviz_core::{
    AlgorithmDefinition, AlgorithmInfo, Category, Cell, Context, Grid, Producer, Snapshot, Tone, Visualizer, Yielder,
};
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

const BLANKING_ATTEMPTS: usize = 40;

type Board = [[u8; 9]; 9];

pub fn definition() -> AlgorithmDefinition<Grid> {
    AlgorithmDefinition::autonomous(
        AlgorithmInfo::new(
            "sudoku-solver",
            "Sudoku Solver",
            Category::Backtracking,
            Visualizer::Grid2d,
            "Solves a randomly generated Sudoku puzzle.",
        ),
        generate_puzzle,
        run,
    )
}

fn fits(board: &Board, row: usize, col: usize, digit: u8) -> bool {
    let (box_row, box_col) = (row / 3 * 3, col / 3 * 3);
    for i in 0..9 {
        if (i != col && board[row][i] == digit) || (i != row && board[i][col] == digit) {
            return false;
        }
        let (r, c) = (box_row + i / 3, box_col + i % 3);
        if (r, c) != (row, col) && board[r][c] == digit {
            return false;
        }
    }
    true
}

fn first_empty(board: &Board) -> Option<(usize, usize)> {
    (0..81).map(|i| (i / 9, i % 9)).find(|&(r, c)| board[r][c] == 0)
}

/// Plain backtracking fill, used to complete a generated board.
fn complete(board: &mut Board) -> bool {
    let Some((row, col)) = first_empty(board) else {
        return true;
    };
    for digit in 1..=9 {
        if fits(board, row, col, digit) {
            board[row][col] = digit;
            if complete(board) {
                return true;
            }
            board[row][col] = 0;
        }
    }
    false
}

/// Render a board as a grid; non-zero cells are shown as fixed clues.
pub fn to_grid(board: &Board) -> Grid {
    Grid::from_fn(9, 9, |row, col| {
        let mut cell = Cell::new(row, col);
        let digit = board[row][col];
        if digit != 0 {
            cell.value = Some(digit.to_string());
            cell.tone = Some(Tone::Fixed);
        }
        cell
    })
}

fn from_grid(grid: &Grid) -> Board {
    let mut board = [[0; 9]; 9];
    for cell in grid.cells().filter(|c| c.row < 9 && c.col < 9) {
        board[cell.row][cell.col] = cell.value.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0);
    }
    board
}

/// A full valid board with up to 40 cells blanked.
///
/// The three diagonal boxes are independent, so they are filled with
/// shuffled digits before the rest is solved.
pub fn generate_puzzle(_size: Option<usize>, rng: &mut StdRng) -> Grid {
    let mut board: Board = [[0; 9]; 9];
    for start in [0, 3, 6] {
        let mut digits: Vec<u8> = (1..=9).collect();
        digits.shuffle(rng);
        for (i, digit) in digits.into_iter().enumerate() {
            board[start + i / 3][start + i % 3] = digit;
        }
    }
    complete(&mut board);

    for _ in 0..BLANKING_ATTEMPTS {
        board[rng.gen_range(0..9)][rng.gen_range(0..9)] = 0;
    }
    to_grid(&board)
}

fn paint(grid: &mut Grid, row: usize, col: usize, digit: Option<u8>, tone: Option<Tone>) {
    if let Some(cell) = grid.get_mut(row, col) {
        cell.value = digit.map(|d| d.to_string());
        cell.tone = tone;
    }
}

fn solve<'a>(y: &'a Yielder<Grid>, grid: &'a mut Grid, board: &'a mut Board) -> BoxFuture<'a, bool> {
    Box::pin(async move {
        let Some((row, col)) = first_empty(board) else {
            return true;
        };
        let key = format!("{row}-{col}");

        for digit in 1..=9 {
            board[row][col] = digit;
            paint(grid, row, col, Some(digit), Some(Tone::Yellow));
            y.emit(
                Snapshot::projection(grid.clone())
                    .focus(key.clone())
                    .describe(format!("Trying {digit}...")),
            )
            .await;

            if fits(board, row, col, digit) {
                paint(grid, row, col, Some(digit), Some(Tone::Green));
                y.emit(Snapshot::projection(grid.clone()).focus(key.clone()).describe("Valid placement")).await;

                if solve(y, grid, board).await {
                    return true;
                }

                paint(grid, row, col, Some(digit), Some(Tone::Red));
                y.emit(Snapshot::projection(grid.clone()).focus(key.clone()).describe("Backtracking...")).await;
            } else {
                paint(grid, row, col, Some(digit), Some(Tone::Red));
                y.emit(
                    Snapshot::projection(grid.clone())
                        .focus(key.clone())
                        .describe(format!("{digit} conflicts")),
                )
                .await;
            }
            board[row][col] = 0;
            paint(grid, row, col, None, None);
        }
        false
    })
}

fn run(ctx: Context<Grid>) -> Producer<Grid> {
    Producer::new(move |y| async move {
        let mut grid = ctx.state.get();
        let mut board = from_grid(&grid);

        y.emit(Snapshot::projection(grid.clone()).describe("Starting Sudoku Solver")).await;

        let description = if solve(&y, &mut grid, &mut board).await {
            "Solved!"
        } else {
            "No solution exists."
        };
        y.emit(Snapshot::projection(grid).describe(description)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn is_solved(board: &Board) -> bool {
        (0..81).all(|i| {
            let (r, c) = (i / 9, i % 9);
            board[r][c] != 0 && fits(board, r, c, board[r][c])
        })
    }

    #[test]
    fn generated_puzzle_is_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_puzzle(None, &mut rng);
        let board = from_grid(&grid);

        let clues = grid.count(|c| c.value.is_some());
        assert!((41..81).contains(&clues), "{clues}");
        for (r, c) in (0..81).map(|i| (i / 9, i % 9)) {
            if board[r][c] != 0 {
                assert!(fits(&board, r, c, board[r][c]));
            }
        }
    }

    #[test]
    fn solves_nearly_complete_board() {
        let mut board: Board = [[0; 9]; 9];
        assert!(complete(&mut board));
        let solution = board;
        for (r, c) in [(0, 0), (4, 4), (8, 8), (2, 7), (6, 1)] {
            board[r][c] = 0;
        }

        let last = definition()
            .simulate(to_grid(&board), StdRng::seed_from_u64(0))
            .expect("autonomous")
            .last()
            .expect("frames");
        assert_eq!(last.description.as_deref(), Some("Solved!"));

        let Some(algoviz_core::Projection::Grid(grid)) = last.projection_value() else {
            panic!("expected grid");
        };
        let solved = from_grid(grid);
        assert!(is_solved(&solved));
        assert_eq!(solved, solution);
    }
}
