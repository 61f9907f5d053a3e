//! 4×4 mini sudoku.
//!
//! Starts from a solved grid and applies validity-preserving transforms: value relabelling,
//! row and column swaps inside a band, band swaps, and transpose. Then blanks cells.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::RngCore;

use super::Generated;
use crate::types::{Grid, Solution, TaskContent, TaskType, GRID_SIZE};

const BASE: Grid = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];

const MAX_BLANKS: usize = 10;

/// Blank cells at `level`: `4 + floor(level / 2)`, at most 10.
pub(crate) fn blank_count(level: f64) -> usize {
    (4.0 + (level / 2.0).floor()).min(MAX_BLANKS as f64) as usize
}

fn transpose(grid: &Grid) -> Grid {
    let mut out = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, row) in grid.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            out[c][r] = value;
        }
    }
    out
}

fn swap_columns(grid: &mut Grid, a: usize, b: usize) {
    for row in grid.iter_mut() {
        row.swap(a, b);
    }
}

fn solved_grid(rng: &mut dyn RngCore) -> Grid {
    let mut labels = [1u8, 2, 3, 4];
    labels.shuffle(&mut *rng);
    let mut grid = BASE.map(|row| row.map(|v| labels[(v - 1) as usize]));

    if rng.gen_bool(0.5) {
        grid.swap(0, 1);
    }
    if rng.gen_bool(0.5) {
        grid.swap(2, 3);
    }
    if rng.gen_bool(0.5) {
        grid.swap(0, 2);
        grid.swap(1, 3);
    }
    if rng.gen_bool(0.5) {
        swap_columns(&mut grid, 0, 1);
    }
    if rng.gen_bool(0.5) {
        swap_columns(&mut grid, 2, 3);
    }
    if rng.gen_bool(0.5) {
        grid = transpose(&grid);
    }
    grid
}

pub(super) fn generate(_task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    let solution = solved_grid(rng);

    let mut cells: Vec<usize> = (0..GRID_SIZE * GRID_SIZE).collect();
    cells.shuffle(&mut *rng);
    let mut puzzle = solution;
    for &cell in cells.iter().take(blank_count(level)) {
        puzzle[cell / GRID_SIZE][cell % GRID_SIZE] = 0;
    }

    Generated {
        question: "Mini Sudoku".to_string(),
        content: TaskContent::GridLogic {
            puzzle,
            grid_size: GRID_SIZE,
        },
        solution: Solution::Grid(solution),
    }
}

/// Rows, columns and 2×2 boxes each hold 1–4 exactly once.
pub(crate) fn is_valid_solution(grid: &Grid) -> bool {
    let unique = |cells: [u8; GRID_SIZE]| {
        let mut sorted = cells;
        sorted.sort_unstable();
        sorted == [1, 2, 3, 4]
    };
    let rows = grid.iter().all(|row| unique(*row));
    let cols = (0..GRID_SIZE).all(|c| unique([grid[0][c], grid[1][c], grid[2][c], grid[3][c]]));
    let boxes = [(0, 0), (0, 2), (2, 0), (2, 2)].iter().all(|&(r, c)| {
        unique([
            grid[r][c],
            grid[r][c + 1],
            grid[r + 1][c],
            grid[r + 1][c + 1],
        ])
    });
    rows && cols && boxes
}
