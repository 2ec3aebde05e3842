//! Turning placement frequencies into per-cell probabilities.

use core::fmt;
use core::ops::Index;

use crate::board::{BoardSnapshot, GRID_SIZE};
use crate::placement::Placements;
use crate::sampler::FrequencyTable;

/// Per-cell likelihood that an unknown cell holds part of a hidden ship.
///
/// Hit and miss cells are always `0.0`.
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityGrid {
    cells: [[f64; GRID_SIZE]; GRID_SIZE],
}

impl ProbabilityGrid {
    /// All-zero grid.
    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[f64; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[[f64; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn into_rows(self) -> [[f64; GRID_SIZE]; GRID_SIZE] {
        self.cells
    }

    pub fn is_all_zero(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v == 0.0)
    }

    /// Next strike: scanning row-major, the first cell holding the strictly
    /// greatest value.
    pub fn best_target(&self) -> (usize, usize) {
        let mut best = (0, 0);
        let mut best_value = self.cells[0][0];
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v > best_value {
                    best = (r, c);
                    best_value = v;
                }
            }
        }
        best
    }

    /// [`best_target`](Self::best_target), except an all-zero grid yields the
    /// first unknown cell of `board` instead of (0, 0). `None` once nothing is
    /// left to fire at.
    pub fn best_unknown_target(&self, board: &BoardSnapshot) -> Option<(usize, usize)> {
        let (r, c) = self.best_target();
        if self.cells[r][c] > 0.0 {
            return Some((r, c));
        }
        board.unknowns().iter_set_bits().next()
    }
}

impl Index<(usize, usize)> for ProbabilityGrid {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.cells[row][col]
    }
}

impl fmt::Display for ProbabilityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {:>4}", c + 1)?;
        }
        for (r, row) in self.cells.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{}", (b'A' + r as u8) as char)?;
            for v in row {
                write!(f, " {:4.2}", v)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ProbabilityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ProbabilityGrid:")?;
        fmt::Display::fmt(self, f)
    }
}

/// Spread each placement's count over the unknown cells it covers and divide
/// by the number of accepted samples.
///
/// No accepted samples means no evidence; the grid stays all zero.
pub fn aggregate(
    placements: &Placements,
    frequencies: &FrequencyTable,
    valid_samples: u64,
    board: &BoardSnapshot,
) -> ProbabilityGrid {
    let mut grid = ProbabilityGrid::zeros();
    if valid_samples == 0 {
        return grid;
    }

    let mut counts = [[0u64; GRID_SIZE]; GRID_SIZE];
    for kind in placements.fleet().kinds() {
        for (placement, &n) in placements.of(kind).iter().zip(frequencies.of(kind)) {
            if n == 0 {
                continue;
            }
            for (r, c) in placement.cells() {
                if board.is_unknown(r, c) {
                    counts[r][c] += n;
                }
            }
        }
    }

    let total = valid_samples as f64;
    for (out, row) in grid.cells.iter_mut().zip(&counts) {
        for (v, &n) in out.iter_mut().zip(row) {
            *v = n as f64 / total;
        }
    }
    grid
}
