//! The attacker's view of the opponent board.
//!
//! A [`BoardSnapshot`] records only what has been observed: which cells were
//! fired at and whether each shot hit. It has no notion of where the ships
//! actually are, so anything handed a snapshot cannot peek at the layout.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::{BitBoard, BitBoardError};
use crate::common::BoardError;
use crate::config::BOARD_SIZE;

pub const GRID_SIZE: usize = BOARD_SIZE as usize;

/// 100-bit occupancy mask over the 10×10 grid.
pub type Mask = BitBoard<u128, GRID_SIZE>;

/// Observable state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellState {
    #[default]
    Unknown = 0,
    Miss = 1,
    Hit = 2,
}

impl CellState {
    /// Single-character label used by the text format.
    pub fn symbol(self) -> char {
        match self {
            CellState::Unknown => '.',
            CellState::Miss => 'O',
            CellState::Hit => 'X',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(CellState::Unknown),
            'O' | 'o' => Some(CellState::Miss),
            'X' | 'x' => Some(CellState::Hit),
            _ => None,
        }
    }
}

impl TryFrom<u8> for CellState {
    type Error = BoardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(CellState::Unknown),
            1 => Ok(CellState::Miss),
            2 => Ok(CellState::Hit),
            other => Err(BoardError::InvalidCellState(other)),
        }
    }
}

/// Read-only 10×10 grid of observed cell states handed to the solver.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    cells: [[CellState; GRID_SIZE]; GRID_SIZE],
}

impl BoardSnapshot {
    /// A board with every cell unknown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[CellState; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Build from the numeric encoding (0 unknown, 1 miss, 2 hit).
    pub fn from_states(states: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self, BoardError> {
        let mut board = Self::new();
        for (r, row) in states.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                board.cells[r][c] = CellState::try_from(v)?;
            }
        }
        Ok(board)
    }

    /// State at (row, col); `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> Result<(), BoardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BitBoardError::IndexOutOfBounds { row, col })?;
        *cell = state;
        Ok(())
    }

    /// Builder-style [`set`](Self::set) for tests and fixtures.
    pub fn with(mut self, row: usize, col: usize, state: CellState) -> Result<Self, BoardError> {
        self.set(row, col, state)?;
        Ok(self)
    }

    #[inline]
    pub fn is_unknown(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(CellState::Unknown)
    }

    pub fn rows(&self) -> &[[CellState; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Cells in row-major order with their coordinates.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &s)| ((r, c), s)))
    }

    fn mask_of(&self, state: CellState) -> Mask {
        let mut mask = Mask::new();
        for ((r, c), s) in self.cells() {
            if s == state {
                // (r, c) comes from the grid itself
                let _ = mask.set(r, c);
            }
        }
        mask
    }

    pub fn hits(&self) -> Mask {
        self.mask_of(CellState::Hit)
    }

    pub fn misses(&self) -> Mask {
        self.mask_of(CellState::Miss)
    }

    pub fn unknowns(&self) -> Mask {
        self.mask_of(CellState::Unknown)
    }
}

impl FromStr for BoardSnapshot {
    type Err = BoardError;

    /// Parses ten rows of ten symbols: `.` unknown, `O` miss, `X` hit.
    /// Whitespace between symbols, a leading row letter `A`–`J` and
    /// all-digit header lines are ignored, so [`Display`](fmt::Display)
    /// output parses back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = BoardSnapshot::new();
        let mut row = 0;
        let mut last_line = 0;
        for (i, line) in s.lines().enumerate() {
            let line_no = i + 1;
            last_line = line_no;
            let t = line.trim();
            if t.is_empty() || t.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
                continue;
            }
            let body = match t.split_once(char::is_whitespace) {
                Some((label, rest)) if is_row_label(label) => rest,
                _ => t,
            };
            if row >= GRID_SIZE {
                return Err(BoardError::Parse {
                    line: line_no,
                    reason: "more than 10 rows",
                });
            }
            let mut col = 0;
            for ch in body.chars().filter(|c| !c.is_whitespace()) {
                let state = CellState::from_symbol(ch).ok_or(BoardError::Parse {
                    line: line_no,
                    reason: "unexpected symbol, expected '.', 'O' or 'X'",
                })?;
                if col >= GRID_SIZE {
                    return Err(BoardError::Parse {
                        line: line_no,
                        reason: "row has more than 10 cells",
                    });
                }
                board.cells[row][col] = state;
                col += 1;
            }
            if col != GRID_SIZE {
                return Err(BoardError::Parse {
                    line: line_no,
                    reason: "row has fewer than 10 cells",
                });
            }
            row += 1;
        }
        if row != GRID_SIZE {
            return Err(BoardError::Parse {
                line: last_line,
                reason: "expected 10 rows",
            });
        }
        Ok(board)
    }
}

fn is_row_label(label: &str) -> bool {
    let mut chars = label.chars();
    matches!((chars.next(), chars.next()), (Some('A'..='J'), None))
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {}", c + 1)?;
        }
        for (r, row) in self.cells.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{}", (b'A' + r as u8) as char)?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BoardSnapshot {{")?;
        for row in &self.cells {
            let line: [char; GRID_SIZE] = core::array::from_fn(|c| row[c].symbol());
            write!(f, "  ")?;
            for ch in line {
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
