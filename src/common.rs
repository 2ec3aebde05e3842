//! Common types: guess results and the error enums shared across modules.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::ship::ShipKind;

/// Result of firing at a cell of an [`Ocean`](crate::Ocean).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GuessResult {
    /// Guess hit a ship segment.
    Hit,
    /// Guess missed all ships.
    Miss,
    /// Guess sank a ship.
    Sink(ShipKind),
}

impl GuessResult {
    /// True for `Hit` and `Sink`.
    pub fn is_hit(self) -> bool {
        !matches!(self, GuessResult::Miss)
    }
}

/// Errors returned by board and ocean operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (invalid index).
    BitBoardError(BitBoardError),
    /// Ship name not found in the catalog.
    UnknownShip,
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement runs off the board.
    ShipOutOfBounds,
    /// Guess was already made at this position.
    AlreadyGuessed,
    /// A hit landed on the ship map but on no placed ship.
    UnknownShipHit,
    /// Random placement gave up after `attempts` tries.
    UnableToPlaceShip { ship: ShipKind, attempts: usize },
    /// Numeric cell state other than 0, 1 or 2.
    InvalidCellState(u8),
    /// Malformed textual board.
    Parse { line: usize, reason: &'static str },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::UnknownShip => write!(f, "Ship name not found in catalog"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::AlreadyGuessed => write!(f, "Guess was already made at this position"),
            BoardError::UnknownShipHit => write!(f, "Hit did not match any placed ship"),
            BoardError::UnableToPlaceShip { ship, attempts } => {
                write!(f, "Unable to place {} after {} attempts", ship, attempts)
            }
            BoardError::InvalidCellState(v) => write!(f, "Invalid cell state {}", v),
            BoardError::Parse { line, reason } => write!(f, "line {}: {}", line, reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// Misses leave no room anywhere on the board for this ship.
    NoValidPlacement(ShipKind),
    /// Negative sampling budget.
    InvalidCycles(i64),
    /// The fleet to place contains no ships.
    EmptyFleet,
    /// Every cell has already been fired at.
    NoTargetLeft,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NoValidPlacement(kind) => {
                write!(f, "No valid placement left for the {}", kind)
            }
            SolveError::InvalidCycles(n) => write!(f, "Cycle count must be non-negative, got {}", n),
            SolveError::EmptyFleet => write!(f, "Fleet contains no ships"),
            SolveError::NoTargetLeft => write!(f, "Every cell has already been fired at"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SolveError {}
