//! Candidate ship placements and their enumeration on a board.

use alloc::vec::Vec;
use core::fmt;

use crate::board::{BoardSnapshot, Mask, GRID_SIZE};
use crate::common::BoardError;
use crate::ship::{Fleet, Orientation, PerShip, ShipKind};

/// One axis-aligned position a ship kind could occupy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    kind: ShipKind,
    row: usize,
    col: usize,
    orientation: Orientation,
    mask: Mask,
}

impl Placement {
    /// Anchor a ship of `kind` at (`row`, `col`), extending right or down.
    pub fn new(
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        let len = kind.length();
        let fits = match orientation {
            Orientation::Horizontal => row < GRID_SIZE && col + len <= GRID_SIZE,
            Orientation::Vertical => col < GRID_SIZE && row + len <= GRID_SIZE,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mask = Mask::from_cells((0..len).map(|i| orientation.step(row, col, i)))?;
        Ok(Placement {
            kind,
            row,
            col,
            orientation,
            mask,
        })
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Anchor cell (top-left end of the ship).
    pub fn origin(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the placement.
    #[inline]
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Occupied cells from the anchor outward.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (row, col, orientation) = (self.row, self.col, self.orientation);
        (0..self.kind.length()).map(move |i| orientation.step(row, col, i))
    }

    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.mask.get(row, col).unwrap_or(false)
    }

    /// True when the two placements share a cell.
    #[inline]
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.mask.intersects(&other.mask)
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Placement {{ {}, origin: ({}, {}), {:?} }}",
            self.kind, self.row, self.col, self.orientation
        )
    }
}

/// Every placement of `kind` that stays on the grid and avoids known misses.
///
/// Placements covering hits are kept: a hit may belong to this very ship.
/// Output is ordered row-major by anchor cell, horizontal before vertical
/// at each anchor.
pub fn enumerate(board: &BoardSnapshot, kind: ShipKind) -> Vec<Placement> {
    let misses = board.misses();
    let mut out = Vec::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            for orientation in Orientation::BOTH {
                // Off-grid anchors are rejected by the constructor.
                let Ok(placement) = Placement::new(kind, row, col, orientation) else {
                    continue;
                };
                if placement.mask.intersects(&misses) {
                    continue;
                }
                out.push(placement);
            }
        }
    }
    out
}

/// Enumerated placements for every kind in a fleet.
///
/// Kinds outside the fleet hold empty lists and are ignored by the sampler.
#[derive(Debug, Clone)]
pub struct Placements {
    fleet: Fleet,
    by_kind: PerShip<Vec<Placement>>,
}

impl Placements {
    pub fn enumerate(board: &BoardSnapshot, fleet: Fleet) -> Self {
        let by_kind = PerShip::from_fn(|kind| {
            if fleet.contains(kind) {
                let list = enumerate(board, kind);
                log::trace!("{}: {} candidate placements", kind, list.len());
                list
            } else {
                Vec::new()
            }
        });
        Placements { fleet, by_kind }
    }

    pub fn fleet(&self) -> Fleet {
        self.fleet
    }

    pub fn of(&self, kind: ShipKind) -> &[Placement] {
        &self.by_kind[kind]
    }

    /// Total placements across the fleet.
    pub fn total(&self) -> usize {
        self.fleet.kinds().map(|kind| self.by_kind[kind].len()).sum()
    }

    /// Per-kind placement counts.
    pub fn counts(&self) -> PerShip<usize> {
        PerShip::from_fn(|kind| self.by_kind[kind].len())
    }

    /// The first fleet kind left without any candidate, if any.
    pub fn first_empty(&self) -> Option<ShipKind> {
        self.fleet.kinds().find(|&kind| self.by_kind[kind].is_empty())
    }
}
