//! A defender's ocean: the secret fleet layout plus the shots taken at it.
//!
//! The solver never receives an `Ocean`. Attackers see it only through
//! [`Ocean::snapshot`], which carries cell states and nothing else.

use core::fmt;
use rand::Rng;

use crate::board::{BoardSnapshot, CellState, Mask, GRID_SIZE};
use crate::common::{BoardError, GuessResult};
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::placement::Placement;
use crate::ship::{Fleet, Orientation, PerShip, ShipKind};

#[derive(Clone, Copy, PartialEq, Eq)]
struct PlacedShip {
    placement: Placement,
    hits: Mask,
}

impl PlacedShip {
    fn is_sunk(&self) -> bool {
        self.hits == self.placement.mask()
    }
}

/// Hidden fleet and observed shots for one side of a game.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Ocean {
    ships: PerShip<Option<PlacedShip>>,
    ship_map: Mask,
    hits: Mask,
    misses: Mask,
}

impl Ocean {
    /// Empty ocean, no ships placed, no shots taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Occupancy of every placed ship.
    pub fn ship_map(&self) -> Mask {
        self.ship_map
    }

    /// Where `kind` sits, if placed.
    pub fn placement(&self, kind: ShipKind) -> Option<Placement> {
        self.ships[kind].map(|s| s.placement)
    }

    /// Place `kind` at (`row`, `col`) with `orientation`.
    pub fn place(
        &mut self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if self.ships[kind].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let placement = Placement::new(kind, row, col, orientation)?;
        if self.ship_map.intersects(&placement.mask()) {
            return Err(BoardError::ShipOverlaps);
        }
        self.ship_map |= placement.mask();
        self.ships[kind] = Some(PlacedShip {
            placement,
            hits: Mask::new(),
        });
        Ok(())
    }

    /// A random spot for `kind` clear of the ships already placed.
    ///
    /// Tries at most [`MAX_PLACEMENT_ATTEMPTS`] candidates, then gives up with
    /// [`BoardError::UnableToPlaceShip`].
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<Placement, BoardError> {
        if self.ships[kind].is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let len = kind.length();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orientation {
                Orientation::Horizontal => (GRID_SIZE - 1, GRID_SIZE - len),
                Orientation::Vertical => (GRID_SIZE - len, GRID_SIZE - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let placement = Placement::new(kind, r, c, orientation)?;
            if !self.ship_map.intersects(&placement.mask()) {
                return Ok(placement);
            }
        }
        Err(BoardError::UnableToPlaceShip {
            ship: kind,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Randomly place every kind of `fleet` that is not placed yet.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: Fleet,
    ) -> Result<(), BoardError> {
        for kind in fleet.kinds() {
            if self.ships[kind].is_some() {
                continue;
            }
            let placement = self.random_placement(rng, kind)?;
            let (r, c) = placement.origin();
            self.place(kind, r, c, placement.orientation())?;
        }
        Ok(())
    }

    /// Fire at (`row`, `col`).
    pub fn guess(&mut self, row: usize, col: usize) -> Result<GuessResult, BoardError> {
        if self.hits.get(row, col)? || self.misses.get(row, col)? {
            return Err(BoardError::AlreadyGuessed);
        }
        if !self.ship_map.get(row, col)? {
            self.misses.set(row, col)?;
            return Ok(GuessResult::Miss);
        }
        self.hits.set(row, col)?;
        for kind in ShipKind::ALL {
            if let Some(ship) = self.ships[kind].as_mut() {
                if ship.placement.covers(row, col) {
                    ship.hits.set(row, col)?;
                    return Ok(if ship.is_sunk() {
                        GuessResult::Sink(kind)
                    } else {
                        GuessResult::Hit
                    });
                }
            }
        }
        Err(BoardError::UnknownShipHit)
    }

    pub fn is_sunk(&self, kind: ShipKind) -> bool {
        self.ships[kind].is_some_and(|s| s.is_sunk())
    }

    /// True once every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|(_, s)| s.map_or(true, |s| s.is_sunk()))
    }

    /// Placed kinds that are still afloat.
    pub fn afloat(&self) -> Fleet {
        ShipKind::ALL
            .into_iter()
            .filter(|&kind| self.ships[kind].is_some_and(|s| !s.is_sunk()))
            .fold(Fleet::empty(), Fleet::with)
    }

    /// Number of shots taken so far.
    pub fn shots(&self) -> usize {
        self.hits.count_ones() + self.misses.count_ones()
    }

    /// What an attacker is allowed to know: shot outcomes, never ships.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut board = BoardSnapshot::new();
        let shots = self
            .hits
            .iter_set_bits()
            .map(|cell| (cell, CellState::Hit))
            .chain(self.misses.iter_set_bits().map(|cell| (cell, CellState::Miss)));
        for ((r, c), state) in shots {
            // masks only hold on-grid cells
            let _ = board.set(r, c, state);
        }
        board
    }
}

impl fmt::Debug for Ocean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ocean")
            .field("ship_map", &self.ship_map)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
