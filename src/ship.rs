//! The closed ship catalog and per-kind storage.

use core::fmt;
use core::ops::{Index, IndexMut};
use core::str::FromStr;

use crate::common::BoardError;
use crate::config::NUM_SHIPS;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Cell `i` of a ship of this orientation anchored at (`row`, `col`).
    #[inline]
    pub fn step(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// One of the five ship types in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Destroyer,
    Submarine,
    Cruiser,
    Battleship,
    Carrier,
}

impl ShipKind {
    /// Catalog order.
    pub const ALL: [ShipKind; NUM_SHIPS] = [
        ShipKind::Destroyer,
        ShipKind::Submarine,
        ShipKind::Cruiser,
        ShipKind::Battleship,
        ShipKind::Carrier,
    ];

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Destroyer => 2,
            ShipKind::Submarine => 3,
            ShipKind::Cruiser => 3,
            ShipKind::Battleship => 4,
            ShipKind::Carrier => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Battleship => "Battleship",
            ShipKind::Carrier => "Carrier",
        }
    }

    /// Position in [`ShipKind::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipKind {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(BoardError::UnknownShip)
    }
}

/// One value per ship kind, indexed by [`ShipKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerShip<T>([T; NUM_SHIPS]);

impl<T> PerShip<T> {
    pub fn from_fn(mut f: impl FnMut(ShipKind) -> T) -> Self {
        PerShip(core::array::from_fn(|i| f(ShipKind::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipKind, &T)> {
        ShipKind::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerShip<U> {
        PerShip(self.0.map(f))
    }
}

impl<T> Index<ShipKind> for PerShip<T> {
    type Output = T;

    #[inline]
    fn index(&self, kind: ShipKind) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<ShipKind> for PerShip<T> {
    #[inline]
    fn index_mut(&mut self, kind: ShipKind) -> &mut T {
        &mut self.0[kind.index()]
    }
}

/// The ship kinds still hidden on the board being solved.
///
/// Defaults to the whole catalog. Kinds are kept in catalog order and never
/// repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    present: [bool; NUM_SHIPS],
}

impl Fleet {
    /// Every kind in the catalog.
    pub const fn full() -> Self {
        Fleet {
            present: [true; NUM_SHIPS],
        }
    }

    pub const fn empty() -> Self {
        Fleet {
            present: [false; NUM_SHIPS],
        }
    }

    pub fn only(kinds: &[ShipKind]) -> Self {
        let mut fleet = Fleet::empty();
        for &kind in kinds {
            fleet.present[kind.index()] = true;
        }
        fleet
    }

    pub fn with(mut self, kind: ShipKind) -> Self {
        self.present[kind.index()] = true;
        self
    }

    pub fn without(mut self, kind: ShipKind) -> Self {
        self.present[kind.index()] = false;
        self
    }

    pub fn contains(&self, kind: ShipKind) -> bool {
        self.present[kind.index()]
    }

    pub fn len(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kinds in catalog order.
    pub fn kinds(&self) -> impl Iterator<Item = ShipKind> {
        let present = self.present;
        ShipKind::ALL
            .into_iter()
            .filter(move |kind| present[kind.index()])
    }

    /// Total cells the fleet occupies.
    pub fn total_cells(&self) -> usize {
        self.kinds().map(ShipKind::length).sum()
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet::full()
    }
}
