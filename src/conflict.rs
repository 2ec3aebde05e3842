//! Cross-kind placement overlap relation.
//!
//! Two placements conflict when their masks intersect. Placements of the
//! same kind are never compared since a sample picks exactly one per kind.
//! Small relations are precomputed into a bit matrix per kind pair; large
//! ones are answered straight from the masks.

use alloc::vec;
use alloc::vec::Vec;

use crate::board::Mask;
use crate::config::{ConflictStrategy, MATERIALIZE_PAIR_LIMIT, NUM_SHIPS};
use crate::placement::Placements;
use crate::ship::{PerShip, ShipKind};

/// Bit matrix holding every cross-kind pair, one block per (a, b) with a < b.
#[derive(Debug, Clone)]
struct PairMatrix {
    offsets: [[usize; NUM_SHIPS]; NUM_SHIPS],
    bits: Vec<u64>,
}

impl PairMatrix {
    fn build(masks: &PerShip<Vec<Mask>>) -> Self {
        let mut offsets = [[0usize; NUM_SHIPS]; NUM_SHIPS];
        let mut total = 0usize;
        for a in ShipKind::ALL {
            for b in ShipKind::ALL.into_iter().filter(|&b| b > a) {
                offsets[a.index()][b.index()] = total;
                total += masks[a].len() * masks[b].len();
            }
        }
        let mut bits = vec![0u64; total.div_ceil(64)];
        for a in ShipKind::ALL {
            for b in ShipKind::ALL.into_iter().filter(|&b| b > a) {
                let base = offsets[a.index()][b.index()];
                let width = masks[b].len();
                for (i, ma) in masks[a].iter().enumerate() {
                    for (j, mb) in masks[b].iter().enumerate() {
                        if ma.intersects(mb) {
                            let bit = base + i * width + j;
                            bits[bit / 64] |= 1u64 << (bit % 64);
                        }
                    }
                }
            }
        }
        PairMatrix { offsets, bits }
    }

    #[inline]
    fn get(&self, a: ShipKind, i: usize, b: ShipKind, j: usize, width: usize) -> bool {
        let bit = self.offsets[a.index()][b.index()] + i * width + j;
        self.bits[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Queryable overlap relation over one solve call's placements.
///
/// Immutable once built, so worker threads can share it by reference.
#[derive(Debug, Clone)]
pub struct ConflictIndex {
    masks: PerShip<Vec<Mask>>,
    matrix: Option<PairMatrix>,
}

impl ConflictIndex {
    pub fn build(placements: &Placements, strategy: ConflictStrategy) -> Self {
        let masks = PerShip::from_fn(|kind| {
            placements
                .of(kind)
                .iter()
                .map(|p| p.mask())
                .collect::<Vec<_>>()
        });
        let pairs = cross_pair_count(&masks);
        let materialize = match strategy {
            ConflictStrategy::Materialized => true,
            ConflictStrategy::Lazy => false,
            ConflictStrategy::Auto => pairs <= MATERIALIZE_PAIR_LIMIT,
        };
        log::debug!(
            "conflict index: {} placements, {} cross-kind pairs, {}",
            placements.total(),
            pairs,
            if materialize { "materialized" } else { "lazy" }
        );
        let matrix = materialize.then(|| PairMatrix::build(&masks));
        ConflictIndex { masks, matrix }
    }

    /// True when the relation is held as a precomputed bit matrix.
    pub fn is_materialized(&self) -> bool {
        self.matrix.is_some()
    }

    /// Whether placement `i` of kind `a` overlaps placement `j` of kind `b`.
    ///
    /// Same-kind pairs always report `false`.
    #[inline]
    pub fn conflicts(&self, a: ShipKind, i: usize, b: ShipKind, j: usize) -> bool {
        if a == b {
            return false;
        }
        let (a, i, b, j) = if a < b { (a, i, b, j) } else { (b, j, a, i) };
        match &self.matrix {
            Some(matrix) => matrix.get(a, i, b, j, self.masks[b].len()),
            None => self.masks[a][i].intersects(&self.masks[b][j]),
        }
    }

    /// True when no two entries of `picks` conflict.
    pub fn compatible(&self, picks: &[(ShipKind, usize)]) -> bool {
        picks.iter().enumerate().all(|(n, &(a, i))| {
            picks[n + 1..]
                .iter()
                .all(|&(b, j)| !self.conflicts(a, i, b, j))
        })
    }

    /// Mask of placement `i` of `kind`.
    #[inline]
    pub fn mask(&self, kind: ShipKind, i: usize) -> Mask {
        self.masks[kind][i]
    }

    /// Number of overlapping cross-kind pairs.
    pub fn incompatible_pairs(&self) -> usize {
        if let Some(matrix) = &self.matrix {
            return matrix.count_ones();
        }
        let mut n = 0;
        for a in ShipKind::ALL {
            for b in ShipKind::ALL.into_iter().filter(|&b| b > a) {
                for ma in &self.masks[a] {
                    n += self.masks[b].iter().filter(|mb| ma.intersects(mb)).count();
                }
            }
        }
        n
    }
}

fn cross_pair_count(masks: &PerShip<Vec<Mask>>) -> usize {
    let mut pairs = 0usize;
    for a in ShipKind::ALL {
        for b in ShipKind::ALL.into_iter().filter(|&b| b > a) {
            pairs = pairs.saturating_add(masks[a].len().saturating_mul(masks[b].len()));
        }
    }
    pairs
}
