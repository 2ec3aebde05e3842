//! Board geometry constants and solver tuning knobs.

use crate::common::SolveError;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Sampling budget used when the caller does not pick one.
pub const DEFAULT_CYCLES: usize = 10_000;

/// Attempts made by random fleet placement before giving up on a ship.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Largest number of cross-kind placement pairs for which
/// [`ConflictStrategy::Auto`] stores the full relation as a bit matrix
/// (2^22 bits = 512 KiB).
pub const MATERIALIZE_PAIR_LIMIT: usize = 1 << 22;

/// What the sampler does with cycles whose placements leave a known hit
/// uncovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum HitPolicy {
    /// Reject the cycle unless every hit cell is covered by one of the
    /// selected placements.
    #[default]
    RequireCoverage,
    /// Accept every overlap-free cycle regardless of where the hits are.
    Unchecked,
}

/// How the conflict index answers overlap queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum ConflictStrategy {
    /// Materialize while the pair count stays under [`MATERIALIZE_PAIR_LIMIT`].
    #[default]
    Auto,
    /// Precompute every cross-kind pair into a bit matrix.
    Materialized,
    /// Test placement masks at query time.
    Lazy,
}

/// Tunables for one solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Monte Carlo cycles to run.
    pub cycles: usize,
    /// Sampling workers. `0` uses every available thread, `1` stays on the
    /// calling thread.
    pub workers: usize,
    pub hit_policy: HitPolicy,
    pub conflict_strategy: ConflictStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            workers: 1,
            hit_policy: HitPolicy::default(),
            conflict_strategy: ConflictStrategy::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_cycles(mut self, cycles: impl Into<Cycles>) -> Self {
        self.cycles = cycles.into().get();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.hit_policy = hit_policy;
        self
    }

    pub fn with_conflict_strategy(mut self, conflict_strategy: ConflictStrategy) -> Self {
        self.conflict_strategy = conflict_strategy;
        self
    }
}

/// A non-negative sampling budget.
///
/// Signed input (CLI arguments, JSON) goes through `TryFrom<i64>`, which
/// rejects negative counts before any sampling starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cycles(usize);

impl Cycles {
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for Cycles {
    fn from(n: usize) -> Self {
        Cycles(n)
    }
}

impl TryFrom<i64> for Cycles {
    type Error = SolveError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        usize::try_from(n)
            .map(Cycles)
            .map_err(|_| SolveError::InvalidCycles(n))
    }
}
