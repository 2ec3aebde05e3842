//! Monte Carlo sampling over placement combinations.
//!
//! Each cycle draws one placement per fleet kind, rejects the draw when any
//! two picks overlap (or, under [`HitPolicy::RequireCoverage`], when a known
//! hit is left uncovered) and otherwise counts every pick once.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::board::{BoardSnapshot, Mask};
use crate::common::SolveError;
use crate::config::{HitPolicy, NUM_SHIPS};
use crate::conflict::ConflictIndex;
use crate::placement::Placements;
use crate::ship::{PerShip, ShipKind};

/// Per-placement counts of accepted cycles, aligned with [`Placements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: PerShip<Vec<u64>>,
}

impl FrequencyTable {
    /// All-zero table shaped like `placements`.
    pub fn new(placements: &Placements) -> Self {
        FrequencyTable {
            counts: PerShip::from_fn(|kind| vec![0; placements.of(kind).len()]),
        }
    }

    /// Count for placement `i` of `kind`.
    pub fn get(&self, kind: ShipKind, i: usize) -> u64 {
        self.counts[kind].get(i).copied().unwrap_or(0)
    }

    pub fn of(&self, kind: ShipKind) -> &[u64] {
        &self.counts[kind]
    }

    /// Sum of all counts for `kind`.
    pub fn total(&self, kind: ShipKind) -> u64 {
        self.counts[kind].iter().sum()
    }

    #[inline]
    fn bump(&mut self, kind: ShipKind, i: usize) {
        self.counts[kind][i] += 1;
    }

    /// Add another table of the same shape into this one.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for kind in ShipKind::ALL {
            for (mine, theirs) in self.counts[kind].iter_mut().zip(&other.counts[kind]) {
                *mine += *theirs;
            }
        }
    }
}

/// Accumulated result of a batch of cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOutcome {
    pub frequencies: FrequencyTable,
    /// Cycles that passed every check.
    pub valid_samples: u64,
}

impl SampleOutcome {
    fn empty(placements: &Placements) -> Self {
        SampleOutcome {
            frequencies: FrequencyTable::new(placements),
            valid_samples: 0,
        }
    }

    /// Fold a partial result from another worker into this one.
    pub fn merge(&mut self, other: &SampleOutcome) {
        self.frequencies.merge(&other.frequencies);
        self.valid_samples += other.valid_samples;
    }
}

/// Fails when the fleet is empty or any fleet kind has no candidate.
pub fn check_placements(placements: &Placements) -> Result<(), SolveError> {
    if placements.fleet().is_empty() {
        return Err(SolveError::EmptyFleet);
    }
    match placements.first_empty() {
        Some(kind) => Err(SolveError::NoValidPlacement(kind)),
        None => Ok(()),
    }
}

/// Run `cycles` Monte Carlo cycles on the calling thread.
pub fn sample<R: Rng + ?Sized>(
    board: &BoardSnapshot,
    placements: &Placements,
    conflicts: &ConflictIndex,
    cycles: usize,
    policy: HitPolicy,
    rng: &mut R,
) -> Result<SampleOutcome, SolveError> {
    check_placements(placements)?;

    let mut kinds = [ShipKind::Destroyer; NUM_SHIPS];
    let mut n = 0;
    for kind in placements.fleet().kinds() {
        kinds[n] = kind;
        n += 1;
    }
    let kinds = &kinds[..n];
    let hits = board.hits();

    let mut outcome = SampleOutcome::empty(placements);
    let mut picks = [(ShipKind::Destroyer, 0usize); NUM_SHIPS];
    for _ in 0..cycles {
        for (slot, &kind) in picks.iter_mut().zip(kinds) {
            *slot = (kind, rng.random_range(0..placements.of(kind).len()));
        }
        let picks = &picks[..n];

        if !conflicts.compatible(picks) {
            continue;
        }
        if policy == HitPolicy::RequireCoverage && !hits.is_empty() {
            let covered = picks
                .iter()
                .fold(Mask::new(), |acc, &(kind, i)| acc | conflicts.mask(kind, i));
            if !covered.contains_all(&hits) {
                continue;
            }
        }

        for &(kind, i) in picks {
            outcome.frequencies.bump(kind, i);
        }
        outcome.valid_samples += 1;
    }

    log::trace!("sampled {} cycles, {} accepted", cycles, outcome.valid_samples);
    Ok(outcome)
}

/// Split `cycles` across `workers` rayon tasks and sum their tables.
///
/// Every worker gets its own `SmallRng` seeded from `rng` up front, and
/// worker `w` always runs the same share of the budget, so the result depends
/// only on the seed and the worker count, never on scheduling.
#[cfg(feature = "std")]
pub fn sample_parallel<R: Rng + ?Sized>(
    board: &BoardSnapshot,
    placements: &Placements,
    conflicts: &ConflictIndex,
    cycles: usize,
    policy: HitPolicy,
    workers: usize,
    rng: &mut R,
) -> Result<SampleOutcome, SolveError> {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rayon::prelude::*;

    check_placements(placements)?;
    let workers = workers.clamp(1, cycles.max(1));
    let share = cycles / workers;
    let extra = cycles % workers;
    let rngs: Vec<SmallRng> = (0..workers)
        .map(|_| SmallRng::seed_from_u64(rng.random()))
        .collect();

    let partials = rngs
        .into_par_iter()
        .enumerate()
        .map(|(w, mut worker_rng)| {
            let budget = share + usize::from(w < extra);
            sample(board, placements, conflicts, budget, policy, &mut worker_rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut outcome = SampleOutcome::empty(placements);
    for partial in &partials {
        outcome.merge(partial);
    }
    Ok(outcome)
}
