//! Probability-based targeting for the opponent board.
//!
//! A solve call enumerates placements for every hidden ship, builds the
//! conflict index, samples random overlap-free fleet layouts and reports how
//! often each unknown cell ended up under a ship. Nothing survives between
//! calls.

use rand::Rng;

use crate::aggregate::{aggregate, ProbabilityGrid};
use crate::board::BoardSnapshot;
use crate::common::SolveError;
use crate::config::SolverConfig;
use crate::conflict::ConflictIndex;
use crate::placement::Placements;
use crate::sampler::{self, SampleOutcome};
use crate::ship::{Fleet, PerShip};

/// Grid plus the bookkeeping behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub grid: ProbabilityGrid,
    pub cycles: usize,
    pub valid_samples: u64,
    pub placement_counts: PerShip<usize>,
}

/// Configured targeting engine. Cheap to copy; holds no state across solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    config: SolverConfig,
    fleet: Fleet,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            fleet: Fleet::full(),
        }
    }

    /// Restrict the solve to `fleet`, e.g. the ships not yet sunk.
    pub fn with_fleet(mut self, fleet: Fleet) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn fleet(&self) -> Fleet {
        self.fleet
    }

    /// Estimate per-cell ship probabilities from observed states only.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        board: &BoardSnapshot,
        rng: &mut R,
    ) -> Result<ProbabilityGrid, SolveError> {
        self.solve_report(board, rng).map(|report| report.grid)
    }

    pub fn solve_report<R: Rng + ?Sized>(
        &self,
        board: &BoardSnapshot,
        rng: &mut R,
    ) -> Result<SolveReport, SolveError> {
        let cycles = self.config.cycles;
        let placements = Placements::enumerate(board, self.fleet);
        sampler::check_placements(&placements)?;
        let conflicts = ConflictIndex::build(&placements, self.config.conflict_strategy);

        let outcome = self.run_sampler(board, &placements, &conflicts, rng)?;
        if outcome.valid_samples == 0 && cycles > 0 {
            log::warn!(
                "no consistent layout in {} cycles; returning an all-zero grid",
                cycles
            );
        } else {
            log::debug!(
                "accepted {}/{} cycles over {} placements",
                outcome.valid_samples,
                cycles,
                placements.total()
            );
        }

        let grid = aggregate(
            &placements,
            &outcome.frequencies,
            outcome.valid_samples,
            board,
        );
        Ok(SolveReport {
            grid,
            cycles,
            valid_samples: outcome.valid_samples,
            placement_counts: placements.counts(),
        })
    }

    #[cfg(feature = "std")]
    fn run_sampler<R: Rng + ?Sized>(
        &self,
        board: &BoardSnapshot,
        placements: &Placements,
        conflicts: &ConflictIndex,
        rng: &mut R,
    ) -> Result<SampleOutcome, SolveError> {
        let SolverConfig {
            cycles,
            workers,
            hit_policy,
            ..
        } = self.config;
        let workers = if workers == 0 {
            rayon::current_num_threads()
        } else {
            workers
        };
        if workers > 1 {
            sampler::sample_parallel(board, placements, conflicts, cycles, hit_policy, workers, rng)
        } else {
            sampler::sample(board, placements, conflicts, cycles, hit_policy, rng)
        }
    }

    #[cfg(not(feature = "std"))]
    fn run_sampler<R: Rng + ?Sized>(
        &self,
        board: &BoardSnapshot,
        placements: &Placements,
        conflicts: &ConflictIndex,
        rng: &mut R,
    ) -> Result<SampleOutcome, SolveError> {
        let SolverConfig {
            cycles, hit_policy, ..
        } = self.config;
        sampler::sample(board, placements, conflicts, cycles, hit_policy, rng)
    }
}

/// Solve for the full catalog with default settings and `cycles` samples.
pub fn solve<R: Rng + ?Sized>(
    board: &BoardSnapshot,
    cycles: usize,
    rng: &mut R,
) -> Result<ProbabilityGrid, SolveError> {
    Solver::new(SolverConfig::default().with_cycles(cycles)).solve(board, rng)
}
