//! Player trait and the solver-driven AI attacker.

use rand::Rng;

use crate::board::{BoardSnapshot, CellState, Mask};
use crate::common::{BoardError, GuessResult, SolveError};
use crate::config::{HitPolicy, SolverConfig};
use crate::ocean::Ocean;
use crate::placement::Placement;
use crate::ship::{Fleet, Orientation, ShipKind};
use crate::solver::Solver;

/// Interface implemented by different player types.
pub trait Player {
    /// Place all ships onto the provided ocean.
    fn place_ships<R: Rng + ?Sized>(&mut self, rng: &mut R, ocean: &mut Ocean)
        -> Result<(), BoardError>;

    /// Choose the next target given only what has been observed.
    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &BoardSnapshot,
    ) -> Result<(usize, usize), SolveError>;

    /// Inform the player of the result of its last guess.
    fn handle_guess_result(&mut self, _coord: (usize, usize), _result: GuessResult) {}
}

/// How an [`AiPlayer`] arrived at its targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AiStats {
    /// Solve calls made.
    pub solves: usize,
    /// Solves that found no layout covering the open hits and were retried
    /// with [`HitPolicy::Unchecked`].
    pub relaxed: usize,
    /// Targets taken from the first unknown cell because the relaxed solve
    /// accepted nothing either.
    pub blind: usize,
}

/// Attacker that fires at the most probable cell according to the solver.
///
/// Sunk ships are dropped from the solved fleet. The hits known to belong
/// to them are treated as blocked cells, so the remaining hits only need to
/// be covered by ships still afloat.
#[derive(Debug, Clone, Copy)]
pub struct AiPlayer {
    solver: Solver,
    hits: Mask,
    sunk: Fleet,
    sunk_cells: Mask,
    stats: AiStats,
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl AiPlayer {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: Solver::new(config),
            hits: Mask::new(),
            sunk: Fleet::empty(),
            sunk_cells: Mask::new(),
            stats: AiStats::default(),
        }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Kinds reported sunk so far.
    pub fn sunk(&self) -> Fleet {
        self.sunk
    }

    /// Hit cells attributed to sunk ships.
    pub fn sunk_cells(&self) -> Mask {
        self.sunk_cells
    }

    pub fn stats(&self) -> AiStats {
        self.stats
    }

    fn afloat(&self) -> Fleet {
        self.solver
            .fleet()
            .kinds()
            .filter(|&kind| !self.sunk.contains(kind))
            .fold(Fleet::empty(), Fleet::with)
    }

    /// `board` with the hits of sunk ships turned into blocked cells.
    fn working_board(&self, board: &BoardSnapshot) -> BoardSnapshot {
        let mut cells = *board.rows();
        for (r, c) in self.sunk_cells.iter_set_bits() {
            if cells[r][c] == CellState::Hit {
                cells[r][c] = CellState::Miss;
            }
        }
        BoardSnapshot::from_cells(cells)
    }

    /// Attribute the hull of a `kind` sunk at (`row`, `col`).
    ///
    /// Every placement through the sinking cell made only of open hits is a
    /// candidate; the cells shared by all candidates are certain.
    fn resolve_hull(&mut self, kind: ShipKind, row: usize, col: usize) {
        let open = self.hits & !self.sunk_cells;
        let mut hull = Mask::full();
        let mut candidates = 0;
        for orientation in Orientation::BOTH {
            for back in 0..kind.length() {
                let origin = match orientation {
                    Orientation::Horizontal => col.checked_sub(back).map(|c| (row, c)),
                    Orientation::Vertical => row.checked_sub(back).map(|r| (r, col)),
                };
                let Some((r, c)) = origin else {
                    continue;
                };
                let Ok(placement) = Placement::new(kind, r, c, orientation) else {
                    continue;
                };
                if open.contains_all(&placement.mask()) {
                    hull &= placement.mask();
                    candidates += 1;
                }
            }
        }
        if candidates > 0 {
            log::debug!(
                "{} sunk: {} candidate hulls, {} cells settled",
                kind,
                candidates,
                hull.count_ones()
            );
            self.sunk_cells |= hull;
        }
    }
}

impl Player for AiPlayer {
    fn place_ships<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ocean: &mut Ocean,
    ) -> Result<(), BoardError> {
        ocean.place_fleet_randomly(rng, Fleet::full())
    }

    fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &BoardSnapshot,
    ) -> Result<(usize, usize), SolveError> {
        let afloat = self.afloat();
        if afloat.is_empty() {
            return Err(SolveError::NoTargetLeft);
        }
        let working = self.working_board(board);
        let solver = self.solver.with_fleet(afloat);
        let config = *solver.config();

        self.stats.solves += 1;
        let mut report = solver.solve_report(&working, rng)?;
        if report.valid_samples == 0
            && report.cycles > 0
            && config.hit_policy == HitPolicy::RequireCoverage
        {
            self.stats.relaxed += 1;
            log::debug!("no layout covers the open hits; retrying without coverage");
            let relaxed = Solver::new(config.with_hit_policy(HitPolicy::Unchecked))
                .with_fleet(afloat);
            report = relaxed.solve_report(&working, rng)?;
        }
        if report.valid_samples == 0 {
            self.stats.blind += 1;
        }
        report
            .grid
            .best_unknown_target(board)
            .ok_or(SolveError::NoTargetLeft)
    }

    fn handle_guess_result(&mut self, (row, col): (usize, usize), result: GuessResult) {
        if !result.is_hit() || self.hits.set(row, col).is_err() {
            return;
        }
        if let GuessResult::Sink(kind) = result {
            self.sunk = self.sunk.with(kind);
            self.resolve_hull(kind, row, col);
        }
    }
}

/// Errors that end a simulated game early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    Board(BoardError),
    Solve(SolveError),
    /// The attacker used up `max_shots` without sinking the fleet.
    ShotLimit(usize),
}

impl From<BoardError> for PlayError {
    fn from(err: BoardError) -> Self {
        PlayError::Board(err)
    }
}

impl From<SolveError> for PlayError {
    fn from(err: SolveError) -> Self {
        PlayError::Solve(err)
    }
}

impl core::fmt::Display for PlayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PlayError::Board(e) => write!(f, "board error: {}", e),
            PlayError::Solve(e) => write!(f, "solver error: {}", e),
            PlayError::ShotLimit(n) => write!(f, "fleet still afloat after {} shots", n),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayError {}

/// Let `player` fire at `ocean` until every ship is sunk.
///
/// `on_shot` sees each target and its result. Returns the number of shots.
pub fn play_out<P, R, F>(
    player: &mut P,
    ocean: &mut Ocean,
    rng: &mut R,
    max_shots: usize,
    mut on_shot: F,
) -> Result<usize, PlayError>
where
    P: Player,
    R: Rng + ?Sized,
    F: FnMut((usize, usize), GuessResult),
{
    let mut shots = 0;
    while !ocean.all_sunk() {
        if shots >= max_shots {
            return Err(PlayError::ShotLimit(shots));
        }
        let target = player.select_target(rng, &ocean.snapshot())?;
        let result = ocean.guess(target.0, target.1)?;
        player.handle_guess_result(target, result);
        on_shot(target, result);
        shots += 1;
    }
    Ok(shots)
}
