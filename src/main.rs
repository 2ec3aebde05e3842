use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use battleship_solver::{
    init_logging, play_out, AiPlayer, BoardSnapshot, ConflictStrategy, Cycles, Fleet, GuessResult,
    HitPolicy, Ocean, Player, ShipKind, Solver, SolverConfig, DEFAULT_CYCLES,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    /// Reject samples that leave a known hit uncovered.
    Require,
    /// Accept every overlap-free sample.
    Unchecked,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConflictArg {
    Auto,
    Materialized,
    Lazy,
}

#[derive(Args, Clone, Debug)]
struct SolverArgs {
    #[arg(long, default_value_t = DEFAULT_CYCLES as i64, allow_negative_numbers = true)]
    cycles: i64,
    #[arg(long, default_value_t = 1, help = "Sampling threads (0 = all cores)")]
    workers: usize,
    #[arg(long, value_enum, default_value_t = PolicyArg::Require)]
    policy: PolicyArg,
    #[arg(long, value_enum, default_value_t = ConflictArg::Auto)]
    conflicts: ConflictArg,
    #[arg(long, help = "Fix RNG seed for reproducible output (e.g., --seed 12345)")]
    seed: Option<u64>,
}

impl SolverArgs {
    fn config(&self) -> anyhow::Result<SolverConfig> {
        let cycles = Cycles::try_from(self.cycles)?;
        let hit_policy = match self.policy {
            PolicyArg::Require => HitPolicy::RequireCoverage,
            PolicyArg::Unchecked => HitPolicy::Unchecked,
        };
        let conflict_strategy = match self.conflicts {
            ConflictArg::Auto => ConflictStrategy::Auto,
            ConflictArg::Materialized => ConflictStrategy::Materialized,
            ConflictArg::Lazy => ConflictStrategy::Lazy,
        };
        Ok(SolverConfig::default()
            .with_cycles(cycles)
            .with_workers(self.workers)
            .with_hit_policy(hit_policy)
            .with_conflict_strategy(conflict_strategy))
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the probability grid and next strike for a board.
    Solve {
        #[arg(help = "Board file: 10 rows of '.', 'O' (miss), 'X' (hit); stdin if omitted")]
        board: Option<PathBuf>,
        #[arg(long, value_delimiter = ',', help = "Ships still hidden, e.g. --fleet carrier,destroyer")]
        fleet: Vec<String>,
        #[arg(long, help = "Emit JSON instead of a table")]
        json: bool,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Watch the AI hunt down a randomly placed fleet.
    Play {
        #[arg(long, default_value_t = 100)]
        max_shots: usize,
        #[command(flatten)]
        solver: SolverArgs,
    },
}

fn read_board(path: Option<&PathBuf>) -> anyhow::Result<BoardSnapshot> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("reading board from {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading board from stdin")?;
            buf
        }
    };
    text.parse::<BoardSnapshot>()
        .map_err(|e| anyhow::anyhow!("invalid board: {}", e))
}

fn parse_fleet(names: &[String]) -> anyhow::Result<Fleet> {
    if names.is_empty() {
        return Ok(Fleet::full());
    }
    let mut fleet = Fleet::empty();
    for name in names {
        let kind: ShipKind = name
            .parse()
            .map_err(|e| anyhow::anyhow!("{}: {}", name, e))?;
        fleet = fleet.with(kind);
    }
    Ok(fleet)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            board,
            fleet,
            json,
            solver,
        } => {
            let snapshot = read_board(board.as_ref())?;
            let engine = Solver::new(solver.config()?).with_fleet(parse_fleet(&fleet)?);
            let mut rng = solver.rng();
            let report = engine.solve_report(&snapshot, &mut rng)?;
            let target = report.grid.best_unknown_target(&snapshot);

            if json {
                let out = serde_json::json!({
                    "grid": report.grid,
                    "target": target.map(|(row, col)| serde_json::json!({ "row": row, "col": col })),
                    "cycles": report.cycles,
                    "valid_samples": report.valid_samples,
                });
                println!("{}", serde_json::to_string(&out)?);
            } else {
                println!("{}\n", snapshot);
                println!("Probability distribution:");
                println!("{}\n", report.grid);
                print!(
                    "Accepted {} of {} samples. ",
                    report.valid_samples, report.cycles
                );
                match target {
                    Some((r, c)) => println!("Next strike: {}{}", (b'A' + r as u8) as char, c + 1),
                    None => println!("No unknown cell left to strike."),
                }
            }
        }
        Commands::Play { max_shots, solver } => {
            let mut rng = solver.rng();
            let mut ocean = Ocean::new();
            let mut ai = AiPlayer::new(solver.config()?);
            ai.place_ships(&mut rng, &mut ocean)
                .map_err(|e| anyhow::anyhow!(e))?;

            let shots = play_out(&mut ai, &mut ocean, &mut rng, max_shots, |(r, c), res| {
                let label = format!("{}{}", (b'A' + r as u8) as char, c + 1);
                match res {
                    GuessResult::Hit => println!("{:>4}  hit", label),
                    GuessResult::Miss => println!("{:>4}  miss", label),
                    GuessResult::Sink(kind) => println!("{:>4}  sank the {}", label, kind),
                }
            })?;
            println!("\n{}\n", ocean.snapshot());
            println!("Fleet sunk in {} shots.", shots);
        }
    }
    Ok(())
}
