use battleship_solver::{init_logging, play_out, AiPlayer, Ocean, Player, SolverConfig};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

const DEFAULT_GAMES: usize = 10;
const SIM_CYCLES: usize = 2_000;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [games]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: usize = match args.get(2) {
        Some(n) => n.parse()?,
        None => DEFAULT_GAMES,
    };

    let config = SolverConfig::default().with_cycles(SIM_CYCLES);
    let mut shots = Vec::with_capacity(games);
    let mut relaxed = 0;
    let mut blind = 0;
    for game in 0..games {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(game as u64));
        let mut ocean = Ocean::new();
        let mut ai = AiPlayer::new(config);
        ai.place_ships(&mut rng, &mut ocean)
            .map_err(|e| anyhow::anyhow!(e))?;
        let n = play_out(&mut ai, &mut ocean, &mut rng, 100, |_, _| {})?;
        let stats = ai.stats();
        log::info!(
            "game {}: {} shots, {} relaxed solves, {} blind shots",
            game,
            n,
            stats.relaxed,
            stats.blind
        );
        relaxed += stats.relaxed;
        blind += stats.blind;
        shots.push(n);
    }

    let mean = if shots.is_empty() {
        0.0
    } else {
        shots.iter().sum::<usize>() as f64 / shots.len() as f64
    };
    let result = json!({
        "seed": seed,
        "games": games,
        "cycles": SIM_CYCLES,
        "shots": shots,
        "mean_shots": mean,
        "min_shots": shots.iter().min(),
        "max_shots": shots.iter().max(),
        "relaxed_solves": relaxed,
        "blind_shots": blind,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
