use std::collections::{BTreeSet, VecDeque};
use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use maze_core::{
    Direction, GeneratedLevel, GenerationConfig, MapGenerator, Pos, Session, SlideOutcome,
    TileKind, reachable_from,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First base seed of the sweep
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive base seeds to generate and check
    #[arg(short, long, default_value_t = 200)]
    count: u64,
    /// Random slides to play in a session after the sweep
    #[arg(short, long, default_value_t = 1000)]
    moves: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn open_region_count(level: &GeneratedLevel) -> usize {
    let mut seen: BTreeSet<Pos> = BTreeSet::new();
    let mut regions = 0;
    for origin in level.grid.positions().filter(|&pos| level.tile_at(pos).is_open()) {
        if !seen.insert(origin) {
            continue;
        }
        regions += 1;
        let mut queue = VecDeque::from([origin]);
        while let Some(pos) = queue.pop_front() {
            for next in Direction::ALL.map(|direction| pos.step(direction)) {
                if level.tile_at(next).is_open() && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    regions
}

fn check_level(level: &GeneratedLevel, min_exit_distance: u32) -> Result<()> {
    let reach = reachable_from(&level.grid, level.start);
    let Some(distance) = reach.distance(level.exit) else {
        bail!("Invariant failed: exit unreachable on seed {}", level.seed);
    };
    if distance < min_exit_distance || distance != level.exit_distance {
        bail!("Invariant failed: exit distance {distance} on seed {}", level.seed);
    }
    if let Some(item) = level.item
        && !reach.contains(item)
    {
        bail!("Invariant failed: coin unreachable on seed {}", level.seed);
    }
    let border_breach = level
        .grid
        .positions()
        .any(|pos| level.grid.is_border(pos) && level.tile_at(pos) != TileKind::Wall);
    if border_breach {
        bail!("Invariant failed: open border tile on seed {}", level.seed);
    }
    let regions = open_region_count(level);
    if regions != 1 {
        bail!("Invariant failed: {regions} separate open regions on seed {}", level.seed);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = GenerationConfig::default();
    let generator = MapGenerator::new(config.clone())?;

    println!("Sweeping {} seeds starting at {}...", args.count, args.seed);
    let mut exhausted = 0_u64;
    let mut retried = 0_u64;
    for offset in 0..args.count {
        let base_seed = args.seed.wrapping_add(offset);
        match generator.generate(base_seed) {
            Ok(level) => {
                check_level(&level, config.min_exit_distance)?;
                if level.attempts > 1 {
                    retried += 1;
                }
            }
            Err(err) => {
                warn!(%err, "seed exhausted its attempts");
                exhausted += 1;
            }
        }
    }
    println!("Sweep done: {retried} needed retries, {exhausted} exhausted.");

    let mut session = Session::start(generator)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (mut completed, mut deaths, mut game_overs) = (0_u32, 0_u32, 0_u32);
    for _ in 0..args.moves {
        match session.slide(choose(&mut rng, &Direction::ALL))? {
            SlideOutcome::LevelCompleted { .. } => {
                completed += 1;
                check_level(session.current(), config.min_exit_distance)?;
            }
            SlideOutcome::Died { .. } => deaths += 1,
            SlideOutcome::GameOver => game_overs += 1,
            SlideOutcome::Moved { .. } | SlideOutcome::Blocked => {}
        }

        let tile = session.tile_at(session.player());
        if !tile.is_open() {
            bail!("Invariant failed: player standing on {tile:?}");
        }
    }
    info!(completed, deaths, game_overs, level = session.level(), "session finished");

    println!("Fuzzing completed successfully.");
    Ok(())
}
