use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maze_core::{GeneratedLevel, GenerationConfig, MapGenerator, Pos, TileKind, level_seed};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base seed of the first generation attempt
    #[arg(short, long, conflicts_with = "level")]
    seed: Option<u64>,
    /// Level number to generate (seeded with level * 1000); defaults to 1
    #[arg(short, long)]
    level: Option<u32>,
    /// TOML file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    max_attempts: Option<u32>,
    #[arg(long, value_enum, default_value_t = Format::Ascii)]
    format: Format,
}

#[derive(Serialize)]
struct LevelReport<'a> {
    fingerprint: String,
    level: &'a GeneratedLevel,
}

fn glyph(tile: TileKind) -> char {
    match tile {
        TileKind::Wall => '#',
        TileKind::Floor => '.',
        TileKind::Stone => 'o',
        TileKind::Hazard => 'x',
        TileKind::Coin => '$',
        TileKind::Exit => 'E',
    }
}

fn render_ascii(level: &GeneratedLevel) -> String {
    let (width, height) = (level.grid.width(), level.grid.height());
    let mut out = String::with_capacity((width + 1) * height);
    for y in 0..height {
        for x in 0..width {
            let pos = Pos { y: y as i32, x: x as i32 };
            out.push(if pos == level.start { 'S' } else { glyph(level.tile_at(pos)) });
        }
        out.push('\n');
    }
    out
}

fn build_config(args: &Args) -> Result<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let generator = MapGenerator::new(config).context("Invalid generation settings")?;

    let base_seed = args.seed.unwrap_or_else(|| level_seed(args.level.unwrap_or(1)));
    info!(base_seed, "generating level");
    let level = generator
        .generate(base_seed)
        .with_context(|| format!("Generation failed for base seed {base_seed}"))?;

    match args.format {
        Format::Ascii => {
            print!("{}", render_ascii(&level));
            println!("Seed: {} (attempts: {})", level.seed, level.attempts);
            println!("Exit distance: {} slides", level.exit_distance);
            println!("Fingerprint: {:016x}", level.fingerprint());
        }
        Format::Json => {
            let report =
                LevelReport { fingerprint: format!("{:016x}", level.fingerprint()), level: &level };
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize level to JSON")?;
            println!("{json}");
        }
    }

    Ok(())
}
