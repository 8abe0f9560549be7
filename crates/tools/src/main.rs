mod seed;
mod settings;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use delve_core::floorgen::format_fingerprint;
use delve_core::{
    CommandLayoutSource, FileLayoutSource, FloorConfig, GenerationRequest, LayoutSource,
    MemoryStore, NO_PREVIOUS, Snapshot, SnapshotPayload, assemble_floor, parse_layout,
    start_game,
};
use log::info;
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use seed::{generate_runtime_seed, resolve_seed};
use settings::{DEFAULT_API_KEY_ENV, ToolSettings};

#[derive(Parser)]
#[command(author, version, about = "Assemble dungeon floors from generator output", long_about = None)]
struct Cli {
    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble one floor
    Assemble(RunArgs),
    /// Start a new game: a level-one floor, the starting weapon, and the player
    NewGame(RunArgs),
    /// Summarize a saved snapshot and check its fingerprint
    Inspect { path: PathBuf },
}

#[derive(Args)]
struct RunArgs {
    /// Saved generator output to assemble
    #[arg(short, long, conflicts_with = "generator")]
    layout: Option<PathBuf>,
    /// Generator program to run instead of reading a file
    #[arg(short, long)]
    generator: Option<String>,
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    difficulty: Option<String>,
    #[arg(long)]
    level: Option<u32>,
    /// Theme of the floor being left, passed to the generator
    #[arg(long)]
    previous_theme: Option<String>,
    /// Story of the floor being left, passed to the generator
    #[arg(long)]
    previous_story: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    /// Write the snapshot JSON here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RunArgs {
    fn floor_config(&self, settings: &ToolSettings) -> FloorConfig {
        let mut config = settings.floor_config();
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(difficulty) = &self.difficulty {
            config.difficulty = difficulty.clone();
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        config
    }

    /// A follow-up request as soon as either previous-floor field is given.
    fn generation_request(&self, config: &FloorConfig) -> GenerationRequest {
        if self.previous_theme.is_none() && self.previous_story.is_none() {
            return GenerationRequest::first_floor(config);
        }
        GenerationRequest::after(
            config,
            self.previous_theme.as_deref().unwrap_or(NO_PREVIOUS),
            self.previous_story.as_deref().unwrap_or(NO_PREVIOUS),
        )
    }
}

#[derive(Clone, Copy)]
enum RunMode {
    Floor,
    NewGame,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => ToolSettings::load(path)?,
        None => ToolSettings::default(),
    };

    match &cli.command {
        Command::Assemble(args) => run(&settings, args, RunMode::Floor),
        Command::NewGame(args) => run(&settings, args, RunMode::NewGame),
        Command::Inspect { path } => inspect(path),
    }
}

fn run(settings: &ToolSettings, args: &RunArgs, mode: RunMode) -> Result<()> {
    let config = args.floor_config(settings);
    let seed = resolve_seed(args.seed, settings.seed, generate_runtime_seed());
    info!("using seed {} ({})", seed.value(), seed.origin());

    let request = args.generation_request(&config);
    let mut source = layout_source(settings, args)?;
    let raw = source.fetch(&request).context("failed to fetch generator output")?;
    let layout = parse_layout(&raw).context("generator output does not match the floor contract")?;

    let mut store = MemoryStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed.value());
    let payload = match mode {
        RunMode::Floor => SnapshotPayload::Floor(
            assemble_floor(&layout, &config, &mut store, &mut rng)
                .context("floor assembly failed")?,
        ),
        RunMode::NewGame => SnapshotPayload::Game(
            start_game(&layout, &config, &mut store, &mut rng)
                .context("could not start a new game")?,
        ),
    };

    let snapshot = Snapshot::new(seed.value(), config, payload);
    print_summary(&snapshot);

    if let Some(path) = args.output.as_ref().or(settings.output.as_ref()) {
        snapshot
            .write_atomic(path)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        println!("Snapshot written to {}", path.display());
    }
    Ok(())
}

fn layout_source(settings: &ToolSettings, args: &RunArgs) -> Result<Box<dyn LayoutSource>> {
    if let Some(path) = &args.layout {
        return Ok(Box::new(FileLayoutSource::new(path.clone())));
    }
    if let Some(program) = &args.generator {
        let source = CommandLayoutSource::new(program.clone())
            .with_api_key(env::var(DEFAULT_API_KEY_ENV).ok());
        return Ok(Box::new(source));
    }
    if let Some(generator) = &settings.generator {
        let source = CommandLayoutSource::new(generator.program.clone())
            .with_leading_args(generator.args.clone())
            .with_api_key(env::var(&generator.api_key_env).ok());
        return Ok(Box::new(source));
    }
    bail!("no layout source: pass --layout or --generator, or add [generator] to the config file")
}

fn inspect(path: &Path) -> Result<()> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    print_summary(&snapshot);
    if !snapshot.fingerprint_matches() {
        bail!(
            "fingerprint mismatch: file says {}, floor hashes to {}",
            snapshot.fingerprint_hex,
            format_fingerprint(snapshot.payload.floor().fingerprint())
        );
    }
    println!("Fingerprint OK.");
    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    let floor = snapshot.payload.floor();
    println!(
        "Floor {} ({}, {} level {}), seed {}",
        floor.id.0,
        floor.theme,
        snapshot.config.difficulty,
        snapshot.config.level,
        snapshot.seed
    );
    println!("Rooms: {}  Enemies: {}", floor.rooms.len(), floor.enemy_count());
    for (index, room) in floor.rooms.iter().enumerate() {
        println!(
            "  room{} at ({}, {}): {:?}, {} enemies, chest: {}, links: {}",
            index + 1,
            room.grid_pos.x,
            room.grid_pos.y,
            room.room_type,
            room.enemies.len(),
            if room.chest.is_some() { "yes" } else { "no" },
            room.neighbors.count()
        );
    }
    if let SnapshotPayload::Game(game) = &snapshot.payload {
        println!(
            "Player: {} hp at ({}, {}) in room1",
            game.player.current_health, game.player.pos.x, game.player.pos.y
        );
    }
    println!("Fingerprint: {}", snapshot.fingerprint_hex);
}
