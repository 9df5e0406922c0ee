//! DungeonForge command line
//!
//! Generates a dungeon floor plan and prints it as ASCII art or JSON.

mod render;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde_json::json;

use df_core::{GeneratorConfig, WallMode, generate_dungeon, showcase_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

/// Procedural tile-based dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeonforge")]
#[command(author, version, about = "Generate a connected dungeon floor plan", long_about = None)]
struct Args {
    /// Number of rooms to place
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<usize>,

    /// Random seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Smallest room side
    #[arg(long = "min-size")]
    min_size: Option<i32>,

    /// Largest room side
    #[arg(long = "max-size")]
    max_size: Option<i32>,

    /// Cap on shapes sampled for the session
    #[arg(long = "max-shapes")]
    max_shapes: Option<usize>,

    /// Leave L-shaped rooms out of the catalog
    #[arg(long = "no-l-shapes")]
    no_l_shapes: bool,

    /// Derive walls from floor adjacency instead of per-room outlines
    #[arg(long = "imputed-walls")]
    imputed_walls: bool,

    /// JSON configuration file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "ascii")]
    format: OutputFormat,

    /// Print the fixed demonstration layout instead of generating one
    #[arg(long = "showcase")]
    showcase: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(min) = self.min_size {
            config.min_room_size = min;
        }
        if let Some(max) = self.max_size {
            config.max_room_size = max;
        }
        if let Some(cap) = self.max_shapes {
            config.max_sampled_shapes = cap;
        }
        if self.no_l_shapes {
            config.include_l_shapes = false;
        }
        if self.imputed_walls {
            config.wall_mode = WallMode::Imputed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    if args.showcase {
        let layout = showcase_layout();
        match args.format {
            OutputFormat::Ascii => println!("{}", render::render_ascii(&layout)?),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
        }
        return Ok(());
    }

    let config = args.generator_config()?;
    let dungeon = generate_dungeon(config)?;
    let stats = &dungeon.stats;

    match args.format {
        OutputFormat::Ascii => {
            println!("{}", render::render_ascii(&dungeon.layout)?);
            println!();
            println!(
                "seed {} | {} rooms | {} doors | {} floor tiles | {} of {} shapes | {:?}",
                stats.seed,
                stats.room_count,
                stats.door_count,
                stats.floor_tiles,
                stats.sampled_shapes,
                stats.catalog_size,
                stats.total_time
            );
        }
        OutputFormat::Json => {
            let corners = dungeon.layout.corner_pillars()?;
            let output = json!({
                "stats": stats,
                "connections": dungeon.connections,
                "room_tiles": dungeon.layout.room_tiles(),
                "corridor_tiles": dungeon.layout.corridor_tiles(),
                "doors": dungeon.layout.doors(),
                "walls": dungeon.layout.walls(),
                "corners": corners,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
