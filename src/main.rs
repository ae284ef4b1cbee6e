// main.rs - Command line front end for the labyrinth compiler

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use labyrinth_compiler::export::SceneExport;
use labyrinth_compiler::{generator, preview, Labyrinth, TextureCatalog};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compiles ASCII blueprints into 3D labyrinth geometry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a blueprint into blocks, meshes, and colliders
    Compile {
        /// Path to the blueprint map file
        map: PathBuf,

        /// Tint blocks by kind to spot misplaced geometry
        #[arg(long)]
        debug: bool,

        /// Write the full scene document to this JSON file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write per-story floor plan PNGs into this directory
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Floor plan pixels per world unit
        #[arg(long, default_value = "8")]
        scale: u32,
    },
    /// Generate a random blueprint and print or save it
    Generate {
        /// Maze width in tiles
        #[arg(long, default_value = "8")]
        width: usize,

        /// Maze depth in tiles
        #[arg(long, default_value = "8")]
        depth: usize,

        /// Seed for reproducible mazes
        #[arg(long)]
        seed: Option<u64>,

        /// Write the blueprint here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            map,
            debug,
            json,
            preview,
            scale,
        } => compile(map, debug, json, preview, scale),
        Commands::Generate {
            width,
            depth,
            seed,
            out,
        } => generate(width, depth, seed, out),
    }
}

fn compile(
    map: PathBuf,
    debug: bool,
    json: Option<PathBuf>,
    preview_dir: Option<PathBuf>,
    scale: u32,
) -> Result<()> {
    let labyrinth = Labyrinth::from_map_file(&map, debug)
        .with_context(|| format!("compiling '{}'", map.display()))?;

    info!(
        "{}: {} wall(s), {} window(s), {} pillar(s), {} floor(s)",
        map.display(),
        labyrinth.walls().count(),
        labyrinth.windows().count(),
        labyrinth.pillars().count(),
        labyrinth.floors().count(),
    );
    if let Some(start) = labyrinth.start_pos {
        info!("spawn at ({:.1}, {:.1}, {:.1})", start.x, start.y, start.z);
    }
    if let Some(finish) = labyrinth.finish_pos {
        info!("goal at ({:.1}, {:.1}, {:.1})", finish.x, finish.y, finish.z);
    }

    if let Some(path) = json {
        let export = SceneExport::from_labyrinth(&labyrinth, &TextureCatalog::with_defaults());
        export
            .write_json(&path)
            .with_context(|| format!("writing scene document '{}'", path.display()))?;
    }
    if let Some(dir) = preview_dir {
        preview::save_floor_plans(&labyrinth, &dir, scale).context("writing floor plans")?;
    }
    Ok(())
}

fn generate(width: usize, depth: usize, seed: Option<u64>, out: Option<PathBuf>) -> Result<()> {
    let text = generator::generate(width, depth, seed);
    match out {
        Some(path) => {
            std::fs::write(&path, &text)
                .with_context(|| format!("writing blueprint '{}'", path.display()))?;
            info!("wrote blueprint '{}'", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
