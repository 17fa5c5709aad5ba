//! SpriteBake CLI - Command-line interface for combining scene sprites
//!
//! This binary bakes the sprites under a scene's combiner node into one
//! texture, toggles the source renderers, and validates scene documents.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use spritebake_cli::commands;

/// SpriteBake - Sprite Combining for 2D Scenes
#[derive(Parser)]
#[command(name = "spritebake")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine the scene's sprites into one texture
    Combine {
        /// Path to the scene document (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output root directory (default: the scene's directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Do not add the combined sprite to the scene
        #[arg(long)]
        no_scene_object: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Toggle the enabled flag of every renderer the combiner collects
    Toggle {
        /// Path to the scene document (JSON)
        #[arg(short, long)]
        scene: String,
    },

    /// Validate a scene document without reading textures
    Validate {
        /// Path to the scene document (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Combine {
            scene,
            out_root,
            no_scene_object,
            json,
        } => commands::combine::run(&scene, out_root.as_deref(), no_scene_object, json),
        Commands::Toggle { scene } => commands::toggle::run(&scene),
        Commands::Validate { scene, json } => commands::validate::run(&scene, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
