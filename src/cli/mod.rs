//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod process;
pub mod verify;


use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::assets::card_back::embed_card_back;
use crate::assets::majors::rename_majors;
use crate::cli::process::run_process;
use crate::cli::verify::run_verify;
use crate::core::config::data::Config;
use crate::utils::logging::init_logging;

#[derive(Parser)]
#[command(name = "tarot-assets")]
#[command(about = "Asset pipeline for the tarot web app")]
#[command(
    long_about = "tarot-assets turns a scraped deck export into the Minor Arcana catalog \
(src/data/minorArcana.json) plus one canonical image per card (public/tarot/minor_<suit>_<rank>.png).\n\n\
Configuration:\n\
  Settings are read from tarot-assets.toml in the working directory, or from the file\n\
  given with --config. Command flags override the file.\n\n\
Environment Variables:\n\
  RUST_LOG          Override the log filter (e.g. RUST_LOG=debug)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file (defaults to ./tarot-assets.toml when present)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Also append diagnostics to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Normalize the deck export into the catalog and card images (default)
    Process {
        /// Deck export to read
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Directory for extracted card images
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,
        /// Catalog file to write
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
    /// Embed the card-back image as a TypeScript data URI module
    EmbedCardBack {
        /// Image to embed
        #[arg(short, long, value_name = "FILE")]
        source: Option<PathBuf>,
        /// TypeScript module to write
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Copy exported Major Arcana images to major_<n>.png
    RenameMajors {
        /// Directory holding the exported images
        #[arg(short, long, value_name = "DIR")]
        source_dir: Option<PathBuf>,
        /// Directory receiving the renamed copies
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Check that a catalog holds a complete, canonical Minor Arcana
    Verify {
        /// Catalog file to check
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
        /// Directory the card images should exist in
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,
        /// Do not check that image files exist
        #[arg(long)]
        skip_images: bool,
        /// Also check that major_0.png through major_<N-1>.png exist
        #[arg(long, value_name = "N")]
        majors: Option<u32>,
    },
    /// Print the effective configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose, args.log.as_deref())?;
    let mut config = Config::load(args.config.as_deref())?;

    let command = args.command.unwrap_or(Commands::Process {
        input: None,
        image_dir: None,
        catalog: None,
    });

    match command {
        Commands::Process {
            input,
            image_dir,
            catalog,
        } => {
            apply_overrides(&mut config, input, image_dir, catalog);
            run_process(&config)
        }
        Commands::EmbedCardBack { source, output } => {
            let source = source.unwrap_or_else(|| config.card_back_source());
            let output = output.unwrap_or_else(|| config.card_back_output());
            let summary = embed_card_back(&source, &output, config.card_back_export_name())?;
            println!(
                "✅ Embedded {} ({} bytes) into {}",
                source.display(),
                summary.source_bytes,
                summary.output.display()
            );
            Ok(())
        }
        Commands::RenameMajors {
            source_dir,
            output_dir,
        } => {
            let source_dir = source_dir.unwrap_or_else(|| config.majors_source_dir());
            let output_dir = output_dir.unwrap_or_else(|| config.majors_output_dir());
            let summary = rename_majors(&source_dir, &output_dir)?;
            println!(
                "✅ Copied {} Major Arcana images to {} ({} skipped)",
                summary.copied.len(),
                output_dir.display(),
                summary.skipped.len()
            );
            Ok(())
        }
        Commands::Verify {
            catalog,
            image_dir,
            skip_images,
            majors,
        } => {
            apply_overrides(&mut config, None, image_dir, catalog);
            run_verify(&config, !skip_images, majors)
        }
        Commands::Config => {
            config.print_all();
            Ok(())
        }
    }
}

/// Command-line paths win over the config file.
pub(crate) fn apply_overrides(
    config: &mut Config,
    input: Option<PathBuf>,
    image_dir: Option<PathBuf>,
    catalog: Option<PathBuf>,
) {
    if input.is_some() {
        config.input_file = input;
    }
    if image_dir.is_some() {
        config.image_dir = image_dir;
    }
    if catalog.is_some() {
        config.catalog_file = catalog;
    }
}
