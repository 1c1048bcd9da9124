//! tarot-assets is the asset pipeline behind the tarot web app.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`deck`] owns the deck-normalization pipeline: importing a scraped deck
//!   export, parsing card labels, extracting embedded images, and writing the
//!   Minor Arcana catalog.
//! - [`assets`] holds the smaller asset chores (card-back embedding and Major
//!   Arcana renaming).
//! - [`core`] provides configuration loading and shared defaults.
//! - [`utils`] wires up console logging.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which parses
//! arguments, loads configuration, and dispatches to the subcommands.

pub mod assets;
pub mod cli;
pub mod core;
pub mod deck;
pub mod utils;
