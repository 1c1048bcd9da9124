pub mod catalog;
pub mod image;
pub mod import;
pub mod meta;
pub mod pipeline;
pub mod png;
pub mod record;
pub mod verify;

#[cfg(test)]
mod tests_integration;

pub use meta::{DeckTables, ParsedMeta, Suit};
pub use pipeline::{run, PipelineOptions, PipelineReport};
pub use record::CardRecord;
