//! The deck-normalization run: import, then per entry parse the label,
//! extract the image and build a record, then write the catalog once.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::config::data::Config;
use crate::deck::catalog::{write_catalog, CatalogError};
use crate::deck::image::{
    extract_image, image_file_name, ImageStatus, LongStringLocator, PayloadLocator,
};
use crate::deck::import::{json_kind, load_deck, EntrySource, ImportError};
use crate::deck::meta::{parse_label, DeckTables, LabelRejection};
use crate::deck::record::{build_record, CardRecord, RecordContext};

/// Everything a run needs, resolved from [`Config`] and CLI overrides.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input_file: PathBuf,
    pub image_dir: PathBuf,
    pub catalog_file: PathBuf,
    pub asset_root: String,
    pub first_id: u32,
    pub payload_min_len: usize,
    pub label_field: String,
    pub description_field: String,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_file: config.input_file(),
            image_dir: config.image_dir(),
            catalog_file: config.catalog_file(),
            asset_root: config.asset_root(),
            first_id: config.first_id(),
            payload_min_len: config.payload_min_len(),
            label_field: config.label_field().to_string(),
            description_field: config.description_field().to_string(),
        }
    }
}

/// Conditions that stop the run.
#[derive(Debug)]
pub enum PipelineError {
    Import(ImportError),
    ImageDir { path: PathBuf, source: io::Error },
    Catalog(CatalogError),
    /// A record needed an id past `u32::MAX`.
    IdOverflow { first_id: u32, assigned: usize },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Import(e) => write!(f, "{}", e),
            PipelineError::ImageDir { path, source } => write!(
                f,
                "Failed to create image directory {}: {}",
                path.display(),
                source
            ),
            PipelineError::Catalog(e) => write!(f, "{}", e),
            PipelineError::IdOverflow { first_id, assigned } => write!(
                f,
                "Ran out of card ids: {} record(s) numbered from {} reach u32::MAX",
                assigned, first_id
            ),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Import(e) => Some(e),
            PipelineError::ImageDir { source, .. } => Some(source),
            PipelineError::Catalog(e) => Some(e),
            PipelineError::IdOverflow { .. } => None,
        }
    }
}

impl From<ImportError> for PipelineError {
    fn from(e: ImportError) -> Self {
        PipelineError::Import(e)
    }
}

impl From<CatalogError> for PipelineError {
    fn from(e: CatalogError) -> Self {
        PipelineError::Catalog(e)
    }
}

/// Why an entry was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject(&'static str),
    MissingLabel,
    Label {
        label: String,
        rejection: LabelRejection,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject(kind) => write!(f, "entry is a {}, not an object", kind),
            SkipReason::MissingLabel => write!(f, "entry has no label"),
            SkipReason::Label { label, rejection } => write!(f, "'{}': {}", label, rejection),
        }
    }
}

/// Result of processing one raw entry.
#[derive(Debug)]
pub enum EntryOutcome {
    Built {
        record: CardRecord,
        image: ImageStatus,
    },
    Skipped {
        index: usize,
        reason: SkipReason,
    },
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct PipelineReport {
    pub source: EntrySource,
    pub entries_seen: usize,
    pub records: Vec<CardRecord>,
    pub skipped: Vec<(usize, SkipReason)>,
    pub images_written: usize,
    /// Labels of records whose image is missing or failed to write
    pub images_missing: Vec<String>,
    pub catalog_file: PathBuf,
}

/// Per-run state shared by every entry.
pub struct EntryProcessor<'a> {
    pub tables: &'a DeckTables,
    pub locator: &'a dyn PayloadLocator,
    pub options: &'a PipelineOptions,
}

impl EntryProcessor<'_> {
    /// Process the entry at `index`. `next_id` is only used when the entry
    /// yields a record.
    pub fn process(&self, index: usize, entry: &Value, next_id: u32) -> EntryOutcome {
        let Some(map) = entry.as_object() else {
            let kind = json_kind(entry);
            info!("Skipping item {} of type {}", index, kind);
            return EntryOutcome::Skipped {
                index,
                reason: SkipReason::NotAnObject(kind),
            };
        };

        let label = match map.get(&self.options.label_field).and_then(Value::as_str) {
            Some(label) if !label.is_empty() => label,
            _ => {
                warn!(
                    "Skipping item {}: no '{}' label",
                    index, self.options.label_field
                );
                return EntryOutcome::Skipped {
                    index,
                    reason: SkipReason::MissingLabel,
                };
            }
        };

        let meta = match parse_label(label, self.tables) {
            Ok(meta) => meta,
            Err(rejection) => {
                match &rejection {
                    LabelRejection::UnknownRank(rank) => warn!("Unknown rank {}", rank),
                    _ => debug!("Skipping '{}': {}", label, rejection),
                }
                return EntryOutcome::Skipped {
                    index,
                    reason: SkipReason::Label {
                        label: label.to_string(),
                        rejection,
                    },
                };
            }
        };

        let dest = self
            .options
            .image_dir
            .join(image_file_name(meta.suit, meta.rank_index));
        let image = extract_image(map, self.locator, &dest);
        match &image {
            ImageStatus::Written {
                path,
                png: Ok(info),
                ..
            } => debug!(
                "Wrote {} ({}x{})",
                path.display(),
                info.width,
                info.height
            ),
            ImageStatus::Written {
                path,
                png: Err(e),
                ..
            } => warn!(
                "Image for {} at {} is not a well-formed PNG: {}",
                label,
                path.display(),
                e
            ),
            ImageStatus::Missing => warn!("No image found for {}", label),
            ImageStatus::Failed(e) => warn!("Error saving image for {}: {}", label, e),
        }

        let ctx = RecordContext {
            tables: self.tables,
            asset_root: &self.options.asset_root,
            description_field: &self.options.description_field,
        };
        let record = build_record(next_id, label, &meta, map, &ctx);
        info!("Processed: {} ({})", record.name, label);

        EntryOutcome::Built { record, image }
    }
}

/// Run the whole pipeline with the default heuristic locator.
pub fn run(options: &PipelineOptions) -> Result<PipelineReport, PipelineError> {
    let locator = LongStringLocator::new(options.payload_min_len);
    run_with_locator(options, &DeckTables::bilingual(), &locator)
}

pub fn run_with_locator(
    options: &PipelineOptions,
    tables: &DeckTables,
    locator: &dyn PayloadLocator,
) -> Result<PipelineReport, PipelineError> {
    let deck = load_deck(&options.input_file)?;

    fs::create_dir_all(&options.image_dir).map_err(|source| PipelineError::ImageDir {
        path: options.image_dir.clone(),
        source,
    })?;

    let processor = EntryProcessor {
        tables,
        locator,
        options,
    };

    let mut report = PipelineReport {
        source: deck.source,
        entries_seen: deck.entries.len(),
        records: Vec::new(),
        skipped: Vec::new(),
        images_written: 0,
        images_missing: Vec::new(),
        catalog_file: options.catalog_file.clone(),
    };

    // `None` once u32::MAX has been handed out.
    let mut next_id = Some(options.first_id);
    for (index, entry) in deck.entries.iter().enumerate() {
        match processor.process(index, entry, next_id.unwrap_or(u32::MAX)) {
            EntryOutcome::Built { record, image } => {
                if next_id.is_none() {
                    return Err(PipelineError::IdOverflow {
                        first_id: options.first_id,
                        assigned: report.records.len(),
                    });
                }
                next_id = record.id.checked_add(1);
                if image.is_written() {
                    report.images_written += 1;
                } else {
                    report.images_missing.push(record.localized_name.clone());
                }
                report.records.push(record);
            }
            EntryOutcome::Skipped { index, reason } => report.skipped.push((index, reason)),
        }
    }

    info!(
        "Total Minor Arcana cards processed: {}",
        report.records.len()
    );

    write_catalog(&mut report.records, &options.catalog_file)?;
    info!("Saved data to {}", options.catalog_file.display());

    Ok(report)
}

