use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::assets::majors::major_image_name;
use crate::core::constants::MINOR_ARCANA_COUNT;
use crate::deck::image::image_file_name;
use crate::deck::meta::{Suit, MAX_RANK};
use crate::deck::record::{image_url, Arcana, CardRecord};

/// A single inconsistency found in a generated catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProblem {
    WrongCount { expected: usize, found: usize },
    IdOutOfSequence { position: usize, expected: u64, found: u32 },
    NotMinor { id: u32 },
    RankOutOfRange { id: u32, number: u8 },
    Duplicate { suit: Suit, number: u8, ids: Vec<u32> },
    MissingCard { suit: Suit, number: u8 },
    NonCanonicalUrl { id: u32, expected: String, found: String },
    MissingImage { id: u32, file: String },
    MissingMajorImage { index: u32, file: String },
}

impl fmt::Display for CatalogProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogProblem::WrongCount { expected, found } => {
                write!(f, "expected {} cards, found {}", expected, found)
            }
            CatalogProblem::IdOutOfSequence {
                position,
                expected,
                found,
            } => write!(
                f,
                "record {} has id {}, expected {}",
                position, found, expected
            ),
            CatalogProblem::NotMinor { id } => write!(f, "card {} is not Minor Arcana", id),
            CatalogProblem::RankOutOfRange { id, number } => {
                write!(f, "card {} has number {} (max {})", id, number, MAX_RANK)
            }
            CatalogProblem::Duplicate { suit, number, ids } => {
                write!(f, "{} {} appears {} times (ids {:?})", suit, number, ids.len(), ids)
            }
            CatalogProblem::MissingCard { suit, number } => {
                write!(f, "{} {} is missing", suit, number)
            }
            CatalogProblem::NonCanonicalUrl {
                id,
                expected,
                found,
            } => write!(f, "card {} has imgUrl {}, expected {}", id, found, expected),
            CatalogProblem::MissingImage { id, file } => {
                write!(f, "card {} image {} does not exist", id, file)
            }
            CatalogProblem::MissingMajorImage { index, file } => {
                write!(f, "major arcana {} image {} does not exist", index, file)
            }
        }
    }
}

/// Check that `records` form one complete, canonical Minor Arcana.
///
/// When `image_dir` is given, every card's image file must exist there.
pub fn verify_catalog(
    records: &[CardRecord],
    first_id: u32,
    asset_root: &str,
    image_dir: Option<&Path>,
) -> Vec<CatalogProblem> {
    let mut problems = Vec::new();

    if records.len() != MINOR_ARCANA_COUNT {
        problems.push(CatalogProblem::WrongCount {
            expected: MINOR_ARCANA_COUNT,
            found: records.len(),
        });
    }

    let mut seen: BTreeMap<(Suit, u8), Vec<u32>> = BTreeMap::new();
    for (position, record) in records.iter().enumerate() {
        let expected = u64::from(first_id) + position as u64;
        if u64::from(record.id) != expected {
            problems.push(CatalogProblem::IdOutOfSequence {
                position,
                expected,
                found: record.id,
            });
        }
        if record.arcana != Arcana::Minor {
            problems.push(CatalogProblem::NotMinor { id: record.id });
        }
        if record.number > MAX_RANK {
            problems.push(CatalogProblem::RankOutOfRange {
                id: record.id,
                number: record.number,
            });
            continue;
        }

        let canonical = image_url(asset_root, record.suit, record.number);
        if record.image_url != canonical {
            problems.push(CatalogProblem::NonCanonicalUrl {
                id: record.id,
                expected: canonical,
                found: record.image_url.clone(),
            });
        }

        if let Some(dir) = image_dir {
            let file = image_file_name(record.suit, record.number);
            if !dir.join(&file).is_file() {
                problems.push(CatalogProblem::MissingImage {
                    id: record.id,
                    file,
                });
            }
        }

        seen.entry((record.suit, record.number))
            .or_default()
            .push(record.id);
    }

    for suit in Suit::ALL {
        for number in 0..=MAX_RANK {
            match seen.get(&(suit, number)) {
                None => problems.push(CatalogProblem::MissingCard { suit, number }),
                Some(ids) if ids.len() > 1 => problems.push(CatalogProblem::Duplicate {
                    suit,
                    number,
                    ids: ids.clone(),
                }),
                Some(_) => {}
            }
        }
    }

    problems
}

/// Check that `major_0.png` through `major_<count-1>.png` exist in `image_dir`.
pub fn verify_major_images(image_dir: &Path, count: u32) -> Vec<CatalogProblem> {
    (0..count)
        .filter_map(|index| {
            let file = major_image_name(index);
            (!image_dir.join(&file).is_file())
                .then_some(CatalogProblem::MissingMajorImage { index, file })
        })
        .collect()
}
