//! Embedded image extraction.
//!
//! The deck export does not name its image field, so the payload is found
//! through a [`PayloadLocator`]. [`LongStringLocator`] implements the current
//! heuristic; a strict locator can replace it once the format is pinned down.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::{Map, Value};

use crate::deck::meta::Suit;
use crate::deck::png;

/// Standard alphabet, padding optional.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Finds the encoded image inside a raw entry.
pub trait PayloadLocator {
    fn locate<'a>(&self, entry: &'a Map<String, Value>) -> Option<&'a str>;
}

/// Picks the first string field, in document order, longer than `min_len`
/// characters. Labels and descriptions are short; images are not.
#[derive(Debug, Clone, Copy)]
pub struct LongStringLocator {
    pub min_len: usize,
}

impl LongStringLocator {
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }
}

impl PayloadLocator for LongStringLocator {
    fn locate<'a>(&self, entry: &'a Map<String, Value>) -> Option<&'a str> {
        entry.values().find_map(|value| match value {
            Value::String(s) if s.chars().count() > self.min_len => Some(s.as_str()),
            _ => None,
        })
    }
}

/// Uses one named field and nothing else.
#[derive(Debug, Clone)]
pub struct NamedFieldLocator {
    pub field: String,
}

impl PayloadLocator for NamedFieldLocator {
    fn locate<'a>(&self, entry: &'a Map<String, Value>) -> Option<&'a str> {
        entry.get(&self.field).and_then(Value::as_str)
    }
}

#[derive(Debug)]
pub enum ImageError {
    Decode(base64::DecodeError),
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(e) => write!(f, "base64 decode failed: {}", e),
            ImageError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Decode(e) => Some(e),
            ImageError::Write { source, .. } => Some(source),
        }
    }
}

/// What happened to an entry's image. Only `Written` produces a file.
#[derive(Debug)]
pub enum ImageStatus {
    Written {
        path: PathBuf,
        bytes: usize,
        /// Dimensions when the bytes pass PNG structure checks
        png: Result<png::PngInfo, png::PngError>,
    },
    Missing,
    Failed(ImageError),
}

impl ImageStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, ImageStatus::Written { .. })
    }
}

/// `minor_<suit>_<rank>.png`
pub fn image_file_name(suit: Suit, rank_index: u8) -> String {
    format!("minor_{}_{}.png", suit.id(), rank_index)
}

/// Strip an optional data URI prefix and decode the base64 payload.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let encoded = match payload.split_once(',') {
        Some((_, rest)) => rest,
        None => payload,
    };

    let encoded: Cow<'_, str> = if encoded.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(
            encoded
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect(),
        )
    } else {
        Cow::Borrowed(encoded)
    };

    PAYLOAD_ENGINE.decode(encoded.as_bytes())
}

/// Locate, decode and write one entry's image to `dest`, replacing any file
/// already there.
pub fn extract_image(
    entry: &Map<String, Value>,
    locator: &dyn PayloadLocator,
    dest: &Path,
) -> ImageStatus {
    let Some(payload) = locator.locate(entry) else {
        return ImageStatus::Missing;
    };

    let bytes = match decode_payload(payload) {
        Ok(bytes) => bytes,
        Err(e) => return ImageStatus::Failed(ImageError::Decode(e)),
    };

    if let Err(source) = fs::write(dest, &bytes) {
        return ImageStatus::Failed(ImageError::Write {
            path: dest.to_path_buf(),
            source,
        });
    }

    ImageStatus::Written {
        path: dest.to_path_buf(),
        bytes: bytes.len(),
        png: png::inspect(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::png::fixtures::build_png_with_padding;
    use base64::prelude::BASE64_STANDARD;
    use serde_json::json;
    use tempfile::TempDir;

    fn entry(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn locator_picks_first_long_string() {
        let first = "A".repeat(1001);
        let second = "B".repeat(5000);
        let map = entry(json!({
            "meta": "权杖 | 四",
            "description": "short",
            "count": 12,
            "img": first,
            "img2": second,
        }));

        let found = LongStringLocator::new(1000).locate(&map).unwrap();
        assert!(found.starts_with('A'));
    }

    #[test]
    fn locator_threshold_is_exclusive() {
        let map = entry(json!({"img": "A".repeat(1000)}));
        assert!(LongStringLocator::new(1000).locate(&map).is_none());
    }

    #[test]
    fn locator_counts_characters_not_bytes() {
        // 600 CJK characters are 1800 bytes but not a payload
        let map = entry(json!({"description": "星".repeat(600)}));
        assert!(LongStringLocator::new(1000).locate(&map).is_none());
    }

    #[test]
    fn named_locator_ignores_other_fields() {
        let map = entry(json!({"a": "A".repeat(2000), "image": "abc"}));
        let locator = NamedFieldLocator {
            field: "image".to_string(),
        };
        assert_eq!(locator.locate(&map), Some("abc"));
    }

    #[test]
    fn decode_strips_data_uri_prefix() {
        let encoded = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(b"hello"));
        assert_eq!(decode_payload(&encoded).unwrap(), b"hello");
    }

    #[test]
    fn decode_tolerates_whitespace_and_missing_padding() {
        assert_eq!(decode_payload("aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_payload("aGVsbG8").unwrap(), b"hello");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_payload("not*base64!").is_err());
    }

    #[test]
    fn file_name_is_canonical() {
        assert_eq!(image_file_name(Suit::Wands, 3), "minor_wands_3.png");
        assert_eq!(image_file_name(Suit::Pentacles, 13), "minor_pentacles_13.png");
    }

    #[test]
    fn extract_writes_decoded_bytes() {
        let dir = TempDir::new().unwrap();
        let png = build_png_with_padding(4000, true);
        let map = entry(json!({"meta": "x", "img": BASE64_STANDARD.encode(&png)}));
        let dest = dir.path().join("minor_wands_3.png");

        let status = extract_image(&map, &LongStringLocator::new(1000), &dest);
        match status {
            ImageStatus::Written {
                bytes, png: info, ..
            } => {
                assert_eq!(bytes, png.len());
                assert_eq!(info, Ok(png::PngInfo { width: 1, height: 1 }));
            }
            other => panic!("expected Written, got {other:?}"),
        }
        assert_eq!(fs::read(&dest).unwrap(), png);
    }

    #[test]
    fn extract_without_payload_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("minor_cups_0.png");
        let map = entry(json!({"meta": "圣杯 | 一", "description": "no image"}));

        let status = extract_image(&map, &LongStringLocator::new(1000), &dest);
        assert!(matches!(status, ImageStatus::Missing));
        assert!(!dest.exists());
    }

    #[test]
    fn extract_reports_decode_failure() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("minor_cups_0.png");
        let map = entry(json!({"img": "!".repeat(1500)}));

        let status = extract_image(&map, &LongStringLocator::new(1000), &dest);
        assert!(matches!(status, ImageStatus::Failed(ImageError::Decode(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn extract_reports_write_failure() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("missing-dir").join("minor_cups_0.png");
        let map = entry(json!({"img": BASE64_STANDARD.encode(vec![7u8; 1200])}));

        let status = extract_image(&map, &LongStringLocator::new(1000), &dest);
        match status {
            ImageStatus::Failed(ImageError::Write { path, .. }) => assert_eq!(path, dest),
            other => panic!("expected write failure, got {other:?}"),
        }
    }

    #[test]
    fn extract_keeps_non_png_bytes() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("minor_swords_1.png");
        let raw = vec![42u8; 1200];
        let map = entry(json!({"img": BASE64_STANDARD.encode(&raw)}));

        let status = extract_image(&map, &LongStringLocator::new(1000), &dest);
        assert!(matches!(
            status,
            ImageStatus::Written {
                png: Err(png::PngError::InvalidSignature),
                ..
            }
        ));
        assert_eq!(fs::read(&dest).unwrap(), raw);
    }
}
