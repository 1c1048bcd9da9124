use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

/// Error type for loading the deck export. All variants abort the run.
#[derive(Debug)]
pub enum ImportError {
    /// Input file does not exist
    NotFound(PathBuf),
    /// Input file exists but could not be read
    Io { path: PathBuf, source: io::Error },
    /// Input is not valid JSON
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// No list of card entries could be located in the document
    NoEntries(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NotFound(path) => write!(f, "{} not found", path.display()),
            ImportError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ImportError::InvalidJson { path, source } => {
                write!(f, "Invalid JSON in {}: {}", path.display(), source)
            }
            ImportError::NoEntries(reason) => {
                write!(f, "No card entries found: {}", reason)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::InvalidJson { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Where the entry list was found inside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// The document itself is the list
    Document,
    /// The list sits under this key of a wrapper object
    Field(String),
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySource::Document => write!(f, "top-level array"),
            EntrySource::Field(key) => write!(f, "field '{}'", key),
        }
    }
}

/// Raw entries from a deck export, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDeck {
    pub entries: Vec<Value>,
    pub source: EntrySource,
}

/// Keys tried, in order, before falling back to the first array-valued field.
const WELL_KNOWN_KEYS: [&str; 2] = ["cards", "items"];

/// Read and parse the deck export at `path`.
pub fn load_deck<P: AsRef<Path>>(path: P) -> Result<ImportedDeck, ImportError> {
    let path = path.as_ref();
    info!("Reading {}...", path.display());

    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ImportError::NotFound(path.to_path_buf())
        } else {
            ImportError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let document: Value =
        serde_json::from_str(&contents).map_err(|source| ImportError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;

    let deck = locate_entries(document)?;
    info!(
        "Found {} items in {}. Processing...",
        deck.entries.len(),
        deck.source
    );
    Ok(deck)
}

/// Find the list of card entries inside an already-parsed document.
///
/// An array is used as-is. For an object, `cards` wins over `items`, which
/// wins over the first array-valued field in document order.
pub fn locate_entries(document: Value) -> Result<ImportedDeck, ImportError> {
    let mut map = match document {
        Value::Array(entries) => {
            return Ok(ImportedDeck {
                entries,
                source: EntrySource::Document,
            })
        }
        Value::Object(map) => map,
        other => {
            return Err(ImportError::NoEntries(format!(
                "document is a {}, expected an array or object",
                json_kind(&other)
            )))
        }
    };

    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    info!("Keys: {:?}", keys);

    let key = WELL_KNOWN_KEYS
        .iter()
        .find(|key| map.contains_key(**key))
        .map(|key| key.to_string())
        .or_else(|| {
            map.iter()
                .find(|(_, value)| value.is_array())
                .map(|(key, _)| key.clone())
        })
        .ok_or_else(|| ImportError::NoEntries("no array-valued field in document".to_string()))?;

    match map.remove(&key) {
        Some(Value::Array(entries)) => {
            info!("Found list in key '{}' with {} items. Using it.", key, entries.len());
            Ok(ImportedDeck {
                entries,
                source: EntrySource::Field(key),
            })
        }
        Some(other) => Err(ImportError::NoEntries(format!(
            "field '{}' is a {}, expected an array",
            key,
            json_kind(&other)
        ))),
        None => Err(ImportError::NoEntries(format!("field '{}' vanished", key))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
