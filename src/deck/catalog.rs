use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::deck::record::CardRecord;

#[derive(Debug)]
pub enum CatalogError {
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => {
                write!(f, "Catalog I/O failed for {}: {}", path.display(), source)
            }
            CatalogError::Serialize(e) => write!(f, "Failed to serialize catalog: {}", e),
            CatalogError::InvalidJson { path, source } => {
                write!(f, "Invalid catalog {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Serialize(e) => Some(e),
            CatalogError::InvalidJson { source, .. } => Some(source),
        }
    }
}

/// Sort `records` by id and replace the catalog at `path` with them.
///
/// The JSON goes to a temporary file next to `path` that is then persisted
/// over it, so readers never observe a partial catalog.
pub fn write_catalog(records: &mut [CardRecord], path: &Path) -> Result<(), CatalogError> {
    records.sort_by_key(|record| record.id);

    let io_err = |source: io::Error| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let mut contents = serde_json::to_string_pretty(records).map_err(CatalogError::Serialize)?;
    contents.push('\n');

    let mut temp_file = match parent {
        Some(dir) => NamedTempFile::new_in(dir),
        None => NamedTempFile::new_in("."),
    }
    .map_err(io_err)?;
    temp_file.write_all(contents.as_bytes()).map_err(io_err)?;
    temp_file.as_file_mut().sync_all().map_err(io_err)?;
    temp_file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

pub fn load_catalog(path: &Path) -> Result<Vec<CardRecord>, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
