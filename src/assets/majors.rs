use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

#[derive(Debug)]
pub enum RenameError {
    SourceNotFound(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for RenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameError::SourceNotFound(path) => {
                write!(f, "Source directory {} not found", path.display())
            }
            RenameError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RenameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenameError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameSummary {
    /// (original file name, new file name)
    pub copied: Vec<(String, String)>,
    pub skipped: Vec<String>,
}

/// Target name for an exported Major Arcana image.
///
/// Exports are numbered from 1 (`"1_0._愚者.png"` is The Fool), so the
/// canonical index is one less. Returns `None` for names without a leading
/// `<digits>_` prefix, non-PNG files, and the out-of-range number 0.
pub fn major_file_name(file_name: &str) -> Option<String> {
    if !file_name.ends_with(".png") {
        return None;
    }
    let digits_end = file_name
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 || !file_name[digits_end..].starts_with('_') {
        return None;
    }
    let number: u32 = file_name[..digits_end].parse().ok()?;
    let index = number.checked_sub(1)?;
    Some(major_image_name(index))
}

/// `major_<index>.png`
pub fn major_image_name(index: u32) -> String {
    format!("major_{}.png", index)
}

/// Copy every recognizable export in `source_dir` into `output_dir` under
/// its canonical `major_<n>.png` name. Files are visited in name order.
pub fn rename_majors(source_dir: &Path, output_dir: &Path) -> Result<RenameSummary, RenameError> {
    if !source_dir.is_dir() {
        return Err(RenameError::SourceNotFound(source_dir.to_path_buf()));
    }
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| RenameError::Io { path, source }
    };

    fs::create_dir_all(output_dir).map_err(io_err(output_dir))?;

    let mut names = Vec::new();
    for entry in fs::read_dir(source_dir).map_err(io_err(source_dir))? {
        let entry = entry.map_err(io_err(source_dir))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    info!("Found {} files in {}", names.len(), source_dir.display());

    let mut summary = RenameSummary::default();
    for name in names {
        if !name.ends_with(".png") {
            continue;
        }
        match major_file_name(&name) {
            Some(new_name) => {
                let dest = output_dir.join(&new_name);
                fs::copy(source_dir.join(&name), &dest).map_err(io_err(&dest))?;
                info!("Copied {} to {}", name, new_name);
                summary.copied.push((name, new_name));
            }
            None => {
                info!("Skipping {}, no match", name);
                summary.skipped.push(name);
            }
        }
    }

    Ok(summary)
}
