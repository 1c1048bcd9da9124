use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the `embed-card-back` command.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CardBackConfig {
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Name of the exported TypeScript constant
    pub export_name: Option<String>,
}

/// Settings for the `rename-majors` command.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MajorsConfig {
    pub source_dir: Option<PathBuf>,
    /// Defaults to the pipeline's image directory
    pub output_dir: Option<PathBuf>,
}

/// On-disk configuration. Every key is optional; accessors in `defaults.rs`
/// fill in the built-in values.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Scraped deck export to normalize
    pub input_file: Option<PathBuf>,
    /// Directory receiving `minor_<suit>_<rank>.png` files
    pub image_dir: Option<PathBuf>,
    /// Catalog JSON written at the end of a run
    pub catalog_file: Option<PathBuf>,
    /// URL prefix used in each record's `imgUrl`
    pub asset_root: Option<String>,
    pub first_id: Option<u32>,
    /// Minimum length (in characters) of a string treated as an image payload
    pub payload_min_len: Option<usize>,
    pub label_field: Option<String>,
    pub description_field: Option<String>,
    #[serde(default)]
    pub card_back: CardBackConfig,
    #[serde(default)]
    pub majors: MajorsConfig,
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
