use std::path::PathBuf;

use crate::core::config::data::Config;
use crate::core::constants::{
    DEFAULT_ASSET_ROOT, DEFAULT_CARD_BACK_EXPORT, DEFAULT_CARD_BACK_OUTPUT,
    DEFAULT_CARD_BACK_SOURCE, DEFAULT_CATALOG_FILE, DEFAULT_DESCRIPTION_FIELD, DEFAULT_FIRST_ID,
    DEFAULT_IMAGE_DIR, DEFAULT_INPUT_FILE, DEFAULT_LABEL_FIELD, DEFAULT_MAJORS_SOURCE_DIR,
    DEFAULT_PAYLOAD_MIN_LEN,
};

impl Config {
    pub fn input_file(&self) -> PathBuf {
        self.input_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FILE))
    }

    pub fn image_dir(&self) -> PathBuf {
        self.image_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR))
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.catalog_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
    }

    /// Asset root without a trailing slash, so `imgUrl` never doubles it.
    pub fn asset_root(&self) -> String {
        let root = self.asset_root.as_deref().unwrap_or(DEFAULT_ASSET_ROOT);
        let trimmed = root.trim_end_matches('/');
        if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }

    pub fn first_id(&self) -> u32 {
        self.first_id.unwrap_or(DEFAULT_FIRST_ID)
    }

    pub fn payload_min_len(&self) -> usize {
        self.payload_min_len.unwrap_or(DEFAULT_PAYLOAD_MIN_LEN)
    }

    pub fn label_field(&self) -> &str {
        self.label_field.as_deref().unwrap_or(DEFAULT_LABEL_FIELD)
    }

    pub fn description_field(&self) -> &str {
        self.description_field
            .as_deref()
            .unwrap_or(DEFAULT_DESCRIPTION_FIELD)
    }

    pub fn card_back_source(&self) -> PathBuf {
        self.card_back
            .source
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CARD_BACK_SOURCE))
    }

    pub fn card_back_output(&self) -> PathBuf {
        self.card_back
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CARD_BACK_OUTPUT))
    }

    pub fn card_back_export_name(&self) -> &str {
        self.card_back
            .export_name
            .as_deref()
            .unwrap_or(DEFAULT_CARD_BACK_EXPORT)
    }

    pub fn majors_source_dir(&self) -> PathBuf {
        self.majors
            .source_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAJORS_SOURCE_DIR))
    }

    pub fn majors_output_dir(&self) -> PathBuf {
        self.majors
            .output_dir
            .clone()
            .unwrap_or_else(|| self.image_dir())
    }
}
