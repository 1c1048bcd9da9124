//! Shared constants used across the application

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "tarot-assets.toml";

pub const DEFAULT_INPUT_FILE: &str = "deck_project.json";
pub const DEFAULT_IMAGE_DIR: &str = "public/tarot";
pub const DEFAULT_CATALOG_FILE: &str = "src/data/minorArcana.json";

/// URL prefix under which the web app serves card images.
pub const DEFAULT_ASSET_ROOT: &str = "/tarot";

/// Ids 0..=21 belong to the Major Arcana catalog maintained by hand.
pub const DEFAULT_FIRST_ID: u32 = 22;

/// Strings longer than this are treated as embedded image payloads.
pub const DEFAULT_PAYLOAD_MIN_LEN: usize = 1000;

pub const DEFAULT_LABEL_FIELD: &str = "meta";
pub const DEFAULT_DESCRIPTION_FIELD: &str = "description";

pub const DEFAULT_CARD_BACK_SOURCE: &str = "public/card-back.png";
pub const DEFAULT_CARD_BACK_OUTPUT: &str = "src/assets/cardBack.ts";
pub const DEFAULT_CARD_BACK_EXPORT: &str = "CARD_BACK_IMAGE";

pub const DEFAULT_MAJORS_SOURCE_DIR: &str = "assets/images";

/// A complete Minor Arcana: four suits of fourteen ranks.
pub const MINOR_ARCANA_COUNT: usize = 56;
