use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::deck::image::image_file_name;
use crate::deck::meta::{DeckTables, ParsedMeta, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arcana {
    Major,
    Minor,
}

/// One catalog entry, serialized with the field names the web app reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "name_cn")]
    pub localized_name: String,
    pub suit: Suit,
    pub number: u8,
    #[serde(rename = "imgUrl")]
    pub image_url: String,
    pub description: String,
    pub arcana: Arcana,
}

/// Inputs shared by every record built in a run.
#[derive(Debug, Clone)]
pub struct RecordContext<'a> {
    pub tables: &'a DeckTables,
    /// URL prefix without trailing slash, e.g. `/tarot`
    pub asset_root: &'a str,
    pub description_field: &'a str,
}

/// `<asset_root>/minor_<suit>_<rank>.png`
pub fn image_url(asset_root: &str, suit: Suit, rank_index: u8) -> String {
    format!("{}/{}", asset_root, image_file_name(suit, rank_index))
}

/// Assemble the record for an entry whose label parsed as `meta`.
pub fn build_record(
    id: u32,
    label: &str,
    meta: &ParsedMeta,
    entry: &Map<String, Value>,
    ctx: &RecordContext<'_>,
) -> CardRecord {
    let name = ctx
        .tables
        .english_name(meta.suit, meta.rank_index)
        .unwrap_or_else(|| format!("{} {}", capitalize(meta.suit.id()), meta.rank_label));

    let description = entry
        .get(ctx.description_field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    CardRecord {
        id,
        name,
        localized_name: label.to_string(),
        suit: meta.suit,
        number: meta.rank_index,
        image_url: image_url(ctx.asset_root, meta.suit, meta.rank_index),
        description,
        arcana: Arcana::Minor,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
