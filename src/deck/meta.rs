//! Card label parsing.
//!
//! Scraped entries carry a bilingual label of the form `"<suit> | <rank>"`,
//! e.g. `"权杖 | 四"` or `"Cups | King"`. The lookup tables are immutable
//! statics exposed through [`DeckTables`] so callers can inject them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four Minor Arcana suits, serialized by their canonical identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    /// Identifier used in file names and the catalog.
    pub fn id(self) -> &'static str {
        match self {
            Suit::Wands => "wands",
            Suit::Cups => "cups",
            Suit::Swords => "swords",
            Suit::Pentacles => "pentacles",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Highest rank index (King).
pub const MAX_RANK: u8 = 13;

static SUIT_LABELS: [(&str, Suit); 8] = [
    ("权杖", Suit::Wands),
    ("圣杯", Suit::Cups),
    ("宝剑", Suit::Swords),
    ("星币", Suit::Pentacles),
    ("Wands", Suit::Wands),
    ("Cups", Suit::Cups),
    ("Swords", Suit::Swords),
    ("Pentacles", Suit::Pentacles),
];

static RANK_LABELS: [(&str, u8); 28] = [
    ("一", 0),
    ("Ace", 0),
    ("二", 1),
    ("Two", 1),
    ("三", 2),
    ("Three", 2),
    ("四", 3),
    ("Four", 3),
    ("五", 4),
    ("Five", 4),
    ("六", 5),
    ("Six", 5),
    ("七", 6),
    ("Seven", 6),
    ("八", 7),
    ("Eight", 7),
    ("九", 8),
    ("Nine", 8),
    ("十", 9),
    ("Ten", 9),
    ("侍从", 10),
    ("Page", 10),
    ("骑士", 11),
    ("Knight", 11),
    ("王后", 12),
    ("Queen", 12),
    ("国王", 13),
    ("King", 13),
];

static RANK_NAMES_EN: [&str; 14] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Page",
    "Knight", "Queen", "King",
];

static SUIT_NAMES_EN: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];

/// Lookup tables shared by the label parser and the record builder.
#[derive(Debug, Clone, Copy)]
pub struct DeckTables {
    suit_labels: &'static [(&'static str, Suit)],
    rank_labels: &'static [(&'static str, u8)],
    rank_names: &'static [&'static str; 14],
    suit_names: &'static [&'static str; 4],
}

impl DeckTables {
    /// Chinese and English labels as found in the deck export.
    pub fn bilingual() -> Self {
        Self {
            suit_labels: &SUIT_LABELS,
            rank_labels: &RANK_LABELS,
            rank_names: &RANK_NAMES_EN,
            suit_names: &SUIT_NAMES_EN,
        }
    }

    pub fn suit_for(&self, label: &str) -> Option<Suit> {
        self.suit_labels
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, suit)| *suit)
    }

    pub fn rank_for(&self, label: &str) -> Option<u8> {
        self.rank_labels
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, rank)| *rank)
    }

    /// English display name, e.g. "Four of Wands".
    pub fn english_name(&self, suit: Suit, rank_index: u8) -> Option<String> {
        let rank = self.rank_names.get(rank_index as usize)?;
        let suit = self.suit_names[suit.index()];
        Some(format!("{rank} of {suit}"))
    }
}

impl Default for DeckTables {
    fn default() -> Self {
        Self::bilingual()
    }
}

/// A successfully decoded label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMeta {
    pub suit: Suit,
    pub rank_index: u8,
    /// Rank segment as written in the label, trimmed
    pub rank_label: String,
}

/// Why a label did not decode to a Minor Arcana card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRejection {
    Empty,
    /// Splitting on `|` did not give exactly two segments
    Malformed { segments: usize },
    UnknownSuit(String),
    UnknownRank(String),
}

impl fmt::Display for LabelRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRejection::Empty => write!(f, "label is empty"),
            LabelRejection::Malformed { segments } => {
                write!(f, "expected '<suit> | <rank>', found {segments} segment(s)")
            }
            LabelRejection::UnknownSuit(suit) => write!(f, "unknown suit '{suit}'"),
            LabelRejection::UnknownRank(rank) => write!(f, "unknown rank '{rank}'"),
        }
    }
}

/// Parse a `"<suit> | <rank>"` label.
pub fn parse_label(label: &str, tables: &DeckTables) -> Result<ParsedMeta, LabelRejection> {
    if label.is_empty() {
        return Err(LabelRejection::Empty);
    }

    let parts: Vec<&str> = label.split('|').map(str::trim).collect();
    let [suit_label, rank_label] = parts.as_slice() else {
        return Err(LabelRejection::Malformed {
            segments: parts.len(),
        });
    };

    let suit = tables
        .suit_for(suit_label)
        .ok_or_else(|| LabelRejection::UnknownSuit(suit_label.to_string()))?;
    let rank_index = tables
        .rank_for(rank_label)
        .ok_or_else(|| LabelRejection::UnknownRank(rank_label.to_string()))?;

    Ok(ParsedMeta {
        suit,
        rank_index,
        rank_label: rank_label.to_string(),
    })
}
