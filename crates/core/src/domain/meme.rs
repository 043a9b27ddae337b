use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemeId(pub String);

impl fmt::Display for MemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog record as the upstream API delivers it. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeme {
    pub id: MemeId,
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// The fixed category set. Order is load-bearing: category assignment indexes
/// into [`Category::ALL`] by hash, so reordering the variants changes every
/// derived category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Animals,
    Celebrities,
    Gaming,
    School,
    Random,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Animals,
        Category::Celebrities,
        Category::Gaming,
        Category::School,
        Category::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Animals => "animals",
            Category::Celebrities => "celebrities",
            Category::Gaming => "gaming",
            Category::School => "school",
            Category::Random => "random",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}` (expected animals|celebrities|gaming|school|random)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "animals" => Ok(Category::Animals),
            "celebrities" => Ok(Category::Celebrities),
            "gaming" => Ok(Category::Gaming),
            "school" => Ok(Category::School),
            "random" => Ok(Category::Random),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// The attributes derived from an id. Rating is in 1..=5, price in whole
/// currency units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    pub rating: u8,
    pub category: Category,
    pub price: Decimal,
}

/// A raw record plus the attributes derived from its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMeme {
    pub id: MemeId,
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub rating: u8,
    pub category: Category,
    pub price: Decimal,
}

impl EnrichedMeme {
    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}
