//! Die denominations.
//!
//! The narrative dice system uses seven die kinds, each identified by a
//! one-letter tag. Hosts may register die classes with other tags; those are
//! carried as [`DieDenomination::Other`] so nothing is lost on the way through.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, DiceResult};

/// A die kind, used as a lookup key for ledgers and result tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DieDenomination {
    /// Positive ability die (d8, tag `a`).
    Ability,
    /// Positive boost die (d6, tag `b`).
    Boost,
    /// Positive proficiency die (d12, tag `p`).
    Proficiency,
    /// Negative difficulty die (d8, tag `d`).
    Difficulty,
    /// Negative challenge die (d12, tag `c`).
    Challenge,
    /// Negative setback die (d6, tag `s`).
    Setback,
    /// Force die (d12, tag `f`).
    Force,
    /// A tag the narrative system does not define.
    Other(String),
}

impl DieDenomination {
    /// The seven standard denominations, positive dice first.
    pub const STANDARD: [DieDenomination; 7] = [
        Self::Ability,
        Self::Boost,
        Self::Proficiency,
        Self::Difficulty,
        Self::Challenge,
        Self::Setback,
        Self::Force,
    ];

    /// Map a tag to a denomination. Unknown tags become [`Self::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "a" => Self::Ability,
            "b" => Self::Boost,
            "p" => Self::Proficiency,
            "d" => Self::Difficulty,
            "c" => Self::Challenge,
            "s" => Self::Setback,
            "f" => Self::Force,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag of this denomination.
    pub fn tag(&self) -> &str {
        match self {
            Self::Ability => "a",
            Self::Boost => "b",
            Self::Proficiency => "p",
            Self::Difficulty => "d",
            Self::Challenge => "c",
            Self::Setback => "s",
            Self::Force => "f",
            Self::Other(tag) => tag,
        }
    }

    /// True if the tag carries no information (an absent denomination).
    pub fn is_empty(&self) -> bool {
        self.tag().is_empty()
    }

    /// Number of faces on the physical die, if this is a standard kind.
    pub fn standard_faces(&self) -> Option<u32> {
        match self {
            Self::Boost | Self::Setback => Some(6),
            Self::Ability | Self::Difficulty => Some(8),
            Self::Proficiency | Self::Challenge | Self::Force => Some(12),
            Self::Other(_) => None,
        }
    }

    /// Parse a pool item such as `2b`, `s`, or `3p` into a count and a
    /// standard denomination.
    pub fn parse_pool_item(item: &str) -> DiceResult<(u32, Self)> {
        let item = item.trim().to_lowercase();
        let split = item
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| DiceError::InvalidPoolItem(item.clone()))?;
        let (count, tag) = item.split_at(split);
        let count = if count.is_empty() {
            1
        } else {
            count
                .parse::<u32>()
                .map_err(|_| DiceError::InvalidPoolItem(item.clone()))?
        };
        let denom = Self::from_tag(tag);
        if count == 0 || matches!(denom, Self::Other(_)) {
            return Err(DiceError::InvalidPoolItem(item.clone()));
        }
        Ok((count, denom))
    }
}

impl From<String> for DieDenomination {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<&str> for DieDenomination {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<DieDenomination> for String {
    fn from(denom: DieDenomination) -> Self {
        denom.tag().to_string()
    }
}

impl FromStr for DieDenomination {
    type Err = DiceError;

    fn from_str(s: &str) -> DiceResult<Self> {
        let denom = Self::from_tag(s);
        if denom.is_empty() {
            Err(DiceError::EmptyDenomination)
        } else {
            Ok(denom)
        }
    }
}

impl std::fmt::Display for DieDenomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
