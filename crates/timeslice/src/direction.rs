//! Sort direction.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Which way time runs through a sorted collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    /// Oldest first.
    #[default]
    #[strum(serialize = "ascending", serialize = "asc", serialize = "oldest")]
    Ascending,
    /// Newest first.
    #[strum(serialize = "descending", serialize = "desc", serialize = "newest")]
    Descending,
}

impl SortDirection {
    /// Parse from string (case-insensitive).
    ///
    /// Supports aliases: "asc"/"oldest" -> Ascending, "desc"/"newest" -> Descending.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
