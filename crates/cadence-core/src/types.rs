use serde::Deserialize;

use crate::error::CoreError;

/// Ordering applied to a materialized occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceOrder {
    /// Sorted by displayed start time.
    #[default]
    Chronological,
    /// Event input order, generation order within each event.
    Storage,
}

impl OccurrenceOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chronological => "chronological",
            Self::Storage => "storage",
        }
    }
}

impl std::fmt::Display for OccurrenceOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OccurrenceOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chronological" => Ok(Self::Chronological),
            "storage" => Ok(Self::Storage),
            other => Err(CoreError::InvalidInput(format!(
                "unknown occurrence order: {other}"
            ))),
        }
    }
}
