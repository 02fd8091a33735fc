//! Stat-market classification for player props.
//!
//! Each supported stat carries the league-average constants the matchup
//! stage falls back to when opponent data is missing.

use serde::{Deserialize, Serialize};

/// Stat categories a prop market can be written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Points,
    Rebounds,
    Assists,
    ThreePointers,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Points => "points",
            StatType::Rebounds => "rebounds",
            StatType::Assists => "assists",
            StatType::ThreePointers => "three_pointers",
        }
    }

    /// League-average team-allowed value per game for this stat.
    pub fn league_average_allowed(&self) -> f64 {
        match self {
            StatType::Points => 112.5,
            StatType::Rebounds => 43.5,
            StatType::Assists => 26.5,
            StatType::ThreePointers => 12.8,
        }
    }
}
