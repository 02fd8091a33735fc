//! League-wide defensive and pace aggregates.
//!
//! This module provides:
//! - Static per-team defensive/pace profiles for all 30 NBA teams
//! - League-average fallback constants for unknown teams
//! - Lookup helpers (case-insensitive by team code)

use crate::models::StatType;

/// League-average possessions per 48 minutes.
pub const LEAGUE_AVG_PACE: f64 = 99.5;

/// League-average defensive rating (points allowed per 100 possessions).
pub const LEAGUE_AVG_DEF_RATING: f64 = 113.0;

/// Defensive and pace profile for a single team.
#[derive(Debug, Clone, Copy)]
pub struct TeamDefenseStats {
    /// Team code (e.g., "BOS")
    pub team_code: &'static str,
    pub points_allowed: f64,
    pub rebounds_allowed: f64,
    pub assists_allowed: f64,
    pub threes_allowed: f64,
    pub defensive_rating: f64,
    pub pace: f64,
}

impl TeamDefenseStats {
    /// Allowed value per game for the given stat.
    pub fn allowed(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Points => self.points_allowed,
            StatType::Rebounds => self.rebounds_allowed,
            StatType::Assists => self.assists_allowed,
            StatType::ThreePointers => self.threes_allowed,
        }
    }

    /// League-average profile used when a team is unknown.
    pub fn league_average() -> Self {
        Self {
            team_code: "LEAGUE",
            points_allowed: StatType::Points.league_average_allowed(),
            rebounds_allowed: StatType::Rebounds.league_average_allowed(),
            assists_allowed: StatType::Assists.league_average_allowed(),
            threes_allowed: StatType::ThreePointers.league_average_allowed(),
            defensive_rating: LEAGUE_AVG_DEF_RATING,
            pace: LEAGUE_AVG_PACE,
        }
    }
}

/// Static defensive profiles for all 30 NBA teams.
pub static TEAM_DEFENSE: &[TeamDefenseStats] = &[
    TeamDefenseStats { team_code: "ATL", points_allowed: 118.5, rebounds_allowed: 44.8, assists_allowed: 27.9, threes_allowed: 13.6, defensive_rating: 117.1, pace: 102.1 },
    TeamDefenseStats { team_code: "BOS", points_allowed: 107.2, rebounds_allowed: 42.1, assists_allowed: 24.6, threes_allowed: 11.8, defensive_rating: 107.4, pace: 98.2 },
    TeamDefenseStats { team_code: "BKN", points_allowed: 112.8, rebounds_allowed: 43.9, assists_allowed: 26.8, threes_allowed: 13.0, defensive_rating: 113.5, pace: 98.9 },
    TeamDefenseStats { team_code: "CHA", points_allowed: 116.9, rebounds_allowed: 45.2, assists_allowed: 27.5, threes_allowed: 13.9, defensive_rating: 116.4, pace: 100.6 },
    TeamDefenseStats { team_code: "CHI", points_allowed: 113.4, rebounds_allowed: 43.6, assists_allowed: 26.9, threes_allowed: 13.1, defensive_rating: 113.1, pace: 99.3 },
    TeamDefenseStats { team_code: "CLE", points_allowed: 110.1, rebounds_allowed: 42.7, assists_allowed: 25.4, threes_allowed: 12.2, defensive_rating: 110.0, pace: 96.8 },
    TeamDefenseStats { team_code: "DAL", points_allowed: 112.3, rebounds_allowed: 43.1, assists_allowed: 26.3, threes_allowed: 12.7, defensive_rating: 112.6, pace: 98.4 },
    TeamDefenseStats { team_code: "DEN", points_allowed: 111.9, rebounds_allowed: 43.0, assists_allowed: 26.1, threes_allowed: 12.5, defensive_rating: 112.2, pace: 98.0 },
    TeamDefenseStats { team_code: "DET", points_allowed: 117.8, rebounds_allowed: 45.0, assists_allowed: 28.1, threes_allowed: 13.8, defensive_rating: 116.9, pace: 101.4 },
    TeamDefenseStats { team_code: "GSW", points_allowed: 113.8, rebounds_allowed: 44.1, assists_allowed: 27.2, threes_allowed: 13.2, defensive_rating: 112.9, pace: 101.8 },
    TeamDefenseStats { team_code: "HOU", points_allowed: 109.8, rebounds_allowed: 42.5, assists_allowed: 25.2, threes_allowed: 12.1, defensive_rating: 109.7, pace: 99.9 },
    TeamDefenseStats { team_code: "IND", points_allowed: 117.2, rebounds_allowed: 44.6, assists_allowed: 27.8, threes_allowed: 13.5, defensive_rating: 115.8, pace: 103.2 },
    TeamDefenseStats { team_code: "LAC", points_allowed: 110.6, rebounds_allowed: 42.8, assists_allowed: 25.6, threes_allowed: 12.3, defensive_rating: 110.8, pace: 97.6 },
    TeamDefenseStats { team_code: "LAL", points_allowed: 113.9, rebounds_allowed: 44.0, assists_allowed: 26.7, threes_allowed: 13.0, defensive_rating: 113.6, pace: 100.3 },
    TeamDefenseStats { team_code: "MEM", points_allowed: 114.6, rebounds_allowed: 44.3, assists_allowed: 27.0, threes_allowed: 13.2, defensive_rating: 113.8, pace: 102.8 },
    TeamDefenseStats { team_code: "MIA", points_allowed: 110.3, rebounds_allowed: 42.6, assists_allowed: 25.3, threes_allowed: 12.2, defensive_rating: 110.5, pace: 96.5 },
    TeamDefenseStats { team_code: "MIL", points_allowed: 114.2, rebounds_allowed: 44.2, assists_allowed: 26.8, threes_allowed: 13.1, defensive_rating: 113.7, pace: 100.9 },
    TeamDefenseStats { team_code: "MIN", points_allowed: 108.4, rebounds_allowed: 42.3, assists_allowed: 24.9, threes_allowed: 11.9, defensive_rating: 108.2, pace: 97.9 },
    TeamDefenseStats { team_code: "NOP", points_allowed: 115.7, rebounds_allowed: 44.5, assists_allowed: 27.4, threes_allowed: 13.4, defensive_rating: 114.9, pace: 100.1 },
    TeamDefenseStats { team_code: "NYK", points_allowed: 111.2, rebounds_allowed: 42.9, assists_allowed: 25.8, threes_allowed: 12.4, defensive_rating: 111.3, pace: 97.2 },
    TeamDefenseStats { team_code: "OKC", points_allowed: 106.9, rebounds_allowed: 41.9, assists_allowed: 24.4, threes_allowed: 11.7, defensive_rating: 106.8, pace: 99.6 },
    TeamDefenseStats { team_code: "ORL", points_allowed: 108.9, rebounds_allowed: 42.4, assists_allowed: 25.0, threes_allowed: 12.0, defensive_rating: 109.1, pace: 96.2 },
    TeamDefenseStats { team_code: "PHI", points_allowed: 112.1, rebounds_allowed: 43.2, assists_allowed: 26.2, threes_allowed: 12.6, defensive_rating: 112.4, pace: 98.6 },
    TeamDefenseStats { team_code: "PHX", points_allowed: 114.9, rebounds_allowed: 44.4, assists_allowed: 27.1, threes_allowed: 13.3, defensive_rating: 114.3, pace: 99.8 },
    TeamDefenseStats { team_code: "POR", points_allowed: 116.3, rebounds_allowed: 44.7, assists_allowed: 27.6, threes_allowed: 13.5, defensive_rating: 115.5, pace: 100.8 },
    TeamDefenseStats { team_code: "SAC", points_allowed: 115.3, rebounds_allowed: 44.4, assists_allowed: 27.3, threes_allowed: 13.3, defensive_rating: 114.6, pace: 101.2 },
    TeamDefenseStats { team_code: "SAS", points_allowed: 116.6, rebounds_allowed: 44.9, assists_allowed: 27.7, threes_allowed: 13.6, defensive_rating: 115.9, pace: 101.7 },
    TeamDefenseStats { team_code: "TOR", points_allowed: 114.4, rebounds_allowed: 44.1, assists_allowed: 27.0, threes_allowed: 13.1, defensive_rating: 114.0, pace: 99.2 },
    TeamDefenseStats { team_code: "UTA", points_allowed: 118.1, rebounds_allowed: 45.1, assists_allowed: 28.0, threes_allowed: 13.7, defensive_rating: 116.7, pace: 101.0 },
    TeamDefenseStats { team_code: "WAS", points_allowed: 119.2, rebounds_allowed: 45.4, assists_allowed: 28.3, threes_allowed: 14.0, defensive_rating: 117.8, pace: 102.5 },
];

/// Get a team's defensive profile by code.
pub fn get_team_defense(team_code: &str) -> Option<&'static TeamDefenseStats> {
    TEAM_DEFENSE
        .iter()
        .find(|t| t.team_code.eq_ignore_ascii_case(team_code))
}

/// Get a team's defensive profile, falling back to the league average for
/// unknown teams.
pub fn team_defense_or_default(team_code: &str) -> TeamDefenseStats {
    get_team_defense(team_code)
        .copied()
        .unwrap_or_else(TeamDefenseStats::league_average)
}

/// Defensive rank for a team (1 = stingiest), derived from defensive rating.
pub fn defensive_rank(team_code: &str) -> u8 {
    let target = team_defense_or_default(team_code).defensive_rating;
    let better = TEAM_DEFENSE
        .iter()
        .filter(|t| t.defensive_rating < target)
        .count();
    (better + 1) as u8
}
