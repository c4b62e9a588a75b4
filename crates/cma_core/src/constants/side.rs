use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two opposing factions, or a non-playing slot.
///
/// Which persistent [`crate::models::Team`] occupies which side can swap at
/// halftime and between overtime halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "unassigned")]
    Unassigned,
    #[serde(rename = "spectator")]
    Spectator,
    #[serde(rename = "T")]
    Terrorist,
    #[serde(rename = "CT")]
    CounterTerrorist,
}

impl Side {
    /// Whether this side is one of the two playing factions.
    pub fn is_playing(self) -> bool {
        matches!(self, Side::Terrorist | Side::CounterTerrorist)
    }

    /// Side from the raw team number used by entity properties.
    pub fn from_team_number(value: i64) -> Side {
        match value {
            1 => Side::Spectator,
            2 => Side::Terrorist,
            3 => Side::CounterTerrorist,
            _ => Side::Unassigned,
        }
    }

    /// The opposing playing side. Non-playing sides are returned unchanged.
    pub fn opposite(self) -> Side {
        match self {
            Side::Terrorist => Side::CounterTerrorist,
            Side::CounterTerrorist => Side::Terrorist,
            other => other,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Unassigned => "unassigned",
            Side::Spectator => "spectator",
            Side::Terrorist => "T",
            Side::CounterTerrorist => "CT",
        };
        write!(f, "{}", name)
    }
}

/// Identity-stable team slot letter. Team A is the team that started as CT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamLetter {
    A,
    B,
}

impl fmt::Display for TeamLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamLetter::A => write!(f, "A"),
            TeamLetter::B => write!(f, "B"),
        }
    }
}
