use serde::{Deserialize, Serialize};

use super::Side;

/// Why a round ended.
///
/// `Unassigned` is reported by old recordings whose end event carries no
/// reason; it is then recovered from the end message text or the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndReason {
    Unassigned,
    TargetBombed,
    VipEscaped,
    VipKilled,
    TerroristsEscaped,
    CtStoppedEscape,
    TerroristsStopped,
    BombDefused,
    CtWin,
    TerroristsWin,
    Draw,
    HostagesRescued,
    TargetSaved,
    HostagesNotRescued,
    TerroristsNotEscaped,
    VipNotEscaped,
    GameStart,
    TerroristsSurrender,
    CtSurrender,
}

impl RoundEndReason {
    /// Recovers the end reason from the round end message of old recordings
    /// that report an unassigned reason value.
    pub fn from_end_message(message: &str) -> RoundEndReason {
        match message {
            "#SFUI_Notice_Target_Saved" => RoundEndReason::TargetSaved,
            "#SFUI_Notice_Target_Bombed" => RoundEndReason::TargetBombed,
            _ => RoundEndReason::Unassigned,
        }
    }
}

/// Round win status reported through the game rules property used as a
/// fallback for recordings missing round end events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundWinStatus {
    Unassigned,
    Draw,
    TerroristsWon,
    CounterTerroristsWon,
}

impl RoundWinStatus {
    pub fn from_raw(value: i64) -> RoundWinStatus {
        match value {
            1 => RoundWinStatus::Draw,
            2 => RoundWinStatus::TerroristsWon,
            3 => RoundWinStatus::CounterTerroristsWon,
            _ => RoundWinStatus::Unassigned,
        }
    }

    pub fn winner_side(self) -> Option<Side> {
        match self {
            RoundWinStatus::TerroristsWon => Some(Side::Terrorist),
            RoundWinStatus::CounterTerroristsWon => Some(Side::CounterTerrorist),
            _ => None,
        }
    }
}

/// Body part hit by a damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitGroup {
    Generic,
    Head,
    Chest,
    Stomach,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Neck,
    Gear,
}
