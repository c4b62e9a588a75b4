use serde::{Deserialize, Serialize};

use crate::constants::{PlayerColor, TeamLetter};

/// Registry entry for a tracked participant, keyed by stable id.
///
/// Derived statistics are not stored here; they are computed over the
/// finalized ledgers by [`crate::analysis::PlayerStats`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "steamId")]
    pub steam_id: u64,
    #[serde(skip)]
    pub user_id: i32,
    pub name: String,
    /// Letter of the team slot this player belongs to. Updated on roster
    /// corrections, never on half swaps.
    pub team: TeamLetter,
    pub score: i32,
    pub mvp_count: i32,
    pub rank_type: i32,
    pub rank: i32,
    pub old_rank: i32,
    pub win_count: i32,
    pub crosshair_share_code: String,
    pub color: PlayerColor,
}

impl Player {
    pub(crate) fn reset(&mut self) {
        self.score = 0;
        self.mvp_count = 0;
    }
}
