use serde::{Deserialize, Serialize};

use crate::constants::Side;

/// A 1vX situation: one side reduced to a single living player facing
/// multiple living opponents.
///
/// Opened the instant a kill creates the situation, updated on every
/// subsequent kill involving the clutcher, and resolved won/lost against the
/// round's winner side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clutch {
    pub frame: i32,
    pub tick: i32,
    pub round_number: i32,
    pub opponent_count: i32,
    pub side: Side,
    pub has_won: bool,
    #[serde(rename = "clutcherSteamId")]
    pub clutcher_steam_id: u64,
    pub clutcher_name: String,
    pub clutcher_survived: bool,
    pub clutcher_kill_count: i32,
}
