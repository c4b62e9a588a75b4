use serde::{Deserialize, Serialize};

use crate::constants::{EconomyType, RoundEndReason, Side};

use super::PlayerEconomy;

/// One round of play.
///
/// Created when a round start is detected and committed to the match only
/// when the round officially ends; a round end can precede the official end
/// or be revoked by a backup restore in between.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub number: i32,
    pub start_tick: i32,
    pub start_frame: i32,
    /// -1 until the end of freeze time has been observed.
    pub freeze_time_end_tick: i32,
    pub freeze_time_end_frame: i32,
    pub end_tick: i32,
    pub end_frame: i32,
    pub end_officially_tick: i32,
    pub end_officially_frame: i32,
    pub overtime_number: i32,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_score: i32,
    pub team_b_score: i32,
    /// Side value snapshots taken at round creation, never references into
    /// the live team state.
    pub team_a_side: Side,
    pub team_b_side: Side,
    pub team_a_equipment_value: i32,
    pub team_b_equipment_value: i32,
    pub team_a_money_spent: i32,
    pub team_b_money_spent: i32,
    pub team_a_economy_type: Option<EconomyType>,
    pub team_b_economy_type: Option<EconomyType>,
    /// Milliseconds, computed during post-processing from frames.
    pub duration: i64,
    pub end_reason: Option<RoundEndReason>,
    pub winner_name: Option<String>,
    pub winner_side: Option<Side>,
    /// Unique ids of weapons already accounted for as bought this round, so
    /// a dropped then picked-up weapon is not counted as a purchase again.
    #[serde(skip)]
    pub(crate) weapons_bought_unique_ids: Vec<u64>,
}

impl Round {
    /// Whether `seconds` have passed since the beginning of the round.
    pub fn seconds_passed_since_start(
        &self,
        current_tick: i32,
        tick_interval: f64,
        seconds: f64,
    ) -> bool {
        f64::from(current_tick - self.start_tick) * tick_interval >= seconds
    }

    /// Sums the start money of the economies recorded for `side` this round.
    pub fn team_start_money(&self, side: Side, economies: &[PlayerEconomy]) -> i32 {
        economies
            .iter()
            .filter(|economy| economy.round_number == self.number && economy.player_side == side)
            .map(|economy| economy.start_money)
            .sum()
    }

    pub fn start_money_team_a(&self, economies: &[PlayerEconomy]) -> i32 {
        self.team_start_money(self.team_a_side, economies)
    }

    pub fn start_money_team_b(&self, economies: &[PlayerEconomy]) -> i32 {
        self.team_start_money(self.team_b_side, economies)
    }

    /// Applies the reason reported by a round end notification, recovering it
    /// from the message text or the map kind when the value is unassigned.
    pub(crate) fn update_end_reason(
        &mut self,
        reason: RoundEndReason,
        message: &str,
        map_name: &str,
    ) {
        let mut end_reason = reason;

        if end_reason == RoundEndReason::Unassigned {
            end_reason = RoundEndReason::from_end_message(message);
        }

        // Some old recordings report "HostagesRescued" on defuse maps when
        // CTs won on time after the bomb exploded earlier.
        if end_reason == RoundEndReason::HostagesRescued && map_name.starts_with("de_") {
            end_reason = RoundEndReason::TargetSaved;
        }

        self.end_reason = Some(end_reason);
    }
}
