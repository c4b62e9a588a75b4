use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DemoSource, DemoType, Game, Side, TeamLetter};
use crate::source::DemoHeader;

use super::facts::*;
use super::position::*;
use super::{Clutch, Player, PlayerEconomy, Round, Team};

/// Root aggregate holding everything recorded from one match.
///
/// Data from warmup, halftime and after the match is excluded. Created once
/// per analysis, mutated during dispatch, read-only after post-processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchData {
    pub checksum: String,
    pub game: Game,
    pub demo_file_path: String,
    pub demo_file_name: String,
    pub source: DemoSource,
    #[serde(rename = "type")]
    pub demo_type: DemoType,
    pub map_name: String,
    pub share_code: String,
    pub tick_count: i32,
    #[serde(rename = "tickrate")]
    pub tick_rate: f64,
    #[serde(rename = "framerate")]
    pub frame_rate: f64,
    pub date: Option<DateTime<Utc>>,
    pub duration_seconds: f64,
    pub server_name: String,
    pub client_name: String,
    pub network_protocol: i32,
    pub build_number: i32,
    pub is_ranked: bool,
    /// From the max-rounds con-var when seen, otherwise inferred from the
    /// final scores during post-processing.
    pub max_rounds: i32,
    pub overtime_count: i32,
    pub has_vac_live_ban: bool,
    /// Team A is the team that started as CT.
    pub team_a: Team,
    /// Team B is the team that started as T.
    pub team_b: Team,
    pub winner: Option<TeamLetter>,
    pub players: BTreeMap<u64, Player>,
    pub rounds: Vec<Round>,
    pub kills: Vec<Kill>,
    pub shots: Vec<Shot>,
    pub clutches: Vec<Clutch>,
    pub damages: Vec<Damage>,
    pub bombs_plant_start: Vec<BombPlantStart>,
    pub bombs_planted: Vec<BombPlanted>,
    pub bombs_defuse_start: Vec<BombDefuseStart>,
    pub bombs_defused: Vec<BombDefused>,
    pub bombs_exploded: Vec<BombExploded>,
    pub he_grenades_explode: Vec<GrenadeDetonation>,
    pub flashbangs_explode: Vec<GrenadeDetonation>,
    pub smokes_start: Vec<GrenadeDetonation>,
    pub decoys_start: Vec<GrenadeDetonation>,
    pub grenade_bounces: Vec<GrenadeProjectileEvent>,
    pub grenade_projectiles_destroy: Vec<GrenadeProjectileEvent>,
    pub players_flashed: Vec<PlayerFlashed>,
    pub players_buy: Vec<PlayerBuy>,
    pub player_economies: Vec<PlayerEconomy>,
    pub chat_messages: Vec<ChatMessage>,
    pub chicken_deaths: Vec<ChickenDeath>,
    pub hostage_pick_up_start: Vec<HostagePickUpStart>,
    pub hostage_picked_up: Vec<HostagePickedUp>,
    pub hostage_rescued: Vec<HostageRescued>,
    pub player_positions: Vec<PlayerPosition>,
    pub grenade_positions: Vec<GrenadePosition>,
    pub inferno_positions: Vec<InfernoPosition>,
    pub hostage_positions: Vec<HostagePosition>,
    pub chicken_positions: Vec<ChickenPosition>,
}

impl MatchData {
    pub fn new(source: DemoSource, header: &DemoHeader) -> MatchData {
        MatchData {
            checksum: header.checksum.clone(),
            game: header.game(),
            demo_file_path: header.file_path.clone(),
            demo_file_name: header.file_name.clone(),
            source,
            demo_type: header.demo_type,
            map_name: header.map_name.clone(),
            share_code: header.share_code.clone(),
            tick_count: header.tick_count,
            tick_rate: header.tick_rate,
            frame_rate: header.frame_rate,
            date: header.date,
            duration_seconds: header.duration_seconds,
            server_name: header.server_name.clone(),
            client_name: header.client_name.clone(),
            network_protocol: header.network_protocol,
            build_number: header.build_number,
            is_ranked: false,
            max_rounds: 0,
            overtime_count: 0,
            has_vac_live_ban: false,
            team_a: Team::new("Team A", TeamLetter::A, Side::CounterTerrorist),
            team_b: Team::new("Team B", TeamLetter::B, Side::Terrorist),
            winner: None,
            players: BTreeMap::new(),
            rounds: Vec::new(),
            kills: Vec::new(),
            shots: Vec::new(),
            clutches: Vec::new(),
            damages: Vec::new(),
            bombs_plant_start: Vec::new(),
            bombs_planted: Vec::new(),
            bombs_defuse_start: Vec::new(),
            bombs_defused: Vec::new(),
            bombs_exploded: Vec::new(),
            he_grenades_explode: Vec::new(),
            flashbangs_explode: Vec::new(),
            smokes_start: Vec::new(),
            decoys_start: Vec::new(),
            grenade_bounces: Vec::new(),
            grenade_projectiles_destroy: Vec::new(),
            players_flashed: Vec::new(),
            players_buy: Vec::new(),
            player_economies: Vec::new(),
            chat_messages: Vec::new(),
            chicken_deaths: Vec::new(),
            hostage_pick_up_start: Vec::new(),
            hostage_picked_up: Vec::new(),
            hostage_rescued: Vec::new(),
            player_positions: Vec::new(),
            grenade_positions: Vec::new(),
            inferno_positions: Vec::new(),
            hostage_positions: Vec::new(),
            chicken_positions: Vec::new(),
        }
    }

    /// Serializes the finalized snapshot to JSON for export collaborators.
    pub fn to_json(&self, minify: bool) -> serde_json::Result<String> {
        if minify {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        }
    }

    /// The team currently occupying the given side.
    pub fn team(&self, side: Side) -> &Team {
        if self.team_a.current_side == side {
            &self.team_a
        } else {
            &self.team_b
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        if self.team_a.current_side == side {
            &mut self.team_a
        } else {
            &mut self.team_b
        }
    }

    pub fn team_by_letter(&self, letter: TeamLetter) -> &Team {
        match letter {
            TeamLetter::A => &self.team_a,
            TeamLetter::B => &self.team_b,
        }
    }

    /// Swaps the sides of both teams in lockstep. This is the only operation
    /// allowed to change a team's current side.
    pub fn swap_teams(&mut self) {
        self.team_a.swap_side();
        self.team_b.swap_side();
        debug_assert_eq!(self.team_a.current_side, self.team_b.current_side.opposite());
    }

    /// Number of kills, suicides and bomb deaths excluded.
    pub fn kill_count(&self) -> usize {
        self.kills
            .iter()
            .filter(|kill| {
                kill.killer_steam_id != 0
                    && kill.killer_name != kill.victim_name
                    && kill.killer_name != "World"
            })
            .count()
    }

    /// Number of assists, bot assists excluded.
    pub fn assist_count(&self) -> usize {
        self.kills.iter().filter(|kill| kill.assister_steam_id != 0).count()
    }

    /// Number of deaths, whatever the reason.
    pub fn death_count(&self) -> usize {
        self.kills.len()
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Kills grouped by round, in per-round chronological order.
    pub fn kills_by_round(&self) -> BTreeMap<i32, Vec<&Kill>> {
        let mut by_round: BTreeMap<i32, Vec<&Kill>> = BTreeMap::new();
        for kill in &self.kills {
            by_round.entry(kill.round_number).or_default().push(kill);
        }
        by_round
    }

    pub fn player_economy_at_round_mut(
        &mut self,
        name: &str,
        steam_id: u64,
        round_number: i32,
    ) -> Option<&mut PlayerEconomy> {
        self.player_economies.iter_mut().find(|economy| {
            economy.round_number == round_number
                && economy.steam_id == steam_id
                && economy.name == name
        })
    }

    /// Clears everything accumulated so far and reinitializes the two team
    /// slots. Used when a lifecycle strategy decides play never really
    /// started.
    pub(crate) fn reset(&mut self) {
        self.players.clear();
        self.rounds.clear();
        self.kills.clear();
        self.shots.clear();
        self.clutches.clear();
        self.damages.clear();
        self.bombs_plant_start.clear();
        self.bombs_planted.clear();
        self.bombs_defuse_start.clear();
        self.bombs_defused.clear();
        self.bombs_exploded.clear();
        self.he_grenades_explode.clear();
        self.flashbangs_explode.clear();
        self.smokes_start.clear();
        self.decoys_start.clear();
        self.grenade_bounces.clear();
        self.grenade_projectiles_destroy.clear();
        self.players_flashed.clear();
        self.players_buy.clear();
        self.player_economies.clear();
        self.chat_messages.clear();
        self.chicken_deaths.clear();
        self.hostage_pick_up_start.clear();
        self.hostage_picked_up.clear();
        self.hostage_rescued.clear();
        self.player_positions.clear();
        self.grenade_positions.clear();
        self.inferno_positions.clear();
        self.hostage_positions.clear();
        self.chicken_positions.clear();
        self.team_a = Team::new("Team A", TeamLetter::A, Side::CounterTerrorist);
        self.team_b = Team::new("Team B", TeamLetter::B, Side::Terrorist);
    }

    /// Drops every fact recorded for the given round. Used when a backup
    /// restore voids a round that will be replayed.
    pub(crate) fn reset_round(&mut self, round_number: i32) {
        self.kills.retain(|fact| fact.round_number != round_number);
        self.shots.retain(|fact| fact.round_number != round_number);
        self.clutches.retain(|fact| fact.round_number != round_number);
        self.damages.retain(|fact| fact.round_number != round_number);
        self.bombs_plant_start.retain(|fact| fact.round_number != round_number);
        self.bombs_planted.retain(|fact| fact.round_number != round_number);
        self.bombs_defuse_start.retain(|fact| fact.round_number != round_number);
        self.bombs_defused.retain(|fact| fact.round_number != round_number);
        self.bombs_exploded.retain(|fact| fact.round_number != round_number);
        self.he_grenades_explode.retain(|fact| fact.round_number != round_number);
        self.flashbangs_explode.retain(|fact| fact.round_number != round_number);
        self.smokes_start.retain(|fact| fact.round_number != round_number);
        self.decoys_start.retain(|fact| fact.round_number != round_number);
        self.grenade_bounces.retain(|fact| fact.round_number != round_number);
        self.grenade_projectiles_destroy.retain(|fact| fact.round_number != round_number);
        self.players_flashed.retain(|fact| fact.round_number != round_number);
        self.players_buy.retain(|fact| fact.round_number != round_number);
        self.player_economies.retain(|fact| fact.round_number != round_number);
        self.chat_messages.retain(|fact| fact.round_number != round_number);
        self.chicken_deaths.retain(|fact| fact.round_number != round_number);
        self.hostage_pick_up_start.retain(|fact| fact.round_number != round_number);
        self.hostage_picked_up.retain(|fact| fact.round_number != round_number);
        self.hostage_rescued.retain(|fact| fact.round_number != round_number);
        self.player_positions.retain(|fact| fact.round_number != round_number);
        self.grenade_positions.retain(|fact| fact.round_number != round_number);
        self.inferno_positions.retain(|fact| fact.round_number != round_number);
        self.hostage_positions.retain(|fact| fact.round_number != round_number);
        self.chicken_positions.retain(|fact| fact.round_number != round_number);
    }

    /// Removes committed rounds that never got a winner, along with their
    /// facts. Mid-demo restarts can leave such rounds behind.
    pub(crate) fn delete_incomplete_rounds(&mut self) {
        let incomplete: Vec<i32> = self
            .rounds
            .iter()
            .filter(|round| round.winner_name.is_none())
            .map(|round| round.number)
            .collect();

        for round_number in incomplete {
            self.rounds.retain(|round| round.number != round_number);
            self.reset_round(round_number);
        }
    }

    /// Replays the committed rounds to compute team scores, half scores,
    /// round durations, the winner and the max-rounds fallback.
    ///
    /// Scores are derived from round results because score notifications are
    /// not reliable on every platform.
    pub(crate) fn compute_result_stats(&mut self) {
        let mut is_first_half = true;
        for index in 0..self.rounds.len() {
            let (winner_side, team_a_side) = {
                let round = &self.rounds[index];
                (round.winner_side, round.team_a_side)
            };

            if self.frame_rate > 0.0 {
                let round = &mut self.rounds[index];
                let frames = f64::from(round.end_frame) - f64::from(round.start_frame);
                round.duration = ((frames / self.frame_rate) * 1000.0) as i64;
            }

            let team_a_won = winner_side == Some(team_a_side);
            if team_a_won {
                self.team_a.score += 1;
            } else {
                self.team_b.score += 1;
            }
            self.rounds[index].team_a_score = self.team_a.score;
            self.rounds[index].team_b_score = self.team_b.score;

            if self.rounds[index].overtime_number == 0 {
                if is_first_half {
                    if team_a_won {
                        self.team_a.score_first_half += 1;
                    } else {
                        self.team_b.score_first_half += 1;
                    }
                } else if team_a_won {
                    self.team_a.score_second_half += 1;
                } else {
                    self.team_b.score_second_half += 1;
                }
            }

            if index + 1 < self.rounds.len()
                && self.rounds[index].team_a_side != self.rounds[index + 1].team_a_side
            {
                is_first_half = !is_first_half;
            }
        }

        if self.team_a.score > self.team_b.score {
            self.winner = Some(TeamLetter::A);
        } else if self.team_b.score > self.team_a.score {
            self.winner = Some(TeamLetter::B);
        }

        if self.max_rounds == 0 {
            let max_score = self.team_a.score.max(self.team_b.score);
            self.max_rounds = max_score * 2;
            if self.team_a.score != self.team_b.score {
                self.max_rounds -= 2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_match() -> MatchData {
        MatchData::new(DemoSource::Valve, &DemoHeader::default())
    }

    fn round(number: i32, team_a_side: Side, winner: Option<Side>) -> Round {
        Round {
            number,
            start_tick: number * 1000,
            start_frame: number * 1000,
            freeze_time_end_tick: -1,
            freeze_time_end_frame: -1,
            end_tick: number * 1000 + 500,
            end_frame: number * 1000 + 500,
            end_officially_tick: number * 1000 + 600,
            end_officially_frame: number * 1000 + 600,
            overtime_number: 0,
            team_a_name: "Team A".to_string(),
            team_b_name: "Team B".to_string(),
            team_a_score: 0,
            team_b_score: 0,
            team_a_side,
            team_b_side: team_a_side.opposite(),
            team_a_equipment_value: 0,
            team_b_equipment_value: 0,
            team_a_money_spent: 0,
            team_b_money_spent: 0,
            team_a_economy_type: None,
            team_b_economy_type: None,
            duration: 0,
            end_reason: None,
            winner_name: winner.map(|_| "someone".to_string()),
            winner_side: winner,
            weapons_bought_unique_ids: Vec::new(),
        }
    }

    #[test]
    fn swapping_teams_keeps_sides_opposite() {
        let mut match_data = test_match();
        assert_eq!(match_data.team_a.current_side, Side::CounterTerrorist);
        match_data.swap_teams();
        assert_eq!(match_data.team_a.current_side, Side::Terrorist);
        assert_eq!(match_data.team_b.current_side, Side::CounterTerrorist);
        match_data.swap_teams();
        assert_eq!(match_data.team_a.current_side, Side::CounterTerrorist);
        assert_eq!(match_data.team_b.current_side, Side::Terrorist);
    }

    #[test]
    fn result_stats_replay_rounds_into_scores() {
        let mut match_data = test_match();
        match_data.frame_rate = 64.0;
        // First half: team A on CT wins twice, loses once.
        match_data.rounds.push(round(1, Side::CounterTerrorist, Some(Side::CounterTerrorist)));
        match_data.rounds.push(round(2, Side::CounterTerrorist, Some(Side::Terrorist)));
        match_data.rounds.push(round(3, Side::CounterTerrorist, Some(Side::CounterTerrorist)));
        // Second half after the swap: team A on T wins once.
        match_data.rounds.push(round(4, Side::Terrorist, Some(Side::Terrorist)));

        match_data.compute_result_stats();

        assert_eq!(match_data.team_a.score, 3);
        assert_eq!(match_data.team_b.score, 1);
        assert_eq!(match_data.team_a.score_first_half, 2);
        assert_eq!(match_data.team_b.score_first_half, 1);
        assert_eq!(match_data.team_a.score_second_half, 1);
        assert_eq!(match_data.winner, Some(TeamLetter::A));
        assert_eq!(match_data.rounds[1].team_a_score, 1);
        assert_eq!(match_data.rounds[1].team_b_score, 1);
        assert!(match_data.rounds[0].duration > 0);
    }

    #[test]
    fn incomplete_rounds_are_deleted_with_their_facts() {
        let mut match_data = test_match();
        match_data.rounds.push(round(1, Side::CounterTerrorist, Some(Side::CounterTerrorist)));
        match_data.rounds.push(round(2, Side::CounterTerrorist, None));
        match_data.chat_messages.push(ChatMessage {
            frame: 1,
            tick: 1,
            round_number: 2,
            message: "gg".to_string(),
            sender_steam_id: 7,
            sender_name: "someone".to_string(),
            sender_side: Side::Terrorist,
            is_sender_alive: true,
        });

        match_data.delete_incomplete_rounds();

        assert_eq!(match_data.rounds.len(), 1);
        assert_eq!(match_data.rounds[0].number, 1);
        assert!(match_data.chat_messages.is_empty());
    }
}
