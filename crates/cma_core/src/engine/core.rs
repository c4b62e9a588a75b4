//! Shared orchestration state: the match aggregate, the current round
//! context, and the bookkeeping every lifecycle strategy mutates.

use std::collections::HashMap;

use tracing::debug;

use crate::analysis::{classify_player_economy, classify_team_economy};
use crate::constants::{BombSite, DemoSource, Side, TeamLetter};
use crate::models::{MatchData, Player, PlayerEconomy, Round};
use crate::source::{DemoHeader, GameStateView, Participant, PropertyMap};
use crate::spatial::Vec3;

/// Seconds after the end of freeze time before equipment values are read.
/// Buying stays open a few seconds into the round; waiting the full buy time
/// would be worse because grenades may already have been thrown.
pub(crate) const EQUIPMENT_VALUE_DELAY_SECONDS: f64 = 7.0;

/// Maximum seconds between a teammate death and a possible revenge kill for
/// the revenge to count as a trade kill.
pub(crate) const TRADE_KILL_DELAY_SECONDS: f64 = 5.0;

/// Default value of the buy time con-var.
const DEFAULT_BUY_TIME_SECONDS: i32 = 20;

pub struct Core {
    pub match_data: MatchData,
    pub current_round: Round,
    pub props: &'static dyn PropertyMap,
    pub is_source2: bool,
    pub is_first_round_of_half: bool,
    /// Set when a round end has been seen; recordings missing round end
    /// events fall back to the round win status property.
    pub is_round_end_detected: bool,
    /// Seconds players are allowed to buy after a round starts, updated when
    /// the buy time con-var is seen.
    pub buy_time_seconds: i32,
    /// Last freeze time end tick, -1 when the pending economy computation has
    /// been done.
    pub last_freeze_time_end_tick: i32,
    pub include_positions: bool,
    /// Indices into the clutches ledger of the open clutches of the current
    /// round.
    pub(crate) clutch1: Option<usize>,
    pub(crate) clutch2: Option<usize>,
    /// Plant position cached for the explode fact, which carries no position
    /// of its own.
    pub(crate) bomb_plant_position: Vec3,
    /// Thrower steam id -> index of the grenade shot awaiting its projectile.
    /// The projectile entity appears a few ticks after the throw.
    pub(crate) last_grenade_thrown_by_player: HashMap<u64, usize>,
    /// Players that started untying a hostage, by hostage entity id. Several
    /// hostages can be untied at the same time.
    pub(crate) players_untying_hostage: HashMap<u64, i32>,
    pub(crate) planted_c4_sites: HashMap<i32, BombSite>,
    pub(crate) planted_c4_defusers: HashMap<i32, Participant>,
    pub(crate) last_timeout_update_tick: i32,
    pub(crate) warn_count: i32,
}

impl Core {
    pub fn new(
        source: DemoSource,
        header: &DemoHeader,
        props: &'static dyn PropertyMap,
        include_positions: bool,
    ) -> Core {
        let match_data = MatchData::new(source, header);
        let current_round = initial_round(&match_data);

        Core {
            match_data,
            current_round,
            props,
            is_source2: header.is_source2,
            is_first_round_of_half: true,
            is_round_end_detected: false,
            buy_time_seconds: DEFAULT_BUY_TIME_SECONDS,
            last_freeze_time_end_tick: -1,
            include_positions,
            clutch1: None,
            clutch2: None,
            bomb_plant_position: Vec3::zeros(),
            last_grenade_thrown_by_player: HashMap::new(),
            players_untying_hostage: HashMap::new(),
            planted_c4_sites: HashMap::new(),
            planted_c4_defusers: HashMap::new(),
            last_timeout_update_tick: -1,
            warn_count: 0,
        }
    }

    /// Whether `seconds` have passed since `tick`.
    pub fn seconds_has_passed_since_tick(
        &self,
        view: &dyn GameStateView,
        seconds: f64,
        tick: i32,
    ) -> bool {
        f64::from(view.current_tick() - tick) * view.tick_interval() >= seconds
    }

    /// The customary free knife round leaves every playing participant with
    /// an empty wallet.
    pub fn is_knife_round(&self, view: &dyn GameStateView) -> bool {
        let playing = view.playing_participants();
        let empty_wallets = playing.iter().filter(|p| p.money == 0).count();
        empty_wallets == playing.len()
    }

    /// Winner side of the last committed round. `None` when no round has been
    /// committed; a committed round without a winner yields `Unassigned`.
    pub fn previous_round_winner(&self) -> Option<Side> {
        self.match_data
            .rounds
            .last()
            .map(|round| round.winner_side.unwrap_or(Side::Unassigned))
    }

    /// Full state reset back to "waiting for the match to start".
    pub fn reset(&mut self, view: &dyn GameStateView) {
        self.is_first_round_of_half = true;
        self.is_round_end_detected = false;
        self.last_freeze_time_end_tick = -1;
        self.last_grenade_thrown_by_player.clear();
        self.players_untying_hostage.clear();
        self.planted_c4_sites.clear();
        self.planted_c4_defusers.clear();
        self.clutch1 = None;
        self.clutch2 = None;
        self.match_data.reset();
        self.update_team_names(view);
        self.current_round = initial_round(&self.match_data);
    }

    /// Round-only reset: a backup restore voids the round in progress, which
    /// will be replayed. The round context is re-stamped in place instead of
    /// advancing, and everything recorded for it is dropped.
    pub fn reset_current_round(&mut self, view: &dyn GameStateView) {
        let round_number = self.current_round.number;
        self.current_round.start_frame = view.current_frame();
        self.current_round.start_tick = view.current_tick();
        self.current_round.freeze_time_end_frame = -1;
        self.current_round.freeze_time_end_tick = -1;
        self.clutch1 = None;
        self.clutch2 = None;
        self.last_grenade_thrown_by_player.clear();
        self.players_untying_hostage.clear();
        self.match_data.reset_round(round_number);
    }

    /// Registers a participant the first time it is observed definitively on
    /// a side. Idempotent; spectators, coaches and id-less entries are
    /// ignored.
    pub fn register_player(&mut self, participant: &Participant) {
        if self.match_data.players.contains_key(&participant.steam_id) {
            return;
        }

        if participant.steam_id == 0 || !participant.is_connected {
            return;
        }

        if participant.is_coach {
            return;
        }

        if !participant.side.is_playing() {
            return;
        }

        let team = if self.match_data.team_a.current_side == participant.side {
            TeamLetter::A
        } else {
            TeamLetter::B
        };

        let user_id = if participant.user_id <= i32::from(u16::MAX) {
            participant.user_id & 0xff
        } else {
            0
        };

        let rank = participant.rank;
        self.match_data.players.insert(
            participant.steam_id,
            Player {
                steam_id: participant.steam_id,
                user_id,
                name: participant.name.clone(),
                team,
                score: 0,
                mvp_count: 0,
                rank_type: participant.rank_type,
                rank,
                old_rank: rank,
                win_count: participant.win_count,
                crosshair_share_code: participant.crosshair_code.clone(),
                color: participant.color,
            },
        );
    }

    pub fn register_unknown_players(&mut self, view: &dyn GameStateView) {
        for participant in view.participants() {
            self.register_player(&participant);
        }
    }

    /// Refreshes the team names from the clan names of the current sides.
    pub fn update_team_names(&mut self, view: &dyn GameStateView) {
        let name_a = view.team_state(self.match_data.team_a.current_side).clan_name;
        let name_b = view.team_state(self.match_data.team_b.current_side).clan_name;
        if name_a == name_b {
            return;
        }

        if !name_a.is_empty() {
            self.match_data.team_a.name = name_a.clone();
            self.current_round.team_a_name = name_a;
        }
        if !name_b.is_empty() {
            self.match_data.team_b.name = name_b.clone();
            self.current_round.team_b_name = name_b;
        }
    }

    /// Updates scores of the tracked players from the view. Zero values are
    /// ignored because some platforms reset scores before the match is
    /// actually over.
    pub fn update_players_scores(&mut self, view: &dyn GameStateView) {
        for participant in view.playing_participants() {
            if participant.score == 0 {
                continue;
            }
            if let Some(player) = self.match_data.players.get_mut(&participant.steam_id) {
                player.score = participant.score;
                player.mvp_count = participant.mvp_count;
            }
        }
    }

    /// Roster correction: a side change independent of a half swap moves the
    /// player's registry entry to the team currently on that side.
    pub fn update_players_current_team(&mut self, view: &dyn GameStateView) {
        let team_a_side = self.match_data.team_a.current_side;
        let playing = view.playing_participants();
        for (steam_id, player) in self.match_data.players.iter_mut() {
            for participant in &playing {
                if participant.steam_id != *steam_id {
                    continue;
                }

                if !participant.side.is_playing() {
                    continue;
                }

                let player_side = match player.team {
                    TeamLetter::A => team_a_side,
                    TeamLetter::B => team_a_side.opposite(),
                };
                if player_side == participant.side {
                    continue;
                }

                player.team = if team_a_side == participant.side {
                    TeamLetter::A
                } else {
                    TeamLetter::B
                };
            }
        }
    }

    /// Marks the actual beginning of play: re-stamps the round context and
    /// takes fresh side/name/economy snapshots.
    pub fn process_match_start(&mut self, view: &dyn GameStateView) {
        self.update_players_current_team(view);
        self.current_round.start_frame = view.current_frame();
        self.current_round.start_tick = view.current_tick();
        self.current_round.team_a_side = self.match_data.team_a.current_side;
        self.current_round.team_b_side = self.match_data.team_b.current_side;
        self.update_team_names(view);
        self.create_players_economies(view);
    }

    /// Advances to the next round: clears round-scoped bookkeeping and makes
    /// a fresh round the current one.
    pub fn create_round(&mut self, view: &dyn GameStateView) {
        self.clutch1 = None;
        self.clutch2 = None;
        self.last_grenade_thrown_by_player.clear();
        self.players_untying_hostage.clear();

        let number = self.current_round.number + 1;
        self.current_round = self.new_round(number, view);
        self.compute_team_economies(view);
        self.create_players_economies(view);
    }

    fn new_round(&self, number: i32, view: &dyn GameStateView) -> Round {
        // All weapons currently carried count as already bought, so a weapon
        // dropped to a teammate is not detected as a purchase again.
        let mut weapons_bought_unique_ids = Vec::new();
        for participant in view.playing_participants() {
            weapons_bought_unique_ids.extend(participant.weapon_ids.iter().copied());
        }

        Round {
            number,
            start_tick: view.current_tick(),
            start_frame: view.current_frame(),
            freeze_time_end_tick: -1,
            freeze_time_end_frame: -1,
            end_tick: 0,
            end_frame: 0,
            end_officially_tick: 0,
            end_officially_frame: 0,
            overtime_number: self.match_data.overtime_count,
            team_a_name: self.match_data.team_a.name.clone(),
            team_b_name: self.match_data.team_b.name.clone(),
            team_a_score: self.match_data.team_a.score,
            team_b_score: self.match_data.team_b.score,
            team_a_side: self.match_data.team_a.current_side,
            team_b_side: self.match_data.team_b.current_side,
            team_a_equipment_value: 0,
            team_b_equipment_value: 0,
            team_a_money_spent: 0,
            team_b_money_spent: 0,
            team_a_economy_type: None,
            team_b_economy_type: None,
            duration: 0,
            end_reason: None,
            winner_name: None,
            winner_side: None,
            weapons_bought_unique_ids,
        }
    }

    /// Commits the current round to the match.
    pub fn commit_current_round(&mut self) {
        self.match_data.rounds.push(self.current_round.clone());
    }

    /// Records the round result: winner, end stamps, clutch resolution.
    pub fn handle_round_end(&mut self, view: &dyn GameStateView, winner_side: Side) {
        self.is_round_end_detected = true;
        self.is_first_round_of_half = false;

        let winner = self.match_data.team(winner_side);
        self.current_round.winner_name = Some(winner.name.clone());
        self.current_round.winner_side = Some(winner.current_side);
        self.current_round.end_tick = view.current_tick();
        self.current_round.end_officially_tick = view.current_tick();
        self.current_round.end_frame = view.current_frame();
        self.current_round.end_officially_frame = view.current_frame();

        if self.current_round.freeze_time_end_frame == -1 {
            self.current_round.freeze_time_end_frame = view.current_frame();
        }
        if self.current_round.freeze_time_end_tick == -1 {
            self.current_round.freeze_time_end_tick = view.current_tick();
        }

        if let Some(index) = self.clutch1 {
            let clutch = &mut self.match_data.clutches[index];
            clutch.has_won = winner_side == clutch.side;
        }
        if let Some(index) = self.clutch2 {
            let clutch = &mut self.match_data.clutches[index];
            clutch.has_won = winner_side == clutch.side;
        }

        self.update_players_scores(view);
    }

    /// Creates fresh economy snapshots for every playing participant,
    /// replacing any already recorded for the current round.
    pub fn create_players_economies(&mut self, view: &dyn GameStateView) {
        let round_number = self.current_round.number;
        self.match_data.player_economies.retain(|economy| economy.round_number != round_number);

        for participant in view.playing_participants() {
            let economy = self.new_player_economy(&participant);
            self.match_data.player_economies.push(economy);
        }
    }

    fn new_player_economy(&self, participant: &Participant) -> PlayerEconomy {
        let mut start_money = participant.money;
        // Some recordings start just after the end of the first freeze time;
        // the money already spent has to be added back.
        if self.current_round.number == 1 {
            start_money += participant.money_spent_this_round;
        }

        PlayerEconomy {
            round_number: self.current_round.number,
            name: participant.name.clone(),
            steam_id: participant.steam_id,
            start_money,
            money_spent: participant.money_spent_this_round,
            equipment_value: participant.equipment_value,
            economy_type: classify_player_economy(
                self.is_first_round_of_half,
                self.match_data.overtime_count,
                participant.equipment_value,
                participant.side,
                self.previous_round_winner(),
                participant.money,
            ),
            player_side: participant.side,
        }
    }

    /// Refreshes a single participant's economy snapshot, creating it when
    /// missing (a player can connect in the middle of a pause).
    pub fn create_or_update_player_economy(&mut self, participant: &Participant) {
        let economy = self.new_player_economy(participant);
        let round_number = self.current_round.number;
        if let Some(existing) = self.match_data.player_economy_at_round_mut(
            &participant.name,
            participant.steam_id,
            round_number,
        ) {
            *existing = economy;
        } else {
            self.match_data.player_economies.push(economy);
        }
    }

    /// Recomputes the per-player economy snapshots of the current round.
    pub fn compute_players_economies(&mut self, view: &dyn GameStateView) {
        let is_first_round_of_half = self.is_first_round_of_half;
        let overtime_count = self.match_data.overtime_count;
        let previous_winner = self.previous_round_winner();
        let round_number = self.current_round.number;

        for participant in view.playing_participants() {
            let economy_type = classify_player_economy(
                is_first_round_of_half,
                overtime_count,
                participant.equipment_value,
                participant.side,
                previous_winner,
                participant.money,
            );
            if let Some(economy) = self.match_data.player_economy_at_round_mut(
                &participant.name,
                participant.steam_id,
                round_number,
            ) {
                economy.player_side = participant.side;
                economy.equipment_value = participant.equipment_value;
                economy.money_spent = participant.money_spent_this_round;
                economy.economy_type = economy_type;
            }
        }
    }

    /// Recomputes the per-team economy aggregates of the current round.
    pub fn compute_team_economies(&mut self, view: &dyn GameStateView) {
        let is_first_round_of_half = self.is_first_round_of_half;
        let overtime_count = self.match_data.overtime_count;
        let previous_winner = self.previous_round_winner();

        for letter in [TeamLetter::A, TeamLetter::B] {
            let side = self.match_data.team_by_letter(letter).current_side;
            let state = view.team_state(side);
            let members: Vec<Participant> =
                view.playing_participants().into_iter().filter(|p| p.side == side).collect();
            let player_count =
                members.iter().filter(|p| !p.is_bot && !p.is_unknown).count() as i32;
            let money: i32 = members.iter().map(|p| p.money).sum();

            let economy_type = classify_team_economy(
                is_first_round_of_half,
                overtime_count,
                state.equipment_value,
                side,
                previous_winner,
                money,
                player_count,
            );

            let round = &mut self.current_round;
            match letter {
                TeamLetter::A => {
                    round.team_a_money_spent = state.money_spent_this_round;
                    round.team_a_equipment_value = state.equipment_value;
                    round.team_a_economy_type = Some(economy_type);
                }
                TeamLetter::B => {
                    round.team_b_money_spent = state.money_spent_this_round;
                    round.team_b_equipment_value = state.equipment_value;
                    round.team_b_economy_type = Some(economy_type);
                }
            }
        }
    }

    /// Flags the latest matching purchases of the current round as refunded.
    pub fn flag_refunded_buy(&mut self, steam_id: u64, weapon_name: crate::constants::WeaponName) {
        let round_number = self.current_round.number;
        for buy in self.match_data.players_buy.iter_mut().rev() {
            if buy.player_steam_id != steam_id || buy.weapon_name != weapon_name {
                continue;
            }

            if buy.round_number != round_number {
                break;
            }

            buy.has_refunded = true;
        }
    }

    pub(crate) fn log_dropped_event(&self, what: &str) {
        debug!(what, "dropped event with missing data");
    }
}

/// Round context used before any round boundary has been observed.
pub(crate) fn initial_round(match_data: &MatchData) -> Round {
    Round {
        number: 1,
        start_tick: 1,
        start_frame: 1,
        freeze_time_end_tick: -1,
        freeze_time_end_frame: -1,
        end_tick: 0,
        end_frame: 0,
        end_officially_tick: 0,
        end_officially_frame: 0,
        overtime_number: 0,
        team_a_name: match_data.team_a.name.clone(),
        team_b_name: match_data.team_b.name.clone(),
        team_a_score: 0,
        team_b_score: 0,
        team_a_side: match_data.team_a.current_side,
        team_b_side: match_data.team_b.current_side,
        team_a_equipment_value: 0,
        team_b_equipment_value: 0,
        team_a_money_spent: 0,
        team_b_money_spent: 0,
        team_a_economy_type: None,
        team_b_economy_type: None,
        duration: 0,
        end_reason: None,
        winner_name: None,
        winner_side: None,
        weapons_bought_unique_ids: Vec::new(),
    }
}
