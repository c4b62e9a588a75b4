use crate::constants::Side;
use crate::source::{
    GameRulesProp, GameStateView, PlayerProp, PlayerResourceProp, PropValue,
};

use super::{Core, Lifecycle};

/// ESEA rules.
///
/// ESEA goes live the old-school way: three consecutive match restarts
/// ("live on three") within five-second windows. Team swaps are not
/// announced; they are detected by counting per-player side property updates
/// landing on one tick and comparing to the number of valid participants,
/// then applied at the next LO3 because side-dependent events can still
/// arrive for the finishing round.
pub struct EseaLifecycle {
    is_match_started: bool,
    /// Last tick that carried a player side update.
    player_swap_tick_detected: i32,
    /// How many players were swapped at that tick.
    player_swapped_at_tick_count: i32,
    consecutive_match_restart_count: i32,
    last_match_start_tick: i32,
    should_swap_teams: bool,
}

impl EseaLifecycle {
    pub fn new() -> EseaLifecycle {
        EseaLifecycle {
            is_match_started: false,
            player_swap_tick_detected: -1,
            player_swapped_at_tick_count: 0,
            consecutive_match_restart_count: 0,
            last_match_start_tick: 0,
            should_swap_teams: false,
        }
    }
}

impl Default for EseaLifecycle {
    fn default() -> Self {
        EseaLifecycle::new()
    }
}

impl Lifecycle for EseaLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_match_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.register_unknown_players(view);
        let current_tick = view.current_tick();

        if core.seconds_has_passed_since_tick(view, 5.0, self.last_match_start_tick) {
            // Too far apart: this is the first restart of a possible LO3.
            self.last_match_start_tick = current_tick;
            self.consecutive_match_restart_count = 1;
            self.is_match_started = false;
            return;
        }

        self.consecutive_match_restart_count += 1;
        if self.consecutive_match_restart_count == 3 {
            self.is_match_started = true;
            self.consecutive_match_restart_count = 0;
            core.current_round.start_tick = current_tick;
            core.current_round.start_frame = view.current_frame();

            // Players silently moved to the right team just before the first
            // LO3 need their registry entries corrected.
            if core.current_round.number == 1 {
                core.update_players_current_team(view);
                core.update_team_names(view);
            }

            if self.should_swap_teams {
                core.match_data.swap_teams();
                core.current_round.team_a_side = core.match_data.team_a.current_side;
                core.current_round.team_b_side = core.match_data.team_b.current_side;
                self.should_swap_teams = false;
            }
        }

        self.last_match_start_tick = current_tick;
    }

    fn on_round_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        if !self.is_match_started {
            return;
        }

        core.commit_current_round();
        core.create_round(view);
    }

    fn on_freeze_time_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        is_freezetime: bool,
    ) {
        // Economies are created from start-money property updates instead of
        // freeze time entry on this platform.
        if !is_freezetime {
            core.current_round.freeze_time_end_tick = view.current_tick();
            core.current_round.freeze_time_end_frame = view.current_frame();
            core.last_freeze_time_end_tick = view.current_tick();
        }
    }

    fn on_round_end_official(&mut self, _core: &mut Core, _view: &dyn GameStateView) {
        // Rounds are committed on the next round start instead.
    }

    fn on_game_rules_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
        if prop != GameRulesProp::GameRestart {
            return;
        }

        let is_restarting = value.as_bool();
        if is_restarting && self.is_match_started {
            self.is_match_started = false;
            if core.match_data.rounds.len() > 1 {
                core.commit_current_round();
                core.create_round(view);
            }
        }

        core.is_first_round_of_half = true;
    }

    fn on_player_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        entity_id: i32,
        prop: PlayerProp,
        value: &PropValue,
    ) {
        match prop {
            PlayerProp::StartAccount => {
                core.create_players_economies(view);
            }
            PlayerProp::CoachingTeam => {
                let side = Side::from_team_number(value.as_i64());
                if !side.is_playing() {
                    return;
                }

                // Coaches are not players; drop them from the registry.
                let steam_id = view
                    .participants()
                    .into_iter()
                    .find(|participant| participant.entity_id == entity_id)
                    .map(|participant| participant.steam_id);
                if let Some(steam_id) = steam_id {
                    core.match_data.players.remove(&steam_id);
                }
            }
            PlayerProp::SideNumber => {
                if core.match_data.rounds.is_empty() {
                    return;
                }

                let current_tick = view.current_tick();
                if current_tick == self.player_swap_tick_detected {
                    let side = Side::from_team_number(value.as_i64());
                    if side.is_playing() {
                        self.player_swapped_at_tick_count += 1;
                        let valid_player_count = view.playing_participants().len() as i32;
                        if self.player_swapped_at_tick_count == valid_player_count {
                            self.player_swap_tick_detected = 0;
                            self.should_swap_teams = true;
                        }
                    }
                } else {
                    self.player_swapped_at_tick_count = 1;
                }

                self.player_swap_tick_detected = current_tick;
            }
            PlayerProp::Score => {
                // Scores are reset before the real end; track updates live.
                if self.is_match_started {
                    core.update_players_scores(view);
                }
            }
        }
    }

    fn on_player_resource_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: PlayerResourceProp,
        _value: &PropValue,
    ) {
        if prop == PlayerResourceProp::Score && self.is_match_started {
            core.update_players_scores(view);
        }
    }

    fn on_win_panel_match(&mut self, _core: &mut Core, _view: &dyn GameStateView) {}
}
