use crate::constants::{GamePhase, RoundEndReason, Side};
use crate::source::{GameRulesProp, GameStateView, PropValue, TeamProp};

use super::{Core, Lifecycle};

/// MatchZy server plugin rules.
///
/// Recordings are assumed live. A round-end-reason property reporting a draw
/// with a spectator "winner" is a backup restore: the match pauses and
/// resumes when the waiting-for-resume property clears. The final freeze
/// time event of a game fires before the final round end and must not
/// recompute economies.
pub struct MatchZyLifecycle {
    is_match_started: bool,
    game_end_tick: i32,
    is_paused_due_to_backup_restore: bool,
    /// Latest round-end winner side reported through properties; read when
    /// the round-end-reason property changes.
    last_round_end_winner: Side,
}

impl MatchZyLifecycle {
    pub fn new() -> MatchZyLifecycle {
        MatchZyLifecycle {
            is_match_started: true,
            game_end_tick: -1,
            is_paused_due_to_backup_restore: false,
            last_round_end_winner: Side::Unassigned,
        }
    }
}

impl Default for MatchZyLifecycle {
    fn default() -> Self {
        MatchZyLifecycle::new()
    }
}

impl Lifecycle for MatchZyLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_team_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        _entity_id: i32,
        prop: TeamProp,
        _value: &PropValue,
    ) {
        if prop == TeamProp::ClanName {
            core.update_team_names(view);
        }
    }

    fn on_game_rules_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
        match prop {
            GameRulesProp::RoundEndWinnerTeam => {
                self.last_round_end_winner = Side::from_team_number(value.as_i64());
            }
            GameRulesProp::RoundEndReason => {
                let is_draw = value.as_i64() == RoundEndReason::Draw as i64;
                if is_draw && self.last_round_end_winner == Side::Spectator {
                    // Backup restore: pause until the resume property clears.
                    self.is_match_started = false;
                    self.is_paused_due_to_backup_restore = true;
                    if view.total_rounds_played() == 0 {
                        core.reset(view);
                    } else {
                        core.reset_current_round(view);
                    }
                }
            }
            GameRulesProp::MatchWaitingForResume => {
                if self.is_paused_due_to_backup_restore && !value.as_bool() {
                    self.is_match_started = true;
                    self.is_paused_due_to_backup_restore = false;
                    core.current_round.start_frame = view.current_frame();
                    core.current_round.start_tick = view.current_tick();
                }
            }
            _ => {}
        }
    }

    fn on_game_phase_changed(
        &mut self,
        _core: &mut Core,
        view: &dyn GameStateView,
        new_phase: GamePhase,
    ) {
        if new_phase == GamePhase::GameEnded {
            self.game_end_tick = view.current_tick();
        }
    }

    fn on_match_started_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        _old_is_started: bool,
        new_is_started: bool,
    ) {
        core.register_unknown_players(view);
        self.is_match_started = new_is_started;
        if new_is_started {
            core.reset(view);
            core.current_round.start_frame = view.current_frame();
            core.current_round.start_tick = view.current_tick();
        }
    }

    fn on_freeze_time_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        is_freezetime: bool,
    ) {
        if !self.is_match_started || self.game_end_tick == view.current_tick() {
            return;
        }

        if is_freezetime {
            core.create_players_economies(view);
        } else {
            core.current_round.freeze_time_end_tick = view.current_tick();
            core.current_round.freeze_time_end_frame = view.current_frame();
            core.last_freeze_time_end_tick = view.current_tick();
        }
    }

    fn on_round_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        if !self.is_match_started
            || view.current_tick() == 0
            || core.match_data.rounds.is_empty()
        {
            return;
        }

        core.create_round(view);
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
    }

    fn post_process(&mut self, core: &mut Core) {
        if (core.match_data.rounds.len() as i32) < core.current_round.number {
            core.commit_current_round();
        }

        // Mid-demo restarts can leave winnerless rounds in the ledger.
        core.match_data.delete_incomplete_rounds();
    }
}
