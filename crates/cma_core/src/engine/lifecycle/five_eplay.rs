use crate::source::{GameRulesProp, GameStateView, PropValue};

use super::{Core, Lifecycle};

/// 5EPlay rules.
///
/// Without a knife round the match starts when warmup ends. With one (any
/// player holding zero money at warmup end), the game restarts once the knife
/// round is settled and the restart flag dropping from true to false marks
/// the real start.
pub struct FiveEPlayLifecycle {
    is_match_started: bool,
    is_restarting: bool,
}

impl FiveEPlayLifecycle {
    pub fn new() -> FiveEPlayLifecycle {
        FiveEPlayLifecycle { is_match_started: false, is_restarting: false }
    }
}

impl Default for FiveEPlayLifecycle {
    fn default() -> Self {
        FiveEPlayLifecycle::new()
    }
}

impl Lifecycle for FiveEPlayLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_warmup_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        old_is_warmup: bool,
        new_is_warmup: bool,
    ) {
        if !(old_is_warmup && !new_is_warmup) {
            return;
        }

        let is_knife_round =
            view.playing_participants().iter().any(|participant| participant.money == 0);
        if is_knife_round {
            return;
        }

        self.is_match_started = true;
        core.process_match_start(view);
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

        let new_is_restarting = value.as_bool();
        if self.is_restarting && !new_is_restarting {
            self.is_match_started = true;
            core.process_match_start(view);
        }
        self.is_restarting = new_is_restarting;
    }

    fn on_game_half_ended(&mut self, core: &mut Core, _view: &dyn GameStateView) {
        core.is_first_round_of_half = true;
    }

    fn on_match_started_changed(
        &mut self,
        _core: &mut Core,
        _view: &dyn GameStateView,
        _old_is_started: bool,
        new_is_started: bool,
    ) {
        // Match end detection.
        if self.is_match_started && !new_is_started {
            self.is_match_started = false;
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
        self.is_match_started = false;
    }
}
