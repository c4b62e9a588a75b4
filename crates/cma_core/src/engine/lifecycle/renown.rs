use crate::source::{GameRulesProp, GameStateView, Participant, PropValue};

use super::{Core, Lifecycle};

/// Renown rules: the match-started flag is followed in both directions, and
/// the technical-timeout property tracks mid-match pauses. A player
/// connecting during a pause gets their economy snapshot refreshed.
pub struct RenownLifecycle {
    is_match_started: bool,
    is_game_paused: bool,
}

impl RenownLifecycle {
    pub fn new() -> RenownLifecycle {
        RenownLifecycle { is_match_started: false, is_game_paused: false }
    }
}

impl Default for RenownLifecycle {
    fn default() -> Self {
        RenownLifecycle::new()
    }
}

impl Lifecycle for RenownLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_game_rules_prop(
        &mut self,
        _core: &mut Core,
        _view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
        if prop == GameRulesProp::TechnicalTimeout {
            self.is_game_paused = value.as_bool();
        }
    }

    fn on_player_connect(
        &mut self,
        core: &mut Core,
        _view: &dyn GameStateView,
        player: &Participant,
    ) {
        if self.is_game_paused {
            core.create_or_update_player_economy(player);
        }
    }

    fn on_match_started_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        _old_is_started: bool,
        new_is_started: bool,
    ) {
        self.is_match_started = new_is_started;
        if new_is_started {
            core.process_match_start(view);
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
    }
}
