use crate::source::GameStateView;

use super::{Core, Lifecycle};

/// Valve matchmaking rules, also used for Perfect World, ESL and CS:GO
/// PopFlash recordings. The decoder's own match-started flag is reliable
/// here, so the strategy just mirrors it.
pub struct ValveLifecycle {
    is_match_started: bool,
}

impl ValveLifecycle {
    pub fn new() -> ValveLifecycle {
        ValveLifecycle { is_match_started: false }
    }
}

impl Default for ValveLifecycle {
    fn default() -> Self {
        ValveLifecycle::new()
    }
}

impl Lifecycle for ValveLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_match_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.current_round.start_frame = view.current_frame();
        core.current_round.start_tick = view.current_tick();
        core.update_team_names(view);
    }

    fn on_match_started_changed(
        &mut self,
        core: &mut Core,
        _view: &dyn GameStateView,
        old_is_started: bool,
        new_is_started: bool,
    ) {
        self.is_match_started = new_is_started;
        if !old_is_started && new_is_started {
            core.current_round.team_a_side = core.match_data.team_a.current_side;
            core.current_round.team_b_side = core.match_data.team_b.current_side;
        }
    }

    fn on_game_half_ended(&mut self, core: &mut Core, _view: &dyn GameStateView) {
        core.is_first_round_of_half = true;
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
    }
}
