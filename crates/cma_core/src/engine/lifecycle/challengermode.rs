use crate::source::GameStateView;

use super::{Core, Lifecycle};

/// Challengermode rules: rising edge of the match-started flag, guarded
/// against the free knife round.
pub struct ChallengermodeLifecycle {
    is_match_started: bool,
}

impl ChallengermodeLifecycle {
    pub fn new() -> ChallengermodeLifecycle {
        ChallengermodeLifecycle { is_match_started: false }
    }
}

impl Default for ChallengermodeLifecycle {
    fn default() -> Self {
        ChallengermodeLifecycle::new()
    }
}

impl Lifecycle for ChallengermodeLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_match_started_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        old_is_started: bool,
        new_is_started: bool,
    ) {
        if !old_is_started && new_is_started && !core.is_knife_round(view) {
            self.is_match_started = true;
            core.process_match_start(view);
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
        self.is_match_started = false;
    }
}
