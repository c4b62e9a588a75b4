use crate::source::GameStateView;

use super::{Core, Lifecycle};

/// Esplay rules: follow the match-started flag in both directions.
pub struct EsplayLifecycle {
    is_match_started: bool,
}

impl EsplayLifecycle {
    pub fn new() -> EsplayLifecycle {
        EsplayLifecycle { is_match_started: false }
    }
}

impl Default for EsplayLifecycle {
    fn default() -> Self {
        EsplayLifecycle::new()
    }
}

impl Lifecycle for EsplayLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
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
