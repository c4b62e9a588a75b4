use crate::source::GameStateView;

use super::{Core, Lifecycle};

/// Esportal rules: the match-started flag rising edge is trustworthy.
pub struct EsportalLifecycle {
    is_match_started: bool,
}

impl EsportalLifecycle {
    pub fn new() -> EsportalLifecycle {
        EsportalLifecycle { is_match_started: false }
    }
}

impl Default for EsportalLifecycle {
    fn default() -> Self {
        EsportalLifecycle::new()
    }
}

impl Lifecycle for EsportalLifecycle {
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
        if !old_is_started && new_is_started {
            self.is_match_started = true;
            core.process_match_start(view);
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
    }
}
