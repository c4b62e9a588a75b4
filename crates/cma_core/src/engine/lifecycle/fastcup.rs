use crate::source::{GameRulesProp, GameStateView, PropValue};

use super::{Core, Lifecycle};

/// Fastcup rules.
///
/// The match really starts when the warmup is over and players can buy;
/// while the "terrorists can't buy" property is set it is the knife round.
pub struct FastcupLifecycle {
    is_match_started: bool,
}

impl FastcupLifecycle {
    pub fn new() -> FastcupLifecycle {
        FastcupLifecycle { is_match_started: false }
    }
}

impl Default for FastcupLifecycle {
    fn default() -> Self {
        FastcupLifecycle::new()
    }
}

impl Lifecycle for FastcupLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_game_rules_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
        if prop != GameRulesProp::TerroristsCantBuy {
            return;
        }

        if view.is_warmup_period() {
            return;
        }

        let players_can_buy = !value.as_bool();
        if players_can_buy && !self.is_match_started {
            self.is_match_started = true;
            core.process_match_start(view);
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
        self.is_match_started = false;
    }
}
