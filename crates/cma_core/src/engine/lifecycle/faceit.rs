use crate::constants::TeamLetter;
use crate::source::{GameRulesProp, GameStateView, PropValue};

use super::{Core, Lifecycle};

/// FACEIT rules.
///
/// The match-started flag also rises for the customary free knife round,
/// recognizable by every playing participant having an empty wallet. When
/// that start is ignored, the genuine start is detected later through the
/// restart flag dropping from true to false.
pub struct FaceitLifecycle {
    is_match_started: bool,
    is_restarting: bool,
}

impl FaceitLifecycle {
    pub fn new() -> FaceitLifecycle {
        FaceitLifecycle { is_match_started: false, is_restarting: false }
    }

    fn start_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        self.is_match_started = true;

        // Some players may have joined the wrong team when entering the
        // server; fix their registry entries now that sides are final.
        for participant in view.playing_participants() {
            if let Some(player) = core.match_data.players.get_mut(&participant.steam_id) {
                player.team = if core.match_data.team_a.current_side == participant.side {
                    TeamLetter::A
                } else {
                    TeamLetter::B
                };
            }
        }

        core.current_round.start_frame = view.current_frame();
        core.current_round.start_tick = view.current_tick();
        core.current_round.team_a_side = core.match_data.team_a.current_side;
        core.current_round.team_b_side = core.match_data.team_b.current_side;
        core.update_team_names(view);
        core.create_players_economies(view);
    }
}

impl Default for FaceitLifecycle {
    fn default() -> Self {
        FaceitLifecycle::new()
    }
}

impl Lifecycle for FaceitLifecycle {
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
            self.start_match(core, view);
        }
    }

    fn on_game_rules_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
        // Knife round case: the ignored start is followed by a restart once
        // sides are settled; the true->false transition is the real start.
        if prop == GameRulesProp::GameRestart {
            let new_is_restarting = value.as_bool();
            if self.is_restarting && !new_is_restarting && !self.is_match_started {
                self.start_match(core, view);
            }
            self.is_restarting = new_is_restarting;
        }
    }

    fn on_freeze_time_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        is_freezetime: bool,
    ) {
        if !self.is_match_started {
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

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
        self.is_match_started = false;
    }
}
