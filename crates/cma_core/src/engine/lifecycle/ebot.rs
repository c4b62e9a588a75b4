use crate::constants::{Side, WeaponName};
use crate::source::{GameStateView, PropValue, TeamProp};
use crate::text::remove_invisible_chars;

use super::{Core, Lifecycle};

/// eBot rules, the most convention-heavy platform.
///
/// Recordings are assumed live from the beginning. The strategy then walks
/// back that assumption on: knife rounds (all kills by knife), mutual
/// per-side stop requests in chat during the first round, and stop commands
/// recognizable by a round-officially-end right before a match-started rise.
/// A round start at the exact tick of the last round end is a backup restore,
/// not a new round.
pub struct EbotLifecycle {
    is_match_started: bool,
    match_start_detected: bool,
    ct_want_stop: bool,
    t_want_stop: bool,
    /// Used to detect stop command requests.
    last_round_officially_end_tick: i32,
    /// Used to detect backup restores.
    last_round_end_tick: i32,
    /// Used to detect a team switch after a possible knife round.
    players_team_change_tick: i32,
}

impl EbotLifecycle {
    pub fn new() -> EbotLifecycle {
        EbotLifecycle {
            is_match_started: true,
            match_start_detected: false,
            ct_want_stop: false,
            t_want_stop: false,
            last_round_officially_end_tick: -1,
            last_round_end_tick: -1,
            players_team_change_tick: -1,
        }
    }
}

impl Default for EbotLifecycle {
    fn default() -> Self {
        EbotLifecycle::new()
    }
}

impl Lifecycle for EbotLifecycle {
    fn match_started(&self) -> bool {
        self.is_match_started
    }

    fn on_say_text(&mut self, core: &mut Core, view: &dyn GameStateView, text: &str) {
        if core.current_round.number > 1 {
            return;
        }

        let text = remove_invisible_chars(text);
        if !self.t_want_stop {
            self.t_want_stop = text.contains("(T) want to stop");
        }
        if !self.ct_want_stop {
            self.ct_want_stop = text.contains("(CT) want to stop");
        }

        // Both sides must ask within the first round for the stop to fire.
        let is_match_stopped = self.ct_want_stop && self.t_want_stop;
        if is_match_stopped {
            self.ct_want_stop = false;
            self.t_want_stop = false;
            self.is_match_started = false;
            self.match_start_detected = false;
            core.reset(view);
        }
    }

    fn on_team_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        _entity_id: i32,
        prop: TeamProp,
        value: &PropValue,
    ) {
        if prop != TeamProp::RosterSlot {
            return;
        }

        // A possible team switch after the knife round (!switch command): the
        // roster properties change, twice at the same tick, before round 2.
        // With a !stay command they do not change at all.
        if value.is_nil() || view.current_tick() <= 1 || core.current_round.number > 1 {
            return;
        }

        if self.players_team_change_tick == view.current_tick() {
            core.reset(view);
        }
        self.players_team_change_tick = view.current_tick();
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
        if self.is_match_started && !self.match_start_detected {
            core.current_round.start_frame = view.current_frame();
            core.current_round.start_tick = view.current_tick();
            core.update_team_names(view);
            core.create_players_economies(view);
            self.match_start_detected = true;
        } else if core.match_data.rounds.is_empty() {
            self.match_start_detected = false;
        }

        // A stop command after the first round produces a round-officially-
        // end between the game restart and this match-started rise; a real
        // go-live does not.
        if self.is_match_started && core.current_round.number > 1 {
            let is_match_stopped = !core.seconds_has_passed_since_tick(
                view,
                5.0,
                self.last_round_officially_end_tick,
            );
            if is_match_stopped {
                self.is_match_started = false;
            }
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

    fn on_round_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        let is_backup_restoration = view.current_tick() == self.last_round_end_tick;
        if is_backup_restoration {
            self.is_match_started = true;
            core.reset_current_round(view);
            return;
        }

        if !self.is_match_started
            || view.current_tick() == 0
            || core.match_data.rounds.is_empty()
        {
            return;
        }

        core.create_round(view);
    }

    fn on_round_end(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        _winner: Side,
        _reason: crate::constants::RoundEndReason,
        _message: &str,
    ) {
        self.last_round_end_tick = view.current_tick();

        // A round where every kill was a knife kill is the knife round; the
        // recording starts over from scratch.
        let round_number = core.current_round.number;
        let mut knife_kill_count = 0;
        let mut kill_count = 0;
        for kill in &core.match_data.kills {
            if kill.round_number != round_number {
                continue;
            }
            if kill.weapon_name == WeaponName::Knife {
                knife_kill_count += 1;
            }
            kill_count += 1;
        }

        let is_knife_round = kill_count > 0 && kill_count == knife_kill_count;
        if is_knife_round {
            core.reset(view);
            self.is_match_started = false;
            self.match_start_detected = false;
        }
    }

    fn on_round_end_official(&mut self, core: &mut Core, view: &dyn GameStateView) {
        self.last_round_officially_end_tick = view.current_tick();
        if !self.is_match_started {
            return;
        }

        let is_backup_restoration = view.current_tick() == self.last_round_end_tick;
        if is_backup_restoration {
            return;
        }

        core.commit_current_round();
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {
        core.update_players_scores(view);
    }
}
