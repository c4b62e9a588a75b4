//! Match lifecycle state machines, one per hosting platform.
//!
//! Platforms disagree on how a match starts, restarts, pauses and ends. Each
//! strategy implements the shared capability contract below and is selected
//! once at construction from the detected source. The canonical shape is
//! "waiting for start" -> live -> (reset signal) -> "waiting for start",
//! with platform-specific pause cycles in between.

mod challengermode;
mod ebot;
mod esea;
mod esplay;
mod esportal;
mod faceit;
mod fastcup;
mod five_eplay;
mod matchzy;
mod renown;
mod valve;

use crate::constants::{DemoSource, GamePhase, RoundEndReason, Side};
use crate::source::{
    GameRulesProp, GameStateView, Participant, PlayerProp, PlayerResourceProp, PropValue, TeamProp,
};

use super::core::Core;

pub use challengermode::ChallengermodeLifecycle;
pub use ebot::EbotLifecycle;
pub use esea::EseaLifecycle;
pub use esplay::EsplayLifecycle;
pub use esportal::EsportalLifecycle;
pub use faceit::FaceitLifecycle;
pub use fastcup::FastcupLifecycle;
pub use five_eplay::FiveEPlayLifecycle;
pub use matchzy::MatchZyLifecycle;
pub use renown::RenownLifecycle;
pub use valve::ValveLifecycle;

/// Shared lifecycle capability contract.
///
/// Default hook implementations reproduce the behavior most platforms share;
/// strategies override only what their platform does differently.
#[allow(unused_variables)]
pub trait Lifecycle {
    /// Whether real play is currently live. Facts are discarded, not
    /// buffered, while this is false.
    fn match_started(&self) -> bool;

    fn on_match_start(&mut self, core: &mut Core, view: &dyn GameStateView) {}

    fn on_match_started_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        old_is_started: bool,
        new_is_started: bool,
    ) {
    }

    fn on_warmup_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        old_is_warmup: bool,
        new_is_warmup: bool,
    ) {
    }

    fn on_game_half_ended(&mut self, core: &mut Core, view: &dyn GameStateView) {}

    fn on_game_phase_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        new_phase: GamePhase,
    ) {
    }

    /// Default: while live and once at least one round is committed, advance
    /// to a new round. Before that the first round context is still current.
    fn on_round_start(&mut self, core: &mut Core, view: &dyn GameStateView) {
        if !self.match_started() {
            return;
        }

        if core.match_data.rounds.is_empty() {
            return;
        }

        core.create_round(view);
    }

    fn on_round_end(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        winner: Side,
        reason: RoundEndReason,
        message: &str,
    ) {
    }

    /// Default: while live, commit the current round.
    fn on_round_end_official(&mut self, core: &mut Core, view: &dyn GameStateView) {
        if !self.match_started() {
            return;
        }

        core.commit_current_round();
    }

    /// Default: freeze time entry refreshes the economy snapshots (buying can
    /// begin slightly before the round start notification); freeze time exit
    /// stamps the practical start of play.
    fn on_freeze_time_changed(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        is_freezetime: bool,
    ) {
        if is_freezetime {
            core.create_players_economies(view);
        } else {
            core.current_round.freeze_time_end_tick = view.current_tick();
            core.current_round.freeze_time_end_frame = view.current_frame();
            core.last_freeze_time_end_tick = view.current_tick();
        }
    }

    fn on_win_panel_match(&mut self, core: &mut Core, view: &dyn GameStateView) {}

    fn on_say_text(&mut self, core: &mut Core, view: &dyn GameStateView, text: &str) {}

    fn on_player_connect(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        player: &Participant,
    ) {
    }

    fn on_game_rules_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: GameRulesProp,
        value: &PropValue,
    ) {
    }

    fn on_player_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        entity_id: i32,
        prop: PlayerProp,
        value: &PropValue,
    ) {
    }

    fn on_team_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        entity_id: i32,
        prop: TeamProp,
        value: &PropValue,
    ) {
    }

    fn on_player_resource_prop(
        &mut self,
        core: &mut Core,
        view: &dyn GameStateView,
        prop: PlayerResourceProp,
        value: &PropValue,
    ) {
    }

    /// Runs once after the source is exhausted. Default: keep the in-flight
    /// round so truncated recordings finalize with partial data.
    fn post_process(&mut self, core: &mut Core) {
        if (core.match_data.rounds.len() as i32) < core.current_round.number {
            core.commit_current_round();
        }
    }
}

/// Builds the lifecycle strategy for a supported source.
///
/// Callers must have rejected unsupported sources already; an unsupported
/// source here falls back to the Valve rules, which is the closest thing to a
/// neutral default.
pub fn create_lifecycle(source: DemoSource) -> Box<dyn Lifecycle> {
    match source {
        DemoSource::Faceit => Box::new(FaceitLifecycle::new()),
        DemoSource::Esea => Box::new(EseaLifecycle::new()),
        DemoSource::Ebot => Box::new(EbotLifecycle::new()),
        DemoSource::Challengermode => Box::new(ChallengermodeLifecycle::new()),
        DemoSource::Esportal => Box::new(EsportalLifecycle::new()),
        DemoSource::Fastcup => Box::new(FastcupLifecycle::new()),
        DemoSource::FiveEPlay => Box::new(FiveEPlayLifecycle::new()),
        DemoSource::Esplay => Box::new(EsplayLifecycle::new()),
        DemoSource::Renown => Box::new(RenownLifecycle::new()),
        DemoSource::MatchZy => Box::new(MatchZyLifecycle::new()),
        DemoSource::Valve
        | DemoSource::PerfectWorld
        | DemoSource::Esl
        | DemoSource::PopFlash
        | DemoSource::Cevo
        | DemoSource::Gamersclub
        | DemoSource::Unknown => Box::new(ValveLifecycle::new()),
    }
}
