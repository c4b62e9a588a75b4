//! The orchestrator: wires the external event source to the match state,
//! dispatches notifications in arrival order, and runs post-processing once
//! the source is exhausted.

use tracing::warn;

use crate::constants::{BombSite, DemoSource, DemoType, GamePhase, RoundEndReason, RoundWinStatus, Side};
use crate::error::{AnalyzerError, Result};
use crate::models::{ChatMessage, ChickenDeath, MatchData, PlayerFlashed};
use crate::source::{
    property_map, DemoHeader, EventSource, GameEvent, GameRulesProp, GameStateView,
    PlantedC4Prop, PropTarget, PropValue, WarnKind,
};

use super::core::{Core, EQUIPMENT_VALUE_DELAY_SECONDS};
use super::lifecycle::{create_lifecycle, Lifecycle};

/// Schema-integrity warnings tolerated before the stream is presumed
/// unreliable.
const MAX_GAME_EVENT_DESCRIPTOR_WARNINGS: i32 = 20;

/// Options of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Overrides the source detected by the decoder.
    pub source: Option<DemoSource>,
    /// Record per-frame position samples. Expensive; off by default.
    pub include_positions: bool,
}

/// Analyzes a decoded recording end-to-end and returns the finalized match.
///
/// A truncated stream is a soft stop: everything received is kept and
/// finalized with partial data. An unsupported platform is rejected before
/// any event is processed.
pub fn analyze(source: &mut dyn EventSource, options: &AnalyzeOptions) -> Result<MatchData> {
    let demo_source = options.source.or(source.header().detected_source);
    let mut analyzer = Analyzer::new(source.header(), demo_source, options)?;

    loop {
        match source.next_event() {
            Ok(Some(event)) => analyzer.process_event(source.view(), &event)?,
            Ok(None) => break,
            Err(error) if error.is_truncation() => {
                // Depending on how far we got there may still be usable data.
                warn!("stream ended unexpectedly, finalizing with partial data");
                break;
            }
            Err(error) => return Err(error.into()),
        }
    }

    Ok(analyzer.finalize(source.header()))
}

/// Event-driven match analyzer. Owns the fact ledgers and round context
/// lifetime and delegates lifecycle decisions to the platform strategy.
pub struct Analyzer {
    core: Core,
    lifecycle: Box<dyn Lifecycle>,
}

impl Analyzer {
    pub fn new(
        header: &DemoHeader,
        source: Option<DemoSource>,
        options: &AnalyzeOptions,
    ) -> Result<Analyzer> {
        let source = match source {
            Some(DemoSource::Unknown) | None => return Err(AnalyzerError::UnknownSource),
            Some(source) => source,
        };

        if header.is_source2 && header.demo_type == DemoType::Pov {
            return Err(AnalyzerError::Cs2PovDemosNotSupported);
        }

        match source {
            DemoSource::Cevo | DemoSource::Gamersclub => {
                // Round detection is known unreliable on these platforms.
                return Err(AnalyzerError::UnsupportedSource(source));
            }
            DemoSource::PopFlash if header.is_source2 => {
                return Err(AnalyzerError::Cs2PopFlashDemosNotSupported);
            }
            _ => {}
        }

        let props = property_map(header.is_source2);
        let core = Core::new(source, header, props, options.include_positions);
        let lifecycle = create_lifecycle(source);

        Ok(Analyzer { core, lifecycle })
    }

    /// Whether the active lifecycle strategy considers play live.
    pub fn match_started(&self) -> bool {
        self.lifecycle.match_started()
    }

    /// Read-only view of the match accumulated so far.
    pub fn match_data(&self) -> &MatchData {
        &self.core.match_data
    }

    /// Read-only view of the current round context.
    pub fn current_round(&self) -> &crate::models::Round {
        &self.core.current_round
    }

    /// Processes one notification to completion.
    pub fn process_event(&mut self, view: &dyn GameStateView, event: &GameEvent) -> Result<()> {
        self.handle_common(view, event)?;
        self.dispatch_lifecycle(view, event);
        Ok(())
    }

    /// Finalizes the match: refreshes playback counters only known at the
    /// end of the stream, runs the strategy post-process and computes the
    /// result statistics.
    pub fn finalize(mut self, header: &DemoHeader) -> MatchData {
        self.core.match_data.tick_count = header.tick_count;
        self.core.match_data.duration_seconds = header.duration_seconds;
        self.core.match_data.frame_rate = header.frame_rate;

        self.lifecycle.post_process(&mut self.core);
        self.core.match_data.compute_result_stats();
        self.core.match_data
    }

    /// Handling shared by every platform. Runs before the strategy hooks,
    /// matching the registration order of the original event pipeline.
    fn handle_common(&mut self, view: &dyn GameStateView, event: &GameEvent) -> Result<()> {
        let started = self.lifecycle.match_started();
        let core = &mut self.core;

        match event {
            GameEvent::TickRateInfoAvailable => {
                core.match_data.tick_rate = view.tick_rate();
            }
            GameEvent::PovRecordingDetected => {
                core.match_data.demo_type = DemoType::Pov;
            }
            GameEvent::PlayerTeamChange { player } => {
                core.register_player(player);
            }
            GameEvent::RoundStart => {
                core.register_unknown_players(view);
            }
            GameEvent::ConVarsUpdated { con_vars } => {
                for (name, value) in con_vars {
                    match name.as_str() {
                        "mp_buytime" => {
                            if let Ok(buy_time) = value.parse::<i32>() {
                                if buy_time > 0 {
                                    core.buy_time_seconds = buy_time;
                                }
                            }
                        }
                        "mp_maxrounds" => {
                            // Sanity bound: some platforms set values such
                            // as 999 and the real max rounds comes from the
                            // final scores instead.
                            if let Ok(max_rounds) = value.parse::<i32>() {
                                if max_rounds > 0 && max_rounds < 99 {
                                    core.match_data.max_rounds = max_rounds;
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            GameEvent::OtherDeath { other_type, killer, weapon } => {
                if other_type == "chicken" {
                    match (killer, weapon) {
                        (Some(killer), Some(weapon)) => {
                            core.match_data.chicken_deaths.push(ChickenDeath {
                                frame: view.current_frame(),
                                tick: view.current_tick(),
                                round_number: core.current_round.number,
                                killer_steam_id: killer.steam_id,
                                weapon_name: crate::constants::weapon_name(weapon.kind),
                            });
                        }
                        _ => warn!("a chicken has been killed but the killer is unknown"),
                    }
                }
            }
            GameEvent::ItemPickup { player, weapon } => {
                if started {
                    core.on_item_pickup(view, player, *weapon);
                }
            }
            GameEvent::ItemRefund { player, weapon } => {
                if started {
                    core.flag_refunded_buy(
                        player.steam_id,
                        crate::constants::weapon_name(weapon.kind),
                    );
                }
            }
            GameEvent::PlayerHurt {
                player,
                attacker,
                weapon,
                health_damage_taken,
                armor_damage_taken,
                new_health,
                new_armor,
                hit_group,
            } => {
                if started {
                    core.on_player_hurt(
                        view,
                        player,
                        attacker.as_ref(),
                        *weapon,
                        *health_damage_taken,
                        *armor_damage_taken,
                        *new_health,
                        *new_armor,
                        *hit_group,
                    );
                }
            }
            GameEvent::FrameDone => {
                let should_compute_economy = core.last_freeze_time_end_tick != -1
                    && core.seconds_has_passed_since_tick(
                        view,
                        EQUIPMENT_VALUE_DELAY_SECONDS,
                        core.last_freeze_time_end_tick,
                    );
                if should_compute_economy {
                    core.compute_players_economies(view);
                    core.compute_team_economies(view);
                    core.last_freeze_time_end_tick = -1;
                }

                if core.include_positions && started {
                    core.sample_positions(view);
                }
            }
            GameEvent::RoundEnd { winner, reason, message } => {
                if started {
                    core.handle_round_end(view, *winner);
                    let map_name = core.match_data.map_name.clone();
                    core.current_round.update_end_reason(*reason, message, &map_name);
                }
            }
            GameEvent::ParserWarn { kind } => {
                if *kind == WarnKind::GameEventBeforeDescriptors {
                    // Recordings from servers without the event descriptor
                    // message are not analyzable past a point.
                    core.warn_count += 1;
                    if core.warn_count >= MAX_GAME_EVENT_DESCRIPTOR_WARNINGS {
                        return Err(AnalyzerError::MissingGameEventDescriptors);
                    }
                }
            }
            GameEvent::RoundEndOfficial => {
                if started {
                    core.current_round.end_officially_frame = view.current_frame();
                    core.current_round.end_officially_tick = view.current_tick();
                }
            }
            GameEvent::Kill(kill) => {
                if started {
                    core.on_kill(view, kill);
                }
            }
            GameEvent::HeGrenadeExplode(grenade) => {
                if started {
                    if let Some(fact) = core.new_grenade_detonation(view, grenade) {
                        core.match_data.he_grenades_explode.push(fact);
                    }
                }
            }
            GameEvent::FlashbangExplode(grenade) => {
                if started {
                    if let Some(fact) = core.new_grenade_detonation(view, grenade) {
                        core.match_data.flashbangs_explode.push(fact);
                    }
                }
            }
            GameEvent::SmokeStart(grenade) => {
                if started {
                    if let Some(fact) = core.new_grenade_detonation(view, grenade) {
                        core.match_data.smokes_start.push(fact);
                    }
                }
            }
            GameEvent::DecoyStart(grenade) => {
                if started {
                    if let Some(fact) = core.new_grenade_detonation(view, grenade) {
                        core.match_data.decoys_start.push(fact);
                    }
                }
            }
            GameEvent::WeaponFire {
                shooter,
                weapon,
                recoil_index,
                aim_punch_angle,
                view_punch_angle,
            } => {
                if started {
                    core.on_weapon_fire(
                        view,
                        shooter.as_ref(),
                        *weapon,
                        *recoil_index,
                        *aim_punch_angle,
                        *view_punch_angle,
                    );
                }
            }
            GameEvent::GrenadeProjectileThrow { projectile } => {
                if started {
                    core.on_grenade_projectile_throw(projectile);
                }
            }
            GameEvent::GrenadeProjectileBounce { projectile } => {
                if started {
                    if let Some(fact) = core.new_grenade_projectile_event(view, projectile) {
                        core.match_data.grenade_bounces.push(fact);
                    }
                }
            }
            GameEvent::GrenadeProjectileDestroy { projectile } => {
                if started {
                    if let Some(fact) = core.new_grenade_projectile_event(view, projectile) {
                        core.match_data.grenade_projectiles_destroy.push(fact);
                    }
                }
            }
            GameEvent::BombPlantBegin { player, site } => {
                if started {
                    core.on_bomb_plant_begin(view, player, *site);
                }
            }
            GameEvent::BombPlanted { player, site } => {
                if started {
                    core.on_bomb_planted(view, player, *site);
                }
            }
            GameEvent::BombDefuseStart { player } => {
                if started {
                    core.on_bomb_defuse_start(view, player);
                }
            }
            GameEvent::BombDefused { player, site } => {
                if started {
                    let fact = core.new_bomb_defused(view, player, *site);
                    core.match_data.bombs_defused.push(fact);
                    core.current_round.end_reason = Some(RoundEndReason::BombDefused);
                }
            }
            GameEvent::BombExplode { player, site } => {
                if started {
                    core.on_bomb_exploded(view, player, *site);
                    // The round end event sometimes reports a plain win
                    // instead of the bombing.
                    core.current_round.end_reason = Some(RoundEndReason::TargetBombed);
                }
            }
            GameEvent::PlayerFlashed { player, attacker, flash_duration } => {
                if started && !player.is_bot {
                    if let Some(attacker) = attacker {
                        core.match_data.players_flashed.push(PlayerFlashed {
                            frame: view.current_frame(),
                            tick: view.current_tick(),
                            round_number: core.current_round.number,
                            duration: *flash_duration,
                            flashed_steam_id: player.steam_id,
                            flashed_name: player.name.clone(),
                            flashed_side: player.side,
                            is_flashed_controlling_bot: player.is_controlling_bot,
                            flasher_steam_id: attacker.steam_id,
                            flasher_name: attacker.name.clone(),
                            flasher_side: attacker.side,
                            is_flasher_controlling_bot: attacker.is_controlling_bot,
                        });
                    }
                }
            }
            GameEvent::ScoreUpdated => {
                // Needed to catch the last kill of a match: the win panel is
                // announced before the score update lands.
                core.update_players_scores(view);
            }
            GameEvent::RankUpdate { steam_id, rank_old, rank_new, win_count } => {
                core.match_data.is_ranked = true;
                if let Some(player) = core.match_data.players.get_mut(steam_id) {
                    player.rank = *rank_new;
                    player.old_rank = *rank_old;
                    player.win_count = *win_count;
                }
            }
            GameEvent::RoundMvpAnnouncement => {
                if started {
                    core.update_players_scores(view);
                }
            }
            GameEvent::OvertimeNumberChanged { new_count } => {
                core.match_data.overtime_count = *new_count;
            }
            GameEvent::ChatMessage { sender, text } => {
                core.match_data.chat_messages.push(ChatMessage {
                    frame: view.current_frame(),
                    tick: view.current_tick(),
                    round_number: core.current_round.number,
                    message: text.clone(),
                    sender_steam_id: sender.steam_id,
                    sender_name: sender.name.clone(),
                    sender_side: sender.side,
                    is_sender_alive: sender.is_alive,
                });
            }
            GameEvent::HostageStateChanged { new_state, hostage } => {
                if started {
                    core.on_hostage_state_changed(view, *new_state, hostage);
                }
            }
            GameEvent::HostageRescued { hostage } => {
                if started {
                    core.on_hostage_rescued(view, hostage);
                }
            }
            GameEvent::GamePhaseChanged { new_phase } => {
                if started {
                    self.handle_game_phase_changed(view, *new_phase);
                }
            }
            GameEvent::PropertyChanged { target, path, value } => {
                self.handle_common_property(view, started, *target, path, value);
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_game_phase_changed(&mut self, _view: &dyn GameStateView, new_phase: GamePhase) {
        let core = &mut self.core;

        // The explicit team-swap notification repeats within one tick on POV
        // recordings; the phase transition is the reliable signal.
        if new_phase == GamePhase::TeamSideSwitch {
            core.match_data.swap_teams();
            // The round start notification fires before this transition on
            // first-generation recordings only; refresh the side snapshots.
            if !core.is_source2 {
                core.current_round.team_a_side = core.match_data.team_a.current_side;
                core.current_round.team_b_side = core.match_data.team_b.current_side;
            }
            core.is_first_round_of_half = true;
        }
    }

    fn handle_common_property(
        &mut self,
        view: &dyn GameStateView,
        started: bool,
        target: PropTarget,
        path: &str,
        value: &PropValue,
    ) {
        let props = self.core.props;
        let core = &mut self.core;

        match target {
            PropTarget::GameRules => {
                let Some(prop) = props.game_rules_prop(path) else { return };
                match prop {
                    GameRulesProp::RoundWinStatus => {
                        Self::handle_round_win_status(core, view, started, value);
                    }
                    GameRulesProp::CtTimeoutRemaining
                    | GameRulesProp::TerroristTimeoutRemaining => {
                        // While a timeout runs the round has not really
                        // started; keep moving the start stamps forward until
                        // the timers sit at zero.
                        let current_tick = view.current_tick();
                        if core.last_timeout_update_tick != current_tick
                            && value.as_f64() == 0.0
                            && !core.is_round_end_detected
                        {
                            core.current_round.start_tick = current_tick;
                            core.current_round.start_frame = view.current_frame();
                        }
                        core.last_timeout_update_tick = current_tick;
                    }
                    GameRulesProp::MatchAbortedEarlyReason => {
                        let reason = value.as_i64();
                        if reason != 0 {
                            warn!(reason, "match aborted early");
                            core.match_data.has_vac_live_ban = true;
                        }
                    }
                    GameRulesProp::MatchAbortedDueToPlayerBan => {
                        core.match_data.has_vac_live_ban = value.as_bool();
                    }
                    _ => {}
                }
            }
            PropTarget::PlantedC4 { entity_id } => {
                let Some(prop) = props.planted_c4_prop(path) else { return };
                Self::handle_planted_c4_prop(core, view, entity_id, prop, value);
            }
            _ => {}
        }
    }

    /// Round end fallback for recordings missing round end events, driven by
    /// the round win status property.
    fn handle_round_win_status(
        core: &mut Core,
        view: &dyn GameStateView,
        started: bool,
        value: &PropValue,
    ) {
        let status = RoundWinStatus::from_raw(value.as_i64());
        if status == RoundWinStatus::Unassigned {
            core.is_round_end_detected = false;
            return;
        }

        if !started || core.is_round_end_detected || status == RoundWinStatus::Draw {
            return;
        }

        let winner_side = match status.winner_side() {
            Some(side) => side,
            None => return,
        };

        core.handle_round_end(view, winner_side);

        // The end reason is not available here; recover it from the current
        // game state.
        if winner_side == Side::CounterTerrorist {
            let mut end_reason = RoundEndReason::CtWin;

            // A terrorist still alive means the CTs won on time.
            let terrorist_alive = view
                .playing_participants()
                .iter()
                .any(|p| p.side == Side::Terrorist && p.is_alive);
            if terrorist_alive {
                end_reason = RoundEndReason::TargetSaved;
            }

            if core.current_round_bomb_defused_exists() {
                end_reason = RoundEndReason::BombDefused;
            }

            core.current_round.end_reason = Some(end_reason);
        } else {
            let mut end_reason = RoundEndReason::TerroristsWin;

            let bomb_exploded_this_round = core
                .match_data
                .bombs_exploded
                .last()
                .is_some_and(|fact| fact.round_number == core.current_round.number);
            if bomb_exploded_this_round {
                end_reason = RoundEndReason::TargetBombed;
            }

            core.current_round.end_reason = Some(end_reason);
        }
    }

    /// Bomb defused fallback for first-generation recordings whose defuse
    /// events can be missing entirely.
    fn handle_planted_c4_prop(
        core: &mut Core,
        view: &dyn GameStateView,
        entity_id: i32,
        prop: PlantedC4Prop,
        value: &PropValue,
    ) {
        match prop {
            PlantedC4Prop::BombSite => {
                let site = match value.as_i64() {
                    0 => BombSite::A,
                    1 => BombSite::B,
                    _ => BombSite::Unknown,
                };
                core.planted_c4_sites.insert(entity_id, site);
            }
            PlantedC4Prop::DefuserHandle => {
                if let Some(defuser) = view.participant_by_handle(value.as_i64() as u64) {
                    core.planted_c4_defusers.insert(entity_id, defuser);
                }
            }
            PlantedC4Prop::IsDefused => {
                if !value.as_bool() {
                    return;
                }

                // Nothing to do when the game event was delivered.
                if core.current_round_bomb_defused_exists() {
                    return;
                }

                let site =
                    core.planted_c4_sites.get(&entity_id).copied().unwrap_or(BombSite::Unknown);
                let defuser = match core.planted_c4_defusers.get(&entity_id).cloned() {
                    Some(defuser) => defuser,
                    None => {
                        core.log_dropped_event("bomb defused without a known defuser");
                        return;
                    }
                };

                let fact = core.new_bomb_defused(view, &defuser, site);
                core.match_data.bombs_defused.push(fact);
                core.current_round.end_reason = Some(RoundEndReason::BombDefused);
            }
        }
    }

    /// Forwards the event to the active lifecycle strategy.
    fn dispatch_lifecycle(&mut self, view: &dyn GameStateView, event: &GameEvent) {
        let core = &mut self.core;
        let lifecycle = self.lifecycle.as_mut();

        match event {
            GameEvent::MatchStart => lifecycle.on_match_start(core, view),
            GameEvent::MatchStartedChanged { old_is_started, new_is_started } => {
                lifecycle.on_match_started_changed(core, view, *old_is_started, *new_is_started);
            }
            GameEvent::IsWarmupPeriodChanged { old_is_warmup, new_is_warmup } => {
                lifecycle.on_warmup_changed(core, view, *old_is_warmup, *new_is_warmup);
            }
            GameEvent::GameHalfEnded => lifecycle.on_game_half_ended(core, view),
            GameEvent::GamePhaseChanged { new_phase } => {
                lifecycle.on_game_phase_changed(core, view, *new_phase);
            }
            GameEvent::RoundStart => lifecycle.on_round_start(core, view),
            GameEvent::RoundFreezetimeChanged { new_is_freezetime } => {
                lifecycle.on_freeze_time_changed(core, view, *new_is_freezetime);
            }
            GameEvent::RoundEnd { winner, reason, message } => {
                lifecycle.on_round_end(core, view, *winner, *reason, message);
            }
            GameEvent::RoundEndOfficial => lifecycle.on_round_end_official(core, view),
            GameEvent::AnnouncementWinPanelMatch => lifecycle.on_win_panel_match(core, view),
            GameEvent::SayText { text } => lifecycle.on_say_text(core, view, text),
            GameEvent::PlayerConnect { player } => {
                lifecycle.on_player_connect(core, view, player);
            }
            GameEvent::PropertyChanged { target, path, value } => {
                let props = core.props;
                match target {
                    PropTarget::GameRules => {
                        if let Some(prop) = props.game_rules_prop(path) {
                            lifecycle.on_game_rules_prop(core, view, prop, value);
                        }
                    }
                    PropTarget::PlayerController { entity_id } => {
                        if let Some(prop) = props.player_prop(path) {
                            lifecycle.on_player_prop(core, view, *entity_id, prop, value);
                        }
                    }
                    PropTarget::Team { entity_id } => {
                        if let Some(prop) = props.team_prop(path) {
                            lifecycle.on_team_prop(core, view, *entity_id, prop, value);
                        }
                    }
                    PropTarget::PlayerResource => {
                        if let Some(prop) = props.player_resource_prop(path) {
                            lifecycle.on_player_resource_prop(core, view, prop, value);
                        }
                    }
                    PropTarget::PlantedC4 { .. } => {}
                }
            }
            _ => {}
        }
    }
}
