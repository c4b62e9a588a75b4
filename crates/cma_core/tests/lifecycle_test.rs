//! Scenario tests for the per-platform lifecycle state machines.

mod common;

use cma_core::constants::{DemoSource, Side};
use cma_core::source::{GameEvent, PropTarget, PropValue};
use cma_core::{AnalyzeOptions, Analyzer};

use common::*;

fn new_analyzer(source: DemoSource) -> Analyzer {
    Analyzer::new(&header(source), Some(source), &AnalyzeOptions::default())
        .expect("analyzer construction")
}

fn match_started_changed(old: bool, new: bool) -> GameEvent {
    GameEvent::MatchStartedChanged { old_is_started: old, new_is_started: new }
}

#[test]
fn faceit_ignores_match_start_during_knife_round() {
    let mut analyzer = new_analyzer(DemoSource::Faceit);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.set_all_money(0);
    state.advance_ticks(100);

    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    analyzer.process_event(&state, &match_started_changed(false, true)).unwrap();

    // Every playing participant has an empty wallet: this is the knife round.
    assert!(!analyzer.match_started());

    // The knife round settles and the server restarts for the real start.
    state.set_all_money(800);
    state.advance_seconds(60.0);
    analyzer.process_event(&state, &game_restart_prop(true)).unwrap();
    state.advance_seconds(3.0);
    analyzer.process_event(&state, &game_restart_prop(false)).unwrap();

    assert!(analyzer.match_started());
    assert_eq!(analyzer.current_round().start_tick, state.tick);
}

#[test]
fn faceit_starts_directly_without_knife_round() {
    let mut analyzer = new_analyzer(DemoSource::Faceit);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_ticks(500);

    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    analyzer.process_event(&state, &match_started_changed(false, true)).unwrap();

    assert!(analyzer.match_started());
    assert_eq!(analyzer.current_round().start_tick, state.tick);
}

#[test]
fn ebot_round_start_at_round_end_tick_is_a_backup_restore() {
    let mut analyzer = new_analyzer(DemoSource::Ebot);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_ticks(500);

    // eBot recordings are assumed live from the beginning.
    assert!(analyzer.match_started());

    let kill = state.kill(1, 3, cma_core::constants::EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();
    state.advance_seconds(30.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();

    // A round start at the exact round end tick restores a backup: no new
    // round, the current round context restarts in place.
    let restore_tick = state.tick;
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();

    assert!(analyzer.match_started());
    assert!(analyzer.match_data().rounds.is_empty());
    assert_eq!(analyzer.current_round().number, 1);
    assert_eq!(analyzer.current_round().start_tick, restore_tick);
    // The voided round's facts are dropped along with it.
    assert!(analyzer.match_data().kills.is_empty());
}

#[test]
fn ebot_knife_only_round_resets_everything() {
    let mut analyzer = new_analyzer(DemoSource::Ebot);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_ticks(500);

    let kill = state.kill(1, 3, cma_core::constants::EquipmentKind::Knife);
    analyzer.process_event(&state, &kill).unwrap();
    let kill = state.kill(1, 4, cma_core::constants::EquipmentKind::Knife);
    analyzer.process_event(&state, &kill).unwrap();
    state.advance_seconds(20.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();

    assert!(!analyzer.match_started());
    assert!(analyzer.match_data().kills.is_empty());
    assert!(analyzer.match_data().rounds.is_empty());
}

#[test]
fn ebot_mutual_stop_requests_reset_the_match() {
    let mut analyzer = new_analyzer(DemoSource::Ebot);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_ticks(500);

    let say = |text: &str| GameEvent::SayText { text: text.to_string() };
    analyzer.process_event(&state, &say("\u{1}Server: (T) want to stop the match")).unwrap();
    assert!(analyzer.match_started());

    analyzer.process_event(&state, &say("\u{1}Server: (CT) want to stop the match")).unwrap();
    assert!(!analyzer.match_started());
    assert!(analyzer.match_data().rounds.is_empty());
}

#[test]
fn esea_goes_live_on_the_third_consecutive_restart() {
    let mut analyzer = new_analyzer(DemoSource::Esea);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_seconds(120.0);

    analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    assert!(!analyzer.match_started());

    state.advance_seconds(1.0);
    analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    assert!(!analyzer.match_started());

    state.advance_seconds(1.0);
    analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    assert!(analyzer.match_started());
    assert_eq!(analyzer.current_round().start_tick, state.tick);
}

#[test]
fn esea_restarts_spaced_out_do_not_go_live() {
    let mut analyzer = new_analyzer(DemoSource::Esea);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_seconds(120.0);

    for _ in 0..3 {
        analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
        state.advance_seconds(10.0);
    }

    assert!(!analyzer.match_started());
}

#[test]
fn esea_detects_team_swap_from_simultaneous_side_updates() {
    let mut analyzer = new_analyzer(DemoSource::Esea);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_seconds(120.0);

    // LO3.
    analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    for _ in 0..2 {
        state.advance_seconds(1.0);
        analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    }
    assert!(analyzer.match_started());

    // Play one round so a swap can be meaningful.
    let kill = state.kill(1, 3, cma_core::constants::EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();
    state.advance_seconds(30.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();
    state.advance_seconds(5.0);
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    assert_eq!(analyzer.match_data().rounds.len(), 1);

    // All four players' side properties land on one tick: halftime swap.
    state.advance_seconds(10.0);
    let side_update = |entity_id: i32, side_number: i64| GameEvent::PropertyChanged {
        target: PropTarget::PlayerController { entity_id },
        path: "m_iTeamNum".to_string(),
        value: PropValue::Int(side_number),
    };
    analyzer.process_event(&state, &side_update(1, 2)).unwrap();
    analyzer.process_event(&state, &side_update(2, 2)).unwrap();
    analyzer.process_event(&state, &side_update(3, 3)).unwrap();
    analyzer.process_event(&state, &side_update(4, 3)).unwrap();

    // The swap applies at the next LO3.
    state.advance_seconds(30.0);
    analyzer.process_event(&state, &game_restart_prop(true)).unwrap();
    analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    for _ in 0..2 {
        state.advance_seconds(1.0);
        analyzer.process_event(&state, &GameEvent::MatchStart).unwrap();
    }

    assert!(analyzer.match_started());
    assert_eq!(analyzer.match_data().team_a.current_side, Side::Terrorist);
    assert_eq!(analyzer.match_data().team_b.current_side, Side::CounterTerrorist);
    assert_eq!(analyzer.current_round().team_a_side, Side::Terrorist);
}

#[test]
fn matchzy_backup_restore_pauses_and_resumes() {
    let mut analyzer = new_analyzer(DemoSource::MatchZy);
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.advance_ticks(500);
    state.total_rounds_played = 3;

    assert!(analyzer.match_started());

    let rules_prop = |path: &str, value: PropValue| GameEvent::PropertyChanged {
        target: PropTarget::GameRules,
        path: path.to_string(),
        value,
    };

    // A draw reported with a spectator winner marks a backup restore.
    analyzer
        .process_event(&state, &rules_prop("m_pGameRules.m_iRoundEndWinnerTeam", PropValue::Int(1)))
        .unwrap();
    analyzer
        .process_event(&state, &rules_prop("m_pGameRules.m_eRoundEndReason", PropValue::Int(10)))
        .unwrap();
    assert!(!analyzer.match_started());

    // The match resumes when the waiting-for-resume flag clears.
    state.advance_seconds(45.0);
    analyzer
        .process_event(
            &state,
            &rules_prop("m_pGameRules.m_bMatchWaitingForResume", PropValue::Bool(false)),
        )
        .unwrap();
    assert!(analyzer.match_started());
    assert_eq!(analyzer.current_round().start_tick, state.tick);
}

#[test]
fn unsupported_sources_are_rejected_before_processing() {
    let result = Analyzer::new(
        &header(DemoSource::Cevo),
        Some(DemoSource::Cevo),
        &AnalyzeOptions::default(),
    );
    assert!(result.is_err());

    let result = Analyzer::new(
        &header(DemoSource::Gamersclub),
        Some(DemoSource::Gamersclub),
        &AnalyzeOptions::default(),
    );
    assert!(result.is_err());

    let mut pov_header = header(DemoSource::Valve);
    pov_header.demo_type = cma_core::constants::DemoType::Pov;
    let result = Analyzer::new(&pov_header, Some(DemoSource::Valve), &AnalyzeOptions::default());
    assert!(result.is_err());

    let result = Analyzer::new(&header(DemoSource::Valve), None, &AnalyzeOptions::default());
    assert!(result.is_err());
}
