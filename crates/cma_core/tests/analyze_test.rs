//! End-to-end runs through the top-level entry point, including truncated
//! streams and derived statistics determinism.

mod common;

use cma_core::analysis::PlayerStats;
use cma_core::constants::{DemoSource, EquipmentKind, Side, TeamLetter};
use cma_core::source::GameEvent;
use cma_core::{analyze, AnalyzeOptions, MatchData};
use sha2::{Digest, Sha256};

use common::*;

fn one_round_script(state: &mut FakeState) -> Vec<GameEvent> {
    vec![
        GameEvent::RoundStart,
        GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
        GameEvent::RoundFreezetimeChanged { new_is_freezetime: true },
        GameEvent::RoundFreezetimeChanged { new_is_freezetime: false },
        kill_event(&state.player(1), &state.player(3), EquipmentKind::M4A4),
        kill_event(&state.player(1), &state.player(4), EquipmentKind::M4A4),
        round_end(Side::CounterTerrorist),
        GameEvent::RoundEndOfficial,
    ]
}

fn run_one_round_match() -> MatchData {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let events = one_round_script(&mut state);
    let mut source = ScriptedSource::new(header(DemoSource::Esplay), state, events);
    analyze(&mut source, &AnalyzeOptions::default()).expect("analysis")
}

#[test]
fn analyze_produces_a_finalized_match() {
    let match_data = run_one_round_match();

    assert_eq!(match_data.rounds.len(), 1);
    let round = &match_data.rounds[0];
    assert_eq!(round.number, 1);
    assert_eq!(round.winner_side, Some(Side::CounterTerrorist));
    assert_eq!(round.team_a_side, round.team_b_side.opposite());

    assert_eq!(match_data.kills.len(), 2);
    assert_eq!(match_data.team_a.score, 1);
    assert_eq!(match_data.team_b.score, 0);
    assert_eq!(match_data.winner, Some(TeamLetter::A));
    assert_eq!(match_data.players.len(), 4);
}

#[test]
fn truncated_streams_finalize_with_partial_data() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut events = one_round_script(&mut state);
    // The recording is cut before the official round end.
    events.pop();
    let mut source =
        ScriptedSource::new(header(DemoSource::Esplay), state, events).truncated();

    let match_data = analyze(&mut source, &AnalyzeOptions::default()).expect("soft stop");

    // The in-flight round is kept and finalized with what was received.
    assert_eq!(match_data.rounds.len(), 1);
    assert_eq!(match_data.kills.len(), 2);
}

#[test]
fn round_numbers_are_contiguous_from_one() {
    let mut state = FakeState::new();
    state.participants = two_on_two();

    let mut events = vec![
        GameEvent::RoundStart,
        GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
    ];
    for _ in 0..5 {
        events.push(kill_event(&state.player(1), &state.player(3), EquipmentKind::M4A4));
        events.push(round_end(Side::CounterTerrorist));
        events.push(GameEvent::RoundEndOfficial);
        events.push(GameEvent::RoundStart);
    }
    events.push(round_end(Side::Terrorist));
    events.push(GameEvent::RoundEndOfficial);

    let mut source = ScriptedSource::new(header(DemoSource::Esplay), state, events);
    let match_data = analyze(&mut source, &AnalyzeOptions::default()).expect("analysis");

    assert_eq!(match_data.rounds.len(), 6);
    for (index, round) in match_data.rounds.iter().enumerate() {
        assert_eq!(round.number, index as i32 + 1);
    }
}

#[test]
fn derived_statistics_are_deterministic() {
    let first = run_one_round_match();
    let second = run_one_round_match();

    let hash = |match_data: &MatchData| {
        let json = serde_json::to_vec(match_data).expect("serialization");
        let mut hasher = Sha256::new();
        hasher.update(&json);
        hasher.finalize()
    };
    assert_eq!(hash(&first), hash(&second), "finalized snapshots must be bit-identical");

    for player in first.players.values() {
        let stats_a = PlayerStats::compute(&first, player);
        let stats_b = PlayerStats::compute(&first, player);
        assert_eq!(stats_a, stats_b, "stats must be idempotent");
    }
}

#[test]
fn player_stats_reflect_the_ledger() {
    let match_data = run_one_round_match();
    let shooter = &match_data.players[&1];
    let stats = PlayerStats::compute(&match_data, shooter);

    assert_eq!(stats.kill_count, 2);
    assert_eq!(stats.death_count, 0);
    assert_eq!(stats.two_kill_count, 1);
    assert_eq!(stats.one_kill_count, 0);
    assert_eq!(stats.first_kill_count, 1);
    // Got kills and survived the only round.
    assert!((stats.kast - 100.0).abs() < f32::EPSILON);
    assert!(stats.hltv_rating > 0.0);
    assert!(stats.hltv_rating2 > 0.0);

    let victim = &match_data.players[&3];
    let victim_stats = PlayerStats::compute(&match_data, victim);
    assert_eq!(victim_stats.death_count, 1);
    assert_eq!(victim_stats.first_death_count, 1);
    assert!(victim_stats.kast < 100.0);
}
