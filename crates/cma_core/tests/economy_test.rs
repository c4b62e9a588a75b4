//! Economy snapshot lifecycle: created at freeze time start, stabilized a
//! fixed delay after freeze time end.

mod common;

use cma_core::constants::{DemoSource, EconomyType, EquipmentKind, Side};
use cma_core::source::GameEvent;
use cma_core::{AnalyzeOptions, Analyzer};

use common::*;

fn freezetime(value: bool) -> GameEvent {
    GameEvent::RoundFreezetimeChanged { new_is_freezetime: value }
}

#[test]
fn economies_are_classified_after_the_stabilization_delay() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut analyzer =
        Analyzer::new(&header(DemoSource::Esplay), Some(DemoSource::Esplay), &AnalyzeOptions::default())
            .unwrap();

    state.advance_ticks(1000);
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    analyzer
        .process_event(
            &state,
            &GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
        )
        .unwrap();

    // Round 1: freeze time, pistols only.
    analyzer.process_event(&state, &freezetime(true)).unwrap();
    state.advance_seconds(15.0);
    analyzer.process_event(&state, &freezetime(false)).unwrap();
    state.advance_seconds(8.0);
    analyzer.process_event(&state, &GameEvent::FrameDone).unwrap();

    let economies = &analyzer.match_data().player_economies;
    assert_eq!(economies.len(), 4);
    assert!(economies.iter().all(|economy| economy.economy_type == EconomyType::Pistol));

    // Terrorists win the pistol round.
    state.advance_seconds(40.0);
    let kill = state.kill(3, 1, EquipmentKind::Glock);
    analyzer.process_event(&state, &kill).unwrap();
    let kill = state.kill(3, 2, EquipmentKind::Glock);
    analyzer.process_event(&state, &kill).unwrap();
    analyzer.process_event(&state, &round_end(Side::Terrorist)).unwrap();
    state.advance_seconds(4.0);
    analyzer.process_event(&state, &GameEvent::RoundEndOfficial).unwrap();

    // Round 2: broke CTs force, rich Ts full-buy.
    for participant in &mut state.participants {
        participant.is_alive = true;
    }
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    assert_eq!(analyzer.current_round().number, 2);

    analyzer.process_event(&state, &freezetime(true)).unwrap();
    for id in [1, 2] {
        let ct = state.player_mut(id);
        ct.money = 300;
        ct.equipment_value = 2000;
    }
    for id in [3, 4] {
        let t = state.player_mut(id);
        t.money = 2500;
        t.equipment_value = 4200;
    }
    state.advance_seconds(15.0);
    analyzer.process_event(&state, &freezetime(false)).unwrap();
    state.advance_seconds(8.0);
    analyzer.process_event(&state, &GameEvent::FrameDone).unwrap();

    let economies = &analyzer.match_data().player_economies;
    let economy_of = |steam_id: u64| {
        economies
            .iter()
            .find(|economy| economy.round_number == 2 && economy.steam_id == steam_id)
            .unwrap()
    };

    // Lost the previous round with almost no money left: forced buy.
    assert_eq!(economy_of(1).economy_type, EconomyType::ForceBuy);
    // 4200 is a full buy on the T side, whose threshold is lower.
    assert_eq!(economy_of(3).economy_type, EconomyType::Full);
}

#[test]
fn low_equipment_after_first_round_is_an_eco() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut analyzer =
        Analyzer::new(&header(DemoSource::Esplay), Some(DemoSource::Esplay), &AnalyzeOptions::default())
            .unwrap();

    state.advance_ticks(1000);
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    analyzer
        .process_event(
            &state,
            &GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
        )
        .unwrap();

    // Round 1 plays out.
    state.advance_seconds(60.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();
    state.advance_seconds(4.0);
    analyzer.process_event(&state, &GameEvent::RoundEndOfficial).unwrap();
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();

    // Round 2 with 800 equipment value: an eco, not a pistol round.
    analyzer.process_event(&state, &freezetime(true)).unwrap();
    for participant in &mut state.participants {
        participant.equipment_value = 800;
        participant.money = 5000;
    }
    state.advance_seconds(15.0);
    analyzer.process_event(&state, &freezetime(false)).unwrap();
    state.advance_seconds(8.0);
    analyzer.process_event(&state, &GameEvent::FrameDone).unwrap();

    let economies = &analyzer.match_data().player_economies;
    assert!(economies
        .iter()
        .filter(|economy| economy.round_number == 2)
        .all(|economy| economy.economy_type == EconomyType::Eco));
}

#[test]
fn team_aggregates_land_on_the_round() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.ct_equipment_value = 1400;
    state.t_equipment_value = 1500;
    state.ct_money_spent = 1000;
    state.t_money_spent = 1100;
    let mut analyzer =
        Analyzer::new(&header(DemoSource::Esplay), Some(DemoSource::Esplay), &AnalyzeOptions::default())
            .unwrap();

    state.advance_ticks(1000);
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    analyzer
        .process_event(
            &state,
            &GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
        )
        .unwrap();

    analyzer.process_event(&state, &freezetime(true)).unwrap();
    state.advance_seconds(15.0);
    analyzer.process_event(&state, &freezetime(false)).unwrap();
    state.advance_seconds(8.0);
    analyzer.process_event(&state, &GameEvent::FrameDone).unwrap();

    let round = analyzer.current_round();
    assert_eq!(round.team_a_equipment_value, 1400);
    assert_eq!(round.team_b_equipment_value, 1500);
    assert_eq!(round.team_a_money_spent, 1000);
    assert_eq!(round.team_b_money_spent, 1100);
    assert_eq!(round.team_a_economy_type, Some(EconomyType::Pistol));
    assert_eq!(round.team_b_economy_type, Some(EconomyType::Pistol));
}
