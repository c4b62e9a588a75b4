//! Clutch detection and trade-kill flagging scenarios.

mod common;

use cma_core::constants::{DemoSource, EquipmentKind, Side};
use cma_core::source::GameEvent;
use cma_core::{AnalyzeOptions, Analyzer};

use common::*;

/// Analyzer on a platform whose started flag is directly controllable.
fn live_analyzer(state: &mut FakeState) -> Analyzer {
    let mut analyzer =
        Analyzer::new(&header(DemoSource::Esplay), Some(DemoSource::Esplay), &AnalyzeOptions::default())
            .expect("analyzer construction");
    state.advance_ticks(1000);
    analyzer.process_event(state, &GameEvent::RoundStart).unwrap();
    analyzer
        .process_event(
            state,
            &GameEvent::MatchStartedChanged { old_is_started: false, new_is_started: true },
        )
        .unwrap();
    assert!(analyzer.match_started());
    analyzer
}

#[test]
fn clutch_opens_when_one_side_drops_to_a_single_player() {
    let mut state = FakeState::new();
    state.participants = roster(2, 3);
    let mut analyzer = live_analyzer(&mut state);

    // T kills the second CT: 1vs3 for the remaining CT.
    let kill = state.kill(101, 2, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    {
        let clutches = &analyzer.match_data().clutches;
        assert_eq!(clutches.len(), 1);
        assert_eq!(clutches[0].side, Side::CounterTerrorist);
        assert_eq!(clutches[0].opponent_count, 3);
        assert_eq!(clutches[0].clutcher_steam_id, 1);
        assert!(clutches[0].clutcher_survived);
    }

    // The clutcher fights back; when it tightens to 1v1 a second clutch
    // opens for the other side's last player.
    state.advance_seconds(10.0);
    let kill = state.kill(1, 101, EquipmentKind::M4A4);
    analyzer.process_event(&state, &kill).unwrap();
    assert_eq!(analyzer.match_data().clutches.len(), 1);

    state.advance_seconds(10.0);
    let kill = state.kill(1, 102, EquipmentKind::M4A4);
    analyzer.process_event(&state, &kill).unwrap();

    {
        let clutches = &analyzer.match_data().clutches;
        assert_eq!(clutches.len(), 2);
        assert_eq!(clutches[1].side, Side::Terrorist);
        assert_eq!(clutches[1].opponent_count, 1);
        assert_eq!(clutches[1].clutcher_steam_id, 103);
    }

    // The clutcher closes it out; resolution follows the round winner.
    state.advance_seconds(10.0);
    let kill = state.kill(1, 103, EquipmentKind::M4A4);
    analyzer.process_event(&state, &kill).unwrap();
    state.advance_seconds(1.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();

    let clutches = &analyzer.match_data().clutches;
    assert_eq!(clutches[0].clutcher_kill_count, 3);
    assert!(clutches[0].has_won);
    assert!(clutches[0].clutcher_survived);
    assert!(!clutches[1].has_won);
    assert!(!clutches[1].clutcher_survived);
}

#[test]
fn single_kill_down_to_one_on_one_opens_both_clutches() {
    // Regression coverage for the gating: when one kill reduces the game to
    // 1v1 with no clutch open yet, the first clutch opens for the CT side
    // checked first and the second for the opposing survivor.
    let mut state = FakeState::new();
    state.participants = two_on_two();
    state.player_mut(4).is_alive = false;
    let mut analyzer = live_analyzer(&mut state);

    let kill = state.kill(3, 2, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    let clutches = &analyzer.match_data().clutches;
    assert_eq!(clutches.len(), 2);
    assert_eq!(clutches[0].side, Side::CounterTerrorist);
    assert_eq!(clutches[0].opponent_count, 1);
    assert_eq!(clutches[1].side, Side::Terrorist);
    assert_eq!(clutches[1].opponent_count, 1);
}

#[test]
fn at_most_two_clutches_exist_per_round() {
    let mut state = FakeState::new();
    state.participants = roster(3, 3);
    let mut analyzer = live_analyzer(&mut state);

    let script: &[(u64, u64)] = &[(101, 2), (101, 3), (1, 101), (1, 102), (103, 1)];
    for (killer, victim) in script {
        state.advance_seconds(7.0);
        let kill = state.kill(*killer, *victim, EquipmentKind::Ak47);
        analyzer.process_event(&state, &kill).unwrap();
    }
    analyzer.process_event(&state, &round_end(Side::Terrorist)).unwrap();

    assert!(analyzer.match_data().clutches.len() <= 2);
}

#[test]
fn revenge_after_the_delay_is_a_trade_kill() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut analyzer = live_analyzer(&mut state);

    let kill = state.kill(1, 3, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    // 6 seconds later the killer is avenged: more than the delay has
    // elapsed since the earlier kill, so it counts as a trade.
    state.advance_seconds(6.0);
    let kill = state.kill(4, 1, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    let kills = &analyzer.match_data().kills;
    assert_eq!(kills.len(), 2);
    assert!(kills[0].is_trade_death);
    assert!(!kills[0].is_trade_kill);
    assert!(kills[1].is_trade_kill);
    assert!(!kills[1].is_trade_death);
}

#[test]
fn quick_revenge_is_not_a_trade_kill() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut analyzer = live_analyzer(&mut state);

    let kill = state.kill(1, 3, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    // Only 2 seconds elapsed: the delay condition requires at least 5.
    state.advance_seconds(2.0);
    let kill = state.kill(4, 1, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    let kills = &analyzer.match_data().kills;
    assert!(!kills[0].is_trade_death);
    assert!(!kills[1].is_trade_kill);
}

#[test]
fn trade_flags_do_not_cross_rounds() {
    let mut state = FakeState::new();
    state.participants = two_on_two();
    let mut analyzer = live_analyzer(&mut state);

    let kill = state.kill(1, 3, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();
    state.advance_seconds(30.0);
    analyzer.process_event(&state, &round_end(Side::CounterTerrorist)).unwrap();
    state.advance_seconds(4.0);
    analyzer.process_event(&state, &GameEvent::RoundEndOfficial).unwrap();

    // Next round: everyone is back.
    for participant in &mut state.participants {
        participant.is_alive = true;
    }
    analyzer.process_event(&state, &GameEvent::RoundStart).unwrap();
    assert_eq!(analyzer.current_round().number, 2);

    state.advance_seconds(20.0);
    let kill = state.kill(4, 1, EquipmentKind::Ak47);
    analyzer.process_event(&state, &kill).unwrap();

    let kills = &analyzer.match_data().kills;
    assert!(!kills[0].is_trade_death, "a kill from a previous round must not be traded");
    assert!(!kills[1].is_trade_kill);
}
