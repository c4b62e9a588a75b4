//! Purity properties of the economy classifier.

use cma_core::analysis::{classify_player_economy, classify_team_economy};
use cma_core::constants::{EconomyType, Side};
use proptest::prelude::*;

fn playing_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Terrorist), Just(Side::CounterTerrorist)]
}

fn previous_winner() -> impl Strategy<Value = Option<Side>> {
    prop_oneof![
        Just(None),
        Just(Some(Side::Unassigned)),
        Just(Some(Side::Terrorist)),
        Just(Some(Side::CounterTerrorist)),
    ]
}

proptest! {
    #[test]
    fn player_classification_is_pure(
        is_first_round in any::<bool>(),
        overtime_count in 0i32..4,
        equipment_value in 0i32..12_000,
        side in playing_side(),
        winner in previous_winner(),
        money in 0i32..16_000,
    ) {
        let first = classify_player_economy(
            is_first_round, overtime_count, equipment_value, side, winner, money,
        );
        let second = classify_player_economy(
            is_first_round, overtime_count, equipment_value, side, winner, money,
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn team_classification_is_pure(
        is_first_round in any::<bool>(),
        overtime_count in 0i32..4,
        equipment_value in 0i32..60_000,
        side in playing_side(),
        winner in previous_winner(),
        money in 0i32..80_000,
        player_count in 1i32..6,
    ) {
        let first = classify_team_economy(
            is_first_round, overtime_count, equipment_value, side, winner, money, player_count,
        );
        let second = classify_team_economy(
            is_first_round, overtime_count, equipment_value, side, winner, money, player_count,
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn first_round_without_overtime_is_always_pistol(
        equipment_value in 0i32..12_000,
        side in playing_side(),
        winner in previous_winner(),
        money in 0i32..16_000,
    ) {
        let economy = classify_player_economy(true, 0, equipment_value, side, winner, money);
        prop_assert_eq!(economy, EconomyType::Pistol);
    }

    #[test]
    fn low_equipment_is_always_eco_outside_pistol_rounds(
        overtime_count in 0i32..4,
        equipment_value in 0i32..=1_000,
        side in playing_side(),
        winner in previous_winner(),
        money in 0i32..16_000,
    ) {
        let economy = classify_player_economy(
            false, overtime_count, equipment_value, side, winner, money,
        );
        prop_assert_eq!(economy, EconomyType::Eco);
    }
}
