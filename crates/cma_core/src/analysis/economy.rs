//! Economy classification.
//!
//! Ordered rule evaluation, first match wins. Identical inputs always yield
//! the identical category.

use crate::constants::{EconomyType, Side};

/// Equipment worth at most this much per player is an eco.
const ECO_MAX_EQUIPMENT_VALUE: i32 = 1000;
/// Full-buy equipment threshold per player on the CT side.
const FULL_BUY_CT_EQUIPMENT_VALUE: i32 = 4500;
/// Full-buy equipment threshold per player on the T side, whose rifles are
/// cheaper.
const FULL_BUY_T_EQUIPMENT_VALUE: i32 = 4000;
/// Money left at most per player for a buy after a loss to count as forced.
const FORCE_BUY_MAX_MONEY: i32 = 400;

fn full_buy_threshold(side: Side) -> i32 {
    if side == Side::Terrorist {
        FULL_BUY_T_EQUIPMENT_VALUE
    } else {
        FULL_BUY_CT_EQUIPMENT_VALUE
    }
}

/// Classifies one player's spend posture for the round.
///
/// `previous_round_winner` is `None` when no round has been committed yet;
/// a committed round without a known winner passes `Some(Side::Unassigned)`.
pub fn classify_player_economy(
    is_first_round_of_half: bool,
    overtime_count: i32,
    equipment_value: i32,
    side: Side,
    previous_round_winner: Option<Side>,
    money: i32,
) -> EconomyType {
    if is_first_round_of_half && overtime_count == 0 {
        return EconomyType::Pistol;
    }

    if equipment_value <= ECO_MAX_EQUIPMENT_VALUE {
        return EconomyType::Eco;
    }

    if equipment_value >= full_buy_threshold(side) {
        return EconomyType::Full;
    }

    if let Some(winner_side) = previous_round_winner {
        if winner_side != side && money <= FORCE_BUY_MAX_MONEY {
            return EconomyType::ForceBuy;
        }
    }

    EconomyType::Semi
}

/// Classifies a whole team's spend posture for the round. Thresholds scale
/// with the number of valid (non-bot, known) players.
pub fn classify_team_economy(
    is_first_round_of_half: bool,
    overtime_count: i32,
    equipment_value: i32,
    side: Side,
    previous_round_winner: Option<Side>,
    money: i32,
    player_count: i32,
) -> EconomyType {
    if is_first_round_of_half && overtime_count == 0 {
        return EconomyType::Pistol;
    }

    if equipment_value <= ECO_MAX_EQUIPMENT_VALUE * player_count {
        return EconomyType::Eco;
    }

    if equipment_value >= full_buy_threshold(side) * player_count {
        return EconomyType::Full;
    }

    if let Some(winner_side) = previous_round_winner {
        if winner_side != side && money < FORCE_BUY_MAX_MONEY * player_count {
            return EconomyType::ForceBuy;
        }
    }

    EconomyType::Semi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_round_of_half_is_pistol() {
        let economy = classify_player_economy(true, 0, 5000, Side::CounterTerrorist, None, 800);
        assert_eq!(economy, EconomyType::Pistol);
    }

    #[test]
    fn first_round_of_overtime_is_not_pistol() {
        let economy = classify_player_economy(true, 1, 5000, Side::CounterTerrorist, None, 800);
        assert_eq!(economy, EconomyType::Full);
    }

    #[test]
    fn low_equipment_is_eco() {
        let economy = classify_player_economy(
            false,
            0,
            800,
            Side::Terrorist,
            Some(Side::Terrorist),
            5000,
        );
        assert_eq!(economy, EconomyType::Eco);
    }

    #[test]
    fn full_buy_threshold_depends_on_side() {
        let ct = classify_player_economy(false, 0, 4200, Side::CounterTerrorist, None, 2000);
        assert_eq!(ct, EconomyType::Semi);
        let t = classify_player_economy(false, 0, 4200, Side::Terrorist, None, 2000);
        assert_eq!(t, EconomyType::Full);
        let ct = classify_player_economy(false, 0, 4700, Side::CounterTerrorist, None, 2000);
        assert_eq!(ct, EconomyType::Full);
    }

    #[test]
    fn broke_loser_is_force_buy() {
        let economy = classify_player_economy(
            false,
            0,
            2000,
            Side::Terrorist,
            Some(Side::CounterTerrorist),
            300,
        );
        assert_eq!(economy, EconomyType::ForceBuy);
    }

    #[test]
    fn winner_is_never_force_buy() {
        let economy = classify_player_economy(
            false,
            0,
            2000,
            Side::Terrorist,
            Some(Side::Terrorist),
            300,
        );
        assert_eq!(economy, EconomyType::Semi);
    }

    #[test]
    fn team_force_buy_threshold_is_strict() {
        // The team rule uses a strict comparison against 400 per player.
        let at_threshold = classify_team_economy(
            false,
            0,
            9000,
            Side::Terrorist,
            Some(Side::CounterTerrorist),
            2000,
            5,
        );
        assert_eq!(at_threshold, EconomyType::Semi);
        let below = classify_team_economy(
            false,
            0,
            9000,
            Side::Terrorist,
            Some(Side::CounterTerrorist),
            1999,
            5,
        );
        assert_eq!(below, EconomyType::ForceBuy);
    }
}
