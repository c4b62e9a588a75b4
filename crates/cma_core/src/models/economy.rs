use serde::{Deserialize, Serialize};

use crate::constants::{EconomyType, Side};

/// Economy snapshot of one player for one round.
///
/// Created when freeze time starts and refreshed until the stabilization
/// delay after freeze time ends, because buying stays possible for a few
/// seconds into the round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEconomy {
    pub round_number: i32,
    pub name: String,
    #[serde(rename = "steamId")]
    pub steam_id: u64,
    pub start_money: i32,
    pub money_spent: i32,
    pub equipment_value: i32,
    #[serde(rename = "type")]
    pub economy_type: EconomyType,
    pub player_side: Side,
}
