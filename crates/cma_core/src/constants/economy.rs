use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse spend-posture classification of a player or team for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomyType {
    #[serde(rename = "pistol")]
    Pistol,
    #[serde(rename = "eco")]
    Eco,
    #[serde(rename = "semi")]
    Semi,
    #[serde(rename = "force-buy")]
    ForceBuy,
    #[serde(rename = "full")]
    Full,
}

impl fmt::Display for EconomyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EconomyType::Pistol => "pistol",
            EconomyType::Eco => "eco",
            EconomyType::Semi => "semi",
            EconomyType::ForceBuy => "force-buy",
            EconomyType::Full => "full",
        };
        write!(f, "{}", name)
    }
}
