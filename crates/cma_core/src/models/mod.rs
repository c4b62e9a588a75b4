//! Data model: the match aggregate, its teams, rounds, players and the
//! append-only ledgers of typed facts recorded during analysis.

mod clutch;
mod economy;
mod facts;
mod match_data;
mod player;
mod position;
mod round;
mod team;

pub use clutch::Clutch;
pub use economy::PlayerEconomy;
pub use facts::{
    BombDefuseStart, BombDefused, BombExploded, BombPlantStart, BombPlanted, ChatMessage,
    ChickenDeath, Damage, GrenadeDetonation, GrenadeProjectileEvent, HostagePickUpStart,
    HostagePickedUp, HostageRescued, Kill, PlayerBuy, PlayerFlashed, Shot,
};
pub use match_data::MatchData;
pub use player::Player;
pub use position::{
    ChickenPosition, GrenadePosition, HostagePosition, InfernoPosition, PlayerPosition,
};
pub use round::Round;
pub use team::Team;
