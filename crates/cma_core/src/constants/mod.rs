//! Domain enums and static catalogues shared across the crate.

mod economy;
mod game;
mod round;
mod side;
mod source;
mod weapon;

pub use economy::EconomyType;
pub use game::{DemoType, Game, GamePhase, HostageState, PlayerColor};
pub use round::{HitGroup, RoundEndReason, RoundWinStatus};
pub use side::{Side, TeamLetter};
pub use source::DemoSource;
pub use weapon::{weapon_name, weapon_type, BombSite, EquipmentClass, EquipmentKind, WeaponName, WeaponType};
