//! Derived statistics computed over the ledgers: economy classification and
//! per-player summary metrics. Everything here is pure and deterministic.

mod economy;
mod stats;

pub use economy::{classify_player_economy, classify_team_economy};
pub use stats::{kast, PlayerStats};
