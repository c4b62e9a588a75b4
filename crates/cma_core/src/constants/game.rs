use serde::{Deserialize, Serialize};

/// Game edition the recording was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Game {
    #[serde(rename = "CSGO")]
    Csgo,
    #[serde(rename = "CS2")]
    Cs2,
    /// CS2 builds from the limited test that preceded the public release.
    #[serde(rename = "CS2LT")]
    Cs2LimitedTest,
}

/// Perspective the recording was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemoType {
    #[serde(rename = "GOTV")]
    Gotv,
    #[serde(rename = "POV")]
    Pov,
}

impl Default for DemoType {
    fn default() -> Self {
        // Assume a server-side recording; a POV detection event overrides it.
        DemoType::Gotv
    }
}

/// Coarse game phase reported by the game rules entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Init,
    Pregame,
    Start,
    TeamSideSwitch,
    HalfEnded,
    GameEnded,
    Stalemate,
    GameOver,
}

/// Lifecycle state of a hostage entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostageState {
    Idle,
    BeingUntied,
    GettingPickedUp,
    BeingCarried,
    Rescued,
    Dead,
}

/// Teammate color assigned by the game in competitive modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Unknown,
    Yellow,
    Purple,
    Green,
    Blue,
    Orange,
}

impl Default for PlayerColor {
    fn default() -> Self {
        PlayerColor::Unknown
    }
}
