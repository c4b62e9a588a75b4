//! Boundary with the replay-decoding collaborator.
//!
//! The decoder is not part of this crate. It is consumed as a chronological
//! event source plus a query interface over the current game state. Events
//! are delivered strictly in timeline order and each one is processed to
//! completion before the next.

mod event;
mod props;
mod view;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::constants::{DemoSource, DemoType, Game};

pub use event::{EquipmentRef, GameEvent, GrenadeEvent, KillEvent, PropTarget, PropValue, WarnKind};
pub use props::{
    property_map, GameRulesProp, PlantedC4Prop, PlayerProp, PlayerResourceProp, PropertyMap,
    Source1PropertyMap, Source2PropertyMap, TeamProp,
};
pub use view::{ChickenInfo, GameStateView, HostageInfo, InfernoInfo, Participant, ProjectileInfo, TeamState};

/// Errors reported by the event source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The recording stops mid-stream. Everything received so far is kept.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    #[error("decode error: {0}")]
    Decode(String),
}

impl SourceError {
    /// Truncation is recovered from; the analysis finalizes with partial data.
    pub fn is_truncation(&self) -> bool {
        matches!(self, SourceError::UnexpectedEndOfStream)
    }
}

/// Identification data decoded from the recording before the event stream.
///
/// Playback counters may only be final once the stream is exhausted; the
/// orchestrator re-reads them when finalizing.
#[derive(Debug, Clone, Default)]
pub struct DemoHeader {
    pub file_path: String,
    pub file_name: String,
    pub checksum: String,
    pub share_code: String,
    pub map_name: String,
    pub server_name: String,
    pub client_name: String,
    pub date: Option<DateTime<Utc>>,
    pub tick_count: i32,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub duration_seconds: f64,
    pub network_protocol: i32,
    pub build_number: i32,
    pub is_source2: bool,
    pub demo_type: DemoType,
    /// Hosting platform identified by the decoder from the recording itself,
    /// if any. Callers can override it.
    pub detected_source: Option<DemoSource>,
}

impl DemoHeader {
    /// Game edition, derived from the protocol generation and build number.
    pub fn game(&self) -> Game {
        if self.is_source2 {
            // Builds below 9832 come from the limited test that preceded the
            // public CS2 release.
            if self.build_number < 9832 {
                Game::Cs2LimitedTest
            } else {
                Game::Cs2
            }
        } else {
            Game::Csgo
        }
    }
}

/// The external event source: a decoded recording replayed as a stream of
/// notifications plus a live view of the reconstructed game state.
pub trait EventSource {
    fn header(&self) -> &DemoHeader;

    /// Next notification in timeline order, `None` once exhausted.
    fn next_event(&mut self) -> Result<Option<GameEvent>, SourceError>;

    /// Query interface over the game state at the current point of the stream.
    fn view(&self) -> &dyn GameStateView;
}
