//! # cma_core - Counter-Strike match analysis engine
//!
//! Turns a chronological stream of game-state notifications decoded from a
//! recorded competitive match into a structured statistical record: rounds,
//! kills, economy, clutches, utility usage, chat.
//!
//! The binary replay decoder is not part of this crate; it is consumed
//! through the [`source::EventSource`] trait as an ordered event stream plus
//! a query interface over the current game state. Round detection is driven
//! by one lifecycle state machine per hosting platform, because platforms
//! disagree on how matches start, restart, pause and end.
//!
//! ```no_run
//! use cma_core::{analyze, AnalyzeOptions};
//! # fn open_demo() -> Box<dyn cma_core::source::EventSource> { unimplemented!() }
//!
//! let mut source = open_demo();
//! let match_data = analyze(source.as_mut(), &AnalyzeOptions::default())?;
//! println!("{} rounds", match_data.rounds.len());
//! # Ok::<(), cma_core::AnalyzerError>(())
//! ```

// Event payloads mirror the notification shape of the decoder; some handlers
// legitimately take many parameters.
#![allow(clippy::too_many_arguments)]

pub mod analysis;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod source;
pub mod spatial;
pub mod text;

pub use analysis::{kast, PlayerStats};
pub use engine::{analyze, AnalyzeOptions, Analyzer};
pub use error::{AnalyzerError, Result};
pub use models::MatchData;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
