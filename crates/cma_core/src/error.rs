use thiserror::Error;

use crate::constants::DemoSource;
use crate::source::SourceError;

/// Errors surfaced by the top-level analysis entry point.
///
/// Isolated bad events are never surfaced here; they are dropped and logged.
/// An error of this type means the whole analysis was rejected or aborted.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("{0} demos are not supported")]
    UnsupportedSource(DemoSource),

    #[error("unknown demo source, please specify the source explicitly")]
    UnknownSource,

    #[error("CS2 POV demos are not supported")]
    Cs2PovDemosNotSupported,

    #[error("CS2 PopFlash demos are not supported")]
    Cs2PopFlashDemosNotSupported,

    #[error("missing game event descriptors, the stream is not analyzable")]
    MissingGameEventDescriptors,

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
