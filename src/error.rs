//! Error types for startup and entity construction

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before the first frame is played.
///
/// Nothing inside a running session returns an error: projectiles leaving the
/// screen, an empty roster and running out of lives are ordinary state changes.
#[derive(Debug, Error)]
pub enum GameError {
    /// Enemy colour tag outside the red/blue/green palette
    #[error("unknown enemy colour tag: {0:?} (expected red, blue or green)")]
    UnknownColor(String),

    /// A sprite file could not be opened or decoded
    #[error("failed to load asset {path}: {source}")]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Window size or tick rate cannot host a game
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The log subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
