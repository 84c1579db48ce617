use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading game assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{0}' not found")]
    NotFound(String),
    #[error("malformed asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("sprite '{0}' missing from manifest")]
    UnknownSprite(String),
    #[error("sound '{name}' has event id {event_id}, ids above 255 cannot reach the host")]
    SoundEventOutOfRange { name: String, event_id: u32 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
