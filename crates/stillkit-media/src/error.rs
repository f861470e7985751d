// crates/stillkit-media/src/error.rs

use thiserror::Error;

/// Everything that can go wrong between "job started" and "bytes delivered".
/// The UI never shows these verbatim — they go to the log, and the user gets
/// the generic alert (or the inline cap message for `OutputTooLarge`).
#[derive(Debug, Error)]
pub enum MediaError {
    /// The engine binary could not be resolved or version-probed. Terminal
    /// for the session; there is no retry.
    #[error("engine unavailable: {detail}")]
    EngineUnavailable { detail: String },

    /// The engine ran but exited non-zero. `tail` holds its last log lines.
    #[error("engine {status}: {tail}")]
    EngineExit { status: String, tail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("audio decode failed: {0}")]
    AudioDecode(#[from] symphonia::core::errors::Error),

    /// Decodable container, unusable content (no audio track, zero rate).
    #[error("unsupported audio: {0}")]
    UnsupportedAudio(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Output exceeds the tool's size cap. Non-fatal by design.
    #[error("output is {size_bytes} bytes, over the cap")]
    OutputTooLarge { size_bytes: u64 },
}

pub type Result<T> = std::result::Result<T, MediaError>;
