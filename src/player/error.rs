use std::path::PathBuf;

use thiserror::Error;

/// Failures opening media on the native engine.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("cannot create playback sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported or corrupt audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("stream download failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("{0} is played by a remote application, not the native engine")]
    NotNative(String),
}
