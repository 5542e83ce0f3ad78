/// Result alias that carries the custom [`LyricPlayerError`] type.
pub type Result<T> = std::result::Result<T, LyricPlayerError>;

/// Common error type for the core crate.
///
/// Transcript parsing and lyric lookup never fail; these variants only come
/// out of the shell around them (files, playlists, the transport).
#[derive(Debug, thiserror::Error)]
pub enum LyricPlayerError {
    /// Free-form message for failures that do not warrant their own variant.
    #[error("{0}")]
    Message(String),
    /// The caller supplied a value the operation cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A playlist index that does not name a song.
    #[error("track index {index} is out of range for a playlist of {len} songs")]
    TrackIndex { index: usize, len: usize },
    /// The playlist has no songs to play.
    #[error("playlist is empty")]
    EmptyPlaylist,
    /// The playback transport refused an operation.
    #[error("transport error: {0}")]
    Transport(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed playlist or configuration documents.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl LyricPlayerError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for LyricPlayerError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for LyricPlayerError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
