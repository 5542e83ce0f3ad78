//! Core library for the Lyric Player.
//!
//! The heart of the crate is lyric synchronisation: [`transcript::parse`]
//! turns timestamped lyric text into a [`LyricTrack`], and
//! [`cursor::active_line`] / [`LyricCursor`] resolve which line is current
//! for a playback position. The remaining modules wrap that core in a small
//! player: a playlist, a transcript source, a transport abstraction and the
//! [`LyricPlayer`] controller that ties them together.

pub mod config;
pub mod cursor;
pub mod error;
pub mod player;
pub mod playlist;
pub mod source;
pub mod timeline;
pub mod track;
pub mod transcript;
pub mod transport;

pub use config::{AppConfig, PlaybackConfig, PlaylistConfig};
pub use cursor::{active_line, LyricCursor};
pub use error::{LyricPlayerError, Result};
pub use player::{DisplayFrame, LoadTicket, LyricPlayer};
pub use playlist::{Playlist, Song};
pub use source::{FileTranscriptSource, MemoryTranscriptSource, TranscriptSource};
pub use timeline::{format_time, time_label, PlaybackClock};
pub use track::{LyricTrack, Timestamp, TimestampedLine};
pub use transcript::parse;
pub use transport::{SimulatedTransport, Transport, TransportEvent};
