//! Playback controller that keeps the displayed lyric in step with the
//! transport.
//!
//! The controller owns all mutable player state: the playlist position, the
//! active lyric table and the load sequence. Loading a song is split into
//! [`LyricPlayer::begin_load`] and [`LyricPlayer::finish_load`] so a caller
//! that fetches transcripts asynchronously can hand results back in any
//! order; only the most recently requested load is applied.

use crate::{
    parse, time_label, LyricCursor, LyricPlayerError, LyricTrack, PlaybackConfig, Playlist,
    Result, Song, TimestampedLine, TranscriptSource, Transport, TransportEvent,
};

/// Handle for a load started by [`LyricPlayer::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
    index: usize,
}

impl LoadTicket {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// What the display should show after a transport event.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Active lyric text. Empty means no lyric at this time.
    pub lyric: String,
    pub time_label: String,
    pub position: f64,
    pub duration: f64,
}

pub struct LyricPlayer<T, S> {
    playlist: Playlist,
    transport: T,
    source: S,
    cursor: LyricCursor,
    current: usize,
    repeat: bool,
    autoplay: bool,
    load_sequence: u64,
}

impl<T: Transport, S: TranscriptSource> LyricPlayer<T, S> {
    pub fn new(playlist: Playlist, transport: T, source: S, config: &PlaybackConfig) -> Self {
        Self {
            playlist,
            transport,
            source,
            cursor: LyricCursor::default(),
            current: 0,
            repeat: config.repeat,
            autoplay: config.autoplay,
            load_sequence: 0,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn lyrics(&self) -> &LyricTrack {
        self.cursor.track()
    }

    /// Line resolved by the most recent position update.
    pub fn current_line(&self) -> Option<&TimestampedLine> {
        self.cursor.current()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.playlist.songs().get(self.current)
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    /// Starts loading the song at `index`.
    ///
    /// The lyrics of the previous song stay active until the matching
    /// [`finish_load`](Self::finish_load) call, and any load started earlier
    /// becomes stale.
    pub fn begin_load(&mut self, index: usize) -> Result<LoadTicket> {
        if self.playlist.is_empty() {
            return Err(LyricPlayerError::EmptyPlaylist);
        }
        self.playlist.get(index)?;

        self.load_sequence += 1;
        self.current = index;
        Ok(LoadTicket {
            sequence: self.load_sequence,
            index,
        })
    }

    /// Completes a load with the outcome of fetching its transcript.
    ///
    /// Returns `false` when a newer load has been started since `ticket` was
    /// issued; the result is then dropped untouched. A failed fetch installs
    /// an empty lyric table.
    pub fn finish_load(&mut self, ticket: LoadTicket, transcript: Result<String>) -> bool {
        if ticket.sequence != self.load_sequence {
            tracing::debug!(
                index = ticket.index,
                sequence = ticket.sequence,
                latest = self.load_sequence,
                "discarding superseded load"
            );
            return false;
        }

        let Some(song) = self.playlist.songs().get(ticket.index) else {
            return false;
        };

        let track = match transcript {
            Ok(text) => parse(&text),
            Err(err) => {
                tracing::warn!(song = %song.name, %err, "transcript unavailable");
                LyricTrack::empty()
            }
        };
        tracing::info!(song = %song.name, lines = track.len(), "loaded song");

        self.cursor.replace(track);
        self.transport.load(song);
        if self.autoplay {
            self.start_playback();
        }
        true
    }

    /// Loads the song at `index`, fetching its transcript from the source.
    pub fn load_song(&mut self, index: usize) -> Result<()> {
        let ticket = self.begin_load(index)?;
        let transcript = self
            .playlist
            .get(index)
            .and_then(|song| self.source.fetch(song));
        self.finish_load(ticket, transcript);
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        let index = self.playlist.next_index(self.current)?;
        self.load_song(index)
    }

    pub fn prev(&mut self) -> Result<()> {
        let index = self.playlist.prev_index(self.current)?;
        self.load_song(index)
    }

    pub fn random(&mut self) -> Result<()> {
        let index = self.playlist.random_index()?;
        self.load_song(index)
    }

    pub fn toggle_play(&mut self) {
        if self.transport.is_paused() {
            self.start_playback();
        } else {
            self.transport.pause();
        }
    }

    /// Moves the playhead, clamped to the song's duration once it is known.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() {
            return Err(LyricPlayerError::InvalidInput("seek position must be finite"));
        }

        let duration = self.transport.duration();
        let target = if duration.is_finite() {
            seconds.clamp(0.0, duration.max(0.0))
        } else {
            seconds.max(0.0)
        };
        self.transport.seek(target);
        Ok(())
    }

    /// Reacts to a transport signal, returning a fresh frame for the display
    /// when the shown state changes.
    pub fn handle_event(&mut self, event: TransportEvent) -> Result<Option<DisplayFrame>> {
        match event {
            TransportEvent::Play | TransportEvent::Pause => Ok(None),
            TransportEvent::TimeUpdate | TransportEvent::DurationKnown(_) => {
                Ok(Some(self.frame()))
            }
            TransportEvent::Ended => {
                if self.repeat {
                    self.transport.seek(0.0);
                    self.start_playback();
                } else {
                    self.next()?;
                }
                Ok(Some(self.frame()))
            }
            TransportEvent::Error(message) => {
                tracing::warn!(%message, "transport reported an error");
                Ok(Some(self.frame()))
            }
        }
    }

    /// Display state at the transport's current position.
    pub fn frame(&mut self) -> DisplayFrame {
        let position = self.transport.current_time();
        let duration = self.transport.duration();
        DisplayFrame {
            lyric: self.cursor.resolve(position).to_owned(),
            time_label: time_label(position, duration),
            position,
            duration,
        }
    }

    fn start_playback(&mut self) {
        if let Err(err) = self.transport.play() {
            tracing::warn!(%err, "playback did not start");
        }
    }
}

impl<T, S> std::fmt::Debug for LyricPlayer<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LyricPlayer")
            .field("songs", &self.playlist.len())
            .field("current", &self.current)
            .field("lines", &self.cursor.track().len())
            .field("repeat", &self.repeat)
            .field("autoplay", &self.autoplay)
            .field("load_sequence", &self.load_sequence)
            .finish()
    }
}
