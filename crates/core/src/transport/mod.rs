use std::collections::HashMap;

use crate::{LyricPlayerError, PlaybackClock, Result, Song};

/// Signals a media transport reports back to the player.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Play,
    Pause,
    /// Periodic position update during playback, also fired after a seek.
    TimeUpdate,
    /// Fired once per loaded song when its duration becomes known.
    DurationKnown(f64),
    Ended,
    Error(String),
}

/// Audio playback transport driven by the player.
///
/// Positions and durations are in seconds and may be NaN until the media's
/// metadata is available.
pub trait Transport {
    /// Points the transport at a new song and rewinds to the start.
    fn load(&mut self, song: &Song);

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn seek(&mut self, seconds: f64);

    fn current_time(&self) -> f64;

    fn duration(&self) -> f64;

    fn is_paused(&self) -> bool;
}

/// Deterministic in-memory transport.
///
/// Time only moves when [`tick`](Self::tick) is called, which makes it suit
/// both tests and the command line demo.
#[derive(Debug)]
pub struct SimulatedTransport {
    clock: PlaybackClock,
    durations: HashMap<String, f64>,
    default_duration: Option<f64>,
    source: Option<String>,
    duration: f64,
    paused: bool,
    block_play: bool,
    pending: Vec<TransportEvent>,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self {
            clock: PlaybackClock::default(),
            durations: HashMap::new(),
            default_duration: None,
            source: None,
            duration: f64::NAN,
            paused: true,
            block_play: false,
            pending: Vec::new(),
        }
    }

    /// Duration reported for any song without an explicit entry.
    pub fn with_default_duration(mut self, seconds: f64) -> Self {
        self.default_duration = Some(seconds);
        self
    }

    /// Registers the duration reported once the song at `url` loads.
    pub fn set_duration(&mut self, url: impl Into<String>, seconds: f64) {
        self.durations.insert(url.into(), seconds);
    }

    /// Makes every subsequent `play()` fail, as a host that blocks autoplay
    /// would.
    pub fn block_play(&mut self, blocked: bool) {
        self.block_play = blocked;
    }

    /// URL of the song currently loaded, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Advances playback by `delta` seconds and returns every event raised
    /// since the previous call.
    pub fn tick(&mut self, delta: f64) -> Vec<TransportEvent> {
        if !self.paused && self.source.is_some() {
            self.clock.advance(delta);
            self.pending.push(TransportEvent::TimeUpdate);

            if self.duration.is_finite() && self.clock.time_seconds >= self.duration {
                self.clock.seek(self.duration);
                self.paused = true;
                self.pending.push(TransportEvent::Ended);
            }
        }

        std::mem::take(&mut self.pending)
    }
}

impl Transport for SimulatedTransport {
    fn load(&mut self, song: &Song) {
        self.clock.reset();
        self.paused = true;
        self.source = Some(song.url.clone());
        self.duration = self
            .durations
            .get(&song.url)
            .copied()
            .or(self.default_duration)
            .unwrap_or(f64::NAN);

        if self.duration.is_finite() {
            self.pending.push(TransportEvent::DurationKnown(self.duration));
        }
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(LyricPlayerError::Transport("no media loaded".to_string()));
        }
        if self.block_play {
            return Err(LyricPlayerError::Transport(
                "playback was not allowed to start".to_string(),
            ));
        }

        if self.paused {
            self.paused = false;
            self.pending.push(TransportEvent::Play);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pending.push(TransportEvent::Pause);
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.clock.seek(seconds);
        self.pending.push(TransportEvent::TimeUpdate);
    }

    fn current_time(&self) -> f64 {
        if self.source.is_some() {
            self.clock.time_seconds
        } else {
            f64::NAN
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
