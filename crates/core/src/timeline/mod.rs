/// Position of the playhead within the current song.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlaybackClock {
    pub time_seconds: f64,
}

impl PlaybackClock {
    pub fn reset(&mut self) {
        self.time_seconds = 0.0;
    }

    pub fn advance(&mut self, delta: f64) {
        self.time_seconds = (self.time_seconds + delta).max(0.0);
    }

    pub fn seek(&mut self, seconds: f64) {
        self.time_seconds = seconds.max(0.0);
    }
}

/// Formats a position as `mm:ss`, truncating fractional seconds.
///
/// Unknown (NaN), infinite and negative values print as `00:00` so the
/// display stays stable before the transport has reported metadata.
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// `position/duration` label, e.g. `01:05/03:30`.
pub fn time_label(position: f64, duration: f64) -> String {
    format!("{}/{}", format_time(position), format_time(duration))
}
