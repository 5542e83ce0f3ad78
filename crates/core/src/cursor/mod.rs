use crate::{LyricTrack, TimestampedLine};

/// Returns the text of the line active at `at_seconds`: the line with the
/// largest timestamp that is `<= at_seconds`.
///
/// Times before the first line, NaN and empty tracks all resolve to `""`.
pub fn active_line(track: &LyricTrack, at_seconds: f64) -> &str {
    track
        .line_at_or_before(at_seconds)
        .map_or("", |line| line.text.as_str())
}

/// Active-line resolver for the track that is currently loaded.
///
/// Remembers where the previous query landed so the common case of playback
/// moving forward by less than a line costs a couple of comparisons. Any
/// other jump falls back to a binary search. Results are always identical
/// to [`active_line`].
#[derive(Debug, Clone, Default)]
pub struct LyricCursor {
    track: LyricTrack,
    /// Count of lines at or before the last queried time.
    position: usize,
}

impl LyricCursor {
    pub fn new(track: LyricTrack) -> Self {
        Self { track, position: 0 }
    }

    pub fn track(&self) -> &LyricTrack {
        &self.track
    }

    /// Swaps in the lyrics for a newly loaded song, dropping all state that
    /// belonged to the previous one.
    pub fn replace(&mut self, track: LyricTrack) -> LyricTrack {
        self.position = 0;
        std::mem::replace(&mut self.track, track)
    }

    pub fn resolve(&mut self, at_seconds: f64) -> &str {
        self.position = self.locate(at_seconds);
        self.current().map_or("", |line| line.text.as_str())
    }

    /// The line the last [`resolve`](Self::resolve) landed on.
    pub fn current(&self) -> Option<&TimestampedLine> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.track.lines().get(index))
    }

    fn locate(&self, at_seconds: f64) -> usize {
        if self.splits_at(self.position, at_seconds) {
            self.position
        } else if self.splits_at(self.position + 1, at_seconds) {
            self.position + 1
        } else {
            self.track.count_at_or_before(at_seconds)
        }
    }

    /// Whether exactly the first `count` lines are at or before `at_seconds`.
    fn splits_at(&self, count: usize, at_seconds: f64) -> bool {
        let lines = self.track.lines();
        if count > lines.len() {
            return false;
        }

        let before = count == 0 || lines[count - 1].time_seconds() <= at_seconds;
        let after = lines
            .get(count)
            .map_or(true, |line| line.time_seconds() > at_seconds);
        before && after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Timestamp};

    fn sample() -> LyricTrack {
        parse("[00:01.00]one\n[00:02.00]two\n[00:03.00]three\n[00:10.00]ten\n")
    }

    #[test]
    fn empty_track_is_always_blank() {
        let track = LyricTrack::empty();
        for t in [0.0, 1.0, 1e9, f64::NAN, -1.0] {
            assert_eq!(active_line(&track, t), "");
        }

        let mut cursor = LyricCursor::default();
        assert_eq!(cursor.resolve(5.0), "");
        assert!(cursor.current().is_none());
    }

    #[test]
    fn before_first_line_is_blank() {
        let track = sample();
        assert_eq!(active_line(&track, 0.0), "");
        assert_eq!(active_line(&track, 0.999), "");
        assert_eq!(active_line(&track, -5.0), "");
    }

    #[test]
    fn nan_time_is_blank() {
        let mut cursor = LyricCursor::new(sample());
        assert_eq!(cursor.resolve(2.5), "two");
        assert_eq!(cursor.resolve(f64::NAN), "");
        assert_eq!(cursor.resolve(2.5), "two");
    }

    #[test]
    fn multi_tag_line_yields_to_closer_timestamps() {
        let track = parse("[00:10.00][00:20.00]X\n[00:12.00]Y\n");

        assert_eq!(active_line(&track, 10.0), "X");
        assert_eq!(active_line(&track, 15.0), "Y");
        assert_eq!(active_line(&track, 20.0), "X");
    }

    #[test]
    fn cursor_follows_forward_playback() {
        let mut cursor = LyricCursor::new(sample());
        let mut seen = Vec::new();
        let mut t = 0.0;
        while t <= 12.0 {
            seen.push(cursor.resolve(t).to_owned());
            t += 0.25;
        }

        seen.dedup();
        assert_eq!(seen, ["", "one", "two", "three", "ten"]);
    }

    #[test]
    fn cursor_re_resolves_after_seeking_back() {
        let mut cursor = LyricCursor::new(sample());
        assert_eq!(cursor.resolve(11.0), "ten");
        assert_eq!(cursor.resolve(1.5), "one");
        assert_eq!(cursor.resolve(0.5), "");
        assert_eq!(cursor.resolve(3.0), "three");
        assert_eq!(cursor.current().map(|line| line.time), Some(Timestamp::from_millis(3_000)));
    }

    #[test]
    fn replacing_the_track_discards_prior_state() {
        let mut cursor = LyricCursor::new(sample());
        assert_eq!(cursor.resolve(11.0), "ten");

        let previous = cursor.replace(parse("[00:05.00]fresh"));
        assert_eq!(previous.len(), 4);
        assert!(cursor.current().is_none());
        assert_eq!(cursor.resolve(1.0), "");
        assert_eq!(cursor.resolve(5.0), "fresh");
    }
}
