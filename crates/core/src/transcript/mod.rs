//! Parser for timestamped lyric transcripts.
//!
//! Each input line may carry any number of `[MM:SS]` / `[MM:SS.fff]` tags
//! followed by its display text:
//!
//! ```text
//! [00:12.50]First line of lyrics
//! [00:17.00][00:45.00]Repeated hook line
//! [01:02]Line without fractional seconds
//! ```
//!
//! Parsing never fails. Lines without a valid tag, tags without text and
//! malformed tag bodies are skipped.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{LyricTrack, Timestamp};

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]+):([0-9]+)(\.[0-9]+)?\]").expect("timestamp tag pattern is valid")
});

/// Converts raw transcript text into a [`LyricTrack`].
///
/// When several tags resolve to the same millisecond, the line that appears
/// later in `raw` wins.
pub fn parse(raw: &str) -> LyricTrack {
    let mut table = BTreeMap::new();

    for line in raw.lines() {
        let line = trim_line(line);
        let times: Vec<Timestamp> = TAG
            .captures_iter(line)
            .filter_map(|caps| tag_time(&caps))
            .collect();
        if times.is_empty() {
            continue;
        }

        let text = TAG.replace_all(line, "");
        let text = trim_line(&text);
        if text.is_empty() {
            continue;
        }

        for time in times {
            table.insert(time, text.to_owned());
        }
    }

    let track = LyricTrack::from(table);
    tracing::debug!(lines = track.len(), "parsed transcript");
    track
}

/// Trims whitespace plus the byte-order mark many editors put at the start
/// of `.lrc` files.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn tag_time(caps: &Captures<'_>) -> Option<Timestamp> {
    let minutes: f64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: f64 = caps.get(2)?.as_str().parse().ok()?;
    let fraction = match caps.get(3) {
        Some(frac) => format!("0{}", frac.as_str()).parse::<f64>().ok()?,
        None => 0.0,
    };

    Some(Timestamp::from_seconds(minutes * 60.0 + seconds + fraction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::active_line;

    fn texts(track: &LyricTrack) -> Vec<(u64, &str)> {
        track
            .iter()
            .map(|line| (line.time.as_millis(), line.text.as_str()))
            .collect()
    }

    #[test]
    fn parses_the_reference_transcript() {
        let track = parse(
            "[00:12.50]First line of lyrics\n\
             [00:17.00][00:45.00]Repeated hook line\n\
             [01:02]Line without fractional seconds\n",
        );

        assert_eq!(
            texts(&track),
            [
                (12_500, "First line of lyrics"),
                (17_000, "Repeated hook line"),
                (45_000, "Repeated hook line"),
                (62_000, "Line without fractional seconds"),
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_track() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn drops_metadata_and_untagged_lines() {
        let track = parse(
            "[ti:Some Song]\n\
             [ar:Someone]\n\
             [00:05.00]\n\
             plain continuation text\n\
             [00:06.00]   sung   \n",
        );

        assert_eq!(texts(&track), [(6_000, "sung")]);
    }

    #[test]
    fn malformed_tags_are_not_matches() {
        let track = parse("[0a:10]bad minutes\n[00:1x]bad seconds\n[00:10.]no fraction digits\n");
        assert!(track.is_empty());
    }

    #[test]
    fn fraction_length_is_numeric_not_positional() {
        let short = parse("[00:01.5]a");
        let long = parse("[00:01.500]a");
        assert_eq!(short, long);
        assert_eq!(texts(&short), [(1_500, "a")]);
    }

    #[test]
    fn rounds_to_milliseconds() {
        let track = parse("[00:01.23456]x");
        assert_eq!(texts(&track), [(1_235, "x")]);
    }

    #[test]
    fn accepts_wide_minute_and_second_fields() {
        let track = parse("[123:75]long\n[0:7]short");
        assert_eq!(texts(&track), [(7_000, "short"), (123 * 60_000 + 75_000, "long")]);
    }

    #[test]
    fn later_duplicate_timestamp_wins() {
        let track = parse("[00:10.00]first\n[00:10]second\n");
        assert_eq!(texts(&track), [(10_000, "second")]);
    }

    #[test]
    fn removes_tags_anywhere_on_the_line() {
        let track = parse("[00:01.00]hello [00:02.00]world");
        assert_eq!(texts(&track), [(1_000, "hello world"), (2_000, "hello world")]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let track = parse("[00:01.00]Hello\r\n[00:03.50]World\r\n");
        assert_eq!(texts(&track), [(1_000, "Hello"), (3_500, "World")]);
    }

    #[test]
    fn strips_a_leading_byte_order_mark() {
        let track = parse("\u{feff}[00:01.00]Hello\n[00:03.50]World\n");
        assert_eq!(texts(&track), [(1_000, "Hello"), (3_500, "World")]);

        let track = parse("[00:02.00]\u{feff}Spaced\u{feff}\n");
        assert_eq!(texts(&track), [(2_000, "Spaced")]);
    }

    #[test]
    fn querying_the_hello_world_example() {
        let track = parse("[00:01.00]Hello\n[00:03.50]World\n");

        assert_eq!(active_line(&track, 0.5), "");
        assert_eq!(active_line(&track, 1.0), "Hello");
        assert_eq!(active_line(&track, 2.0), "Hello");
        assert_eq!(active_line(&track, 3.5), "World");
        assert_eq!(active_line(&track, 100.0), "World");
    }
}
