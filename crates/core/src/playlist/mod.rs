use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{LyricPlayerError, Result};

/// One playlist entry as described by `songs.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Song {
    pub name: String,
    pub artist: String,
    pub album: String,
    /// Location of the audio resource handed to the transport.
    pub url: String,
    /// Location of the lyric transcript.
    pub lrc: String,
    /// Cover art shown by the display.
    pub img: String,
}

#[derive(Debug, Default, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    songs: Vec<Song>,
}

/// Ordered list of songs with wrap-around navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    songs: Vec<Song>,
}

impl Playlist {
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Reads a `{ "songs": [...] }` document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let playlist = Self::from_json(&raw)?;
        if playlist.is_empty() {
            tracing::warn!(?path, "playlist has no songs");
        }
        Ok(playlist)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: PlaylistFile = serde_json::from_str(raw)?;
        Ok(Self::new(file.songs))
    }

    /// Resolves relative `url` entries against `base_dir` so the transport
    /// receives a usable location. Entries with a scheme (`https://...`) or
    /// an absolute path are left alone. Transcript paths are resolved by the
    /// transcript source instead.
    pub fn with_media_base(mut self, base_dir: &Path) -> Self {
        for song in &mut self.songs {
            let keep = song.url.is_empty()
                || song.url.contains("://")
                || Path::new(&song.url).is_absolute();
            if keep {
                continue;
            }
            song.url = base_dir.join(&song.url).to_string_lossy().into_owned();
        }
        self
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, index: usize) -> Result<&Song> {
        self.songs.get(index).ok_or(LyricPlayerError::TrackIndex {
            index,
            len: self.songs.len(),
        })
    }

    pub fn next_index(&self, current: usize) -> Result<usize> {
        let len = self.non_empty_len()?;
        Ok((current % len + 1) % len)
    }

    pub fn prev_index(&self, current: usize) -> Result<usize> {
        let len = self.non_empty_len()?;
        Ok((current % len + len - 1) % len)
    }

    pub fn random_index(&self) -> Result<usize> {
        let len = self.non_empty_len()?;
        Ok(rand::thread_rng().gen_range(0..len))
    }

    /// Display labels in the form `1. Name - Artist`.
    pub fn entries(&self) -> Vec<String> {
        self.songs
            .iter()
            .enumerate()
            .map(|(index, song)| format!("{}. {} - {}", index + 1, song.name, song.artist))
            .collect()
    }

    fn non_empty_len(&self) -> Result<usize> {
        match self.songs.len() {
            0 => Err(LyricPlayerError::EmptyPlaylist),
            len => Ok(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn song(name: &str) -> Song {
        Song {
            name: name.to_string(),
            artist: "Artist".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_songs_document() {
        let playlist = Playlist::from_json(
            r#"{"songs": [
                {"name": "A", "artist": "X", "album": "L", "url": "a.mp3", "lrc": "a.lrc", "img": "a.jpg"},
                {"name": "B", "url": "b.mp3"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.get(0).unwrap().lrc, "a.lrc");
        assert_eq!(playlist.get(1).unwrap().lrc, "");
    }

    #[test]
    fn missing_songs_key_is_an_empty_playlist() {
        let playlist = Playlist::from_json("{}").unwrap();
        assert!(playlist.is_empty());
        assert!(matches!(
            playlist.next_index(0),
            Err(LyricPlayerError::EmptyPlaylist)
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Playlist::from_json("{ songs: "),
            Err(LyricPlayerError::Json(_))
        ));
    }

    #[test]
    fn navigation_wraps_around() {
        let playlist = Playlist::new(vec![song("a"), song("b"), song("c")]);

        assert_eq!(playlist.next_index(0).unwrap(), 1);
        assert_eq!(playlist.next_index(2).unwrap(), 0);
        assert_eq!(playlist.prev_index(0).unwrap(), 2);
        assert_eq!(playlist.prev_index(1).unwrap(), 0);

        for _ in 0..32 {
            assert!(playlist.random_index().unwrap() < 3);
        }
    }

    #[test]
    fn out_of_range_lookup_reports_bounds() {
        let playlist = Playlist::new(vec![song("a")]);
        let err = playlist.get(4).unwrap_err();
        assert!(matches!(err, LyricPlayerError::TrackIndex { index: 4, len: 1 }));
    }

    #[test]
    fn labels_are_numbered_from_one() {
        let playlist = Playlist::new(vec![song("a"), song("b")]);
        assert_eq!(playlist.entries(), ["1. a - Artist", "2. b - Artist"]);
    }

    #[test]
    fn relative_media_urls_resolve_against_base_dir() {
        let playlist = Playlist::new(vec![
            Song {
                url: "a.mp3".to_string(),
                lrc: "a.lrc".to_string(),
                ..Default::default()
            },
            Song {
                url: "https://example.com/b.mp3".to_string(),
                ..Default::default()
            },
            song("no-url"),
        ])
        .with_media_base(Path::new("demos"));

        let expected = Path::new("demos").join("a.mp3");
        assert_eq!(playlist.get(0).unwrap().url, expected.to_string_lossy());
        assert_eq!(playlist.get(0).unwrap().lrc, "a.lrc");
        assert_eq!(playlist.get(1).unwrap().url, "https://example.com/b.mp3");
        assert_eq!(playlist.get(2).unwrap().url, "");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"songs": [{{"name": "Disk", "artist": "Y"}}]}}"#).unwrap();

        let playlist = Playlist::load(file.path()).unwrap();
        assert_eq!(playlist.entries(), ["1. Disk - Y"]);
    }
}
