use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{LyricPlayerError, Result, Song};

/// Supplies the raw transcript text for a song.
pub trait TranscriptSource {
    fn fetch(&self, song: &Song) -> Result<String>;
}

/// Reads transcripts from disk, resolving relative `lrc` paths against a base
/// directory.
#[derive(Debug, Clone, Default)]
pub struct FileTranscriptSource {
    base_dir: PathBuf,
}

impl FileTranscriptSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, song: &Song) -> Result<PathBuf> {
        if song.lrc.is_empty() {
            return Err(LyricPlayerError::msg(format!(
                "song `{}` has no transcript",
                song.name
            )));
        }
        Ok(self.base_dir.join(&song.lrc))
    }
}

impl TranscriptSource for FileTranscriptSource {
    fn fetch(&self, song: &Song) -> Result<String> {
        let path = self.resolve(song)?;
        tracing::debug!(?path, "reading transcript");
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Transcripts held in memory, keyed by the song's `lrc` field.
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscriptSource {
    transcripts: HashMap<String, String>,
}

impl MemoryTranscriptSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lrc: impl Into<String>, text: impl Into<String>) {
        self.transcripts.insert(lrc.into(), text.into());
    }

    pub fn with(mut self, lrc: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(lrc, text);
        self
    }
}

impl TranscriptSource for MemoryTranscriptSource {
    fn fetch(&self, song: &Song) -> Result<String> {
        self.transcripts
            .get(&song.lrc)
            .cloned()
            .ok_or_else(|| LyricPlayerError::msg(format!("transcript `{}` not found", song.lrc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(lrc: &str) -> Song {
        Song {
            name: "Song".to_string(),
            lrc: lrc.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn reads_relative_paths_from_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.lrc"), "[00:01.00]hi").unwrap();

        let source = FileTranscriptSource::new(dir.path());
        assert_eq!(source.fetch(&song("a.lrc")).unwrap(), "[00:01.00]hi");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTranscriptSource::new(dir.path());
        assert!(matches!(
            source.fetch(&song("gone.lrc")),
            Err(LyricPlayerError::Io(_))
        ));
    }

    #[test]
    fn song_without_transcript_is_rejected() {
        let source = FileTranscriptSource::new(".");
        let err = source.fetch(&song("")).unwrap_err();
        assert!(err.to_string().contains("no transcript"));
    }

    #[test]
    fn memory_source_looks_up_by_lrc() {
        let source = MemoryTranscriptSource::new().with("a.lrc", "[00:01]a");
        assert_eq!(source.fetch(&song("a.lrc")).unwrap(), "[00:01]a");
        assert!(source.fetch(&song("b.lrc")).is_err());
    }
}
