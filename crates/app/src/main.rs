use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lyric_player_core::{
    active_line, parse, AppConfig, FileTranscriptSource, LyricPlayer, Playlist,
    SimulatedTransport,
};
use tracing_subscriber::EnvFilter;

fn main() -> lyric_player_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Lyrics { file, at } => run_lyrics(&file, &at),
        Commands::Play {
            playlist,
            track,
            duration,
            until,
        } => run_play(config, playlist, track, duration, until),
        Commands::Playlist { playlist } => run_playlist(&playlist.unwrap_or(config.playlist.path)),
    }
}

fn run_lyrics(file: &Path, at: &[f64]) -> lyric_player_core::Result<()> {
    let track = parse(&std::fs::read_to_string(file)?);
    tracing::info!(?file, lines = track.len(), "parsed transcript");

    if at.is_empty() {
        for line in &track {
            println!("[{}] {}", line.time, line.text);
        }
    } else {
        for &time in at {
            println!("{time:>8.3}  {}", active_line(&track, time));
        }
    }
    Ok(())
}

fn run_play(
    mut config: AppConfig,
    playlist: Option<PathBuf>,
    track: usize,
    duration: f64,
    until: Option<f64>,
) -> lyric_player_core::Result<()> {
    if let Some(path) = playlist {
        config.playlist.path = path;
    }
    let step = config.playback.tick_seconds;
    if !(step.is_finite() && step > 0.0) {
        return Err("tick_seconds must be a positive number".into());
    }

    let base_dir = config.playlist.resolved_base_dir();
    let songs = Playlist::load(&config.playlist.path)?.with_media_base(&base_dir);
    let source = FileTranscriptSource::new(base_dir);
    let transport = SimulatedTransport::new().with_default_duration(duration);
    let mut player = LyricPlayer::new(songs, transport, source, &config.playback);

    tracing::info!(path = ?config.playlist.path, track, "starting playback");
    player.load_song(track)?;
    announce(&player);

    let until = until.unwrap_or(duration);
    let mut elapsed = 0.0;
    let mut shown = None::<(usize, String)>;
    while elapsed < until {
        let events = player.transport_mut().tick(step);
        elapsed += step;

        for event in events {
            let index = player.current_index();
            let Some(frame) = player.handle_event(event)? else {
                continue;
            };
            if player.current_index() != index {
                announce(&player);
            }

            let current = (player.current_index(), frame.lyric.clone());
            if shown.as_ref() != Some(&current) {
                println!("{}  {}", frame.time_label, frame.lyric);
                shown = Some(current);
            }
        }
    }
    Ok(())
}

fn run_playlist(path: &Path) -> lyric_player_core::Result<()> {
    let playlist = Playlist::load(path)?;
    for entry in playlist.entries() {
        println!("{entry}");
    }
    Ok(())
}

fn announce<T, S>(player: &LyricPlayer<T, S>)
where
    T: lyric_player_core::Transport,
    S: lyric_player_core::TranscriptSource,
{
    if let Some(song) = player.current_song() {
        println!("== {} - {} ({})", song.name, song.artist, song.album);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Audio player with synchronised lyrics", long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a transcript and print its lines, or the active line at given times.
    Lyrics {
        /// Path to the timestamped transcript.
        file: PathBuf,
        /// Playback positions in seconds to resolve.
        #[arg(long)]
        at: Vec<f64>,
    },
    /// Play through the playlist on a simulated transport, printing lyric changes.
    Play {
        /// Playlist file, overriding the configured one.
        #[arg(short, long)]
        playlist: Option<PathBuf>,
        /// Zero-based index of the first song.
        #[arg(short, long, default_value_t = 0)]
        track: usize,
        /// Duration reported for every song, in seconds.
        #[arg(long, default_value_t = 240.0)]
        duration: f64,
        /// Stop after this many simulated seconds. Defaults to one song.
        #[arg(long)]
        until: Option<f64>,
    },
    /// List the songs in the playlist.
    Playlist {
        /// Playlist file, overriding the configured one.
        #[arg(short, long)]
        playlist: Option<PathBuf>,
    },
}
