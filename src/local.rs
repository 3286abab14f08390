//! Local audio files as [`Song`]s.
//!
//! The client's "local files" tab plays straight off the filesystem; ids
//! are locally generated from the path, so they never collide with a
//! remote catalog's ids.

use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use walkdir::WalkDir;

use crate::model::Song;

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "wav" | "ogg" | "m4a"
            )
        })
        .unwrap_or(false)
}

fn read_tags(song: &mut Song, path: &Path) {
    let Ok(tagged) = Probe::open(path).and_then(|p| p.read()) else {
        return;
    };

    song.duration = Some(tagged.properties().duration().as_secs_f64());

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        song.name = tag.title().map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        song.artist = tag.artist().map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
        song.album = tag.album().map(|a| a.trim().to_string()).filter(|a| !a.is_empty());
    }
}

/// Scan `dir` recursively for playable files, sorted by display title
/// (case-insensitive). Untagged files fall back to the file stem as name.
pub fn scan(dir: &Path) -> Vec<Song> {
    let mut songs: Vec<Song> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path) {
            continue;
        }

        let mut song = Song::local(path.to_path_buf());
        read_tags(&mut song, path);

        if song.name.is_none() {
            song.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string());
        }

        songs.push(song);
    }

    songs.sort_by(|a, b| {
        a.title()
            .to_lowercase()
            .cmp(&b.title().to_lowercase())
    });
    songs
}
