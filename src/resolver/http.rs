use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;
use ureq::Agent;

use super::SourceResolver;
use crate::model::{Song, Source};

/// HTTP implementation of [`SourceResolver`] over the client's JSON
/// endpoints:
///
/// - stream resolution returns `{"url": "..."}`
/// - search returns `{"songs": [{"id": ..., "name": ..., ...}]}`
/// - lyric fetch returns `{"lyric": "..."}`
pub struct HttpResolver {
    agent: Agent,
}

impl HttpResolver {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(user_agent)
            .build()
            .new_agent();
        Self { agent }
    }

    fn get_json(&self, url: &str) -> Option<serde_json::Value> {
        let body = self.get_text(url)?;
        match serde_json::from_str(&body) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("invalid JSON from {url}: {e}");
                None
            }
        }
    }

    fn get_text(&self, url: &str) -> Option<String> {
        match self.agent.get(url).call() {
            Ok(mut resp) => resp.body_mut().read_to_string().ok(),
            Err(e) => {
                warn!("GET {url} failed: {e}");
                None
            }
        }
    }
}

impl SourceResolver for HttpResolver {
    fn resolve_stream_url(&self, song_id: &str, source: &Source) -> Option<String> {
        let url = fill_template(&source.stream_url, "{id}", song_id);
        let json = self.get_json(&url)?;
        let stream = json.get("url")?.as_str()?.trim();
        if stream.is_empty() {
            return None;
        }
        debug!("resolved {song_id} via {}", source.name);
        Some(stream.to_string())
    }

    fn search(&self, keyword: &str, source: &Source) -> Vec<Song> {
        let url = fill_template(&source.search_url, "{keyword}", &url_encode(keyword));
        let Some(json) = self.get_json(&url) else {
            return Vec::new();
        };
        match serde_json::from_value::<SearchResponse>(json) {
            Ok(resp) => resp.songs.into_iter().map(SongDoc::into_song).collect(),
            Err(e) => {
                warn!("unexpected search response from {}: {e}", source.name);
                Vec::new()
            }
        }
    }

    fn fetch_lyric(&self, song_id: &str, source: &Source) -> Option<String> {
        let url = fill_template(&source.lyric_url, "{id}", song_id);
        let json = self.get_json(&url)?;
        let lyric = json.get("lyric")?.as_str()?;
        if lyric.trim().is_empty() {
            None
        } else {
            Some(lyric.to_string())
        }
    }

    fn fetch_media(&self, url: &str) -> Option<Vec<u8>> {
        match self.agent.get(url).call() {
            Ok(mut resp) => resp.body_mut().read_to_vec().ok(),
            Err(e) => {
                warn!("media download {url} failed: {e}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    songs: Vec<SongDoc>,
}

#[derive(Debug, Deserialize)]
struct SongDoc {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    artwork: Option<String>,
}

impl SongDoc {
    fn into_song(self) -> Song {
        Song {
            id: self.id,
            name: self.name.filter(|s| !s.is_empty()),
            artist: self.artist.filter(|s| !s.is_empty()),
            album: self.album.filter(|s| !s.is_empty()),
            duration: self.duration.filter(|d| d.is_finite() && *d >= 0.0),
            artwork: self.artwork.filter(|s| !s.is_empty()),
            is_local: false,
            local_path: None,
        }
    }
}

fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, value)
}

fn url_encode(s: &str) -> String {
    let mut out = String::new();
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_template_replaces_placeholders() {
        assert_eq!(
            fill_template("https://api.example/song/{id}/url", "{id}", "99"),
            "https://api.example/song/99/url"
        );
        assert_eq!(fill_template("no placeholder", "{id}", "99"), "no placeholder");
    }

    #[test]
    fn url_encode_escapes_reserved_bytes() {
        assert_eq!(url_encode("hello world"), "hello%20world");
        assert_eq!(url_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(url_encode("safe-._~"), "safe-._~");
    }

    #[test]
    fn song_doc_drops_empty_and_bogus_metadata() {
        let doc = SongDoc {
            id: "7".into(),
            name: Some(String::new()),
            artist: Some("Artist".into()),
            album: None,
            duration: Some(f64::NAN),
            artwork: None,
        };
        let song = doc.into_song();
        assert_eq!(song.name, None);
        assert_eq!(song.artist.as_deref(), Some("Artist"));
        assert_eq!(song.duration, None);
        assert!(!song.is_local);
    }
}
