use serde::Deserialize;

use crate::model::{PlayMode, Source};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/vivace/config.toml` or
/// `~/.config/vivace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `VIVACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub http: HttpSettings,
    pub playback: PlaybackSettings,
    /// Configured remote catalogs; may be empty for local-only use.
    pub sources: Vec<Source>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            http: HttpSettings::default(),
            playback: PlaybackSettings::default(),
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Sampling-tick period in milliseconds. Drives progress publishing,
    /// lyric sync and the sleep-timer countdown.
    pub tick_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Global timeout for catalog requests and media downloads (seconds).
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("vivace/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Play mode the engine starts in.
    pub mode: PlayMode,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlayMode::Sequence,
        }
    }
}
