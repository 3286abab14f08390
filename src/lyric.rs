//! Timestamped-lyric parsing and time-indexed lookup.
//!
//! Raw lyric text uses the bracketed-timestamp convention
//! (`[mm:ss]text` / `[mm:ss.xx]text`). Parsing fails soft: lines that do
//! not match are skipped, never surfaced as errors.

mod cursor;
mod parse;

pub use cursor::LyricCursor;
pub use parse::{LyricLine, LyricTrack};

#[cfg(test)]
mod tests;
