use super::parse::LyricTrack;

/// Resumable lookup over a [`LyricTrack`].
///
/// The sampling tick calls this with monotonically increasing times, so
/// the common case is a short forward scan from the previous index
/// (amortized O(1)). Backward jumps (seek, track change) fall back to a
/// fresh binary search.
#[derive(Debug, Clone, Default)]
pub struct LyricCursor {
    last: Option<usize>,
}

impl LyricCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous position, e.g. when the track is replaced.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Current line index for elapsed time `t`, resuming from the last
    /// answer when `t` has not moved backward.
    pub fn advance(&mut self, track: &LyricTrack, t: f64) -> Option<usize> {
        if track.is_empty() {
            self.last = None;
            return None;
        }

        let resumed = match self.last {
            Some(i) => match track.line(i) {
                Some(line) if line.time <= t => {
                    let mut i = i;
                    while let Some(next) = track.line(i + 1) {
                        if next.time > t {
                            break;
                        }
                        i += 1;
                    }
                    Some(i)
                }
                // t moved backward (or the track shrank): rescan.
                _ => track.lookup(t),
            },
            None => track.lookup(t),
        };

        self.last = resumed;
        resumed
    }
}
