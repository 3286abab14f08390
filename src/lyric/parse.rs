/// One timestamped line of lyric text.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from the start of the track; fractional seconds allowed.
    pub time: f64,
    pub text: String,
}

/// An ordered lyric track: lines sorted ascending by time, stable on ties.
#[derive(Debug, Clone, Default)]
pub struct LyricTrack {
    lines: Vec<LyricLine>,
}

impl LyricTrack {
    /// Parse raw lyric text. Lines that do not match `[mm:ss(.xx)]text`
    /// are skipped; zero valid lines yields a valid empty track.
    pub fn parse(raw: &str) -> Self {
        let mut lines: Vec<LyricLine> = raw.lines().filter_map(parse_line).collect();
        // Stable sort keeps original order for equal timestamps.
        lines.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    /// Index `i` such that `line[i].time <= t < line[i+1].time`.
    ///
    /// Returns `None` before the first timestamp; the last index at or
    /// after the last one. Exact matches resolve to the matching line.
    pub fn lookup(&self, t: f64) -> Option<usize> {
        if self.lines.is_empty() || t < self.lines[0].time {
            return None;
        }
        let after = self.lines.partition_point(|l| l.time <= t);
        Some(after - 1)
    }
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let rest = line.strip_prefix('[')?;
    let close = rest.find(']')?;
    let time = parse_timestamp(&rest[..close])?;
    let text = rest[close + 1..].trim().to_string();
    Some(LyricLine { time, text })
}

// "mm:ss" or "mm:ss.xx" -> seconds. Anything else is rejected.
fn parse_timestamp(stamp: &str) -> Option<f64> {
    let (minutes, seconds) = stamp.split_once(':')?;
    if minutes.is_empty() || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (whole, frac) = match seconds.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (seconds, None),
    };
    if whole.len() != 2 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(f) = frac {
        if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    Some(minutes * 60.0 + seconds)
}

#[cfg(test)]
mod timestamp_tests {
    use super::parse_timestamp;

    #[test]
    fn accepts_plain_and_fractional_stamps() {
        assert_eq!(parse_timestamp("00:12"), Some(12.0));
        assert_eq!(parse_timestamp("01:05"), Some(65.0));
        assert_eq!(parse_timestamp("02:30.50"), Some(150.5));
        assert_eq!(parse_timestamp("10:00.1"), Some(600.1));
    }

    #[test]
    fn rejects_malformed_stamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("0012"), None);
        assert_eq!(parse_timestamp(":12"), None);
        assert_eq!(parse_timestamp("ab:cd"), None);
        assert_eq!(parse_timestamp("00:1"), None);
        assert_eq!(parse_timestamp("00:123"), None);
        assert_eq!(parse_timestamp("00:12."), None);
        assert_eq!(parse_timestamp("00:12.x"), None);
        assert_eq!(parse_timestamp("-1:12"), None);
    }
}
