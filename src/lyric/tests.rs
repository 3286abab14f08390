use super::{LyricCursor, LyricTrack};

const SAMPLE: &str = "\
[00:01]first
[00:05.50]second
not a lyric line
[junk]also skipped
[00:10]third

[00:10]third-tie";

#[test]
fn parse_skips_malformed_lines_and_sorts() {
    let track = LyricTrack::parse(SAMPLE);
    assert_eq!(track.len(), 4);

    let times: Vec<f64> = track.lines().iter().map(|l| l.time).collect();
    assert_eq!(times, vec![1.0, 5.5, 10.0, 10.0]);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));

    // Ties keep original order.
    assert_eq!(track.line(2).unwrap().text, "third");
    assert_eq!(track.line(3).unwrap().text, "third-tie");
}

#[test]
fn parse_of_unsorted_input_sorts_ascending() {
    let track = LyricTrack::parse("[00:30]late\n[00:05]early\n[00:15]middle");
    let texts: Vec<&str> = track.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["early", "middle", "late"]);
}

#[test]
fn parse_with_no_valid_lines_is_an_empty_track() {
    let track = LyricTrack::parse("hello\nworld\n");
    assert!(track.is_empty());
    assert_eq!(track.lookup(10.0), None);
}

#[test]
fn lookup_boundary_semantics() {
    let track = LyricTrack::parse("[00:01]a\n[00:05]b\n[00:10]c");

    // Before the first timestamp.
    assert_eq!(track.lookup(0.0), None);
    assert_eq!(track.lookup(0.999), None);

    // Exact timestamps are lower-bound inclusive.
    assert_eq!(track.lookup(1.0), Some(0));
    assert_eq!(track.lookup(5.0), Some(1));

    // Between lines.
    assert_eq!(track.lookup(7.3), Some(1));

    // At/after the last line.
    assert_eq!(track.lookup(10.0), Some(2));
    assert_eq!(track.lookup(9999.0), Some(2));
}

#[test]
fn cursor_matches_lookup_on_increasing_times() {
    let track = LyricTrack::parse("[00:01]a\n[00:05]b\n[00:10]c\n[00:12]d");
    let mut cursor = LyricCursor::new();

    let mut t = 0.0;
    while t < 15.0 {
        assert_eq!(cursor.advance(&track, t), track.lookup(t), "at t={t}");
        t += 0.1;
    }
}

#[test]
fn cursor_recovers_from_backward_jump() {
    let track = LyricTrack::parse("[00:01]a\n[00:05]b\n[00:10]c");
    let mut cursor = LyricCursor::new();

    assert_eq!(cursor.advance(&track, 11.0), Some(2));
    // Seek backwards.
    assert_eq!(cursor.advance(&track, 2.0), Some(0));
    assert_eq!(cursor.advance(&track, 0.0), None);
    assert_eq!(cursor.advance(&track, 6.0), Some(1));
}

#[test]
fn cursor_reset_forgets_position() {
    let track = LyricTrack::parse("[00:01]a\n[00:05]b");
    let mut cursor = LyricCursor::new();
    assert_eq!(cursor.advance(&track, 6.0), Some(1));

    cursor.reset();
    let other = LyricTrack::parse("[00:02]x");
    assert_eq!(cursor.advance(&other, 0.0), None);
    assert_eq!(cursor.advance(&other, 3.0), Some(0));
}

#[test]
fn cursor_on_empty_track_returns_none() {
    let track = LyricTrack::default();
    let mut cursor = LyricCursor::new();
    assert_eq!(cursor.advance(&track, 5.0), None);
}
