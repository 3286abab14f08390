use super::PlaylistCursor;
use crate::model::{PlayMode, Song};

fn songs(ids: &[&str]) -> Vec<Song> {
    ids.iter().map(|id| Song::remote(*id)).collect()
}

#[test]
fn set_list_clamps_start_and_clears_override() {
    let mut q = PlaylistCursor::new();
    q.enqueue_next(Song::remote("queued"));
    q.set_list(songs(&["a", "b"]), 5);
    assert_eq!(q.index(), 2); // clamped to len == past-end
    assert_eq!(q.pending_len(), 0);

    q.set_list(songs(&["a", "b", "c"]), 1);
    assert_eq!(q.index(), 1);
    assert_eq!(q.current().unwrap().id, "b");
}

#[test]
fn sequence_advance_walks_to_past_end() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b", "c"]), 1);

    assert_eq!(q.advance(PlayMode::Sequence), 2);
    assert_eq!(q.current().unwrap().id, "c");

    assert_eq!(q.advance(PlayMode::Sequence), 3);
    assert!(q.current().is_none());

    // Stays parked past the end.
    assert_eq!(q.advance(PlayMode::Sequence), 3);
}

#[test]
fn loop_advance_wraps() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b", "c"]), 2);
    assert_eq!(q.advance(PlayMode::Loop), 0);
    assert_eq!(q.advance(PlayMode::Loop), 1);
}

#[test]
fn single_advance_keeps_index() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b", "c"]), 1);
    assert_eq!(q.advance(PlayMode::Single), 1);
    assert_eq!(q.advance(PlayMode::Single), 1);
}

#[test]
fn random_advance_stays_in_range() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b", "c"]), 0);
    for _ in 0..1000 {
        let idx = q.advance(PlayMode::Random);
        assert!(idx < 3, "random index {idx} out of range");
    }
}

#[test]
fn retreat_saturates_at_zero() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b"]), 1);
    assert_eq!(q.retreat(), 0);
    assert_eq!(q.retreat(), 0);
    assert_eq!(q.current().unwrap().id, "a");
}

#[test]
fn enqueue_next_splices_after_current_index() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b", "c"]), 0);
    q.enqueue_next(Song::remote("x"));

    let idx = q.advance(PlayMode::Sequence);
    assert_eq!(idx, 1);
    assert_eq!(q.current().unwrap().id, "x");
    assert_eq!(q.pending_len(), 0);

    // The splice is a permanent list mutation.
    let ids: Vec<&str> = q.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "x", "b", "c"]);
}

#[test]
fn override_queue_is_fifo() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b"]), 0);
    q.enqueue_next(Song::remote("x"));
    q.enqueue_next(Song::remote("y"));

    q.advance(PlayMode::Sequence);
    assert_eq!(q.current().unwrap().id, "x");
    q.advance(PlayMode::Sequence);
    assert_eq!(q.current().unwrap().id, "y");
    q.advance(PlayMode::Sequence);
    assert_eq!(q.current().unwrap().id, "b");
}

#[test]
fn splice_applies_even_under_single_mode() {
    let mut q = PlaylistCursor::new();
    q.set_list(songs(&["a", "b"]), 0);
    q.enqueue_next(Song::remote("x"));

    // Single keeps the index, but the pending song still lands in the list.
    assert_eq!(q.advance(PlayMode::Single), 0);
    let ids: Vec<&str> = q.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "x", "b"]);
}

#[test]
fn empty_list_advances_do_not_panic() {
    let mut q = PlaylistCursor::new();
    q.set_list(Vec::new(), 0);
    assert_eq!(q.advance(PlayMode::Sequence), 0);
    assert_eq!(q.advance(PlayMode::Loop), 0);
    assert_eq!(q.advance(PlayMode::Random), 0);
    assert!(q.current().is_none());
}
