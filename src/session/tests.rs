use super::*;
use crate::catalog::{Track, TrackId};

fn t(id: u64, url: &str) -> Track {
    Track {
        id: TrackId::Local(id),
        title: format!("Track {id}"),
        artist_name: None,
        album_title: None,
        duration: None,
        media_url: url.into(),
        genre: None,
        display: format!("Track {id}"),
    }
}

fn ext(id: &str) -> Track {
    Track {
        id: TrackId::External(id.into()),
        media_url: format!("https://preview.example/{id}.mp3"),
        ..t(0, "")
    }
}

fn state(s: &PlaybackSession) -> (Option<TrackId>, bool) {
    (s.current_track_id().cloned(), s.is_playing())
}

#[test]
fn play_then_toggle_pauses_and_keeps_current() {
    let mut s = PlaybackSession::default();
    let a = t(1, "x");
    s.play(&a);
    s.toggle();
    assert_eq!(state(&s), (Some(TrackId::Local(1)), false));
}

#[test]
fn toggle_play_pause_for_same_track_twice_plays_then_pauses() {
    let mut s = PlaybackSession::default();
    let a = t(1, "x");

    s.toggle_play_pause_for(&a);
    assert_eq!(state(&s), (Some(TrackId::Local(1)), true));
    let generation = s.snapshot().generation;

    s.toggle_play_pause_for(&a);
    assert_eq!(state(&s), (Some(TrackId::Local(1)), false));
    // Pausing is not a new play.
    assert_eq!(s.snapshot().generation, generation);
}

#[test]
fn toggle_play_pause_for_other_track_replaces_and_starts() {
    for a_playing in [true, false] {
        let mut s = PlaybackSession::default();
        let (a, b) = (t(1, "x"), t(2, "y"));
        s.toggle_play_pause_for(&a);
        if !a_playing {
            s.toggle_play_pause_for(&a);
        }

        s.toggle_play_pause_for(&b);
        assert_eq!(state(&s), (Some(TrackId::Local(2)), true));
    }
}

#[test]
fn load_empty_queue_is_a_silent_no_op() {
    let mut s = PlaybackSession::default();
    let a = t(1, "x");
    assert!(s.load_queue(vec![a.clone()]));
    s.play(&a);
    let before = s.snapshot();

    assert!(!s.load_queue(Vec::new()));
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.queue().len(), 1);
}

#[test]
fn load_queue_does_not_touch_playback() {
    let mut s = PlaybackSession::default();
    let a = t(1, "x");
    s.play(&a);
    s.load_queue(vec![t(2, "y"), t(3, "z")]);
    assert_eq!(state(&s), (Some(TrackId::Local(1)), true));
}

#[test]
fn toggle_and_pause_without_current_are_no_ops() {
    let mut s = PlaybackSession::default();
    s.toggle();
    assert_eq!(state(&s), (None, false));
    s.pause();
    s.pause();
    assert_eq!(state(&s), (None, false));
}

#[test]
fn play_accepts_unplayable_track() {
    let mut s = PlaybackSession::default();
    let silent = t(9, "");
    s.play(&silent);
    assert_eq!(state(&s), (Some(TrackId::Local(9)), true));
}

#[test]
fn album_then_other_track_scenario() {
    let (a, b) = (t(1, "x"), t(2, "y"));
    let mut s = PlaybackSession::default();
    s.load_queue(vec![a.clone(), b.clone()]);

    s.play(&a);
    assert_eq!(state(&s), (Some(TrackId::Local(1)), true));

    s.toggle_play_pause_for(&b);
    assert_eq!(state(&s), (Some(TrackId::Local(2)), true));

    s.toggle();
    assert_eq!(state(&s), (Some(TrackId::Local(2)), false));
}

#[test]
fn next_and_previous_wrap_with_loop_all() {
    let mut s = PlaybackSession::new(LoopMode::LoopAll);
    let q = vec![t(1, "a"), t(2, "b"), t(3, "c")];
    s.load_queue(q.clone());
    s.play(&q[2]);

    assert_eq!(s.next().map(|t| t.id.clone()), Some(TrackId::Local(1)));
    assert_eq!(s.previous().map(|t| t.id.clone()), Some(TrackId::Local(3)));
    assert_eq!(s.previous().map(|t| t.id.clone()), Some(TrackId::Local(2)));
    assert!(s.is_playing());
}

#[test]
fn next_past_end_pauses_without_loop() {
    let mut s = PlaybackSession::new(LoopMode::NoLoop);
    let q = vec![t(1, "a"), t(2, "b")];
    s.load_queue(q.clone());
    s.play(&q[1]);

    assert!(s.next().is_none());
    assert_eq!(state(&s), (Some(TrackId::Local(2)), false));

    // At the start, previous restarts the first track.
    s.play(&q[0]);
    let generation = s.snapshot().generation;
    assert_eq!(s.previous().map(|t| t.id.clone()), Some(TrackId::Local(1)));
    assert!(s.snapshot().generation > generation);
}

#[test]
fn track_outside_queue_behaves_as_queue_of_one() {
    let preview = ext("3n3Ppam7");

    let mut looping = PlaybackSession::new(LoopMode::LoopAll);
    looping.load_queue(vec![t(1, "a"), t(2, "b")]);
    looping.play(&preview);
    let generation = looping.snapshot().generation;
    assert_eq!(looping.next().map(|t| t.id.clone()), Some(preview.id.clone()));
    assert!(looping.snapshot().generation > generation);
    assert_eq!(looping.previous().map(|t| t.id.clone()), Some(preview.id.clone()));

    let mut once = PlaybackSession::new(LoopMode::NoLoop);
    once.load_queue(vec![t(1, "a")]);
    once.play(&preview);
    assert!(once.next().is_none());
    assert_eq!(state(&once), (Some(preview.id.clone()), false));
    assert_eq!(once.previous().map(|t| t.id.clone()), Some(preview.id));
    assert!(once.is_playing());
}

#[test]
fn next_without_current_starts_the_queue() {
    let mut s = PlaybackSession::default();
    assert!(s.next().is_none());
    assert_eq!(state(&s), (None, false));

    s.load_queue(vec![t(1, "a"), t(2, "b")]);
    assert_eq!(s.next().map(|t| t.id.clone()), Some(TrackId::Local(1)));

    let mut s = PlaybackSession::default();
    s.load_queue(vec![t(1, "a"), t(2, "b")]);
    assert_eq!(s.previous().map(|t| t.id.clone()), Some(TrackId::Local(2)));
}

#[test]
fn stop_clears_current_and_cycle_loop_mode_flips() {
    let mut s = PlaybackSession::default();
    s.play(&t(1, "a"));
    s.stop();
    assert_eq!(state(&s), (None, false));

    assert_eq!(s.loop_mode(), LoopMode::LoopAll);
    s.cycle_loop_mode();
    assert_eq!(s.loop_mode(), LoopMode::NoLoop);
    s.cycle_loop_mode();
    assert_eq!(s.loop_mode(), LoopMode::LoopAll);
}
