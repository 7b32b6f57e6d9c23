use super::worker::ActionBackend;
use super::*;
use crate::catalog::{Track, TrackId};

fn track(id: u64, url: &str) -> Track {
    Track {
        id: TrackId::Local(id),
        title: format!("t{id}"),
        artist_name: None,
        album_title: None,
        duration: None,
        media_url: url.into(),
        genre: None,
        display: format!("t{id}"),
    }
}

fn backend() -> ActionBackend {
    ActionBackend::new(PlaylistStore::in_memory(), None)
}

#[test]
fn create_then_add_to_playlist() {
    let mut b = backend();
    let created = b.handle(ActionRequest::CreatePlaylist {
        name: "  Road Trip ".into(),
        track: TrackId::Local(1),
    });
    assert!(created.is_ok());
    assert_eq!(created.kind, ActionKind::CreatePlaylist);
    let Ok((_, ActionPayload::Playlists(lists))) = &created.result else {
        panic!("expected playlists payload, got {created:?}");
    };
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name, "Road Trip");
    let pid = lists[0].id;

    let added = b.handle(ActionRequest::AddToPlaylist {
        playlist: pid,
        track: TrackId::External("abc".into()),
    });
    assert_eq!(added.message(), "Added to \"Road Trip\"");
    assert_eq!(
        b.playlists.get(pid).map(|p| p.tracks.clone()),
        Some(vec![TrackId::Local(1), TrackId::External("abc".into())])
    );
}

#[test]
fn playlist_failures_are_reported_not_applied() {
    let mut b = backend();
    let missing = b.handle(ActionRequest::AddToPlaylist {
        playlist: 42,
        track: TrackId::Local(1),
    });
    assert_eq!(missing.result, Err(ActionError::UnknownPlaylist));

    b.handle(ActionRequest::CreatePlaylist {
        name: "Mix".into(),
        track: TrackId::Local(1),
    });
    let pid = b.playlists.playlists()[0].id;
    let dup_track = b.handle(ActionRequest::AddToPlaylist {
        playlist: pid,
        track: TrackId::Local(1),
    });
    assert_eq!(dup_track.result, Err(ActionError::AlreadyInPlaylist("Mix".into())));

    let dup_name = b.handle(ActionRequest::CreatePlaylist {
        name: "mix".into(),
        track: TrackId::Local(2),
    });
    assert!(matches!(dup_name.result, Err(ActionError::DuplicatePlaylistName(_))));

    let empty = b.handle(ActionRequest::CreatePlaylist {
        name: "   ".into(),
        track: TrackId::Local(2),
    });
    assert_eq!(empty.result, Err(ActionError::EmptyPlaylistName));
    assert_eq!(b.playlists.playlists().len(), 1);
}

#[test]
fn toggle_like_flips_and_reports_count() {
    let mut b = backend();
    let id = TrackId::Local(3);
    let first = b.handle(ActionRequest::ToggleLike { track: id.clone() });
    assert!(matches!(
        first.result,
        Ok((_, ActionPayload::Like { liked: true, count: 1 }))
    ));
    let second = b.handle(ActionRequest::ToggleLike { track: id });
    assert!(matches!(
        second.result,
        Ok((_, ActionPayload::Like { liked: false, count: 0 }))
    ));
}

#[test]
fn download_copies_local_media_into_downloads_dir() {
    let src_dir = tempfile::tempdir().unwrap();
    let dl_dir = tempfile::tempdir().unwrap();
    let src = src_dir.path().join("song.mp3");
    std::fs::write(&src, b"bytes").unwrap();

    let mut b = ActionBackend::new(PlaylistStore::in_memory(), Some(dl_dir.path().join("dl")));
    let out = b.handle(ActionRequest::Download {
        track: track(1, src.to_str().unwrap()),
    });
    let dest = dl_dir.path().join("dl").join("song.mp3");
    assert_eq!(out.result.map(|(_, p)| p), Ok(ActionPayload::Downloaded(dest.clone())));
    assert_eq!(std::fs::read(dest).unwrap(), b"bytes");
}

#[test]
fn download_rejects_remote_or_empty_media() {
    let dir = tempfile::tempdir().unwrap();
    let mut b = ActionBackend::new(PlaylistStore::in_memory(), Some(dir.path().to_path_buf()));

    let empty = b.handle(ActionRequest::Download { track: track(1, "") });
    assert_eq!(empty.result, Err(ActionError::NotDownloadable));

    let remote = b.handle(ActionRequest::Download {
        track: track(2, "https://cdn.example/a.mp3"),
    });
    assert_eq!(remote.result, Err(ActionError::NotDownloadable));

    let missing = b.handle(ActionRequest::Download {
        track: track(3, "/definitely/not/here.mp3"),
    });
    assert!(matches!(missing.result, Err(ActionError::Download(_))));

    let mut no_dir = backend();
    let out = no_dir.handle(ActionRequest::Download { track: track(4, "/a.mp3") });
    assert_eq!(out.result, Err(ActionError::NoDownloadsDir));
}

#[test]
fn playlists_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = PlaylistStore::open(dir.path());
        store.create("Saved", TrackId::External("x".into())).unwrap();
    }
    let store = PlaylistStore::open(dir.path());
    assert_eq!(store.playlists().len(), 1);
    assert_eq!(store.playlists()[0].name, "Saved");
    assert_eq!(store.playlists()[0].tracks, vec![TrackId::External("x".into())]);
}

#[test]
fn malformed_playlists_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("playlists.json"), "not json").unwrap();
    let store = PlaylistStore::open(dir.path());
    assert!(store.playlists().is_empty());
}

#[test]
fn status_maps_keep_tracks_independent() {
    let mut s = ActionStatus::new();
    let (a, b) = (TrackId::Local(1), TrackId::External("1".into()));

    s.begin_download(&a);
    s.begin_like(&b);
    assert!(s.is_downloading(&a));
    assert!(!s.is_downloading(&b));
    assert!(s.is_like_pending(&b));
    assert!(!s.is_like_pending(&a));
    assert_eq!(s.in_flight(), 2);

    s.finish_like(&b, Some(LikeState { liked: true, count: 1 }));
    assert!(!s.is_like_pending(&b));
    assert!(s.like(&b).liked);
    assert_eq!(s.like(&a), LikeState::default());

    // A failed like keeps the previous state.
    s.begin_like(&b);
    s.finish_like(&b, None);
    assert!(s.like(&b).liked);

    s.finish_download(&a);
    assert_eq!(s.in_flight(), 0);
}

#[test]
fn worker_round_trips_requests_on_its_thread() {
    let mut worker = ActionWorker::spawn(PlaylistStore::in_memory(), None);
    assert!(worker.initial_playlists().is_empty());

    worker
        .send(ActionRequest::ToggleLike { track: TrackId::Local(1) })
        .unwrap();
    let out = worker.recv().unwrap();
    assert_eq!(out.track, TrackId::Local(1));
    assert!(out.is_ok());
    assert!(worker.drain().is_empty());

    worker.shutdown();
    assert_eq!(
        worker.send(ActionRequest::ToggleLike { track: TrackId::Local(1) }),
        Err(ActionError::Unavailable)
    );
}
