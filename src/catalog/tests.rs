use super::display::display_from_fields;
use super::load::{CatalogError, parse_catalog};
use super::model::UNKNOWN_ALBUM;
use super::*;
use crate::config::{LibrarySettings, TrackDisplayField};
use std::time::Duration;

fn local(id: u64, title: &str) -> Track {
    Track {
        id: TrackId::Local(id),
        title: title.into(),
        artist_name: None,
        album_title: None,
        duration: None,
        media_url: format!("/music/{title}.mp3"),
        genre: None,
        display: title.into(),
    }
}

fn settings() -> LibrarySettings {
    LibrarySettings::default()
}

#[test]
fn display_from_fields_joins_non_empty_parts() {
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];
    assert_eq!(
        display_from_fields("Song", Some("  Artist  "), None, None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields("Song", None, None, None, &fields, " - "),
        "Song"
    );
    assert_eq!(
        display_from_fields("Song", None, None, None, &[TrackDisplayField::Album], " - "),
        "Song"
    );
    assert_eq!(
        display_from_fields(
            "Song",
            None,
            Some("LP"),
            Some("jazz"),
            &[TrackDisplayField::Album, TrackDisplayField::Genre],
            "/"
        ),
        "LP/jazz"
    );
}

#[test]
fn parse_catalog_defaults_to_external_ids() {
    let json = r#"[
        {"id": "3n3Ppam7", "title": "Preview", "artistName": "Band",
         "durationSeconds": 30, "mediaUrl": "https://p.example/3n3Ppam7.mp3"},
        {"id": 7, "title": "Numbered", "media_url": ""}
    ]"#;
    let tracks = parse_catalog(json, &settings()).unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id, TrackId::External("3n3Ppam7".into()));
    assert_eq!(tracks[0].display, "Band - Preview");
    assert_eq!(tracks[0].duration, Some(Duration::from_secs(30)));
    assert!(tracks[0].is_playable());
    assert_eq!(tracks[1].id, TrackId::External("7".into()));
    assert!(!tracks[1].is_playable());
    assert_eq!(tracks[1].album_or_unknown(), UNKNOWN_ALBUM);
}

#[test]
fn local_and_external_ids_never_collide() {
    let tracks = parse_catalog(r#"[{"id": "7", "title": "Theirs"}]"#, &settings()).unwrap();
    let mine = local(7, "Mine");
    assert_eq!(tracks[0].id, TrackId::External("7".into()));
    assert_ne!(mine.id, tracks[0].id);
    assert_eq!(mine.id.to_string(), "local:7");
    assert_eq!(tracks[0].id.to_string(), "external:7");

    let merged = merge(vec![mine], tracks).unwrap();
    assert_eq!(merged.len(), 2);
}

#[test]
fn catalog_records_cannot_claim_local_ids() {
    for json in [
        r#"[{"id": 1, "source": "local", "title": "x"}]"#,
        r#"[{"id": "abc", "source": "local", "title": "x"}]"#,
    ] {
        assert!(matches!(
            parse_catalog(json, &settings()),
            Err(CatalogError::LocalSource(_))
        ));
    }
}

#[test]
fn parse_catalog_rejects_bad_records() {
    let dup = r#"[{"id": "a", "title": "x"}, {"id": "a", "title": "y"}]"#;
    assert!(matches!(
        parse_catalog(dup, &settings()),
        Err(CatalogError::DuplicateId(TrackId::External(ref s))) if s == "a"
    ));

    let negative = r#"[{"id": "a", "title": "x", "durationSeconds": -1}]"#;
    assert!(matches!(
        parse_catalog(negative, &settings()),
        Err(CatalogError::BadDuration { .. })
    ));

    assert!(matches!(
        parse_catalog("{", &settings()),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn merge_rejects_ids_present_in_both_sources() {
    let scanned = vec![local(1, "a")];
    let clash = vec![local(1, "b")];
    let ok = parse_catalog(r#"[{"id": 1, "title": "c"}]"#, &settings()).unwrap();

    assert!(matches!(
        merge(scanned.clone(), clash),
        Err(CatalogError::DuplicateId(TrackId::Local(1)))
    ));
    let merged = merge(scanned, ok).unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].title, "a");
}

#[test]
fn load_catalog_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        load_catalog_file(&missing, &settings()),
        Err(CatalogError::Io { .. })
    ));

    let path = dir.path().join("catalog.json");
    std::fs::write(&path, r#"[{"id": "x", "title": "From disk"}]"#).unwrap();
    let tracks = load_catalog_file(&path, &settings()).unwrap();
    assert_eq!(tracks[0].title, "From disk");
}

#[test]
fn local_path_accepts_paths_and_file_urls_only() {
    let mut t = parse_catalog(r#"[{"id": "x", "title": "t"}]"#, &settings())
        .unwrap()
        .remove(0);

    assert_eq!(t.local_path(), None);

    t.media_url = "/music/a.mp3".into();
    assert_eq!(t.local_path(), Some(std::path::PathBuf::from("/music/a.mp3")));

    t.media_url = "file:///music/b.flac".into();
    assert_eq!(t.local_path(), Some(std::path::PathBuf::from("/music/b.flac")));

    t.media_url = "https://cdn.example/c.mp3".into();
    assert_eq!(t.local_path(), None);
}
