use std::path::Path;

use anyhow::Context;

use crate::actions::PlaylistStore;
use crate::catalog::{Track, load_catalog_file, merge, scan};
use crate::config;
use crate::session::PlaybackSession;

/// Scan `dir` and merge in the configured JSON catalog, if any.
pub fn load_tracks(dir: &Path, library: &config::LibrarySettings) -> anyhow::Result<Vec<Track>> {
    let scanned = scan(dir, library);
    let Some(catalog_path) = library.catalog_path.as_deref() else {
        return Ok(scanned);
    };

    let catalog = load_catalog_file(catalog_path, library)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
    let tracks = merge(scanned, catalog).context("merging catalog with scanned tracks")?;
    tracing::info!(count = tracks.len(), "catalog ready");
    Ok(tracks)
}

pub fn build_session(settings: &config::Settings) -> PlaybackSession {
    PlaybackSession::new(settings.playback.loop_mode.into())
}

pub fn open_playlists(settings: &config::ActionSettings) -> PlaylistStore {
    match settings.data_dir.as_deref() {
        Some(dir) => PlaylistStore::open(dir),
        None => {
            tracing::info!("no data dir; playlists are kept in memory");
            PlaylistStore::in_memory()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TrackId;
    use crate::config::LibrarySettings;
    use std::fs;

    #[test]
    fn load_tracks_merges_catalog_after_scan() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let catalog = dir.path().join("catalog.json");
        fs::write(
            &catalog,
            r#"[{"id": "4uLU6hMC", "title": "Remote", "mediaUrl": ""}]"#,
        )
        .unwrap();

        let library = LibrarySettings {
            catalog_path: Some(catalog),
            ..LibrarySettings::default()
        };
        let tracks = load_tracks(dir.path(), &library).unwrap();
        let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(
            ids,
            vec![TrackId::Local(1), TrackId::External("4uLU6hMC".into())]
        );
    }

    #[test]
    fn load_tracks_reports_a_bad_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let library = LibrarySettings {
            catalog_path: Some(dir.path().join("missing.json")),
            ..LibrarySettings::default()
        };
        let err = load_tracks(dir.path(), &library).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
