//! Integration tests for playlist loading

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use wallsync::playlist::sources::FileSource;
use wallsync::playlist::{source_for, PlaylistError, PlaylistSource};
use wallsync::{MediaKind, Playlist};

use crate::helpers::fixtures_dir;

#[test]
fn loads_json_fixture() {
    let playlist = Playlist::load(fixtures_dir().join("lobby.json")).unwrap();
    assert_eq!(playlist.wall, "lobby");
    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist.items[1].kind, MediaKind::Video);
    assert_eq!(playlist.total_duration_ms(), 30_000);
}

#[test]
fn loads_toml_fixture() {
    let playlist = Playlist::load(fixtures_dir().join("drive_thru.toml")).unwrap();
    assert_eq!(playlist.wall, "drive-thru");
    let kinds: Vec<MediaKind> = playlist.items.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![MediaKind::Widget, MediaKind::Image, MediaKind::Video]
    );
}

#[test]
fn promo_fixture_orders_and_filters() {
    let playlist = Playlist::load(fixtures_dir().join("promos.json")).unwrap();
    let ids: Vec<&str> = playlist.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["lunch", "breakfast", "retired"]);

    // breakfast ended in 2020, retired is inactive
    let playable = playlist.playable_at(1_800_000_000_000);
    assert_eq!(playable.len(), 1);
    assert_eq!(playable.items[0].id, "lunch");
}

#[test]
fn file_source_is_selected_for_paths() {
    let path = fixtures_dir().join("lobby.json");
    let source = source_for(&path.display().to_string(), Duration::from_secs(1)).unwrap();
    assert_eq!(source.fetch().unwrap().wall, "lobby");
}

#[test]
fn toml_with_wrong_types_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "wall = 3\n").unwrap();

    let err = FileSource::new(&path).fetch().unwrap_err();
    assert!(matches!(err, PlaylistError::Toml(_)));
}

#[test]
fn unknown_media_kind_is_rejected() {
    let result = Playlist::from_json_str(r#"[{"id":"A","kind":"hologram","media_ref":"x"}]"#);
    assert!(result.is_err());
}
