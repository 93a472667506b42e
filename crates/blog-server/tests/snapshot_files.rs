//! Snapshot persistence through files and application state.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;
use std::sync::Arc;

use blog_core::{BlogError, Post};
use blog_server::app_state::AppState;
use blog_server::config::ServerConfig;
use blog_server::storage::{InMemoryPostRepository, PostRepository};

#[test]
fn save_then_load_restores_posts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");

    let repo = InMemoryPostRepository::new();
    repo.create(Post::draft("Title 1", "Content 1", "Author 1")).unwrap();
    repo.create(Post::draft("Title 2", "Content 2", "Author 2")).unwrap();
    repo.save_to_file(&path).unwrap();

    let restored = InMemoryPostRepository::new();
    restored.load_from_file(&path).unwrap();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.get_by_id(2).unwrap().author, "Author 2");
    assert_eq!(restored.peek_next_id(), 3);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    InMemoryPostRepository::new().save_to_file(&path).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["posts.json".to_string()]);
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("posts.json");
    let err = InMemoryPostRepository::new().save_to_file(&path).unwrap_err();
    assert!(matches!(err, BlogError::PersistenceIo(_)));
}

#[test]
fn load_missing_file_is_io_error_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let repo = InMemoryPostRepository::new();
    repo.create(Post::draft("A", "c", "x")).unwrap();

    let err = repo.load_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, BlogError::PersistenceIo(_)));
    assert_eq!(repo.len(), 1);
}

#[test]
fn load_corrupt_file_is_deserialization_error_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    fs::write(&path, b"[{\"id\": 1, \"title\": ").unwrap();

    let repo = InMemoryPostRepository::new();
    repo.create(Post::draft("A", "c", "x")).unwrap();

    let err = repo.load_from_file(&path).unwrap_err();
    assert!(matches!(err, BlogError::Deserialization(_)));
    assert_eq!(repo.get_by_id(1).unwrap().title, "A");
}

fn cfg_with_snapshot(path: &std::path::Path) -> ServerConfig {
    let mut cfg = ServerConfig::default();
    cfg.storage.snapshot_path = Some(path.to_string_lossy().into_owned());
    cfg
}

#[test]
fn app_state_loads_snapshot_on_start_and_saves_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    fs::write(
        &path,
        br#"[{"id": 4, "title": "kept", "content": "c", "author": "a"}]"#,
    )
    .unwrap();

    let state = AppState::new(cfg_with_snapshot(&path)).unwrap();
    assert_eq!(state.store().get_by_id(4).unwrap().title, "kept");

    state.store().create(Post::draft("new", "c", "a")).unwrap();
    state.save_snapshot().unwrap();

    let reloaded = InMemoryPostRepository::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get_by_id(5).unwrap().title, "new");
}

#[test]
fn app_state_starts_empty_without_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(cfg_with_snapshot(&dir.path().join("later.json"))).unwrap();
    assert!(state.store().is_empty());
}

#[test]
fn app_state_refuses_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.json");
    fs::write(&path, b"garbage").unwrap();
    assert!(matches!(
        AppState::new(cfg_with_snapshot(&path)),
        Err(BlogError::Deserialization(_))
    ));
}

#[test]
fn save_snapshot_without_path_is_noop() {
    let state = AppState::with_store(ServerConfig::default(), Arc::new(InMemoryPostRepository::new()));
    state.save_snapshot().unwrap();
}
