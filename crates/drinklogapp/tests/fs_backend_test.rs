use drinklogapp::store::backend::{StorageBackend, StorageKey};
use drinklogapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    assert_eq!(backend.read(StorageKey::Drinks).unwrap(), None);

    backend.write(StorageKey::Drinks, "[]").unwrap();
    assert_eq!(
        backend.read(StorageKey::Drinks).unwrap(),
        Some("[]".to_string())
    );

    backend.write(StorageKey::Drinks, "[1]").unwrap();
    assert_eq!(
        backend.read(StorageKey::Drinks).unwrap(),
        Some("[1]".to_string())
    );
}

#[test]
fn test_fs_backend_keys_map_to_files() {
    let (dir, backend) = setup();
    backend.write(StorageKey::Drinks, "drinks").unwrap();
    backend.write(StorageKey::Favorites, "favorites").unwrap();

    assert_eq!(backend.location(StorageKey::Drinks), dir.path().join("drinks.json"));
    assert_eq!(
        fs::read_to_string(dir.path().join("favorites.json")).unwrap(),
        "favorites"
    );
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.write(StorageKey::Drinks, "Atomic").unwrap();
    backend.write(StorageKey::Favorites, "Atomic").unwrap();

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());

    backend.write(StorageKey::Favorites, "[]").unwrap();
    assert!(nested.join("favorites.json").exists());
}
