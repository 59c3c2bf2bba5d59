use datapack_fs::{Error, PromoteOptions, atomic_read, copy_then_remove, reserve};
use tempfile::tempdir;

#[test]
fn test_copy_then_remove_moves_content() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("pack.zip.temp");
    let dest = dir.path().join("store").join("pack.zip");

    std::fs::write(&src, b"pack bytes").unwrap();

    let copied = copy_then_remove(&src, &dest, PromoteOptions::new()).unwrap();

    assert_eq!(copied, 10);
    assert!(!src.exists());
    assert_eq!(atomic_read(&dest).unwrap(), b"pack bytes");
}

#[test]
fn test_copy_then_remove_keep_source() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("sideloaded.zip");
    let dest = dir.path().join("entry-1.zip");

    std::fs::write(&src, b"sideloaded").unwrap();

    copy_then_remove(&src, &dest, PromoteOptions::new().keep_source(true)).unwrap();

    assert!(src.exists());
    assert_eq!(atomic_read(&dest).unwrap(), b"sideloaded");
}

#[test]
fn test_copy_then_remove_overwrites_existing() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("new.temp");
    let dest = dir.path().join("entry-1.zip");

    std::fs::write(&dest, b"stale").unwrap();
    std::fs::write(&src, b"fresh").unwrap();

    copy_then_remove(&src, &dest, PromoteOptions::new()).unwrap();

    assert_eq!(atomic_read(&dest).unwrap(), b"fresh");
}

#[test]
fn test_copy_then_remove_missing_source() {
    let dir = tempdir().unwrap();
    let err = copy_then_remove(
        dir.path().join("absent.temp"),
        dir.path().join("entry-1.zip"),
        PromoteOptions::new(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Copy { .. }));
    assert!(!dir.path().join("entry-1.zip").exists());
}

#[test]
fn test_copy_then_remove_onto_itself_keeps_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entry-1.zip");
    std::fs::write(&path, b"already here").unwrap();
    let alias = dir.path().join(".").join("entry-1.zip");

    let size = copy_then_remove(&path, &alias, PromoteOptions::new()).unwrap();

    assert_eq!(size, 12);
    assert_eq!(atomic_read(&path).unwrap(), b"already here");
}

#[test]
fn test_reserve_claims_name_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entry-1.zip");

    assert!(reserve(&path).unwrap());
    assert!(!reserve(&path).unwrap());
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}
