//! Config root and binary resolution against a real directory tree.

use std::fs;
use std::path::Path;

use phpunit_runner::resolver::{TestBinary, find_config_root, find_test_binary};
use tempfile::TempDir;

/// Create `files` (relative paths) under a fresh temporary directory.
fn project(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    dir
}

fn canonical(path: &Path) -> std::path::PathBuf {
    fs::canonicalize(path).unwrap()
}

#[test]
fn test_config_root_is_nearest_ancestor() {
    let dir = project(&["phpunit.xml", "b/c/Foo.php"]);
    let root = find_config_root(&dir.path().join("b/c/Foo.php"));
    assert!(root.found);
    assert_eq!(root.path, dir.path());
}

#[test]
fn test_config_root_prefers_inner_dist_file() {
    let dir = project(&["phpunit.xml", "packages/cart/phpunit.xml.dist", "packages/cart/tests/CartTest.php"]);
    let root = find_config_root(&dir.path().join("packages/cart/tests/CartTest.php"));
    assert_eq!(root.path, dir.path().join("packages/cart"));
}

#[test]
fn test_config_directory_named_like_config_is_ignored() {
    // A directory called phpunit.xml is not a config file
    let dir = project(&["phpunit.xml/placeholder", "tests/FooTest.php"]);
    let root = find_config_root(&dir.path().join("tests/FooTest.php"));
    assert_ne!(root.path, dir.path());
}

#[test]
fn test_binary_prefers_pest() {
    let dir = project(&["vendor/bin/pest", "vendor/bin/phpunit"]);
    let binary = find_test_binary(dir.path());
    assert_eq!(binary, TestBinary::Path(canonical(&dir.path().join("vendor/bin/pest"))));
}

#[test]
fn test_binary_falls_back_to_phpunit() {
    let dir = project(&["vendor/bin/phpunit"]);
    let binary = find_test_binary(dir.path());
    assert_eq!(binary, TestBinary::Path(canonical(&dir.path().join("vendor/bin/phpunit"))));
}

#[test]
fn test_binary_bare_when_vendor_missing() {
    let dir = project(&[]);
    assert_eq!(find_test_binary(dir.path()), TestBinary::Bare("phpunit"));
}

#[cfg(unix)]
#[test]
fn test_binary_symlink_is_resolved() {
    let dir = project(&["vendor/phpunit/phpunit/phpunit"]);
    fs::create_dir_all(dir.path().join("vendor/bin")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("vendor/phpunit/phpunit/phpunit"),
        dir.path().join("vendor/bin/phpunit"),
    )
    .unwrap();

    let binary = find_test_binary(dir.path());
    assert_eq!(
        binary,
        TestBinary::Path(canonical(&dir.path().join("vendor/phpunit/phpunit/phpunit")))
    );
}
