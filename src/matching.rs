//! Jump between a class and its test: `User.php` ⇄ `UserTest.php`.

use std::fs;
use std::path::{Path, PathBuf};

use phpunit_core::vocab::project::{SKIPPED_DIRS, TEST_NAME_MARKER};

/// File name prefix of the counterpart of `file`.
///
/// ## Returns
/// - (`Option<String>`): `<stem>Test` for a source file, `<stem before Test>.` for a test file (the trailing `.`
///   keeps `UserTest.php` from matching itself). `None` when the path has no file name.
///
/// ## Examples
/// ```rust
/// use phpunit_runner::matching::target_for;
/// use std::path::Path;
///
/// assert_eq!(target_for(Path::new("app/User.php")).as_deref(), Some("UserTest"));
/// assert_eq!(target_for(Path::new("tests/UserTest.php")).as_deref(), Some("User."));
/// ```
pub fn target_for(file: &Path) -> Option<String> {
    let name = file.file_name()?.to_str()?;
    let stem = name.split('.').next().unwrap_or(name);
    match stem.find(TEST_NAME_MARKER) {
        None => Some(format!("{stem}{TEST_NAME_MARKER}")),
        Some(at) => Some(format!("{}.", &stem[..at])),
    }
}

/// Files under `root` whose name starts with `target`, sorted.
///
/// Skips `vendor`, `node_modules` and hidden directories. Unreadable directories are skipped silently.
#[tracing::instrument]
pub fn find_matches(root: &Path, target: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, target, &mut found);
    found.sort();
    found
}

fn walk(dir: &Path, target: &str, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_dir() {
            if !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|skipped| *skipped == name) {
                walk(&path, target, found);
            }
        } else if name.starts_with(target) {
            found.push(path);
        }
    }
}
