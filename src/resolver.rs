//! Config root and test binary resolution.
//!
//! Both lookups are plain filesystem probes repeated on every invocation. Nothing is cached, so a `composer install`
//! between two runs is picked up immediately.
//!
//! ## Notes
//! - Filesystem access goes through [`FileProbe`] so tests can describe a project tree without touching disk.
//! - Neither lookup fails: a missing config falls back to the filesystem root, a missing binary falls back to a bare
//!   command name resolved by the shell.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use phpunit_core::vocab::project::{BINARY_CANDIDATES, CONFIG_FILE_NAMES, FALLBACK_BINARY};

/// Filesystem queries the resolver needs.
pub trait FileProbe {
    /// Whether `path` exists and is a regular file (following symlinks).
    fn is_file(&self, path: &Path) -> bool;

    /// Resolve symlinks and relative components, or `None` if that fails.
    fn canonicalize(&self, path: &Path) -> Option<PathBuf>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileProbe for RealFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }
}

/// The directory commands run from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRoot {
    pub path: PathBuf,
    /// `false` when no config file was found and `path` is the filesystem root
    pub found: bool,
}

/// The runner executable to invoke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestBinary {
    /// A binary inside the project, symlinks resolved
    Path(PathBuf),
    /// A command name left to `PATH` lookup
    Bare(&'static str),
}

impl fmt::Display for TestBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestBinary::Path(path) => write!(f, "{}", path.display()),
            TestBinary::Bare(name) => f.write_str(name),
        }
    }
}

/// Find the nearest ancestor of `file` holding a PHPUnit config file.
///
/// ## Parameters
/// - `file`: the file being tested. Relative paths are made absolute against the working directory.
///
/// ## Returns
/// - (`ConfigRoot`): the first ancestor directory (starting at the file's parent) containing `phpunit.xml` or
///   `phpunit.xml.dist`; otherwise the filesystem root with `found = false`.
pub fn find_config_root(file: &Path) -> ConfigRoot {
    find_config_root_with(&RealFs, file)
}

/// [`find_config_root`] over an arbitrary [`FileProbe`].
#[tracing::instrument(skip(probe))]
pub fn find_config_root_with(probe: &impl FileProbe, file: &Path) -> ConfigRoot {
    let file = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    let start = file.parent().unwrap_or(&file);

    let mut top = start;
    for dir in start.ancestors() {
        top = dir;
        if CONFIG_FILE_NAMES.iter().any(|name| probe.is_file(&dir.join(name))) {
            tracing::debug!(root = %dir.display(), "found config root");
            return ConfigRoot {
                path: dir.to_path_buf(),
                found: true,
            };
        }
    }

    tracing::warn!(
        file = %file.display(),
        "no phpunit.xml or phpunit.xml.dist found; running from {}",
        top.display()
    );
    ConfigRoot {
        path: top.to_path_buf(),
        found: false,
    }
}

/// Find the test runner binary for a project.
///
/// ## Returns
/// - (`TestBinary`): the first of `vendor/bin/pest`, `vendor/bin/phpunit`, `vendor/bin/phpunit/phpunit/phpunit`
///   under `root` that exists, canonicalized; otherwise bare `phpunit`, whatever style the file is written in.
pub fn find_test_binary(root: &Path) -> TestBinary {
    find_test_binary_with(&RealFs, root)
}

/// [`find_test_binary`] over an arbitrary [`FileProbe`].
#[tracing::instrument(skip(probe))]
pub fn find_test_binary_with(probe: &impl FileProbe, root: &Path) -> TestBinary {
    for candidate in BINARY_CANDIDATES {
        let path = root.join(candidate.relative_path);
        if probe.is_file(&path) {
            let resolved = probe.canonicalize(&path).unwrap_or(path);
            tracing::debug!(binary = %resolved.display(), framework = ?candidate.framework, "found test binary");
            return TestBinary::Path(resolved);
        }
    }

    tracing::debug!(fallback = FALLBACK_BINARY, "no project binary; relying on PATH");
    TestBinary::Bare(FALLBACK_BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// An in-memory tree: only the listed files exist.
    struct FakeFs(HashSet<PathBuf>);

    impl FakeFs {
        fn with(files: &[&str]) -> Self {
            Self(files.iter().map(PathBuf::from).collect())
        }
    }

    impl FileProbe for FakeFs {
        fn is_file(&self, path: &Path) -> bool {
            self.0.contains(path)
        }

        fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
            Some(path.to_path_buf())
        }
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let fs = FakeFs::with(&["/a/phpunit.xml"]);
        let root = find_config_root_with(&fs, Path::new("/a/b/c/Foo.php"));
        assert_eq!(
            root,
            ConfigRoot {
                path: PathBuf::from("/a"),
                found: true
            }
        );
    }

    #[test]
    fn test_dist_file_counts() {
        let fs = FakeFs::with(&["/a/phpunit.xml", "/a/b/phpunit.xml.dist"]);
        let root = find_config_root_with(&fs, Path::new("/a/b/c/Foo.php"));
        assert_eq!(root.path, PathBuf::from("/a/b"));
    }

    #[test]
    fn test_config_next_to_file() {
        let fs = FakeFs::with(&["/a/b/c/phpunit.xml"]);
        let root = find_config_root_with(&fs, Path::new("/a/b/c/Foo.php"));
        assert_eq!(root.path, PathBuf::from("/a/b/c"));
    }

    #[test]
    fn test_missing_config_falls_back_to_root() {
        let fs = FakeFs::with(&[]);
        let root = find_config_root_with(&fs, Path::new("/a/b/c/Foo.php"));
        assert_eq!(
            root,
            ConfigRoot {
                path: PathBuf::from("/"),
                found: false
            }
        );
    }

    #[test]
    fn test_pest_preferred_over_phpunit() {
        let fs = FakeFs::with(&["/p/vendor/bin/pest", "/p/vendor/bin/phpunit"]);
        let binary = find_test_binary_with(&fs, Path::new("/p"));
        assert_eq!(binary, TestBinary::Path(PathBuf::from("/p/vendor/bin/pest")));
    }

    #[test]
    fn test_nested_phpunit_binary() {
        let fs = FakeFs::with(&["/p/vendor/bin/phpunit/phpunit/phpunit"]);
        let binary = find_test_binary_with(&fs, Path::new("/p"));
        assert_eq!(binary, TestBinary::Path(PathBuf::from("/p/vendor/bin/phpunit/phpunit/phpunit")));
    }

    #[test]
    fn test_bare_fallback_is_phpunit() {
        let fs = FakeFs::with(&[]);
        assert_eq!(find_test_binary_with(&fs, Path::new("/p")), TestBinary::Bare("phpunit"));

        // A stray file elsewhere in the project does not count
        let fs = FakeFs::with(&["/p/pest"]);
        assert_eq!(find_test_binary_with(&fs, Path::new("/p")), TestBinary::Bare("phpunit"));
    }

    #[test]
    fn test_binary_display() {
        assert_eq!(TestBinary::Bare("pest").to_string(), "pest");
        assert_eq!(TestBinary::Path(PathBuf::from("/p/vendor/bin/phpunit")).to_string(), "/p/vendor/bin/phpunit");
    }
}
