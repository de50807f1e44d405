//! Project layout vocabulary: configuration markers and runner binary candidates.
//!
//! ## Notes
//! - [`CONFIG_FILE_NAMES`] are checked in order in every ancestor directory; either marks a config root.
//! - [`BINARY_CANDIDATES`] order matters: the first existing file wins, so Pest is preferred whenever it is installed.
//! - [`FALLBACK_BINARY`] is `phpunit` for every file; Pest projects without `vendor/bin/pest` get it too.

use crate::Framework;

/// File names that mark a directory as a PHPUnit/Pest configuration root.
pub const CONFIG_FILE_NAMES: &[&str] = &["phpunit.xml", "phpunit.xml.dist"];

/// Substring that marks a file name as a test file (`UserTest.php`).
pub const TEST_NAME_MARKER: &str = "Test";

/// Directories skipped when searching a project tree for sibling files.
pub const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules"];

/// A runner binary location, relative to the config root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryCandidate {
    pub relative_path: &'static str,
    pub framework: Framework,
}

/// Runner binaries probed under a config root, in priority order.
pub const BINARY_CANDIDATES: &[BinaryCandidate] = &[
    BinaryCandidate {
        relative_path: "vendor/bin/pest",
        framework: Framework::Pest,
    },
    BinaryCandidate {
        relative_path: "vendor/bin/phpunit",
        framework: Framework::PhpUnit,
    },
    BinaryCandidate {
        relative_path: "vendor/bin/phpunit/phpunit/phpunit",
        framework: Framework::PhpUnit,
    },
];

/// Command name used when no candidate exists, left to `PATH` lookup.
pub const FALLBACK_BINARY: &str = "phpunit";

/// Check whether a file name looks like a test file.
///
/// ## Parameters
/// - `file_name`: a bare file name or full path.
///
/// ## Returns
/// - (`bool`): `true` when the name contains [`TEST_NAME_MARKER`].
pub fn is_test_file_name(file_name: &str) -> bool {
    file_name.contains(TEST_NAME_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pest_is_probed_first() {
        assert_eq!(BINARY_CANDIDATES[0].relative_path, "vendor/bin/pest");
        assert_eq!(BINARY_CANDIDATES[0].framework, Framework::Pest);
    }

    #[test]
    fn test_config_file_names() {
        assert_eq!(CONFIG_FILE_NAMES, &["phpunit.xml", "phpunit.xml.dist"]);
    }

    #[test]
    fn test_is_test_file_name() {
        assert!(is_test_file_name("UserTest.php"));
        assert!(is_test_file_name("/app/tests/Feature/LoginTest.php"));
        assert!(!is_test_file_name("User.php"));
        // Case-sensitive, like the marker itself
        assert!(!is_test_file_name("usertest.php"));
    }
}
