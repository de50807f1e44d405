//! Provide the shared, pure vocabulary used by `phpunit-runner` and its PHP scanner.
//!
//! This crate is intentionally small and dependency-free. It holds the fixed names every other layer agrees on:
//! - the configuration files that mark a project root,
//! - the runner binaries probed under `vendor/bin`,
//! - the shell dialects and their command connectors,
//! - the terminal applications commands can be dispatched to,
//! - the user-visible commands and their CLI/session spellings,
//! - the PHP keywords the scanner cares about.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no runner-specific types.
//! - Callers work with stable IDs (e.g. [`vocab::shells::ShellId`]) and look up spellings via registry tables instead
//!   of comparing strings at call sites.

pub mod vocab;

/// Identify which test framework a file or binary belongs to.
///
/// ## Notes
/// - `PhpUnit` covers class-based `public function testSomething()` suites.
/// - `Pest` covers descriptive `it('does something')` / `test('does something')` suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    PhpUnit,
    Pest,
}
