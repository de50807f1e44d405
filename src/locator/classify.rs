//! Best-effort test style classification.
//!
//! ## Notes
//! - A file is [`TestStyle::Descriptive`] when it imports Pest (`use function Pest\...`), configures it (`uses(`,
//!   `pest()`), or has a line that starts with `it(`, `test(` or `describe(`.
//! - False positive: a class-based file with a top-level `test(` helper call.
//! - False negative: a Pest file whose tests are only reached through non-leading expressions.

use std::sync::LazyLock;

use regex::Regex;

use super::TestStyle;

static DESCRIPTIVE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:use\s+function\s+Pest\\|uses\s*\(|pest\s*\(\s*\)|(?:it|test|describe)\s*\()")
        .expect("INVARIANT: descriptive marker pattern is a valid regex")
});

/// Classify a whole buffer.
pub fn classify(source: &str) -> TestStyle {
    if DESCRIPTIVE_MARKERS.is_match(source) {
        TestStyle::Descriptive
    } else {
        TestStyle::Conventional
    }
}
