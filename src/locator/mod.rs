//! Test locator: find the test under the cursor.
//!
//! Two strategies are tried, in an order that depends on the buffer's [`TestStyle`]:
//! - **function regions**: the nearest `function name(` declaration before the cursor (PHPUnit methods);
//! - **descriptions**: the nearest `it('...')` / `test('...')` call before the cursor (Pest).
//!
//! ## Notes
//! - "Before" is strict: a declaration starting exactly at the cursor does not count.
//! - The [`LocatedTest::style`] records which strategy produced the name, not the buffer classification. It decides
//!   how the `--filter` argument is spelled.

pub mod classify;
pub mod descriptions;

use phpunit_core::Framework;
use phpunit_syntax::{Span, function_names};

pub use classify::classify;
pub use descriptions::{Description, descriptions, nearest_description};

/// How tests are declared in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStyle {
    /// Class methods (`public function testSomething()`)
    Conventional,
    /// Calls taking a free-text description (`it('does something', ...)`)
    Descriptive,
}

impl TestStyle {
    pub fn framework(self) -> Framework {
        match self {
            TestStyle::Conventional => Framework::PhpUnit,
            TestStyle::Descriptive => Framework::Pest,
        }
    }
}

/// The test found under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedTest {
    /// Method name or description text
    pub name: String,
    pub style: TestStyle,
    /// Where the name (or the description call) appears in the buffer
    pub span: Span,
}

/// The region with the greatest start offset strictly below `offset`.
///
/// ## Parameters
/// - `regions`: function-name regions, in any order.
/// - `offset`: cursor byte offset.
///
/// ## Returns
/// - (`Option<Span>`): `None` when every region starts at or after the cursor.
pub fn nearest_function_in(regions: &[Span], offset: usize) -> Option<Span> {
    regions
        .iter()
        .filter(|region| region.start < offset)
        .max_by_key(|region| region.start)
        .copied()
}

/// Locate the test under the cursor, classifying the buffer first.
#[tracing::instrument(skip(source), fields(source_len = source.len()))]
pub fn locate(source: &str, offset: usize) -> Option<LocatedTest> {
    let style = classify(source);
    tracing::debug!(?style, "classified buffer");
    locate_as(source, offset, style)
}

/// Locate the test under the cursor for a buffer of a known style.
pub fn locate_as(source: &str, offset: usize, style: TestStyle) -> Option<LocatedTest> {
    match style {
        TestStyle::Conventional => nearest_method(source, offset).or_else(|| nearest_call(source, offset)),
        TestStyle::Descriptive => nearest_call(source, offset).or_else(|| nearest_method(source, offset)),
    }
}

fn nearest_method(source: &str, offset: usize) -> Option<LocatedTest> {
    let names = function_names(source);
    let regions: Vec<Span> = names.iter().map(|f| f.span).collect();
    let nearest = nearest_function_in(&regions, offset)?;
    names
        .into_iter()
        .find(|f| f.span == nearest)
        .map(|f| LocatedTest {
            name: f.name,
            style: TestStyle::Conventional,
            span: f.span,
        })
}

fn nearest_call(source: &str, offset: usize) -> Option<LocatedTest> {
    nearest_description(source, offset).map(|d| LocatedTest {
        name: d.text,
        style: TestStyle::Descriptive,
        span: d.span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHPUNIT: &str = r#"<?php
final class CartTest extends TestCase
{
    public function testItAddsItems(): void
    {
        $this->assertCount(1, $cart);
    }

    public function testItRemovesItems(): void
    {
        $this->assertCount(0, $cart);
    }
}
"#;

    const PEST: &str = r#"<?php
use function Pest\Laravel\get;

function helper() {}

it('adds items', function () {
    expect($cart)->toHaveCount(1);
});

test("removes items", function () {
    expect($cart)->toBeEmpty();
});
"#;

    fn offset_of(source: &str, needle: &str) -> usize {
        source.find(needle).unwrap()
    }

    #[test]
    fn test_style_framework() {
        assert_eq!(TestStyle::Conventional.framework(), Framework::PhpUnit);
        assert_eq!(TestStyle::Descriptive.framework(), Framework::Pest);
    }

    #[test]
    fn test_nearest_function_in() {
        let regions = [Span::new(40, 45), Span::new(10, 15), Span::new(25, 30)];
        assert_eq!(nearest_function_in(&regions, 26), Some(Span::new(25, 30)));
        assert_eq!(nearest_function_in(&regions, 25), Some(Span::new(10, 15)));
        assert_eq!(nearest_function_in(&regions, 100), Some(Span::new(40, 45)));
        assert_eq!(nearest_function_in(&regions, 10), None);
        assert_eq!(nearest_function_in(&[], 10), None);
    }

    #[test]
    fn test_locates_phpunit_method() {
        let located = locate(PHPUNIT, offset_of(PHPUNIT, "assertCount(0")).unwrap();
        assert_eq!(located.name, "testItRemovesItems");
        assert_eq!(located.style, TestStyle::Conventional);
    }

    #[test]
    fn test_cursor_before_first_method() {
        assert!(locate(PHPUNIT, offset_of(PHPUNIT, "final")).is_none());
    }

    #[test]
    fn test_locates_pest_description() {
        let located = locate(PEST, offset_of(PEST, "toBeEmpty")).unwrap();
        assert_eq!(located.name, "removes items");
        assert_eq!(located.style, TestStyle::Descriptive);

        let located = locate(PEST, offset_of(PEST, "toHaveCount")).unwrap();
        assert_eq!(located.name, "adds items");
    }

    #[test]
    fn test_pest_falls_back_to_functions() {
        let located = locate(PEST, offset_of(PEST, "{}\n\nit(")).unwrap();
        assert_eq!(located.name, "helper");
        assert_eq!(located.style, TestStyle::Conventional);
    }

    #[test]
    fn test_phpunit_falls_back_to_descriptions() {
        let source = "<?php\n$suite->add();\nitems(test('inline', fn () => 1));\n";
        let located = locate_as(source, source.len(), TestStyle::Conventional).unwrap();
        assert_eq!(located.name, "inline");
        assert_eq!(located.style, TestStyle::Descriptive);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(locate("", 0).is_none());
        assert!(locate("<?php\n", 6).is_none());
    }
}
