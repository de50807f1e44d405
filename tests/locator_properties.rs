//! Property-based tests for the test locator.

use phpunit_runner::locator::{TestStyle, locate_as, nearest_description, nearest_function_in};
use phpunit_syntax::{Span, function_name_regions};
use proptest::prelude::*;

/// A PHPUnit class with the given method names, one per method body.
fn phpunit_class(methods: &[String]) -> String {
    let mut source = String::from("<?php\nclass GeneratedTest extends TestCase\n{\n");
    for name in methods {
        source.push_str(&format!("    public function {name}(): void\n    {{\n        $this->assertTrue(true);\n    }}\n\n"));
    }
    source.push_str("}\n");
    source
}

/// A Pest file with the given descriptions.
fn pest_file(descriptions: &[String]) -> String {
    let mut source = String::from("<?php\n\n");
    for (i, text) in descriptions.iter().enumerate() {
        let call = if i % 2 == 0 { "it" } else { "test" };
        source.push_str(&format!("{call}('{text}', function () {{\n    expect(true)->toBeTrue();\n}});\n\n"));
    }
    source
}

proptest! {
    #[test]
    fn nearest_region_is_maximal_start_below_offset(
        starts in prop::collection::vec(0usize..500, 0..20),
        offset in 0usize..600,
    ) {
        let regions: Vec<Span> = starts.iter().map(|&s| Span::new(s, s + 3)).collect();
        let expected = regions.iter().filter(|r| r.start < offset).map(|r| r.start).max();
        prop_assert_eq!(nearest_function_in(&regions, offset).map(|r| r.start), expected);
    }

    #[test]
    fn conventional_locate_picks_maximal_start_below_offset(
        methods in prop::collection::vec("test[A-Z][a-zA-Z0-9]{0,10}", 0..8),
        offset in 0usize..1200,
    ) {
        let source = phpunit_class(&methods);
        let offset = offset.min(source.len());
        let expected = function_name_regions(&source)
            .into_iter()
            .filter(|r| r.start < offset)
            .max_by_key(|r| r.start)
            .map(|r| source[r.start..r.end].to_string());
        let located = locate_as(&source, offset, TestStyle::Conventional);
        prop_assert_eq!(located.map(|t| t.name), expected);
    }

    #[test]
    fn phpunit_cursor_finds_enclosing_method(
        methods in prop::collection::vec("test[A-Z][a-zA-Z0-9]{0,10}", 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let source = phpunit_class(&methods);
        let regions = function_name_regions(&source);
        prop_assert_eq!(regions.len(), methods.len());

        let i = pick.index(methods.len());
        // Cursor inside the chosen method's body
        let cursor = regions[i].end + 10;
        let located = locate_as(&source, cursor, TestStyle::Conventional).unwrap();
        prop_assert_eq!(&located.name, &methods[i]);
        prop_assert_eq!(located.style, TestStyle::Conventional);
    }

    #[test]
    fn pest_cursor_finds_preceding_description(
        descriptions in prop::collection::vec("[a-z][a-z ]{0,20}", 1..8),
        offset in 0usize..2000,
    ) {
        let source = pest_file(&descriptions);
        let offset = offset.min(source.len());
        let expected = source
            .match_indices("it('")
            .chain(source.match_indices("test('"))
            .filter(|(at, _)| *at < offset)
            .max_by_key(|(at, _)| *at)
            .map(|(at, _)| {
                let open = at + source[at..].find('\'').unwrap() + 1;
                let close = open + source[open..].find('\'').unwrap();
                source[open..close].to_string()
            });
        prop_assert_eq!(nearest_description(&source, offset).map(|d| d.text), expected);
    }

    #[test]
    fn locating_never_panics(source in "\\PC{0,300}", offset in 0usize..400) {
        let offset = offset.min(source.len());
        let offset = (0..=offset).rev().find(|&o| source.is_char_boundary(o)).unwrap_or(0);
        let _ = locate_as(&source, offset, TestStyle::Conventional);
        let _ = locate_as(&source, offset, TestStyle::Descriptive);
    }
}
