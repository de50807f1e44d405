//! Descriptive test calls: `it('...')` and `test("...")`.

use std::sync::LazyLock;

use phpunit_syntax::Span;
use regex::Regex;

static DESCRIPTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\b(?:test|it)\s*\(\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#)
        .expect("INVARIANT: description call pattern is a valid regex")
});

/// A descriptive test call found in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// The unescaped description text
    pub text: String,
    /// Span of the whole call head, from `it`/`test` to the closing quote
    pub span: Span,
}

/// Every descriptive test call in `source`, in source order.
///
/// ## Notes
/// - Method and static calls (`$this->test(`, `Foo::it(`) and variables (`$it(`) are skipped.
/// - Only the quote character and backslash are unescaped, so the text matches what the test runner prints.
pub fn descriptions(source: &str) -> Vec<Description> {
    DESCRIPTION_CALL
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if is_member_call(&source[..whole.start()]) {
                return None;
            }
            let (raw, quote) = match (caps.get(1), caps.get(2)) {
                (Some(single), _) => (single.as_str(), '\''),
                (None, Some(double)) => (double.as_str(), '"'),
                (None, None) => return None,
            };
            Some(Description {
                text: unescape(raw, quote),
                span: Span::new(whole.start(), whole.end()),
            })
        })
        .collect()
}

/// The description call with the greatest start offset strictly below `offset`.
pub fn nearest_description(source: &str, offset: usize) -> Option<Description> {
    descriptions(source)
        .into_iter()
        .take_while(|d| d.span.start < offset)
        .last()
}

fn is_member_call(before: &str) -> bool {
    let before = before.trim_end();
    before.ends_with('$') || before.ends_with("->") || before.ends_with("::")
}

fn unescape(raw: &str, quote: char) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next_if(|&next| next == quote || next == '\\') {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}
