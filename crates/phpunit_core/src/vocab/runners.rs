//! Fixed words of runner invocations.

/// Program and arguments that start Laravel Dusk browser tests.
pub const DUSK_COMMAND: &[&str] = &["php", "artisan", "dusk"];

/// Flag that restricts a run to matching tests (PHPUnit, Pest and Dusk share it).
pub const FILTER_FLAG: &str = "--filter";

/// Directory-change builtin used as the command prefix.
pub const CHANGE_DIR: &str = "cd";

/// Filter expression matching exactly one test method by name.
///
/// ## Parameters
/// - `method`: the test method name (e.g. `testItWorks`).
///
/// ## Returns
/// - (`String`): a PHPUnit filter regex anchored on `::<method>` at the end of the test id.
///
/// ## Examples
/// ```rust
/// use phpunit_core::vocab::runners::method_filter;
///
/// assert_eq!(method_filter("testLogin"), "/::testLogin$/");
/// ```
pub fn method_filter(method: &str) -> String {
    format!("/::{method}$/")
}
