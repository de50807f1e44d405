//! Shell dialect vocabulary.
//!
//! The dialect only affects how the `cd <root>` prefix is joined to the runner invocation: POSIX shells use `&&`,
//! fish (before 3.0) only understands `; and`.
//!
//! ## Examples
//! ```rust
//! use phpunit_core::vocab::shells::{self, ShellId};
//!
//! assert_eq!(shells::from_str("bash"), Some(ShellId::Bash));
//! assert_eq!(shells::connector(ShellId::Bash), " && ");
//! ```

/// Stable identifier for a supported shell dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShellId {
    #[default]
    Bash,
    Fish,
}

/// Metadata for a shell dialect.
///
/// ## Notes
/// - `program` is the executable used for inline (foreground) runs.
/// - `aliases` are other POSIX-compatible shells that share the dialect.
#[derive(Debug, Clone, Copy)]
pub struct ShellInfo {
    pub id: ShellId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub connector: &'static str,
    pub program: &'static str,
}

/// Registry of all shell dialects.
pub const SHELLS: &[ShellInfo] = &[
    ShellInfo {
        id: ShellId::Bash,
        canonical: "bash",
        aliases: &["sh", "zsh"],
        connector: " && ",
        program: "bash",
    },
    ShellInfo {
        id: ShellId::Fish,
        canonical: "fish",
        aliases: &[],
        connector: "; and ",
        program: "fish",
    },
];

/// Canonical spelling.
pub fn as_str(id: ShellId) -> &'static str {
    info_for(id).canonical
}

/// Token joining the directory change and the runner invocation.
///
/// ## Parameters
/// - `id`: shell dialect.
///
/// ## Returns
/// - `" && "` for bash-like shells, `"; and "` for fish.
pub fn connector(id: ShellId) -> &'static str {
    info_for(id).connector
}

/// Executable used to run a command line in the foreground.
pub fn program(id: ShellId) -> &'static str {
    info_for(id).program
}

/// Full metadata.
///
/// ## Notes
/// - Falls back to the first registry entry; every [`ShellId`] variant has an entry.
pub fn info_for(id: ShellId) -> &'static ShellInfo {
    SHELLS.iter().find(|s| s.id == id).unwrap_or(&SHELLS[0])
}

/// Lookup by spelling (canonical or alias), case-insensitive.
///
/// ## Returns
/// - `Some(ShellId)` if the spelling is known.
/// - `None` otherwise; callers decide the fallback.
pub fn from_str(s: &str) -> Option<ShellId> {
    let s = s.trim();
    SHELLS
        .iter()
        .find(|info| info.canonical.eq_ignore_ascii_case(s) || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(s)))
        .map(|info| info.id)
}
