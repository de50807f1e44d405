//! Terminal application vocabulary.
//!
//! ## Notes
//! - `Term` and `iTerm` are macOS applications driven through `osascript`.
//! - `inline` runs the command in the caller's own terminal; `print` only writes it to stdout.
//! - Canonical spellings match the values users historically put in their editor settings (`"Term"`, `"iTerm"`).

/// Stable identifier for a dispatch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TerminalId {
    /// macOS Terminal.app
    #[default]
    Terminal,
    /// iTerm2
    ITerm,
    /// Foreground run in the current terminal
    Inline,
    /// Write the command line to stdout without running it
    Print,
}

/// Metadata for a dispatch target.
#[derive(Debug, Clone, Copy)]
pub struct TerminalInfo {
    pub id: TerminalId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Registry of all dispatch targets.
pub const TERMINALS: &[TerminalInfo] = &[
    TerminalInfo {
        id: TerminalId::Terminal,
        canonical: "Term",
        aliases: &["terminal", "terminal.app"],
    },
    TerminalInfo {
        id: TerminalId::ITerm,
        canonical: "iTerm",
        aliases: &["iterm2"],
    },
    TerminalInfo {
        id: TerminalId::Inline,
        canonical: "inline",
        aliases: &["foreground"],
    },
    TerminalInfo {
        id: TerminalId::Print,
        canonical: "print",
        aliases: &["dry-run"],
    },
];

/// Canonical spelling.
pub fn as_str(id: TerminalId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
pub fn info_for(id: TerminalId) -> &'static TerminalInfo {
    TERMINALS.iter().find(|t| t.id == id).unwrap_or(&TERMINALS[0])
}

/// Lookup by spelling (canonical or alias), case-insensitive.
pub fn from_str(s: &str) -> Option<TerminalId> {
    let s = s.trim();
    TERMINALS
        .iter()
        .find(|info| info.canonical.eq_ignore_ascii_case(s) || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(s)))
        .map(|info| info.id)
}
