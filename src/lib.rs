#![forbid(unsafe_code)]
//! phpunit-runner: run the PHP test under the cursor.
//!
//! Given a PHP file and a cursor position, the runner finds the enclosing PHPUnit method or Pest description, walks up
//! to the project's `phpunit.xml`, picks the project's runner binary, and hands a `cd ... && runner ...` command line
//! to a terminal.
//!
//! ## Layout
//!
//! - [`locator`]: the test under the cursor
//! - [`resolver`]: config root and test binary
//! - [`command`]: shell command assembly and quoting
//! - [`dispatch`]: Terminal.app / iTerm / inline / print dispatchers
//! - [`session`]: runs requests and remembers the last command
//! - [`matching`]: class ⇄ test file lookup
//! - [`settings`]: layered configuration
//! - [`cli`]: the `phpunit-runner` command line
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: static regex patterns use `.expect("INVARIANT: reason")`.

pub mod cli;
pub mod command;
pub mod cursor;
pub mod dispatch;
pub mod errors;
pub mod locator;
pub mod matching;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod version;

pub use command::{CommandLine, Target, plan, shell_quote};
pub use cursor::{Cursor, LineColumn};
pub use dispatch::{DispatchStatus, Dispatcher};
pub use errors::{RunnerError, RunnerResult};
pub use locator::{LocatedTest, TestStyle, locate};
pub use resolver::{ConfigRoot, TestBinary, find_config_root, find_test_binary};
pub use session::{Outcome, Request, Session};
pub use settings::Settings;
