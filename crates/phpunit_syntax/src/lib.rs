//! Lightweight PHP scanner for phpunit-runner.
//!
//! Editors usually know where every function name in a buffer is (a "syntax index"). This crate recreates the small
//! part of that index the runner needs: it tokenizes PHP source just well enough to skip comments, strings and
//! heredocs, and reports the byte span of every named function declaration.
//!
//! ## Notes
//! - This crate is "scan-only": there is no parser and no AST. Tokens are flat.
//! - Keyword identity comes from `phpunit_core::vocab::keywords`.
//! - Scanning is tolerant: [`function_name_regions`] still returns the regions found before an unterminated string or
//!   comment, because buffers are usually mid-edit.
//!
//! ## Examples
//! ```rust
//! use phpunit_syntax::function_name_regions;
//!
//! let source = "<?php\nclass UserTest {\n    public function testLogin() {}\n}\n";
//! let regions = function_name_regions(source);
//! assert_eq!(regions.len(), 1);
//! assert_eq!(&source[regions[0].start..regions[0].end], "testLogin");
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod regions;
pub mod span;

pub use diagnostics::SyntaxError;
pub use regions::{FunctionName, function_name_regions, function_names};
pub use span::Span;
