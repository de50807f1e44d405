//! Vocabulary registries for phpunit-runner.
//!
//! This module is the "front door" for the fixed names the runner depends on: project markers, runner binaries,
//! shell dialects, terminal applications, user-visible commands and PHP keywords.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no filesystem access, no process spawning.
//! - The resolver and dispatcher own behavior; registries only provide spellings and ordering.
//!
//! ## Examples
//! ```rust
//! use phpunit_core::vocab::shells::{self, ShellId};
//!
//! assert_eq!(shells::from_str("fish"), Some(ShellId::Fish));
//! assert_eq!(shells::connector(ShellId::Fish), "; and ");
//! ```

pub mod commands;
pub mod keywords;
pub mod project;
pub mod runners;
pub mod shells;
pub mod terminals;
