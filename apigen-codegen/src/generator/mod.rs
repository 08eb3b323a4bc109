//! Code generation.
//!
//! - [`config`] holds the settings shared with the scanner
//! - [`dispatch`] renders dispatch tables and method wrappers
//! - [`validator`] renders per-type validation routines
//! - [`helpers`] renders the shared response helpers
//! - [`emitter`] assembles and formats the output file

pub mod config;
pub mod dispatch;
pub mod emitter;
pub mod helpers;
pub mod validator;

pub use config::GeneratorConfig;
pub use emitter::RustEmitter;
