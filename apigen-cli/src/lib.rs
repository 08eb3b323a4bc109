//! # apigen-cli
//!
//! Library behind the `apigen` command-line tool.
//!
//! The tool reads one annotated definition file, runs the generator from
//! `apigen-codegen` over it and writes the handler file, or checks that an
//! existing handler file is current.
//!
//! - [`config`] - `apigen.toml` loading and CLI overrides
//! - [`generator`] - generation and staleness checks
//! - [`writer`] - file output and dry-run support
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod generator;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::HandlerGenerator;
pub use writer::FileWriter;
