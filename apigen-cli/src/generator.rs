//! Handler generation for the CLI.
//!
//! Wraps [`apigen_codegen::Generator`] with the file handling the commands
//! need: reading the configured definition file and comparing the result
//! with the handler file already on disk.

use crate::config::Config;
use crate::error::{CliError, CliResult};
use apigen_codegen::{CodegenError, GeneratedFile, Generator};
use std::path::Path;

/// Outcome of comparing generated code with the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    UpToDate,
    Missing,
    Stale,
}

/// Generates handler code from the configured definition file.
pub struct HandlerGenerator {
    config: Config,
    generator: Generator,
}

impl HandlerGenerator {
    pub fn new(config: Config) -> Self {
        let generator = Generator::new(config.generator_config());
        Self { config, generator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate code for the configured input file without writing it.
    pub fn generate(&self) -> CliResult<GeneratedFile> {
        let input = &self.config.input.file;
        let source = std::fs::read_to_string(input).map_err(|e| CodegenError::io(input, e))?;

        tracing::debug!(input = %input.display(), bytes = source.len(), "read definitions");

        let generated = self.generator.generate(&source, &origin(input))?;
        Ok(generated)
    }

    /// Compare freshly generated code with the configured output file.
    pub fn status(&self) -> CliResult<(CheckStatus, GeneratedFile)> {
        let generated = self.generate()?;
        let output = &self.config.output.file;

        let status = match std::fs::read_to_string(output) {
            Ok(existing) if existing == generated.content => CheckStatus::UpToDate,
            Ok(_) => CheckStatus::Stale,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckStatus::Missing,
            Err(e) => return Err(e.into()),
        };

        Ok((status, generated))
    }

    /// Fail with [`CliError::Stale`] unless the output file is current.
    pub fn check(&self) -> CliResult<GeneratedFile> {
        let (status, generated) = self.status()?;
        let output = self.config.output.file.display();

        match status {
            CheckStatus::UpToDate => Ok(generated),
            CheckStatus::Missing => Err(CliError::Stale(format!("{} does not exist", output))),
            CheckStatus::Stale => Err(CliError::Stale(format!(
                "{} differs from the generated code",
                output
            ))),
        }
    }
}

/// Name of the definition file as written into the generated header.
///
/// Matches what [`Generator::generate_file`] uses, so output from a build
/// script and from the CLI is identical.
fn origin(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}
