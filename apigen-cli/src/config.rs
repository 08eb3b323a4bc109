//! Configuration management for the CLI.
//!
//! Settings come from an `apigen.toml` file and are overridden by
//! command-line flags.

use crate::error::{CliResult, ConfigError};
use apigen_codegen::generator::config::{
    DEFAULT_CONTEXT_TYPE, DEFAULT_ROUTE_MARKER, DEFAULT_RUNTIME_CRATE, DEFAULT_VALIDATOR_MARKER,
};
use apigen_codegen::GeneratorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "apigen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub annotations: AnnotationsConfig,
    pub runtime: RuntimeConfig,
}

/// Definition file to read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub file: PathBuf,
}

/// Handler file to write.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
}

/// Doc-comment markers recognised in the definition file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnnotationsConfig {
    pub route_marker: String,
    pub validator_marker: String,
}

/// How generated code refers to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Path of the runtime crate, e.g. `apigen` or `crate::rt`.
    pub crate_path: String,
    /// Type name of the context placeholder parameter.
    pub context_type: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("src/api.rs"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("src/api_handlers.rs"),
        }
    }
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            validator_marker: DEFAULT_VALIDATOR_MARKER.to_string(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            crate_path: DEFAULT_RUNTIME_CRATE.to_string(),
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
        }
    }
}

impl Config {
    /// Generator settings derived from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            route_marker: self.annotations.route_marker.clone(),
            validator_marker: self.annotations.validator_marker.clone(),
            runtime_crate: self.runtime.crate_path.clone(),
            context_type: self.runtime.context_type.clone(),
        }
    }
}

/// Command-line overrides.
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `apigen.toml` in the
    /// working directory is used when present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content, &config_path)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref input) = args.input {
            config.input.file = input.clone();
        }

        if let Some(ref output) = args.output {
            config.output.file = output.clone();
        }

        config
    }

    /// Reject values the generator cannot work with.
    pub fn validate(config: &Config) -> CliResult<()> {
        if config.input.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("input.file", "must not be empty").into());
        }
        if config.output.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid_value("output.file", "must not be empty").into());
        }
        if config.input.file == config.output.file {
            return Err(ConfigError::invalid_value(
                "output.file",
                "must differ from input.file",
            )
            .into());
        }
        if config.annotations.route_marker.trim().is_empty() {
            return Err(
                ConfigError::invalid_value("annotations.route_marker", "must not be empty").into(),
            );
        }
        if config.annotations.validator_marker.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "annotations.validator_marker",
                "must not be empty",
            )
            .into());
        }
        if config.runtime.context_type.trim().is_empty() {
            return Err(
                ConfigError::invalid_value("runtime.context_type", "must not be empty").into(),
            );
        }
        if let Err(e) = config.generator_config().runtime_path() {
            return Err(ConfigError::invalid_value("runtime.crate_path", e.to_string()).into());
        }
        Ok(())
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# apigen configuration file

[input]
# Definition file holding the annotated methods and parameter types
file = "src/api.rs"

[output]
# Generated handler file, include!d next to the definitions
file = "src/api_handlers.rs"

[annotations]
# Doc-comment prefix of routing directives:
#   /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
route_marker = "apigen:api"

# Doc-comment prefix of field validation tags:
#   /// apivalidator: required,min=10
validator_marker = "apivalidator"

[runtime]
# Path generated code uses to reach the runtime crate
crate_path = "apigen"

# Parameters of this type are passed as an empty value instead of being bound
context_type = "Context"
"#
    }
}
