//! Integration tests for apigen-cli.
//!
//! Exercise configuration, generation, writing and staleness checks the way
//! the `apigen` binary chains them.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use apigen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, ConfigError},
    generator::{CheckStatus, HandlerGenerator},
    writer::{FileWriter, WriteResult},
};
use apigen_codegen::CodegenError;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy a fixture into a temp project as `src/api.rs` and point the
/// configuration at it.
fn project(fixture: &str) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("src/api.rs");
    fs::create_dir_all(input.parent().unwrap()).unwrap();
    fs::copy(fixtures_path().join(fixture), &input).unwrap();

    let config = ConfigManager::merge_cli_args(
        Config::default(),
        &CliArgs {
            input: Some(input),
            output: Some(dir.path().join("src/generated/api_handlers.rs")),
        },
    );
    (dir, config)
}

fn generate_and_write(config: &Config, dry_run: bool) -> WriteResult {
    let generated = HandlerGenerator::new(config.clone()).generate().unwrap();
    FileWriter::new(dry_run)
        .write(&config.output.file, &generated.content)
        .unwrap()
}

// =============================================================================
// Generate
// =============================================================================

#[test]
fn test_generate_writes_handlers() {
    let (_dir, config) = project("shop_api.rs");

    let result = generate_and_write(&config, false);
    assert!(matches!(result, WriteResult::Written { .. }));

    let content = fs::read_to_string(&config.output.file).unwrap();
    assert!(content.starts_with("// Code generated by apigen from api.rs. DO NOT EDIT."));
    assert!(content.contains("impl apigen::Service for ShopApi"));
    assert!(content.contains("\"/shop/order\" => self.apigen_order(req, auth)"));
    assert!(content.contains("impl apigen::Validate for OrderParams"));
    assert!(content.contains("parse::<u8>()"));
    syn::parse_file(&content).unwrap();
}

#[test]
fn test_generate_is_idempotent() {
    let (_dir, config) = project("shop_api.rs");

    generate_and_write(&config, false);
    let first = fs::read_to_string(&config.output.file).unwrap();
    let second = generate_and_write(&config, false);

    assert!(matches!(second, WriteResult::Unchanged { .. }));
    assert_eq!(fs::read_to_string(&config.output.file).unwrap(), first);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (_dir, config) = project("shop_api.rs");

    let result = generate_and_write(&config, true);

    assert!(!config.output.file.exists());
    match result {
        WriteResult::DryRun { content, .. } => assert!(content.contains("ShopApi")),
        other => panic!("expected dry run, got {other:?}"),
    }
}

#[test]
fn test_malformed_route_is_fatal_and_writes_nothing() {
    let (_dir, config) = project("broken_route.rs");

    let err = HandlerGenerator::new(config.clone()).generate().unwrap_err();

    match &err {
        CliError::Codegen(CodegenError::MalformedAnnotation { item, line, .. }) => {
            assert_eq!(item, "ShopApi::order");
            assert_eq!(*line, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert!(!config.output.file.exists());
}

#[test]
fn test_custom_markers_from_config_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("defs.rs");
    fs::write(
        &input,
        r#"
pub struct Api;

#[derive(Default)]
pub struct Params {
    /// check: required
    pub id: String,
}

impl Api {
    /// route {"url": "/get"}
    pub fn get(&self, params: Params) -> Result<String, apigen::ApiError> {
        Ok(params.id)
    }
}
"#,
    )
    .unwrap();

    let config_path = dir.path().join("apigen.toml");
    fs::write(
        &config_path,
        format!(
            "[input]\nfile = {:?}\n\n[output]\nfile = {:?}\n\n[annotations]\nroute_marker = \"route\"\nvalidator_marker = \"check\"\n",
            input.display().to_string(),
            dir.path().join("out.rs").display().to_string(),
        ),
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_path)).unwrap();
    let generated = HandlerGenerator::new(config).generate().unwrap();

    assert_eq!(generated.routes, 1);
    assert_eq!(generated.validated_types, vec!["Params".to_string()]);
    assert!(generated.content.contains("Required { field: \"id\" }"));
}

// =============================================================================
// Check
// =============================================================================

#[test]
fn test_check_detects_stale_output() {
    let (_dir, config) = project("shop_api.rs");
    let generator = HandlerGenerator::new(config.clone());

    let err = generator.check().unwrap_err();
    assert_eq!(err.exit_code(), 2);

    generate_and_write(&config, false);
    assert!(generator.check().is_ok());

    let input = &config.input.file;
    let edited = fs::read_to_string(input)
        .unwrap()
        .replace("/shop/order", "/shop/place");
    fs::write(input, edited).unwrap();

    assert_eq!(generator.status().unwrap().0, CheckStatus::Stale);
    assert!(matches!(generator.check(), Err(CliError::Stale(_))));
}

// =============================================================================
// Init / config
// =============================================================================

#[test]
fn test_init_content_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("apigen.toml");
    fs::write(&path, ConfigManager::default_config_content()).unwrap();

    let config = ConfigManager::load(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
    assert!(ConfigManager::default_config_content().contains("# Doc-comment prefix"));
}

#[test]
fn test_cli_args_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("apigen.toml");
    fs::write(&path, "[input]\nfile = \"a.rs\"\n[output]\nfile = \"b.rs\"\n").unwrap();

    let config = ConfigManager::merge_cli_args(
        ConfigManager::load(Some(&path)).unwrap(),
        &CliArgs {
            input: None,
            output: Some(PathBuf::from("c.rs")),
        },
    );

    assert_eq!(config.input.file, Path::new("a.rs"));
    assert_eq!(config.output.file, Path::new("c.rs"));
}

#[test]
fn test_invalid_config_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("apigen.toml");
    fs::write(&path, "[runtime]\ncontext_type = \"  \"\n").unwrap();

    let err = ConfigManager::load(Some(&path)).unwrap_err();
    assert!(matches!(
        err,
        CliError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "runtime.context_type"
    ));
}
