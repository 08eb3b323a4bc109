//! Property-based tests for apigen-cli.
//!
//! - CLI overrides always win over configuration file values
//! - dry runs never touch the filesystem

use proptest::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use apigen_cli::{
    config::{CliArgs, Config, ConfigManager},
    writer::FileWriter,
};

fn arb_file_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}\\.rs"
}

proptest! {
    #[test]
    fn prop_cli_overrides_win(
        file_input in arb_file_name(),
        file_output in arb_file_name(),
        cli_input in proptest::option::of(arb_file_name()),
        cli_output in proptest::option::of(arb_file_name()),
    ) {
        let mut config = Config::default();
        config.input.file = PathBuf::from(&file_input);
        config.output.file = PathBuf::from(&file_output);

        let merged = ConfigManager::merge_cli_args(
            config,
            &CliArgs {
                input: cli_input.clone().map(PathBuf::from),
                output: cli_output.clone().map(PathBuf::from),
            },
        );

        prop_assert_eq!(merged.input.file, PathBuf::from(cli_input.unwrap_or(file_input)));
        prop_assert_eq!(merged.output.file, PathBuf::from(cli_output.unwrap_or(file_output)));
    }

    #[test]
    fn prop_dry_run_never_writes(name in arb_file_name(), content in ".{0,200}") {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join(&name);

        let result = FileWriter::new(true).write(&path, &content).unwrap();

        prop_assert!(!result.is_current());
        prop_assert!(!path.exists());
        prop_assert!(!dir.path().join("out").exists());
    }
}
