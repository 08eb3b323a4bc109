//! # apigen
//!
//! Generates request routing and validation handlers from an annotated Rust
//! definition file.
//!
//! ## Usage
//!
//! ```bash
//! # Generate handlers using apigen.toml (or defaults)
//! apigen generate
//!
//! # Override input and output
//! apigen generate --input src/api.rs --output src/api_handlers.rs
//!
//! # Preview without writing
//! apigen generate --dry-run
//!
//! # Fail (exit code 2) when the handler file is out of date
//! apigen check
//!
//! # Write a commented apigen.toml
//! apigen init
//! ```

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use apigen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, CliResult},
    generator::HandlerGenerator,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "apigen")]
#[command(author, version, about = "Generate request handlers from annotated Rust definitions", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the handler file from the definition file
    Generate {
        /// Definition file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Handler file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the generated code instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that the handler file is up to date
    Check {
        /// Definition file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Handler file to compare against
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a default apigen.toml
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "apigen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Install the subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Generate {
            input,
            output,
            config,
            dry_run,
        } => cmd_generate(load_config(config, input, output)?, dry_run),

        Commands::Check {
            input,
            output,
            config,
        } => cmd_check(load_config(config, input, output)?),

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

fn load_config(
    path: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> CliResult<Config> {
    let config = ConfigManager::load(path.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, &CliArgs { input, output });
    ConfigManager::validate(&config)?;
    Ok(config)
}

/// Generate command implementation.
fn cmd_generate(config: Config, dry_run: bool) -> CliResult<()> {
    println!(
        "{} {}",
        "Generating handlers from".cyan(),
        config.input.file.display()
    );

    let generator = HandlerGenerator::new(config);
    let generated = generator.generate()?;

    println!(
        "  {} route(s) on {} receiver(s), {} validated type(s)",
        generated.routes.to_string().green(),
        generated.receivers.len().to_string().green(),
        generated.validated_types.len().to_string().green()
    );

    let writer = FileWriter::new(dry_run);
    match writer.write(&generator.config().output.file, &generated.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is unchanged", "✓".green(), path.display());
        }
        WriteResult::DryRun { path, content } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(config: Config) -> CliResult<()> {
    println!(
        "{} {}",
        "Checking".cyan(),
        config.output.file.display()
    );

    match HandlerGenerator::new(config).check() {
        Ok(_) => {
            println!("{} Handlers are up to date", "✓".green());
            Ok(())
        }
        Err(e @ CliError::Stale(_)) => {
            println!("{} Handlers are out of date", "✗".red());
            println!("  Run 'apigen generate' to update");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(apigen_cli::error::ConfigError::invalid_value(
            "init",
            format!("{} already exists", output.display()),
        )
        .into());
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}
