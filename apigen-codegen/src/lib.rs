//! # apigen-codegen
//!
//! Build-time generator for request routing and field validation.
//!
//! The generator reads one Rust definition file in which routed methods and
//! parameter types are marked with doc-comment annotations, and writes one
//! Rust file with the boilerplate: a dispatch table per receiver, a wrapper
//! per routed method, and a validation routine per parameter type. The output
//! is meant to be `include!`d next to the definitions and links against the
//! `apigen` runtime crate.
//!
//! ## Annotations
//!
//! ```rust,ignore
//! #[derive(Default)]
//! pub struct CreateParams {
//!     /// apivalidator: required,min=10
//!     pub login: String,
//!     /// apivalidator: enum=user|moderator|admin,default=user
//!     pub status: String,
//!     /// apivalidator: min=0,max=128
//!     pub age: i32,
//! }
//!
//! impl MyApi {
//!     /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
//!     pub fn create(&self, ctx: Context, params: CreateParams) -> Result<NewUser, ApiError> {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Build script usage
//!
//! ```rust,ignore
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     println!("cargo:rerun-if-changed=src/api.rs");
//!     let out = std::path::PathBuf::from(std::env::var("OUT_DIR")?).join("api_handlers.rs");
//!     apigen_codegen::generate_file("src/api.rs", out, &Default::default())?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod generator;
pub mod ir;
pub mod parser;

use std::path::Path;

pub use error::{CodegenError, CodegenResult};
pub use generator::{GeneratorConfig, RustEmitter};
pub use ir::ApiModel;
pub use parser::Scanner;

/// Output of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Formatted Rust source.
    pub content: String,
    /// Receivers that received a dispatch table, in declaration order.
    pub receivers: Vec<String>,
    /// Types that received a validation routine, in declaration order.
    pub validated_types: Vec<String>,
    /// Number of routed methods.
    pub routes: usize,
}

/// Scans definitions and emits generated code.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the model for definition source without emitting anything.
    pub fn scan(&self, source: &str) -> CodegenResult<ApiModel> {
        self.config.validate()?;
        Scanner::new(&self.config).scan_source(source)
    }

    /// Generate code for definition source. `origin` is named in the header.
    pub fn generate(&self, source: &str, origin: &str) -> CodegenResult<GeneratedFile> {
        let model = self.scan(source)?;
        let content = RustEmitter::new(&self.config).emit(&model, origin)?;

        Ok(GeneratedFile {
            content,
            receivers: model.receivers().iter().map(|r| r.name.clone()).collect(),
            validated_types: model
                .validated_types()
                .iter()
                .map(|t| t.name.clone())
                .collect(),
            routes: model.route_count(),
        })
    }

    /// Read `input`, generate, and write `output`.
    ///
    /// Nothing is written when generation fails. Missing parent directories
    /// of `output` are created.
    pub fn generate_file(&self, input: &Path, output: &Path) -> CodegenResult<GeneratedFile> {
        let source = std::fs::read_to_string(input).map_err(|e| CodegenError::io(input, e))?;
        let origin = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        let generated = self.generate(&source, &origin)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }
        std::fs::write(output, &generated.content).map_err(|e| CodegenError::io(output, e))?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            routes = generated.routes,
            validated = generated.validated_types.len(),
            "generated handlers"
        );

        Ok(generated)
    }
}

/// Generate code for definition source with `config`.
pub fn generate_source(source: &str, config: &GeneratorConfig) -> CodegenResult<GeneratedFile> {
    Generator::new(config.clone()).generate(source, "source")
}

/// Read `input`, generate with `config`, and write `output`.
pub fn generate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> CodegenResult<GeneratedFile> {
    Generator::new(config.clone()).generate_file(input.as_ref(), output.as_ref())
}
