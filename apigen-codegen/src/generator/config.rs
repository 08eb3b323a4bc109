//! Generator configuration.

use syn::Path;

use crate::error::{CodegenError, CodegenResult};

/// Default marker opening a routing directive.
pub const DEFAULT_ROUTE_MARKER: &str = "apigen:api";

/// Default marker opening a validator tag.
pub const DEFAULT_VALIDATOR_MARKER: &str = "apivalidator";

/// Default path of the runtime crate in generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "apigen";

/// Default name of the context placeholder type.
pub const DEFAULT_CONTEXT_TYPE: &str = "Context";

/// Settings shared by the scanner and the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Doc-comment prefix of routing directives.
    pub route_marker: String,
    /// Doc-comment prefix of validator tags.
    pub validator_marker: String,
    /// Path generated code uses to reach the runtime crate.
    pub runtime_crate: String,
    /// Last path segment identifying the context placeholder parameter.
    pub context_type: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            validator_marker: DEFAULT_VALIDATOR_MARKER.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse `runtime_crate` as a path (`apigen`, `::apigen`, `crate::rt`).
    pub fn runtime_path(&self) -> CodegenResult<Path> {
        syn::parse_str(&self.runtime_crate).map_err(|e| {
            CodegenError::render(format!(
                "invalid runtime crate path `{}`: {}",
                self.runtime_crate, e
            ))
        })
    }

    /// Check that markers and names are usable.
    pub fn validate(&self) -> CodegenResult<()> {
        if self.route_marker.trim().is_empty() {
            return Err(CodegenError::render("route marker must not be empty"));
        }
        if self.validator_marker.trim().is_empty() {
            return Err(CodegenError::render("validator marker must not be empty"));
        }
        if self.context_type.trim().is_empty() {
            return Err(CodegenError::render("context type must not be empty"));
        }
        self.runtime_path().map(|_| ())
    }
}
