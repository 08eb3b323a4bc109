//! Rust emitter.
//!
//! Renders an [`ApiModel`] in three passes (dispatch tables, wrappers,
//! validation routines), appends the fixed helpers, checks that the result
//! parses as a Rust file and pretty-prints it.

use proc_macro2::TokenStream;
use quote::quote;

use super::config::GeneratorConfig;
use super::dispatch::{emit_dispatch, emit_wrappers};
use super::helpers::emit_helpers;
use super::validator::emit_validator;
use crate::error::{CodegenError, CodegenResult};
use crate::ir::ApiModel;

/// Renders generated source from a model.
pub struct RustEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RustEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the model to token form.
    pub fn emit_tokens(&self, model: &ApiModel) -> CodegenResult<TokenStream> {
        let rt = self.config.runtime_path()?;
        let mut items = Vec::new();

        for receiver in model.receivers() {
            items.push(emit_dispatch(&rt, receiver));
        }
        for receiver in model.receivers() {
            items.push(emit_wrappers(&rt, receiver, model));
        }
        for ty in model.validated_types() {
            items.push(emit_validator(&rt, ty));
        }
        items.push(emit_helpers(&rt));

        Ok(quote!(#(#items)*))
    }

    /// Render the model to formatted source, prefixed with the generated-file
    /// header naming `origin`.
    pub fn emit(&self, model: &ApiModel, origin: &str) -> CodegenResult<String> {
        let tokens = self.emit_tokens(model)?;
        let file: syn::File =
            syn::parse2(tokens).map_err(|e| CodegenError::render(e.to_string()))?;

        tracing::debug!(items = file.items.len(), "rendered generated file");

        Ok(format!(
            "{}\n\n{}",
            header(origin),
            prettyplease::unparse(&file)
        ))
    }
}

/// First line of every generated file.
pub fn header(origin: &str) -> String {
    format!("// Code generated by apigen from {}. DO NOT EDIT.", origin)
}
