//! Field and parameter type resolution.
//!
//! Validated fields must be `String` or a primitive integer. Routed method
//! parameters must be named types, optionally behind a shared reference.

use quote::ToTokens;
use syn::{Type, TypePath};

use crate::ir::{FieldKind, IntWidth};

/// Resolves `syn` types to the kinds the generator understands.
pub struct TypeParser;

impl TypeParser {
    /// Resolve the kind of a validated field, or `None` if unsupported.
    pub fn field_kind(ty: &Type) -> Option<FieldKind> {
        let path = Self::plain_path(ty)?;
        let last = path.path.segments.last()?;
        if !last.arguments.is_none() {
            return None;
        }

        let name = last.ident.to_string();
        if name == "String" {
            return Some(FieldKind::Text);
        }
        IntWidth::from_name(&name).map(FieldKind::Integer)
    }

    /// Last path segment name of a named type, looking through one shared
    /// reference and parentheses.
    pub fn type_name(ty: &Type) -> Option<String> {
        let ty = match Self::strip_paren(ty) {
            Type::Reference(r) if r.mutability.is_none() => Self::strip_paren(&r.elem),
            other => other,
        };
        let path = Self::plain_path(ty)?;
        path.path.segments.last().map(|s| s.ident.to_string())
    }

    /// Split a parameter type into the referenced type and a by-reference flag.
    ///
    /// `&mut T` is not supported and returns `None`.
    pub fn split_reference(ty: &Type) -> Option<(Type, bool)> {
        match Self::strip_paren(ty) {
            Type::Reference(r) if r.mutability.is_none() => {
                Some((Self::strip_paren(&r.elem).clone(), true))
            }
            Type::Reference(_) => None,
            other => Some((other.clone(), false)),
        }
    }

    /// Render a type for diagnostics.
    pub fn display(ty: &Type) -> String {
        ty.to_token_stream()
            .to_string()
            .replace(" < ", "<")
            .replace(" >", ">")
            .replace(" :: ", "::")
            .replace("& ", "&")
    }

    fn plain_path(ty: &Type) -> Option<&TypePath> {
        match Self::strip_paren(ty) {
            Type::Path(path) if path.qself.is_none() => Some(path),
            _ => None,
        }
    }

    fn strip_paren(ty: &Type) -> &Type {
        match ty {
            Type::Paren(p) => Self::strip_paren(&p.elem),
            Type::Group(g) => Self::strip_paren(&g.elem),
            other => other,
        }
    }
}
