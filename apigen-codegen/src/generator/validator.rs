//! Validation routine generation.
//!
//! Each validated type gets an `impl Validate` whose body runs, per field and
//! in declaration order:
//!
//! 1. extract the value under the effective request key
//! 2. `enum` check (only when the request carried a non-empty value)
//! 3. `default` fill (only when it did not)
//! 4. `min` / `max` checks
//! 5. `required` check
//!
//! Presence is decided from the raw request value, so a submitted `0` is
//! checked against an integer `enum` like any other number.
//!
//! Fields without the validator marker are left untouched.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::Path;

use super::helpers::{ident, int_literal};
use crate::ir::{DirectiveValue, FieldKind, FieldRule, ValidatedType, ValidatorDirective};

/// `impl Validate for T`.
pub fn emit_validator(rt: &Path, ty: &ValidatedType) -> TokenStream {
    let name = ident(&ty.name);
    let fields = ty.fields.iter().map(|rule| emit_field(rt, rule));

    quote! {
        #[automatically_derived]
        impl #rt::Validate for #name {
            fn fill_and_validate(
                &mut self,
                req: &#rt::Request,
            ) -> #rt::ApiResult<()> {
                #(#fields)*
                Ok(())
            }
        }
    }
}

fn emit_field(rt: &Path, rule: &FieldRule) -> TokenStream {
    let key = rule.key.as_str();

    let extract = emit_extract(rt, rule);
    let enums = rule.enums().map(|alternatives| emit_enum(rt, rule, alternatives));
    let default = rule.default_value().map(|value| emit_default(rule, value));
    let bounds = rule.bounds().map(|bound| emit_bound(rt, rule, bound));
    let required = rule.is_required().then(|| {
        let empty = is_empty(rule);
        quote! {
            if #empty {
                return Err(
                    #rt::ValidationError::Required { field: #key }.into(),
                );
            }
        }
    });

    quote! {
        {
            let raw = req.form_value(#key);
            #extract
            #(#enums)*
            #default
            #(#bounds)*
            #required
        }
    }
}

/// Assigns the field from the `raw` local bound by [`emit_field`].
fn emit_extract(rt: &Path, rule: &FieldRule) -> TokenStream {
    let field = ident(&rule.name);
    let key = rule.key.as_str();

    match rule.kind {
        FieldKind::Text => quote! {
            self.#field = raw.to_string();
        },
        FieldKind::Integer(width) => {
            let int_ty = format_ident!("{}", width.as_str());
            quote! {
                self.#field = if raw.is_empty() {
                    0
                } else {
                    raw.parse::<#int_ty>().map_err(|_| {
                        #rt::ValidationError::NotInteger { field: #key }
                    })?
                };
            }
        }
    }
}

fn emit_enum(rt: &Path, rule: &FieldRule, alternatives: &[DirectiveValue]) -> TokenStream {
    let field = ident(&rule.name);
    let key = rule.key.as_str();
    let allowed: Vec<String> = alternatives.iter().map(DirectiveValue::display).collect();

    let matched = match rule.kind {
        FieldKind::Text => {
            let patterns = alternatives.iter().map(|v| Literal::string(&v.display()));
            quote!(matches!(self.#field.as_str(), #(#patterns)|*))
        }
        FieldKind::Integer(_) => {
            let patterns = alternatives.iter().filter_map(|v| match v {
                DirectiveValue::Integer(n) => Some(int_literal(*n)),
                DirectiveValue::Text(_) => None,
            });
            quote!(matches!(self.#field, #(#patterns)|*))
        }
    };

    quote! {
        if !raw.is_empty() && !#matched {
            return Err(
                #rt::ValidationError::NotOneOf {
                    field: #key,
                    allowed: &[#(#allowed),*],
                }
                .into(),
            );
        }
    }
}

fn emit_default(rule: &FieldRule, value: &DirectiveValue) -> TokenStream {
    let field = ident(&rule.name);

    let value = match value {
        DirectiveValue::Text(s) => quote!(#s.to_string()),
        DirectiveValue::Integer(n) => int_literal(*n),
    };

    quote! {
        if raw.is_empty() {
            self.#field = #value;
        }
    }
}

fn emit_bound(rt: &Path, rule: &FieldRule, bound: &ValidatorDirective) -> TokenStream {
    let field = ident(&rule.name);
    let key = rule.key.as_str();

    let (limit, is_min) = match bound {
        ValidatorDirective::Min(n) => (*n, true),
        ValidatorDirective::Max(n) => (*n, false),
        _ => return TokenStream::new(),
    };

    let (check, error) = match rule.kind {
        FieldKind::Text => {
            let len = Literal::u64_unsuffixed(limit.unsigned_abs());
            if is_min {
                (
                    quote!(self.#field.chars().count() < #len),
                    quote!(#rt::ValidationError::TooShort { field: #key, min: #len }),
                )
            } else {
                (
                    quote!(self.#field.chars().count() > #len),
                    quote!(#rt::ValidationError::TooLong { field: #key, max: #len }),
                )
            }
        }
        FieldKind::Integer(_) => {
            let value = int_literal(limit.into());
            if is_min {
                (
                    quote!((self.#field as i128) < #value),
                    quote!(#rt::ValidationError::BelowMin { field: #key, min: #value }),
                )
            } else {
                (
                    quote!((self.#field as i128) > #value),
                    quote!(#rt::ValidationError::AboveMax { field: #key, max: #value }),
                )
            }
        }
    };

    quote! {
        if #check {
            return Err(#error.into());
        }
    }
}

/// Empty text / zero integer test for a field.
fn is_empty(rule: &FieldRule) -> TokenStream {
    let field = ident(&rule.name);
    match rule.kind {
        FieldKind::Text => quote!(self.#field.is_empty()),
        FieldKind::Integer(_) => quote!(self.#field == 0),
    }
}
