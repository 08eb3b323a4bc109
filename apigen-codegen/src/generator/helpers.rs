//! Fixed helper routines appended to every generated file, plus token
//! helpers shared by the emitters.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;
use syn::Path;

/// Name of the generated error helper.
pub const RESPONSE_ERROR_FN: &str = "apigen_response_error";

/// Name of the generated success helper.
pub const RESPONSE_RESULT_FN: &str = "apigen_response_result";

/// `apigen_response_error` and `apigen_response_result`.
pub fn emit_helpers(rt: &Path) -> TokenStream {
    let error_fn = Ident::new(RESPONSE_ERROR_FN, Span::call_site());
    let result_fn = Ident::new(RESPONSE_RESULT_FN, Span::call_site());

    quote! {
        /// Render an error as a JSON envelope with the error's status.
        #[allow(dead_code)]
        fn #error_fn(err: #rt::ApiError) -> #rt::Response {
            #rt::Response::error(&err)
        }

        /// Render a business result as a `200 OK` JSON envelope.
        #[allow(dead_code)]
        fn #result_fn<T>(result: &T) -> #rt::Response
        where
            T: #rt::serde::Serialize + ?Sized,
        {
            #rt::Response::success(result)
        }
    }
}

/// Identifier for a declared name, keeping raw identifiers raw.
pub fn ident(name: &str) -> Ident {
    match name.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, Span::call_site()),
        None => Ident::new(name, Span::call_site()),
    }
}

/// Integer literal without suffix, with an explicit sign token when negative.
pub fn int_literal(value: i128) -> TokenStream {
    let magnitude = Literal::u128_unsuffixed(value.unsigned_abs());
    if value < 0 {
        quote!(-#magnitude)
    } else {
        quote!(#magnitude)
    }
}
