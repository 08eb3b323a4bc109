//! Dispatch table and wrapper generation.
//!
//! For each receiver the emitter produces an `impl Service` matching the
//! request path against every routed url, and an inherent `impl` holding one
//! wrapper per routed method. A wrapper runs, in order: the auth check, the
//! method check, parameter filling and validation, the business call, and
//! envelope rendering.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::Path;

use super::helpers::{RESPONSE_ERROR_FN, RESPONSE_RESULT_FN};
use crate::ir::{ApiModel, ParamIR, Receiver, RoutedMethod};

/// `impl Service for Receiver`.
pub fn emit_dispatch(rt: &Path, receiver: &Receiver) -> TokenStream {
    let self_ty = &receiver.self_ty;
    let error_fn = Ident::new(RESPONSE_ERROR_FN, Span::call_site());

    let arms = receiver.methods.iter().map(|m| {
        let url = m.route.url.as_str();
        let wrapper = m.wrapper_name();
        quote! {
            #url => self.#wrapper(req, auth),
        }
    });

    quote! {
        #[automatically_derived]
        impl #rt::Service for #self_ty {
            fn serve(&self, req: &#rt::Request, auth: &#rt::AuthGuard) -> #rt::Response {
                match req.path() {
                    #(#arms)*
                    _ => #error_fn(#rt::ApiError::not_found("unknown method")),
                }
            }
        }
    }
}

/// Inherent `impl Receiver` holding the wrappers.
pub fn emit_wrappers(rt: &Path, receiver: &Receiver, model: &ApiModel) -> TokenStream {
    let self_ty = &receiver.self_ty;
    let wrappers = receiver
        .methods
        .iter()
        .map(|method| emit_wrapper(rt, method, model));

    quote! {
        impl #self_ty {
            #(#wrappers)*
        }
    }
}

fn emit_wrapper(rt: &Path, method: &RoutedMethod, model: &ApiModel) -> TokenStream {
    let error_fn = Ident::new(RESPONSE_ERROR_FN, Span::call_site());
    let result_fn = Ident::new(RESPONSE_RESULT_FN, Span::call_site());
    let wrapper = method.wrapper_name();
    let business = &method.method;

    let auth_check = method.route.auth.then(|| {
        quote! {
            if let Err(err) = auth.authorize(req) {
                return #error_fn(err);
            }
        }
    });

    let method_check = method.route.restricts_method().then(|| {
        let expected = method.route.method.as_str();
        quote! {
            if req.method().as_str() != #expected {
                return #error_fn(#rt::ApiError::method_not_allowed("bad method"));
            }
        }
    });

    let mut bindings = Vec::new();
    let mut args = Vec::new();
    for (index, param) in method.params.iter().enumerate() {
        match param {
            ParamIR::Context { by_ref } => {
                let value = quote!(Default::default());
                args.push(if *by_ref { quote!(&#value) } else { value });
            }
            ParamIR::Bound {
                ty,
                type_name,
                by_ref,
            } => {
                if !model.is_validated(type_name) {
                    tracing::warn!(
                        method = %method.qualified_name(),
                        param = %type_name,
                        "parameter type has no validator annotations, it must implement Validate by hand"
                    );
                }

                let binding = format_ident!("param_{}", index);
                bindings.push(quote! {
                    let mut #binding: #ty = Default::default();
                    if let Err(err) =
                        #rt::Validate::fill_and_validate(&mut #binding, req)
                    {
                        return #error_fn(err);
                    }
                });
                args.push(if *by_ref {
                    quote!(&#binding)
                } else {
                    quote!(#binding)
                });
            }
        }
    }

    quote! {
        #[allow(unused_variables)]
        fn #wrapper(&self, req: &#rt::Request, auth: &#rt::AuthGuard) -> #rt::Response {
            #auth_check
            #method_check
            #(#bindings)*
            match self.#business(#(#args),*) {
                Ok(result) => #result_fn(&result),
                Err(err) => {
                    #error_fn(#rt::ApiError::from_business(err))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorConfig;
    use crate::parser::Scanner;

    const SOURCE: &str = r#"
        struct MyApi;

        #[derive(Default)]
        struct CreateParams {
            /// apivalidator: required
            login: String,
        }

        impl MyApi {
            /// apigen:api {"url": "/user/profile"}
            fn profile(&self, ctx: Context, params: Lookup) -> Result<u64, ApiError> { Ok(1) }

            /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
            fn create(&self, ctx: &Context, params: &CreateParams) -> Result<u64, ApiError> { Ok(1) }
        }
    "#;

    fn render(tokens: TokenStream) -> String {
        let file: syn::File = syn::parse2(tokens).unwrap();
        prettyplease::unparse(&file)
    }

    fn model() -> ApiModel {
        let config = GeneratorConfig::default();
        Scanner::new(&config).scan_source(SOURCE).unwrap()
    }

    #[test]
    fn test_dispatch_table() {
        let model = model();
        let rt: Path = syn::parse_str("apigen").unwrap();
        let code = render(emit_dispatch(&rt, &model.receivers()[0]));

        assert!(code.contains("impl apigen::Service for MyApi"));
        let profile = code.find("\"/user/profile\" => self.apigen_profile(req, auth)").unwrap();
        let create = code.find("\"/user/create\" => self.apigen_create(req, auth)").unwrap();
        assert!(profile < create);
        assert!(code.contains("not_found(\"unknown method\")"));
    }

    #[test]
    fn test_wrapper_steps() {
        let model = model();
        let rt: Path = syn::parse_str("apigen").unwrap();
        let code = render(emit_wrappers(&rt, &model.receivers()[0], &model));

        let create_start = code.find("fn apigen_create").unwrap();
        let create = &code[create_start..];
        let auth = create.find("auth.authorize(req)").unwrap();
        let method = create.find("!= \"POST\"").unwrap();
        let fill = create.find("fill_and_validate(&mut param_1, req)").unwrap();
        let call = create.find("self.create(&Default::default(), &param_1)").unwrap();
        assert!(auth < method && method < fill && fill < call);

        let profile = &code[..create_start];
        assert!(!profile.contains("authorize"));
        assert!(!profile.contains("method_not_allowed"));
        assert!(profile.contains("self.profile(Default::default(), param_1)"));
    }

    #[test]
    fn test_only_trait_impls_are_marked_derived() {
        let model = model();
        let rt: Path = syn::parse_str("apigen").unwrap();
        let receiver = &model.receivers()[0];

        let dispatch = render(emit_dispatch(&rt, receiver));
        assert!(dispatch.contains("#[automatically_derived]"));

        let wrappers = render(emit_wrappers(&rt, receiver, &model));
        assert!(wrappers.starts_with("impl MyApi {"));
        assert!(!wrappers.contains("automatically_derived"));
    }
}
