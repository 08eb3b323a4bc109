//! Declaration scanner.
//!
//! Walks the top-level items of the definition source and classifies each as
//! a validated type, an `impl` block with routed methods, or irrelevant. The
//! model is built in a single pass.

use syn::spanned::Spanned;
use syn::{Fields, FnArg, ImplItem, ImplItemFn, Item, ItemImpl, ItemStruct};

use super::annotation::{parse_route, parse_validator_tag, route_payload, validator_tag};
use super::type_parser::TypeParser;
use crate::error::{line_of, CodegenError, CodegenResult};
use crate::generator::GeneratorConfig;
use crate::ir::{ApiModel, FieldRule, ParamIR, RoutedMethod, ValidatedType};

/// Builds an [`ApiModel`] from parsed definitions.
pub struct Scanner<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Parse and scan definition source.
    pub fn scan_source(&self, source: &str) -> CodegenResult<ApiModel> {
        let file = syn::parse_file(source).map_err(|e| CodegenError::syntax(&e))?;
        self.scan(&file)
    }

    /// Scan a parsed file.
    pub fn scan(&self, file: &syn::File) -> CodegenResult<ApiModel> {
        let mut model = ApiModel::new();

        for item in &file.items {
            match item {
                Item::Struct(item) => {
                    if let Some(validated) = self.scan_struct(item)? {
                        model.add_validated(validated);
                    }
                }
                Item::Impl(item) => self.scan_impl(item, &mut model)?,
                Item::Fn(item) => {
                    if route_payload(&item.attrs, &self.config.route_marker).is_some() {
                        return Err(CodegenError::unsupported_item(
                            item.sig.ident.to_string(),
                            item.sig.ident.span(),
                            "routing annotation on a free function",
                        ));
                    }
                }
                _ => {}
            }
        }

        tracing::debug!(
            receivers = model.receivers().len(),
            routes = model.route_count(),
            validated = model.validated_types().len(),
            "scan complete"
        );

        Ok(model)
    }

    fn scan_struct(&self, item: &ItemStruct) -> CodegenResult<Option<ValidatedType>> {
        let name = item.ident.to_string();
        let marker = &self.config.validator_marker;

        let tagged = item
            .fields
            .iter()
            .any(|f| validator_tag(&f.attrs, marker).is_some());
        if !tagged {
            return Ok(None);
        }

        let fields = match &item.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Err(CodegenError::unsupported_item(
                    name,
                    item.ident.span(),
                    "validated types must have named fields",
                ))
            }
        };

        if !item.generics.params.is_empty() {
            return Err(CodegenError::unsupported_item(
                name,
                item.ident.span(),
                "validated types must not be generic",
            ));
        }

        let mut validated = ValidatedType::new(&name);
        for field in &fields.named {
            let Some(tag) = validator_tag(&field.attrs, marker) else {
                continue;
            };
            let Some(ident) = &field.ident else {
                continue;
            };
            let field_name = ident.to_string();

            let kind = TypeParser::field_kind(&field.ty).ok_or_else(|| {
                CodegenError::unsupported_type(
                    &name,
                    &field_name,
                    TypeParser::display(&field.ty),
                    field.ty.span(),
                )
            })?;

            let context = format!("{}.{}", name, field_name);
            let directives = parse_validator_tag(&tag, kind, &context);
            validated
                .fields
                .push(FieldRule::new(field_name, kind, directives));
        }

        Ok(Some(validated))
    }

    fn scan_impl(&self, item: &ItemImpl, model: &mut ApiModel) -> CodegenResult<()> {
        let marker = &self.config.route_marker;
        let routed: Vec<&ImplItemFn> = item
            .items
            .iter()
            .filter_map(|i| match i {
                ImplItem::Fn(f) => Some(f),
                _ => None,
            })
            .filter(|f| route_payload(&f.attrs, marker).is_some())
            .collect();

        if routed.is_empty() {
            return Ok(());
        }

        let receiver = TypeParser::type_name(&item.self_ty)
            .filter(|_| matches!(&*item.self_ty, syn::Type::Path(_)))
            .ok_or_else(|| {
                CodegenError::unsupported_item(
                    TypeParser::display(&item.self_ty),
                    item.self_ty.span(),
                    "routed methods need a named receiver type",
                )
            })?;

        if !item.generics.params.is_empty() {
            return Err(CodegenError::unsupported_item(
                receiver,
                item.impl_token.span,
                "routed methods cannot live in a generic impl block",
            ));
        }

        for method in routed {
            let routed = self.scan_method(&receiver, method)?;
            model.add_route(&item.self_ty, routed);
        }

        Ok(())
    }

    fn scan_method(&self, receiver: &str, method: &ImplItemFn) -> CodegenResult<RoutedMethod> {
        let sig = &method.sig;
        let qualified = format!("{}::{}", receiver, sig.ident);
        let span = sig.ident.span();

        let payload = route_payload(&method.attrs, &self.config.route_marker).unwrap_or_default();
        let route = parse_route(&payload)
            .map_err(|message| CodegenError::malformed(&qualified, span, message))?;

        if sig.asyncness.is_some() {
            return Err(CodegenError::unsupported_item(
                qualified,
                span,
                "routed methods must not be async",
            ));
        }
        if !sig.generics.params.is_empty() {
            return Err(CodegenError::unsupported_item(
                qualified,
                span,
                "routed methods must not be generic",
            ));
        }

        let mut inputs = sig.inputs.iter();
        match inputs.next() {
            Some(FnArg::Receiver(r)) if r.reference.is_some() && r.mutability.is_none() => {}
            Some(FnArg::Receiver(_)) => {
                return Err(CodegenError::unsupported_item(
                    qualified,
                    span,
                    "routed methods must take `&self`",
                ))
            }
            _ => {
                return Err(CodegenError::unsupported_item(
                    qualified,
                    span,
                    "routed annotation on an associated function without `self`",
                ))
            }
        }

        let params = inputs
            .map(|arg| self.scan_param(&qualified, arg))
            .collect::<CodegenResult<Vec<_>>>()?;

        Ok(RoutedMethod {
            receiver: receiver.to_string(),
            method: sig.ident.clone(),
            params,
            route,
            line: line_of(span),
        })
    }

    fn scan_param(&self, qualified: &str, arg: &FnArg) -> CodegenResult<ParamIR> {
        let FnArg::Typed(pat) = arg else {
            return Err(CodegenError::unsupported_item(
                qualified,
                arg.span(),
                "unexpected receiver",
            ));
        };

        let (ty, by_ref) = TypeParser::split_reference(&pat.ty).ok_or_else(|| {
            CodegenError::unsupported_item(
                qualified,
                pat.ty.span(),
                "parameters cannot be taken by mutable reference",
            )
        })?;

        let type_name = TypeParser::type_name(&ty).ok_or_else(|| {
            CodegenError::unsupported_item(
                qualified,
                pat.ty.span(),
                format!(
                    "parameter type `{}` must be a named type",
                    TypeParser::display(&pat.ty)
                ),
            )
        })?;

        if type_name == self.config.context_type {
            return Ok(ParamIR::Context { by_ref });
        }

        Ok(ParamIR::Bound {
            ty,
            type_name,
            by_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FieldKind, IntWidth, ValidatorDirective};

    fn scan(source: &str) -> CodegenResult<ApiModel> {
        let config = GeneratorConfig::default();
        Scanner::new(&config).scan_source(source)
    }

    const DEFINITIONS: &str = r#"
        pub struct MyApi;

        #[derive(Default)]
        pub struct ProfileParams {
            /// apivalidator: required
            pub login: String,
        }

        #[derive(Default)]
        pub struct CreateParams {
            /// apivalidator: required,min=10
            pub login: String,
            /// apivalidator: paramname=full_name
            pub name: String,
            /// apivalidator: enum=user|moderator|admin,default=user
            pub status: String,
            /// apivalidator: min=0,max=128
            pub age: i32,
            pub note: String,
        }

        pub struct Plain {
            pub value: f64,
        }

        impl MyApi {
            /// apigen:api {"url": "/user/profile", "auth": false}
            pub fn profile(&self, ctx: Context, params: ProfileParams) -> Result<User, ApiError> {
                todo!()
            }

            /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
            pub fn create(&self, ctx: &Context, params: &CreateParams) -> Result<NewUser, ApiError> {
                todo!()
            }

            pub fn helper(&self) {}
        }
    "#;

    #[test]
    fn test_scan_definitions() {
        let model = scan(DEFINITIONS).unwrap();

        assert_eq!(model.receivers().len(), 1);
        let methods = model.methods("MyApi");
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].method, "profile");
        assert_eq!(methods[0].route.url, "/user/profile");
        assert!(!methods[0].route.auth);
        assert_eq!(methods[1].route.method, "POST");
        assert!(methods[1].route.auth);

        assert_eq!(methods[1].params[0], ParamIR::Context { by_ref: true });
        match &methods[1].params[1] {
            ParamIR::Bound { type_name, by_ref, .. } => {
                assert_eq!(type_name, "CreateParams");
                assert!(*by_ref);
            }
            other => panic!("unexpected param: {other:?}"),
        }

        let names: Vec<_> = model.validated_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["ProfileParams", "CreateParams"]);
        assert!(!model.is_validated("Plain"));
    }

    #[test]
    fn test_field_rules() {
        let model = scan(DEFINITIONS).unwrap();
        let create = model.validated("CreateParams").unwrap();

        assert_eq!(create.fields.len(), 4, "untagged fields are not validated");
        assert_eq!(create.field("name").unwrap().key, "full_name");
        assert_eq!(
            create.field("age").unwrap().kind,
            FieldKind::Integer(IntWidth::I32)
        );
        assert_eq!(
            create.field("login").unwrap().directives,
            vec![ValidatorDirective::Required, ValidatorDirective::Min(10)]
        );
        assert!(create.field("note").is_none());
    }

    #[test]
    fn test_malformed_route_is_fatal() {
        let err = scan(
            r#"
            struct A;
            impl A {
                /// apigen:api {"url": "/x",
                fn x(&self) {}
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::MalformedAnnotation { .. }), "{err}");
    }

    #[test]
    fn test_marker_on_free_function_is_fatal() {
        let err = scan(
            r#"
            /// apigen:api {"url": "/x"}
            fn x() {}
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedItem { .. }));
    }

    #[test]
    fn test_marker_without_self_is_fatal() {
        let err = scan(
            r#"
            struct A;
            impl A {
                /// apigen:api {"url": "/x"}
                fn x(params: P) {}
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedItem { .. }));
    }

    #[test]
    fn test_async_and_generic_impl_are_fatal() {
        let err = scan(
            r#"
            struct A;
            impl A {
                /// apigen:api {"url": "/x"}
                async fn x(&self) {}
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedItem { .. }));

        let err = scan(
            r#"
            struct A<T>(T);
            impl<T> A<T> {
                /// apigen:api {"url": "/x"}
                fn x(&self) {}
            }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedItem { .. }));
    }

    #[test]
    fn test_unsupported_field_type_is_fatal() {
        let err = scan(
            r#"
            struct P {
                /// apivalidator: required
                score: f64,
            }
            "#,
        )
        .unwrap_err();
        match err {
            CodegenError::UnsupportedType {
                owner,
                field,
                type_name,
                line,
            } => {
                assert_eq!(owner, "P");
                assert_eq!(field, "score");
                assert_eq!(type_name, "f64");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tuple_struct_with_marker_is_fatal() {
        let err = scan(
            r#"
            struct P(
                /// apivalidator: required
                String,
            );
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedItem { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = scan("struct {").unwrap_err();
        assert!(matches!(err, CodegenError::Syntax { .. }));
    }

    #[test]
    fn test_unannotated_source_is_empty() {
        let model = scan("struct A; impl A { fn x(&self) {} }").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_custom_markers() {
        let config = GeneratorConfig {
            route_marker: "route".into(),
            validator_marker: "check".into(),
            ..Default::default()
        };
        let model = Scanner::new(&config)
            .scan_source(
                r#"
                struct P {
                    /// check: required
                    login: String,
                }
                struct A;
                impl A {
                    /// route {"url": "/x"}
                    fn x(&self, p: P) {}
                }
                "#,
            )
            .unwrap();
        assert_eq!(model.route_count(), 1);
        assert!(model.is_validated("P"));
    }
}
