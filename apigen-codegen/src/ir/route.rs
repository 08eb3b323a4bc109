//! Routed method IR definitions.

use proc_macro2::Ident;
use syn::Type;

/// Decoded routing payload of a method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteDirective {
    /// Exact request path, matched case-sensitively.
    pub url: String,
    /// Whether the wrapper checks the auth guard first.
    pub auth: bool,
    /// Upper-cased HTTP method; empty means any method is accepted.
    pub method: String,
}

impl RouteDirective {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: impl AsRef<str>) -> Self {
        self.method = method.as_ref().to_ascii_uppercase();
        self
    }

    /// Returns true if the route restricts the HTTP method.
    pub fn restricts_method(&self) -> bool {
        !self.method.is_empty()
    }
}

/// A business method parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamIR {
    /// The context placeholder, passed as `Default::default()`.
    Context { by_ref: bool },
    /// A parameter instantiated from the request and validated.
    Bound {
        /// Parameter type with any reference stripped.
        ty: Type,
        /// Last path segment of `ty`.
        type_name: String,
        by_ref: bool,
    },
}

impl ParamIR {
    /// Name of the bound type, if any.
    pub fn bound_type(&self) -> Option<&str> {
        match self {
            Self::Bound { type_name, .. } => Some(type_name),
            Self::Context { .. } => None,
        }
    }
}

/// A method reachable through a receiver's dispatch table.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedMethod {
    /// Receiver type name.
    pub receiver: String,
    pub method: Ident,
    /// Parameters after `self`, in declaration order.
    pub params: Vec<ParamIR>,
    pub route: RouteDirective,
    /// Source line of the method, for diagnostics.
    pub line: usize,
}

impl RoutedMethod {
    /// Name of the generated wrapper.
    pub fn wrapper_name(&self) -> Ident {
        quote::format_ident!("apigen_{}", self.method)
    }

    /// `Receiver::method`, used in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.receiver, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_is_upper_cased() {
        let route = RouteDirective::new("/user/create").with_method("post");
        assert_eq!(route.method, "POST");
        assert!(route.restricts_method());
        assert!(!RouteDirective::new("/x").restricts_method());
    }

    #[test]
    fn test_wrapper_name() {
        let method = RoutedMethod {
            receiver: "MyApi".into(),
            method: quote::format_ident!("create"),
            params: Vec::new(),
            route: RouteDirective::new("/user/create"),
            line: 1,
        };
        assert_eq!(method.wrapper_name().to_string(), "apigen_create");
        assert_eq!(method.qualified_name(), "MyApi::create");
    }
}
