//! The intermediate model built by the scanner and consumed by the emitter.
//!
//! Receivers and validated types keep first-declaration order so the emitted
//! file is deterministic for a given input.

use syn::Type;

use super::route::RoutedMethod;
use super::validation::ValidatedType;

/// A receiver type and the routed methods in its dispatch table.
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: String,
    /// Self type of the first `impl` block that declared a routed method.
    pub self_ty: Type,
    pub methods: Vec<RoutedMethod>,
}

/// `receiver -> [RoutedMethod]` and `type name -> ValidatedType`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiModel {
    receivers: Vec<Receiver>,
    validated: Vec<ValidatedType>,
}

impl ApiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a routed method.
    ///
    /// Returns `false` when the receiver already routes the same url; the
    /// first declaration is kept and the duplicate is dropped.
    pub fn add_route(&mut self, self_ty: &Type, method: RoutedMethod) -> bool {
        let index = match self
            .receivers
            .iter()
            .position(|r| r.name == method.receiver)
        {
            Some(index) => index,
            None => {
                self.receivers.push(Receiver {
                    name: method.receiver.clone(),
                    self_ty: self_ty.clone(),
                    methods: Vec::new(),
                });
                self.receivers.len() - 1
            }
        };
        let receiver = &mut self.receivers[index];

        if let Some(first) = receiver
            .methods
            .iter()
            .find(|m| m.route.url == method.route.url)
        {
            tracing::warn!(
                receiver = %receiver.name,
                url = %method.route.url,
                kept = %first.method,
                dropped = %method.method,
                "duplicate url, keeping the first declaration"
            );
            return false;
        }

        tracing::debug!(method = %method.qualified_name(), url = %method.route.url, "routed method");
        receiver.methods.push(method);
        true
    }

    /// Register a validated type. A second type with the same name is ignored.
    pub fn add_validated(&mut self, ty: ValidatedType) {
        if self.is_validated(&ty.name) {
            tracing::warn!(name = %ty.name, "validated type declared twice, keeping the first");
            return;
        }
        tracing::debug!(name = %ty.name, fields = ty.fields.len(), "validated type");
        self.validated.push(ty);
    }

    /// Receivers in first-declaration order.
    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }

    /// Routed methods of a receiver, in declaration order.
    pub fn methods(&self, receiver: &str) -> &[RoutedMethod] {
        self.receivers
            .iter()
            .find(|r| r.name == receiver)
            .map(|r| r.methods.as_slice())
            .unwrap_or(&[])
    }

    /// Validated types in declaration order.
    pub fn validated_types(&self) -> &[ValidatedType] {
        &self.validated
    }

    pub fn validated(&self, name: &str) -> Option<&ValidatedType> {
        self.validated.iter().find(|t| t.name == name)
    }

    pub fn is_validated(&self, name: &str) -> bool {
        self.validated(name).is_some()
    }

    /// Total number of routed methods across all receivers.
    pub fn route_count(&self) -> usize {
        self.receivers.iter().map(|r| r.methods.len()).sum()
    }

    /// Returns true if nothing was found to generate.
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty() && self.validated.is_empty()
    }
}
