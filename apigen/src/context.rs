//! Context placeholder passed to business methods

/// Placeholder passed as the context argument of every routed method.
///
/// Generated wrappers construct it with `Default::default()`; it carries no
/// request data and exists so business methods keep a stable first parameter.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Context;

impl Context {
    /// Create an empty context.
    pub fn empty() -> Self {
        Self
    }
}
