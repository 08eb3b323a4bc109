//! Intermediate Representation (IR) module.
//!
//! The model the scanner fills in a single pass over the definition source
//! and the emitter renders from.

pub mod model;
pub mod route;
pub mod validation;

pub use model::{ApiModel, Receiver};
pub use route::{ParamIR, RouteDirective, RoutedMethod};
pub use validation::{
    DirectiveValue, FieldKind, FieldRule, IntWidth, ValidatedType, ValidatorDirective,
};
