//! apigen runtime
//!
//! Types linked by handlers that `apigen-codegen` generates: the request
//! abstraction, the JSON response envelope, error and status mapping, the
//! `Validate` and `Service` traits, and the auth guard.
//!
//! Generated code refers to this crate by path (`apigen::...`) and never
//! needs anything else in scope.

mod auth;
mod context;
mod error;
mod request;
mod response;
mod service;

pub use auth::*;
pub use context::*;
pub use error::*;
pub use request::*;
pub use response::*;
pub use service::*;

pub use http;
pub use serde;

#[cfg(test)]
mod tests;
