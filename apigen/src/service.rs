//! Traits implemented by generated code

use std::sync::Arc;

use crate::auth::AuthGuard;
use crate::error::ApiError;
use crate::request::Request;
use crate::response::Response;

/// Fill a parameter value from a request and check its field rules.
///
/// Generated for every validated type. Types used as routed-method parameters
/// that carry no validator annotations must implement it by hand.
pub trait Validate {
    /// Read fields from `req` into `self` and validate them.
    fn fill_and_validate(&mut self, req: &Request) -> Result<(), ApiError>;
}

/// A receiver whose routed methods are reachable through a dispatch table.
pub trait Service {
    /// Route `req` to the wrapper registered for its path.
    ///
    /// Never fails: every outcome, including unknown paths, is a [`Response`].
    fn serve(&self, req: &Request, auth: &AuthGuard) -> Response;
}

impl<S: Service + ?Sized> Service for Arc<S> {
    fn serve(&self, req: &Request, auth: &AuthGuard) -> Response {
        (**self).serve(req, auth)
    }
}

impl<S: Service + ?Sized> Service for &S {
    fn serve(&self, req: &Request, auth: &AuthGuard) -> Response {
        (**self).serve(req, auth)
    }
}
