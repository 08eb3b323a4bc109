//! Host side of the generated handlers.
//!
//! [`MyApi`] serves every path. [`OtherApi`] is mounted under `/other`, with
//! the prefix stripped before its dispatch table sees the path.

use apigen::{http::Method, AuthGuard, Request, Response, Service};
use std::borrow::Cow;
use std::time::Instant;

use crate::api::{MyApi, OtherApi, UserStore};

/// Path prefix under which [`OtherApi`] is mounted.
pub const OTHER_PREFIX: &str = "/other";

/// The mounted services and the auth guard they share.
#[derive(Debug)]
pub struct App {
    my_api: MyApi,
    other_api: OtherApi,
    auth: AuthGuard,
}

impl App {
    pub fn new(store: UserStore, auth: AuthGuard) -> Self {
        Self {
            my_api: MyApi::new(store),
            other_api: OtherApi,
            auth,
        }
    }

    pub fn my_api(&self) -> &MyApi {
        &self.my_api
    }

    /// Route a transport-level request.
    ///
    /// `target` is the raw request target (`/path?query`). `body` is only
    /// decoded as form data when `content_type` says so.
    pub fn handle<'h>(
        &self,
        method: &str,
        target: &str,
        headers: impl IntoIterator<Item = (&'h str, &'h str)>,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let start = Instant::now();

        let Ok(method) = Method::from_bytes(method.as_bytes()) else {
            return Response::error(&apigen::ApiError::method_not_allowed("bad method"));
        };

        let (service, target): (&dyn Service, &str) = match strip_mount(target) {
            Some(rest) => (&self.other_api, rest),
            None => (&self.my_api, target),
        };

        let mut req = Request::new(method, target);
        for (name, value) in headers {
            req = req.header(name, value);
        }
        if is_form(content_type) {
            req = req.form_body(body);
        }

        tracing::debug!(method = %req.method(), path = req.path(), "→ request");
        let response = service.serve(&req, &self.auth);
        tracing::info!(
            method = %req.method(),
            path = req.path(),
            status = response.status().as_u16(),
            elapsed = ?start.elapsed(),
            "← response"
        );

        response
    }
}

/// The part of `target` after [`OTHER_PREFIX`], when it is mounted there.
fn strip_mount(target: &str) -> Option<&str> {
    let rest = target.strip_prefix(OTHER_PREFIX)?;
    match rest {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

/// Body bytes as text. Invalid UTF-8 sequences become U+FFFD so every body
/// still reaches a handler and gets an envelope back.
pub fn decode_body(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
        .unwrap_or(false)
}
