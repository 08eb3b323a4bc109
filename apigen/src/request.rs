//! Request abstraction consumed by generated handlers
//!
//! The host is responsible for turning its transport-level request into a
//! [`Request`]: method, path, headers, and the form values decoded from the
//! query string and an `application/x-www-form-urlencoded` body.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};

/// An incoming request as seen by generated dispatch and validation code.
///
/// # Example
/// ```rust
/// use apigen::Request;
///
/// let req = Request::post("/user/create?login=alice")
///     .header("X-Auth", "secret")
///     .form_body("age=42");
///
/// assert_eq!(req.path(), "/user/create");
/// assert_eq!(req.form_value("login"), "alice");
/// assert_eq!(req.form_value("age"), "42");
/// assert_eq!(req.form_value("missing"), "");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    /// Body pairs first, then query pairs; lookups take the first match.
    form: Vec<(String, String)>,
}

impl Request {
    /// Create a request from a method and a request target (`/path?query`).
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };

        Self {
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            form: query.map(parse_form).unwrap_or_default(),
        }
    }

    /// Create a GET request.
    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target)
    }

    /// Create a POST request.
    pub fn post(target: &str) -> Self {
        Self::new(Method::POST, target)
    }

    /// Add a header.
    ///
    /// Names or values that are not valid HTTP tokens are dropped with a warning.
    #[must_use = "This method returns a new Request and does not modify self"]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(header = name, "dropping invalid request header"),
        }
        self
    }

    /// Attach a form-encoded body. Body values shadow query values of the same key.
    #[must_use = "This method returns a new Request and does not modify self"]
    pub fn form_body(mut self, body: &str) -> Self {
        let mut form = parse_form(body);
        form.append(&mut self.form);
        self.form = form;
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// First form value stored under `key`, or `""` when absent.
    pub fn form_value(&self, key: &str) -> &str {
        self.form
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Returns true if the form carries `key`, even with an empty value.
    pub fn has_form_value(&self, key: &str) -> bool {
        self.form.iter().any(|(k, _)| k == key)
    }
}

fn parse_form(input: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(input.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
