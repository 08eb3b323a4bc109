//! Annotation decoding.
//!
//! Two dialects are read from documentation comments:
//!
//! - the routing directive, on the first doc line of a method:
//!   `/// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}`
//! - the validator tag, on any doc line of a field:
//!   `/// apivalidator: required,min=10`
//!
//! A routing payload that does not decode is fatal. A validator clause that
//! does not decode is logged and skipped.

use serde::Deserialize;
use syn::{Attribute, Expr, ExprLit, Lit, Meta};

use crate::ir::{DirectiveValue, FieldKind, RouteDirective, ValidatorDirective};

/// Collect the text of `///` and `#[doc = "..."]` attributes, one entry per line.
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|doc| doc.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

/// Text following `marker` on a doc line, if the line starts with it.
///
/// The marker must be followed by whitespace, a colon, or the end of the line.
pub fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(marker)?;
    if rest.is_empty() {
        return Some(rest);
    }
    if let Some(rest) = rest.strip_prefix(':') {
        return Some(rest.trim());
    }
    if rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

/// Routing payload of a method, if its first doc line carries the marker.
pub fn route_payload(attrs: &[Attribute], marker: &str) -> Option<String> {
    let lines = doc_lines(attrs);
    let first = lines.iter().find(|l| !l.trim().is_empty())?;
    strip_marker(first, marker).map(str::to_string)
}

/// Validator tag of a field, if any of its doc lines carries the marker.
pub fn validator_tag(attrs: &[Attribute], marker: &str) -> Option<String> {
    doc_lines(attrs)
        .iter()
        .find_map(|line| strip_marker(line, marker).map(str::to_string))
}

#[derive(Debug, Deserialize)]
struct RoutePayload {
    url: String,
    #[serde(default)]
    auth: bool,
    #[serde(default)]
    method: String,
}

/// Decode a routing payload.
///
/// Returns a message describing the problem when the payload is not a JSON
/// object with a non-empty `url`.
pub fn parse_route(payload: &str) -> Result<RouteDirective, String> {
    if payload.trim().is_empty() {
        return Err("missing routing payload".to_string());
    }

    let decoded: RoutePayload = serde_json::from_str(payload).map_err(|e| e.to_string())?;
    if decoded.url.is_empty() {
        return Err("`url` must not be empty".to_string());
    }

    Ok(RouteDirective::new(decoded.url)
        .with_auth(decoded.auth)
        .with_method(decoded.method.trim()))
}

/// Decode a validator tag into directives.
///
/// `field` names the field in log messages. Unknown keys are ignored; clauses
/// that cannot be decoded are skipped with a warning.
pub fn parse_validator_tag(tag: &str, kind: FieldKind, field: &str) -> Vec<ValidatorDirective> {
    tag.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .filter_map(|clause| match parse_clause(clause, kind) {
            Ok(directive) => directive,
            Err(reason) => {
                tracing::warn!(field, clause, reason, "skipping validator clause");
                None
            }
        })
        .collect()
}

fn parse_clause(clause: &str, kind: FieldKind) -> Result<Option<ValidatorDirective>, &'static str> {
    let (key, value) = match clause.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value.trim())),
        None => (clause, None),
    };

    if key.is_empty() {
        return Err("empty key");
    }

    let directive = match key {
        "required" => {
            if value.is_some() {
                return Err("`required` takes no value");
            }
            ValidatorDirective::Required
        }
        "paramname" => {
            let value = non_empty(value)?;
            ValidatorDirective::ParamName(value.to_string())
        }
        "enum" => {
            let alternatives = non_empty(value)?
                .split('|')
                .map(str::trim)
                .filter(|alt| !alt.is_empty())
                .map(|alt| literal(alt, kind))
                .collect::<Result<Vec<_>, _>>()?;
            if alternatives.is_empty() {
                return Err("no alternatives");
            }
            ValidatorDirective::Enum(alternatives)
        }
        "default" => ValidatorDirective::Default(literal(non_empty(value)?, kind)?),
        "min" => ValidatorDirective::Min(bound(non_empty(value)?, kind)?),
        "max" => ValidatorDirective::Max(bound(non_empty(value)?, kind)?),
        other => {
            tracing::debug!(key = other, "ignoring unknown validator key");
            return Ok(None);
        }
    };

    Ok(Some(directive))
}

fn non_empty(value: Option<&str>) -> Result<&str, &'static str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err("missing value"),
    }
}

fn literal(value: &str, kind: FieldKind) -> Result<DirectiveValue, &'static str> {
    match kind {
        FieldKind::Text => Ok(DirectiveValue::Text(value.to_string())),
        FieldKind::Integer(width) => {
            let n: i128 = value.parse().map_err(|_| "not an integer")?;
            if !width.contains(n) {
                return Err("integer out of range for field type");
            }
            Ok(DirectiveValue::Integer(n))
        }
    }
}

fn bound(value: &str, kind: FieldKind) -> Result<i64, &'static str> {
    let n: i64 = value.parse().map_err(|_| "not an integer")?;
    if kind.is_text() && n < 0 {
        return Err("length bound must not be negative");
    }
    Ok(n)
}
