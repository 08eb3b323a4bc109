//! Tests for request construction and form lookup

use crate::Request;
use http::Method;
use proptest::prelude::*;

#[test]
fn test_target_split() {
    let req = Request::get("/user/profile?login=alice");
    assert_eq!(req.method(), &Method::GET);
    assert_eq!(req.path(), "/user/profile");
    assert_eq!(req.form_value("login"), "alice");
}

#[test]
fn test_missing_value_is_empty() {
    let req = Request::get("/user/profile");
    assert_eq!(req.form_value("login"), "");
    assert!(!req.has_form_value("login"));
}

#[test]
fn test_empty_value_is_present() {
    let req = Request::get("/user/profile?login=");
    assert_eq!(req.form_value("login"), "");
    assert!(req.has_form_value("login"));
}

#[test]
fn test_body_values_come_first() {
    let req = Request::post("/user/create?login=from_query&age=1").form_body("login=from_body");
    assert_eq!(req.form_value("login"), "from_body");
    assert_eq!(req.form_value("age"), "1");
}

#[test]
fn test_first_duplicate_wins() {
    let req = Request::get("/x?name=foo&name=bar");
    assert_eq!(req.form_value("name"), "foo");
}

#[test]
fn test_percent_decoding() {
    let req = Request::get("/x?full_name=John+Doe&email=a%40b.c");
    assert_eq!(req.form_value("full_name"), "John Doe");
    assert_eq!(req.form_value("email"), "a@b.c");
}

#[test]
fn test_headers_case_insensitive() {
    let req = Request::get("/x").header("X-Auth", "100500");
    assert_eq!(req.header_value("x-auth"), Some("100500"));
    assert_eq!(req.header_value("X-AUTH"), Some("100500"));
    assert_eq!(req.header_value("Authorization"), None);
}

#[test]
fn test_invalid_header_dropped() {
    let req = Request::get("/x").header("bad header", "v");
    assert!(req.headers().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any encoded key/value pair is read back unchanged.
    #[test]
    fn prop_form_value_decodes(key in "[a-z_]{1,10}", value in "\\PC{0,20}") {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair(&key, &value)
            .finish();
        let req = Request::get(&format!("/x?{}", query));
        prop_assert_eq!(req.form_value(&key), value.as_str());
    }

    /// The path never contains the query string.
    #[test]
    fn prop_path_excludes_query(path in "/[a-z/]{0,15}", query in "[a-z=&]{0,15}") {
        let req = Request::get(&format!("{}?{}", path, query));
        prop_assert_eq!(req.path(), path.as_str());
    }
}
