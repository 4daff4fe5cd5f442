//! End-to-end signing flows against fixed timestamps and known digests.

use mailwizz_auth::{
    AuthError, authenticate_at, hmac_sha1_hex, serialize, signature_headers, sorted,
};
use mailwizz_model::{ApiRequest, Body, Credentials, Method, ParamMap, Value};

const TIMESTAMP: i64 = 1_700_000_000;

fn credentials() -> Credentials {
    Credentials::new("pub", "sec", "https://h/api")
}

fn header(request: &ApiRequest, name: &str) -> Option<String> {
    request.headers.get(name).map(Value::coerce_string)
}

#[test]
fn test_should_sign_post_with_nested_body() {
    let body: ParamMap = [(
        "list",
        Value::from(serde_json::json!({"general": {"name": "N"}})),
    )]
    .into_iter()
    .collect();
    let mut request = ApiRequest::new(Method::Post, "/lists").with_body(body);

    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();

    assert_eq!(request.url, "https://h/api/lists");
    // Digest of:
    // POST https://h/api/lists&X-MW-PUBLIC-KEY=pub&X-MW-REMOTE-ADDR=
    //   &X-MW-TIMESTAMP=1700000000&list%5Bgeneral%5D%5Bname%5D=N
    assert_eq!(
        header(&request, "X-MW-SIGNATURE").unwrap(),
        "497759eb02453d921b5ea639356f8318ed82251d"
    );
    assert_eq!(header(&request, "X-MW-PUBLIC-KEY").unwrap(), "pub");
    assert_eq!(header(&request, "X-MW-TIMESTAMP").unwrap(), "1700000000");
    assert_eq!(header(&request, "X-MW-REMOTE-ADDR").unwrap(), "");
    assert_eq!(header(&request, "X-HTTP-Method-Override").unwrap(), "POST");
    assert_eq!(
        header(&request, "Content-Type").unwrap(),
        "application/x-www-form-urlencoded"
    );

    let encoded = "list%5Bgeneral%5D%5Bname%5D=N";
    assert_eq!(request.body, Body::Encoded(encoded.to_owned()));
    assert_eq!(
        header(&request, "Content-Length").unwrap(),
        encoded.len().to_string()
    );
}

#[test]
fn test_should_sign_post_body_equal_to_manual_construction() {
    // The scenario digest must equal hmac_sha1 over the manually assembled
    // base string built from the same primitives.
    let mut params: ParamMap = signature_headers("pub", TIMESTAMP, "");
    params.insert(
        "list",
        Value::from(serde_json::json!({"general": {"name": "N"}})),
    );
    let base = format!("POST https://h/api/lists&{}", serialize(&sorted(&params)));
    let expected = hmac_sha1_hex("sec", &base);

    let body: ParamMap = [(
        "list",
        Value::from(serde_json::json!({"general": {"name": "N"}})),
    )]
    .into_iter()
    .collect();
    let mut request = ApiRequest::new(Method::Post, "/lists").with_body(body);
    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();

    assert_eq!(header(&request, "X-MW-SIGNATURE").unwrap(), expected);
}

#[test]
fn test_should_embed_query_in_signed_url_for_get() {
    let query: ParamMap = [("page", 1), ("per_page", 1)].into_iter().collect();
    let mut request = ApiRequest::new(Method::Get, "/lists").with_query(query);

    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();

    assert_eq!(request.url, "https://h/api/lists");
    let wire_query = mailwizz_auth::flat_query(&request.query);
    assert_eq!(wire_query, "page=1&per_page=1");
    // Digest of:
    // GET https://h/api/lists?page=1&per_page=1&X-MW-PUBLIC-KEY=pub
    //   &X-MW-REMOTE-ADDR=&X-MW-TIMESTAMP=1700000000
    assert_eq!(
        header(&request, "X-MW-SIGNATURE").unwrap(),
        "a21046c53d6627477dd7b6f4c497813a03c5431d"
    );
}

#[test]
fn test_should_not_set_body_headers_for_empty_post_body() {
    let body: ParamMap = [("gone", Value::Absent)].into_iter().collect();
    let mut request = ApiRequest::new(Method::Post, "/lists").with_body(body);

    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();

    assert_eq!(request.body, Body::Empty);
    assert!(!request.headers.contains_key("Content-Type"));
    assert!(!request.headers.contains_key("Content-Length"));
    assert!(request.headers.contains_key("X-MW-SIGNATURE"));
}

#[test]
fn test_should_never_fold_body_into_get_signature() {
    let body: ParamMap = [("name", "N")].into_iter().collect();
    let mut get = ApiRequest::new(Method::Get, "/lists").with_body(body.clone());
    let mut delete = ApiRequest::new(Method::Delete, "/lists").with_body(body);

    authenticate_at(&credentials(), &mut get, TIMESTAMP).unwrap();
    authenticate_at(&credentials(), &mut delete, TIMESTAMP).unwrap();

    // Neither method transmits or signs the body; both bodies are removed.
    assert_eq!(get.body, Body::Empty);
    assert_eq!(delete.body, Body::Empty);
    assert!(!get.headers.contains_key("Content-Type"));
    assert!(!delete.headers.contains_key("Content-Type"));
}

#[test]
fn test_should_pass_caller_remote_addr_into_signature_headers() {
    let mut request =
        ApiRequest::new(Method::Get, "/lists").with_header("X-MW-REMOTE-ADDR", "10.0.0.1");
    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();
    assert_eq!(header(&request, "X-MW-REMOTE-ADDR").unwrap(), "10.0.0.1");

    let params = signature_headers("pub", TIMESTAMP, "10.0.0.1");
    let base = format!("GET https://h/api/lists?{}", serialize(&params));
    assert_eq!(
        header(&request, "X-MW-SIGNATURE").unwrap(),
        hmac_sha1_hex("sec", &base)
    );
}

#[test]
fn test_should_yield_identical_signatures_for_identical_inputs() {
    let query: ParamMap = [("page", 1)].into_iter().collect();
    let mut first = ApiRequest::new(Method::Get, "/lists").with_query(query.clone());
    let mut second = ApiRequest::new(Method::Get, "/lists").with_query(query);

    authenticate_at(&credentials(), &mut first, TIMESTAMP).unwrap();
    authenticate_at(&credentials(), &mut second, TIMESTAMP).unwrap();

    assert_eq!(
        header(&first, "X-MW-SIGNATURE"),
        header(&second, "X-MW-SIGNATURE")
    );
}

#[test]
fn test_should_fail_without_private_key_and_leave_request_untouched() {
    let mut credentials = credentials();
    credentials.private_key = String::new();

    let body: ParamMap = [("name", "N")].into_iter().collect();
    let mut request = ApiRequest::new(Method::Post, "/lists").with_body(body);
    let before = request.clone();

    let result = authenticate_at(&credentials, &mut request, TIMESTAMP);
    assert_eq!(result, Err(AuthError::MissingCredential("private key")));
    assert_eq!(request, before);
}

#[test]
fn test_should_fail_without_public_key_or_base_url() {
    let mut no_public = credentials();
    no_public.public_key = "  ".to_owned();
    let mut no_base = credentials();
    no_base.base_url = String::new();

    let mut request = ApiRequest::new(Method::Get, "/lists");
    assert_eq!(
        authenticate_at(&no_public, &mut request, TIMESTAMP),
        Err(AuthError::MissingCredential("public key"))
    );
    assert_eq!(
        authenticate_at(&no_base, &mut request, TIMESTAMP),
        Err(AuthError::MissingCredential("base URL"))
    );
}

#[test]
fn test_should_override_default_accept_with_caller_header() {
    let mut request = ApiRequest::new(Method::Get, "/lists").with_header("Accept", "text/xml");
    authenticate_at(&credentials(), &mut request, TIMESTAMP).unwrap();
    assert_eq!(header(&request, "Accept").unwrap(), "text/xml");
}
