//! Request normalization and authentication.
//!
//! [`authenticate`] turns a generic request description into a signed,
//! ready-to-send one: it resolves the URL against the credential base,
//! sanitizes body and query parameters, decides per method whether
//! parameters travel in the query string, the form body, or only inside the
//! signature input, and injects the `X-MW-*` headers.

use chrono::Utc;
use mailwizz_model::{ApiRequest, Body, Credentials, ParamMap, Value};
use tracing::debug;

use crate::canonical::serialize;
use crate::error::AuthError;
use crate::sign::{
    METHOD_OVERRIDE_HEADER, PUBLIC_KEY_HEADER, REMOTE_ADDR_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER, sign, signature_headers,
};

/// Authenticate `request` in place using the current wall-clock time.
///
/// This is the only non-pure input to signing; tests and replay tooling
/// should use [`authenticate_at`] to fix the timestamp.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredential`] if the public key, private key
/// or base URL is empty. The request is not mutated in that case.
pub fn authenticate(credentials: &Credentials, request: &mut ApiRequest) -> Result<(), AuthError> {
    authenticate_at(credentials, request, Utc::now().timestamp())
}

/// Authenticate `request` in place with an explicit Unix-seconds timestamp.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredential`] if the public key, private key
/// or base URL is empty. The request is not mutated in that case.
pub fn authenticate_at(
    credentials: &Credentials,
    request: &mut ApiRequest,
    timestamp: i64,
) -> Result<(), AuthError> {
    if credentials.public_key.trim().is_empty() {
        return Err(AuthError::MissingCredential("public key"));
    }
    if credentials.private_key.trim().is_empty() {
        return Err(AuthError::MissingCredential("private key"));
    }
    if credentials.base_url.trim().is_empty() {
        return Err(AuthError::MissingCredential("base URL"));
    }

    let url = resolve_url(&credentials.base_url, &request.url);

    // Default Accept first, caller headers over it, X-MW-* over everything.
    let mut headers = ParamMap::new();
    headers.insert("Accept", "application/json");
    for (name, value) in request.headers.iter() {
        headers.insert(name, value.coerce_string());
    }
    let remote_addr = headers
        .get(REMOTE_ADDR_HEADER)
        .map(Value::coerce_string)
        .unwrap_or_default();
    headers.insert(PUBLIC_KEY_HEADER, credentials.public_key.as_str());
    headers.insert(TIMESTAMP_HEADER, timestamp.to_string());
    headers.insert(REMOTE_ADDR_HEADER, remote_addr.as_str());

    let body_params = match std::mem::take(&mut request.body) {
        Body::Params(map) => filter_absent(map),
        // Callers hand over Empty or Params; an already-encoded body has
        // nothing left to sign and is treated as empty.
        Body::Empty | Body::Encoded(_) => ParamMap::new(),
    };
    let query = filter_absent(std::mem::take(&mut request.query));

    let digest = sign(
        request.method,
        &url,
        &signature_headers(&credentials.public_key, timestamp, &remote_addr),
        &body_params,
        &query,
        &credentials.private_key,
    );

    if request.method.carries_body() && !body_params.is_empty() {
        let encoded = serialize(&body_params);
        headers.insert("Content-Type", "application/x-www-form-urlencoded");
        headers.insert("Content-Length", encoded.len().to_string());
        request.body = Body::Encoded(encoded);
    } else {
        headers.remove("Content-Length");
        request.body = Body::Empty;
    }

    headers.insert(SIGNATURE_HEADER, digest);
    headers.insert(METHOD_OVERRIDE_HEADER, request.method.as_str());

    debug!(method = %request.method, url = %url, "authenticated request");

    request.url = url;
    request.query = query;
    request.headers = headers;
    Ok(())
}

/// Resolve the request URL against the credential base URL.
///
/// A URL that already carries a scheme is used as-is; otherwise the base
/// (whitespace-trimmed, trailing slashes stripped) is joined with a
/// leading-slash-ensured path.
fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let base = base_url.trim().trim_end_matches('/');
    if url.starts_with('/') {
        format!("{base}{url}")
    } else {
        format!("{base}/{url}")
    }
}

/// Pre-pass parameter sanitization.
///
/// Traverses the whole structure: absent entries are dropped everywhere,
/// array entries that are null or absent are dropped, and null leaves under
/// object keys are kept intact. Distinct from the serializer's own
/// per-call filtering, which only looks at the level it is walking.
fn filter_absent(map: ParamMap) -> ParamMap {
    map.into_iter()
        .filter(|(_, value)| !value.is_absent())
        .map(|(key, value)| (key, filter_value(value)))
        .collect()
}

fn filter_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(filter_absent(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !item.is_absent() && !item.is_null())
                .map(filter_value)
                .collect(),
        ),
        scalar => scalar,
    }
}
