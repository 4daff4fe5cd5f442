//! Signature base string assembly and HMAC-SHA1 digest computation.
//!
//! The signature base string has the shape:
//!
//! ```text
//! METHOD URL[separator]SERIALIZED_PARAMS
//! ```
//!
//! where the separator is `?` only for a GET with no query string, and `&`
//! otherwise (even when no `?` was ever appended to the URL). The serialized
//! parameters are the key-sorted merge of the three `X-MW-*` signature
//! headers with the body fields of body-carrying methods; GET and DELETE
//! never fold a body into the signature.
//!
//! The digest is `hex(HMAC-SHA1(private_key, base))`, lowercase.

use hmac::{Hmac, KeyInit, Mac};
use mailwizz_model::{Method, ParamMap, Value};
use sha1::Sha1;
use tracing::debug;

use crate::canonical::{flat_query, serialize, sorted};

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the public API key.
pub const PUBLIC_KEY_HEADER: &str = "X-MW-PUBLIC-KEY";
/// Header carrying the Unix-seconds request timestamp.
pub const TIMESTAMP_HEADER: &str = "X-MW-TIMESTAMP";
/// Header carrying the client's remote address (may be empty).
pub const REMOTE_ADDR_HEADER: &str = "X-MW-REMOTE-ADDR";
/// Header carrying the computed signature.
pub const SIGNATURE_HEADER: &str = "X-MW-SIGNATURE";
/// Header carrying the uppercased method for verb-tunnelling deployments.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Build the three signature headers in sorted order.
#[must_use]
pub fn signature_headers(public_key: &str, timestamp: i64, remote_addr: &str) -> ParamMap {
    let mut headers = ParamMap::new();
    headers.insert(PUBLIC_KEY_HEADER, public_key);
    headers.insert(TIMESTAMP_HEADER, timestamp.to_string());
    headers.insert(REMOTE_ADDR_HEADER, remote_addr);
    sorted(&headers)
}

/// Assemble the signature base string for a request.
///
/// `url` must already be absolute; `query` is embedded into it for GET. The
/// body participates only when the method carries one, and body keys shadow
/// signature-header keys in the merge.
#[must_use]
pub fn signature_base(
    method: Method,
    url: &str,
    signature_headers: &ParamMap,
    body: &ParamMap,
    query: &ParamMap,
) -> String {
    let mut params = sorted(signature_headers);
    if method.carries_body() {
        for (key, value) in body.iter() {
            params.insert(key, value.clone());
        }
        params = sorted(&params);
    }

    let (api_url, separator) = if method == Method::Get && !query.is_empty() {
        (format!("{url}?{}", flat_query(query)), '&')
    } else if method == Method::Get {
        (url.to_owned(), '?')
    } else {
        (url.to_owned(), '&')
    };

    let base = format!(
        "{} {api_url}{separator}{}",
        method.as_str(),
        serialize(&params)
    );
    debug!(base = %base, "built signature base string");
    base
}

/// Sign a request: assemble the base string and compute its digest.
#[must_use]
pub fn sign(
    method: Method,
    url: &str,
    signature_headers: &ParamMap,
    body: &ParamMap,
    query: &ParamMap,
    private_key: &str,
) -> String {
    let base = signature_base(method, url, signature_headers, body, query);
    hmac_sha1_hex(private_key, &base)
}

/// Compute `hex(HMAC-SHA1(key, data))`, lowercase.
#[must_use]
pub fn hmac_sha1_hex(key: &str, data: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can accept any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_map<const N: usize>(entries: [(&str, &str); N]) -> ParamMap {
        entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()
    }

    #[test]
    fn test_should_match_rfc_2202_hmac_sha1_vector() {
        // RFC 2202 test case 2.
        assert_eq!(
            hmac_sha1_hex("Jefe", "what do ya want for nothing?"),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_should_sort_signature_headers() {
        let headers = signature_headers("pub", 1_700_000_000, "");
        let keys: Vec<&str> = headers.keys().collect();
        assert_eq!(
            keys,
            vec![PUBLIC_KEY_HEADER, REMOTE_ADDR_HEADER, TIMESTAMP_HEADER]
        );
    }

    #[test]
    fn test_should_use_question_mark_for_get_without_query() {
        let headers = signature_headers("pub", 1, "");
        let base = signature_base(
            Method::Get,
            "https://h/api/lists",
            &headers,
            &ParamMap::new(),
            &ParamMap::new(),
        );
        assert!(base.starts_with("GET https://h/api/lists?X-MW-PUBLIC-KEY=pub&"));
    }

    #[test]
    fn test_should_embed_flat_query_for_get() {
        let headers = signature_headers("pub", 1, "");
        let query = scalar_map([("page", "1"), ("per_page", "1")]);
        let base = signature_base(
            Method::Get,
            "https://h/api/lists",
            &headers,
            &ParamMap::new(),
            &query,
        );
        assert!(base.starts_with("GET https://h/api/lists?page=1&per_page=1&X-MW-PUBLIC-KEY=pub&"));
    }

    #[test]
    fn test_should_use_ampersand_for_non_get_without_query() {
        let headers = signature_headers("pub", 1, "");
        let base = signature_base(
            Method::Post,
            "https://h/api/lists",
            &headers,
            &ParamMap::new(),
            &ParamMap::new(),
        );
        assert!(base.starts_with("POST https://h/api/lists&X-MW-PUBLIC-KEY=pub&"));
    }

    #[test]
    fn test_should_fold_body_into_signature_for_body_methods_only() {
        let headers = signature_headers("pub", 1, "");
        let body = scalar_map([("name", "N")]);
        let query = ParamMap::new();

        let post = signature_base(Method::Post, "https://h/api", &headers, &body, &query);
        assert!(post.contains("name=N"));

        let delete = signature_base(Method::Delete, "https://h/api", &headers, &body, &query);
        assert!(!delete.contains("name=N"));
    }

    #[test]
    fn test_should_sort_merged_params_before_serializing() {
        let headers = signature_headers("pub", 1, "");
        // Byte order: 'X' (0x58) < 'a' (0x61), so the body key lands last.
        let body = scalar_map([("a", "1")]);
        let base = signature_base(Method::Post, "https://h/api", &headers, &body, &ParamMap::new());
        assert!(base.ends_with("&X-MW-TIMESTAMP=1&a=1"));
    }

    #[test]
    fn test_should_produce_identical_digests_for_identical_inputs() {
        let headers = signature_headers("pub", 1_700_000_000, "");
        let body = scalar_map([("name", "N")]);
        let query = ParamMap::new();
        let first = sign(Method::Post, "https://h/api", &headers, &body, &query, "sec");
        let second = sign(Method::Post, "https://h/api", &headers, &body, &query, "sec");
        assert_eq!(first, second);
    }
}
