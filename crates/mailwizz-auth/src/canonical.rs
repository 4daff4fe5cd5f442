//! Canonical parameter serialization for MailWizz request signing.
//!
//! The remote verifier reconstructs the signed parameter string with PHP's
//! `http_build_query`, so this module reproduces that serialization
//! byte-for-byte: nested mappings flatten to `key[subkey][index]=value`
//! pairs joined with `&`, and three character substitutions are applied to
//! the joined string as a whole:
//!
//! ```text
//! %20 -> +      (spaces use the form-encoding convention)
//! !   -> %21
//! '   -> %27
//! ```
//!
//! The substitutions run once, globally, after all pairs are joined. Running
//! them per pair instead happens to produce the same bytes today, but the
//! contract is the global pass and it must stay that way.
//!
//! A second, deliberately different encoder lives here too: [`flat_query`]
//! builds the flat `key=value&...` string that goes on the wire as a real
//! query string (and into the signed URL for GET). The two encoders are
//! inconsistent with each other by design; the server expects exactly this
//! mismatch, so they must not be unified.

use mailwizz_model::{ParamMap, Value};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped by standard URI component encoding.
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded,
/// matching the component encoder of the platform the verifier is written
/// against. `!` and `'` survive this set and are rewritten by the global
/// substitution pass instead.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a single key or value token.
fn encode_component(token: &str) -> String {
    utf8_percent_encode(token, COMPONENT_ENCODE_SET).to_string()
}

/// Encode one `key=value` pair.
fn encode_pair(key: &str, value: &str) -> String {
    format!("{}={}", encode_component(key), encode_component(value))
}

/// Return a new map whose enumeration order is ascending lexicographic
/// (byte) order of keys, one level deep.
///
/// Nested values are carried over untouched; the scheme sorts only the keys
/// that directly participate in the signature, never recursively.
#[must_use]
pub fn sorted(map: &ParamMap) -> ParamMap {
    let mut entries: Vec<(&str, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.clone()))
        .collect()
}

/// Serialize a parameter map into its canonical `http_build_query` form.
///
/// Keys are walked in the map's enumeration order; serialization is
/// order-dependent and only the upstream [`sorted`] pass makes signing
/// deterministic. Absent values are skipped, null leaves render as the
/// literal `null`, and array entries that are null or absent are dropped.
///
/// # Examples
///
/// ```
/// use mailwizz_auth::canonical::serialize;
/// use mailwizz_model::{ParamMap, Value};
///
/// let mut inner = ParamMap::new();
/// inner.insert("name", "N");
/// let mut map = ParamMap::new();
/// map.insert("list", Value::Object(inner));
/// assert_eq!(serialize(&map), "list%5Bname%5D=N");
/// ```
#[must_use]
pub fn serialize(map: &ParamMap) -> String {
    let mut segments = Vec::new();
    collect_segments(map, "", &mut segments);
    apply_substitutions(&segments.join("&"))
}

/// Recursively flatten `map` into encoded `key=value` segments.
fn collect_segments(map: &ParamMap, prefix: &str, segments: &mut Vec<String>) {
    for (key, value) in map.iter() {
        if value.is_absent() {
            continue;
        }
        let param_key = if prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{prefix}[{key}]")
        };
        match value {
            Value::Object(inner) => collect_segments(inner, &param_key, segments),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::Absent | Value::Null => {}
                        Value::Object(inner) => {
                            collect_segments(inner, &format!("{param_key}[{index}]"), segments);
                        }
                        scalar => {
                            segments.push(encode_pair(
                                &format!("{param_key}[{index}]"),
                                &scalar.coerce_string(),
                            ));
                        }
                    }
                }
            }
            scalar => segments.push(encode_pair(&param_key, &scalar.coerce_string())),
        }
    }
}

/// The global character substitution pass, applied to the joined string.
fn apply_substitutions(joined: &str) -> String {
    joined
        .replace("%20", "+")
        .replace('!', "%21")
        .replace('\'', "%27")
}

/// Build the flat query string used on the wire (and embedded in the signed
/// URL for GET requests).
///
/// Pairs are joined as `key=value&...` with no bracket nesting; array
/// values repeat under the same key, with null and absent entries skipped.
/// This encoder does not run the global substitution pass of [`serialize`];
/// the two must stay distinct.
#[must_use]
pub fn flat_query(map: &ParamMap) -> String {
    let mut pairs = Vec::new();
    for (key, value) in map.iter() {
        match value {
            Value::Absent => {}
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Absent | Value::Null => {}
                        other => pairs.push(encode_pair(key, &other.coerce_string())),
                    }
                }
            }
            other => pairs.push(encode_pair(key, &other.coerce_string())),
        }
    }
    pairs.join("&")
}
