//! Parameter values and the insertion-ordered parameter map.
//!
//! The MailWizz signing scheme is order-sensitive: serializing the same
//! key/value pairs in a different order produces a different signature. The
//! [`ParamMap`] therefore preserves insertion order instead of hashing, and
//! reordering only ever happens through the explicit key sort in the auth
//! crate.
//!
//! [`Value`] distinguishes [`Value::Absent`] from [`Value::Null`] because the
//! scheme treats them differently: absent entries are dropped before
//! serialization while null entries are kept and rendered literally (except
//! inside arrays, where both are filtered out).

use std::fmt;

/// A parameter value as it appears in a request description.
///
/// `Absent` models a key that exists but carries no value (the
/// platform-side `undefined`); it is always dropped before serialization.
/// `Null` is a real value that survives into the canonical string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A key with no value; dropped wherever parameters are filtered.
    Absent,
    /// An explicit null; rendered as the literal string `null`.
    Null,
    /// A boolean; rendered as `true`/`false`.
    Bool(bool),
    /// A number; rendered in its shortest decimal form.
    Number(serde_json::Number),
    /// A string; rendered as-is.
    String(String),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// A nested parameter object.
    Object(ParamMap),
}

impl Value {
    /// Returns `true` if this value is [`Value::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if this value is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this value is a scalar (not an array or object).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Returns the string if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested map if this is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&ParamMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Coerce this value to its string rendering.
    ///
    /// This reproduces the string coercion of the platform the remote
    /// verifier is written against: `null` renders as `null`, absent as
    /// `undefined`, arrays join their elements with commas (null/absent
    /// elements render empty inside the join), and objects render as the
    /// placeholder `[object Object]`. Scalar leaves in header positions are
    /// coerced through this instead of raising a type error.
    #[must_use]
    pub fn coerce_string(&self) -> String {
        match self {
            Self::Absent => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::String(s) => s.clone(),
            Self::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Self::Absent | Self::Null => String::new(),
                        other => other.coerce_string(),
                    })
                    .collect();
                parts.join(",")
            }
            Self::Object(_) => "[object Object]".to_owned(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coerce_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(serde_json::Number::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(serde_json::Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(serde_json::Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(serde_json::Number::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<ParamMap> for Value {
    fn from(map: ParamMap) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// An insertion-ordered `String -> Value` map.
///
/// Enumeration order is a semantic property of the signing scheme, so this
/// is Vec-backed rather than hash-based. [`ParamMap::insert`] replaces an
/// existing key in place (keeping its position); [`ParamMap::remove`]
/// preserves the order of the remaining entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamMap {
    entries: Vec<(String, Value)>,
}

impl ParamMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a key/value pair. An existing key is replaced in place and
    /// keeps its original position; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a key, returning its value. The order of the remaining
    /// entries is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over entries in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for ParamMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for ParamMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
