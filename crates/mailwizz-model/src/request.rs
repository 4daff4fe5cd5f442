//! Generic request descriptions consumed and produced by the authenticator.

use std::fmt;
use std::str::FromStr;

use crate::value::{ParamMap, Value};

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    /// HTTP GET.
    #[default]
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
    /// HTTP HEAD.
    Head,
    /// HTTP OPTIONS.
    Options,
}

impl Method {
    /// Uppercase rendering of the method, as used in the signature base
    /// string and the `X-HTTP-Method-Override` header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Returns `true` for the methods whose body participates in the
    /// signature and is transmitted as a form-encoded payload
    /// (POST, PUT and PATCH).
    #[must_use]
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else if s.eq_ignore_ascii_case("PUT") {
            Ok(Self::Put)
        } else if s.eq_ignore_ascii_case("PATCH") {
            Ok(Self::Patch)
        } else if s.eq_ignore_ascii_case("DELETE") {
            Ok(Self::Delete)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Ok(Self::Head)
        } else if s.eq_ignore_ascii_case("OPTIONS") {
            Ok(Self::Options)
        } else {
            Err(UnknownMethod(s.to_owned()))
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
            Method::Head => http::Method::HEAD,
            Method::Options => http::Method::OPTIONS,
        }
    }
}

/// Error returned when parsing an unrecognized HTTP method string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown HTTP method: {}", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

/// Body of an API request.
///
/// Callers construct [`Body::Empty`] or [`Body::Params`]; the authenticator
/// replaces a non-empty parameter body with its form-encoded
/// [`Body::Encoded`] rendering for transmission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Structured parameters, not yet encoded.
    Params(ParamMap),
    /// A `application/x-www-form-urlencoded` payload ready to send.
    Encoded(String),
}

impl Body {
    /// Returns `true` if there is no body content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Params(map) => map.is_empty(),
            Self::Encoded(s) => s.is_empty(),
        }
    }
}

/// A generic description of an outbound API request.
///
/// The authenticator mutates this in place: it resolves the URL, injects
/// the `X-MW-*` headers, relocates body parameters into their encoded form
/// and drops empty query/body sections. The transport then sends it
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, or a path to resolve against the credential base URL.
    pub url: String,
    /// Request headers. Scalar values are coerced to strings when sent.
    pub headers: ParamMap,
    /// Query parameters, appended to the URL by the transport.
    pub query: ParamMap,
    /// Request body.
    pub body: Body,
}

impl ApiRequest {
    /// Create a request for `method` and `url` with no headers, query or
    /// body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set a header, replacing any existing value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: ParamMap) -> Self {
        self.query = query;
        self
    }

    /// Set the body parameters.
    #[must_use]
    pub fn with_body(mut self, body: ParamMap) -> Self {
        self.body = Body::Params(body);
        self
    }
}
