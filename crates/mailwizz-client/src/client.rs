//! Signed HTTP dispatch.
//!
//! The client owns a `reqwest::Client` and a set of credentials. Each call
//! signs the request description in place, converts it into a real HTTP
//! request ([`build_http_request`], pure and unit-testable), and sends it.
//! No retries and no response interpretation happen here.

use std::time::Duration;

use mailwizz_auth::{authenticate, flat_query};
use mailwizz_model::{ApiRequest, Body, Credentials};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// A MailWizz API client: a `reqwest::Client` plus credentials.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    credentials: Credentials,
}

impl Client {
    /// Create a client for `credentials`.
    ///
    /// TLS validation is relaxed when `allow_unauthorized_certs` is set.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(credentials.allow_unauthorized_certs)
            .build()?;
        Ok(Self { http, credentials })
    }

    /// Create a client from a [`ClientConfig`], honoring its timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the underlying HTTP client cannot be
    /// built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let credentials = config.credentials();
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(credentials.allow_unauthorized_certs);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            http: builder.build()?,
            credentials,
        })
    }

    /// The credentials this client signs with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign and send a request, returning the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the credentials are incomplete or the
    /// transport fails. Cancellation is dropping the returned future.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<reqwest::Response, ClientError> {
        authenticate(&self.credentials, &mut request)?;
        debug!(method = %request.method, url = %request.url, "dispatching signed request");
        let http_request = build_http_request(&self.http, &request)?;
        Ok(self.http.execute(http_request).await?)
    }
}

/// Convert a signed request description into a `reqwest::Request`.
///
/// The query is appended as the flat wire-format string (the same encoding
/// the signature embedded for GET), headers are carried over with scalar
/// coercion, and an encoded body is sent verbatim.
pub fn build_http_request(
    http: &reqwest::Client,
    request: &ApiRequest,
) -> Result<reqwest::Request, ClientError> {
    let url = if request.query.is_empty() {
        request.url.clone()
    } else {
        format!("{}?{}", request.url, flat_query(&request.query))
    };

    let mut builder = http.request(request.method.into(), url);
    for (name, value) in request.headers.iter() {
        builder = builder.header(name, value.coerce_string());
    }
    if let Body::Encoded(payload) = &request.body {
        builder = builder.body(payload.clone());
    }
    Ok(builder.build()?)
}
