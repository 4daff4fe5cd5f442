//! API credentials for the MailWizz shared-secret HMAC scheme.

use std::fmt;

/// Credentials for one MailWizz deployment.
///
/// Supplied per call and never persisted by the signing subsystem. The
/// `Debug` implementation redacts the private key so credential values can
/// appear in trace output safely.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Credentials {
    /// Public API key, sent as the `X-MW-PUBLIC-KEY` header.
    pub public_key: String,
    /// Private API key, used only as the HMAC key. Never transmitted.
    pub private_key: String,
    /// Base URL of the API, e.g. `https://example.com/api`.
    pub base_url: String,
    /// Accept TLS certificates that fail validation.
    #[serde(default)]
    pub allow_unauthorized_certs: bool,
}

impl Credentials {
    /// Create credentials from key material and a base URL.
    #[must_use]
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_url: base_url.into(),
            allow_unauthorized_certs: false,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("allow_unauthorized_certs", &self.allow_unauthorized_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_redact_private_key_in_debug() {
        let credentials = Credentials::new("pub", "very-secret", "https://h/api");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("pub"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("very-secret"));
    }
}
