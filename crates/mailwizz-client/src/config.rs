//! Client configuration.
//!
//! Configuration is environment-driven; every field can also be set
//! programmatically or embedded in a larger application config via serde.

use mailwizz_model::Credentials;

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Public API key.
    pub public_key: String,
    /// Private API key.
    pub private_key: String,
    /// Base URL of the API, e.g. `https://example.com/api`.
    pub base_url: String,
    /// Accept TLS certificates that fail validation.
    pub allow_unauthorized_certs: bool,
    /// Request timeout in seconds; `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            private_key: String::new(),
            base_url: String::new(),
            allow_unauthorized_certs: false,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `MAILWIZZ_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("MAILWIZZ_PUBLIC_KEY") {
            config.public_key = v;
        }
        if let Ok(v) = std::env::var("MAILWIZZ_PRIVATE_KEY") {
            config.private_key = v;
        }
        if let Ok(v) = std::env::var("MAILWIZZ_BASE_URL") {
            config.base_url = v;
        }
        if let Ok(v) = std::env::var("MAILWIZZ_ALLOW_UNAUTHORIZED_CERTS") {
            config.allow_unauthorized_certs = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Ok(v) = std::env::var("MAILWIZZ_TIMEOUT_SECS")
            && let Ok(secs) = v.parse()
        {
            config.timeout_secs = secs;
        }

        config
    }

    /// Build the credentials described by this configuration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            base_url: self.base_url.clone(),
            allow_unauthorized_certs: self.allow_unauthorized_certs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert!(config.public_key.is_empty());
        assert!(!config.allow_unauthorized_certs);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_should_map_config_to_credentials() {
        let config = ClientConfig {
            public_key: "pub".to_owned(),
            private_key: "sec".to_owned(),
            base_url: "https://h/api".to_owned(),
            allow_unauthorized_certs: true,
            timeout_secs: 10,
        };
        let credentials = config.credentials();
        assert_eq!(credentials.public_key, "pub");
        assert_eq!(credentials.private_key, "sec");
        assert_eq!(credentials.base_url, "https://h/api");
        assert!(credentials.allow_unauthorized_certs);
    }
}
