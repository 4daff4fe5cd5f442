//! Canonical serialization and HMAC-SHA1 request signing for the MailWizz
//! API.
//!
//! MailWizz authenticates API calls with a shared-secret HMAC scheme: the
//! client must reproduce, byte-for-byte, a specific canonical serialization
//! of the request (headers, query and body) and sign it with HMAC-SHA1.
//! Any deviation in encoding, key order, flattening or separator choice
//! produces a signature the server rejects outright.
//!
//! # Usage
//!
//! ```rust
//! use mailwizz_auth::authenticate;
//! use mailwizz_model::{ApiRequest, Credentials, Method, ParamMap};
//!
//! let credentials = Credentials::new("public-key", "private-key", "https://example.com/api");
//! let mut query = ParamMap::new();
//! query.insert("page", 1);
//! let mut request = ApiRequest::new(Method::Get, "/lists").with_query(query);
//!
//! authenticate(&credentials, &mut request).unwrap();
//! assert!(request.headers.contains_key("X-MW-SIGNATURE"));
//! ```
//!
//! # Modules
//!
//! - [`authenticate`](mod@authenticate) - Request normalization and header injection
//! - [`canonical`] - Key sorting and the two parameter encoders
//! - [`error`] - Authentication error types
//! - [`sign`] - Signature base string assembly and HMAC-SHA1 digest

pub mod authenticate;
pub mod canonical;
pub mod error;
pub mod sign;

pub use authenticate::{authenticate, authenticate_at};
pub use canonical::{flat_query, serialize, sorted};
pub use error::AuthError;
pub use sign::{
    METHOD_OVERRIDE_HEADER, PUBLIC_KEY_HEADER, REMOTE_ADDR_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER, hmac_sha1_hex, sign, signature_base, signature_headers,
};
