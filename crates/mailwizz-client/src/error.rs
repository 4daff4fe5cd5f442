//! Transport error types.

use mailwizz_auth::AuthError;

/// Errors raised while building or sending a signed request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Authentication failed before any network work.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The underlying HTTP client failed to build or send the request.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
}
