//! Authentication error types.

/// Errors raised while authenticating a request description.
///
/// Signing itself is total: once the credential check passes, every
/// well-formed request description signs successfully, so the only failure
/// mode is configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    /// A required credential field is empty or missing.
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}
