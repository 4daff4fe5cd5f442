//! Signed HTTP transport for the MailWizz API.
//!
//! A thin layer over `reqwest` that signs an
//! [`ApiRequest`](mailwizz_model::ApiRequest) with the shared-secret HMAC
//! scheme from [`mailwizz_auth`] and sends it. Retry policy, pagination and
//! response interpretation are the caller's business.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mailwizz_client::{Client, ClientConfig};
//! use mailwizz_model::{ApiRequest, Method};
//!
//! # async fn run() -> Result<(), mailwizz_client::ClientError> {
//! let client = Client::from_config(&ClientConfig::from_env())?;
//! let response = client
//!     .execute(ApiRequest::new(Method::Get, "/lists"))
//!     .await?;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The signing transport and the pure request build step
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Transport error types

pub mod client;
pub mod config;
pub mod error;

pub use client::{Client, build_http_request};
pub use config::ClientConfig;
pub use error::ClientError;
