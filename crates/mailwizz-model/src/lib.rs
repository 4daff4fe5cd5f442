//! Request model types for the MailWizz API client.
//!
//! This crate defines the generic shapes the signing subsystem operates on:
//! a recursively structured parameter [`Value`], the insertion-ordered
//! [`ParamMap`], the [`ApiRequest`] description, and the [`Credentials`]
//! used to sign it. No signing or transport logic lives here.
//!
//! # Modules
//!
//! - [`credentials`] - API key material and base URL
//! - [`request`] - HTTP method, body and request description
//! - [`value`] - Parameter values and the ordered parameter map

pub mod credentials;
pub mod request;
pub mod value;

pub use credentials::Credentials;
pub use request::{ApiRequest, Body, Method, UnknownMethod};
pub use value::{ParamMap, Value};
