//! # samlsp-config
//!
//! Mutable configuration surface for the SAML 2.0 service-provider
//! model, populated by an external binder (config file, environment)
//! and converted one-way into the immutable registration types of
//! [`samlsp_core`].
//!
//! - [`keys`] - Key representations and signing-key rotation
//! - [`provider`] - Local and remote provider configuration holders
//! - [`id`] - Pluggable identifier generation for converted keys
//!
//! The holders here are not thread safe; binding completes before any
//! request-serving thread touches the derived registrations, and
//! configuration instances are never shared with the immutable model.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod id;
pub mod keys;
pub mod provider;

pub use id::{KeyIdGenerator, UuidKeyIdGenerator};
pub use keys::{KeyRepresentation, RotatingKeys};
pub use provider::{
    LocalServiceProviderConfiguration, RemoteIdentityProviderConfiguration,
    RemoteProviderConfiguration,
};
