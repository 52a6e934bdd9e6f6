//! # samlsp-core
//!
//! Core registration and key-material model for a hosted SAML 2.0
//! service provider.
//!
//! This crate defines the immutable trust configuration consumed by the
//! SAML request/response processing pipeline:
//!
//! - [`key`] - Typed key material (signing, encryption, verification)
//! - [`registration`] - Hosted and external provider registrations
//! - [`algorithm`] - Signature, digest, and NameID format URIs
//! - [`error`] - Error types for registration lookup and use
//!
//! Registrations are built once, never mutated, and shared freely
//! across request-handling threads. XML processing and cryptographic
//! verification live outside this crate; it hands those collaborators a
//! consistent snapshot of trust parameters.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod error;
pub mod key;
pub mod registration;

pub use error::{Saml2Error, Saml2Result};
pub use key::{KeyData, KeyType};
pub use registration::{
    ExternalIdentityProviderRegistration, ExternalServiceProviderRegistration,
    HostedIdentityProviderRegistration, HostedServiceProviderRegistration, ProviderRegistration,
};
