//! # samlsp-provider
//!
//! Service-provider runtime surface over the registration model:
//!
//! - [`authentication`] - The authentication result produced after a
//!   SAML response passes validation
//! - [`resolver`] - Lookup of the hosted registration serving an
//!   inbound request
//!
//! The SAML processing pipeline itself (XML parsing, signature
//! verification, decryption) is an external collaborator. This crate
//! gives it a consistent immutable registration per request and
//! receives back the validated payloads it wraps into an
//! authentication.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authentication;
pub mod resolver;

pub use authentication::{Authentication, DefaultSaml2Authentication, Saml2Authentication};
pub use resolver::{ConfiguredServiceProviderResolver, ServiceProviderResolver};
