//! Error types for registration lookup and use.
//!
//! The registration model itself is permissive: conversions coalesce
//! absent lists to empty and construction never fails. Errors surface
//! at use time, when a consumer asks for a provider or key that the
//! configured snapshot cannot supply.

use thiserror::Error;

/// Result type for SAML service-provider operations.
pub type Saml2Result<T> = Result<T, Saml2Error>;

/// Errors raised when a registration snapshot is put to use.
#[derive(Debug, Error)]
pub enum Saml2Error {
    /// No hosted or external provider matches the given selector.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// A registration was used that never received an entity id.
    #[error("registration has no entity id: {0}")]
    MissingEntityId(String),

    /// No key of the requested type is present in the registration.
    #[error("no {0} key available")]
    KeyNotFound(String),

    /// Invalid or inconsistent configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Saml2Error {
    /// Returns true if the error indicates a lookup miss rather than
    /// broken configuration.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownProvider(_) | Self::KeyNotFound(_))
    }
}
