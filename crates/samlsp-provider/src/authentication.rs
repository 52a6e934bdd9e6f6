//! The authentication result of a validated SAML exchange.
//!
//! Created exactly once per successful inbound assertion validation
//! and immutable afterwards; a failed validation never produces one.
//! The assertion and response payloads stay opaque here because their
//! structure belongs to the SAML-parsing collaborator.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// The capability set the security context expects of any
/// authentication, SAML or otherwise.
///
/// Downstream authorization logic works against this trait; consumers
/// that know they hold a SAML authentication reach the richer
/// [`Saml2Authentication`] surface.
pub trait Authentication: Send + Sync {
    /// Name of the authenticated principal.
    fn principal_name(&self) -> &str;

    /// Granted authority names.
    fn authorities(&self) -> &[String];

    /// Whether the token represents a successfully authenticated
    /// principal.
    fn is_authenticated(&self) -> bool;
}

/// An authentication carrying SAML information.
pub trait Saml2Authentication: Authentication {
    /// Entity id of the identity provider that issued the assertion.
    fn asserting_entity_id(&self) -> &str;

    /// Entity id of the service provider that received the assertion.
    fn holding_entity_id(&self) -> &str;

    /// The validated assertion, as produced by the parsing
    /// collaborator.
    fn assertion(&self) -> &(dyn Any + Send + Sync);

    /// The response object wrapping the assertion.
    fn saml_response(&self) -> &(dyn Any + Send + Sync);

    /// The RelayState parameter carried through the POST or redirect
    /// binding, if one was present.
    fn relay_state(&self) -> Option<&str>;
}

/// Immutable snapshot of a successfully validated SAML exchange.
#[derive(Clone)]
pub struct DefaultSaml2Authentication {
    asserting_entity_id: String,
    holding_entity_id: String,
    principal_name: String,
    authorities: Vec<String>,
    assertion: Arc<dyn Any + Send + Sync>,
    saml_response: Arc<dyn Any + Send + Sync>,
    relay_state: Option<String>,
}

impl DefaultSaml2Authentication {
    /// Creates the authentication for a validated exchange.
    ///
    /// The result is authenticated by construction: validation has
    /// already happened by the time this is called.
    #[must_use]
    pub fn new(
        asserting_entity_id: impl Into<String>,
        holding_entity_id: impl Into<String>,
        principal_name: impl Into<String>,
        assertion: Arc<dyn Any + Send + Sync>,
        saml_response: Arc<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            asserting_entity_id: asserting_entity_id.into(),
            holding_entity_id: holding_entity_id.into(),
            principal_name: principal_name.into(),
            authorities: Vec::new(),
            assertion,
            saml_response,
            relay_state: None,
        }
    }

    /// Sets the relay state carried through the binding.
    #[must_use]
    pub fn with_relay_state(mut self, relay_state: impl Into<String>) -> Self {
        self.relay_state = Some(relay_state.into());
        self
    }

    /// Sets the granted authorities.
    #[must_use]
    pub fn with_authorities(mut self, authorities: Vec<String>) -> Self {
        self.authorities = authorities;
        self
    }

    /// Downcasts the assertion payload to a concrete type.
    #[must_use]
    pub fn assertion_as<T: Any>(&self) -> Option<&T> {
        self.assertion.downcast_ref()
    }

    /// Downcasts the response payload to a concrete type.
    #[must_use]
    pub fn saml_response_as<T: Any>(&self) -> Option<&T> {
        self.saml_response.downcast_ref()
    }
}

impl Authentication for DefaultSaml2Authentication {
    fn principal_name(&self) -> &str {
        &self.principal_name
    }

    fn authorities(&self) -> &[String] {
        &self.authorities
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}

impl Saml2Authentication for DefaultSaml2Authentication {
    fn asserting_entity_id(&self) -> &str {
        &self.asserting_entity_id
    }

    fn holding_entity_id(&self) -> &str {
        &self.holding_entity_id
    }

    fn assertion(&self) -> &(dyn Any + Send + Sync) {
        self.assertion.as_ref()
    }

    fn saml_response(&self) -> &(dyn Any + Send + Sync) {
        self.saml_response.as_ref()
    }

    fn relay_state(&self) -> Option<&str> {
        self.relay_state.as_deref()
    }
}

impl fmt::Debug for DefaultSaml2Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultSaml2Authentication")
            .field("asserting_entity_id", &self.asserting_entity_id)
            .field("holding_entity_id", &self.holding_entity_id)
            .field("principal_name", &self.principal_name)
            .field("authorities", &self.authorities)
            .field("relay_state", &self.relay_state)
            .finish_non_exhaustive()
    }
}
