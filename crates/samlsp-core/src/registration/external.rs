//! External (remote) provider registrations.
//!
//! An external registration describes a peer provider this deployment
//! trusts: for a hosted service provider, the identity providers whose
//! assertions are acceptable; for a hosted identity provider, the
//! service providers allowed to request authentication.

use serde::{Deserialize, Serialize};

use crate::key::KeyData;

/// Immutable registration of a trusted external identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentityProviderRegistration {
    alias: String,
    entity_id: Option<String>,
    metadata: Option<String>,
    linktext: Option<String>,
    skip_ssl_validation: bool,
    metadata_trust_check: bool,
    verification_keys: Vec<KeyData>,
    name_id: Option<String>,
    assertion_consumer_service_index: usize,
    authentication_request_binding: Option<String>,
}

impl ExternalIdentityProviderRegistration {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ExternalIdentityProviderRegistrationBuilder {
        ExternalIdentityProviderRegistrationBuilder::default()
    }

    /// Creates a builder pre-populated from an existing registration.
    #[must_use]
    pub fn builder_from(registration: &Self) -> ExternalIdentityProviderRegistrationBuilder {
        ExternalIdentityProviderRegistrationBuilder {
            inner: registration.clone(),
        }
    }

    /// Short alias identifying this provider in endpoint paths.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Entity id of the identity provider, when known ahead of
    /// metadata resolution.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Metadata XML or metadata URL for the provider.
    #[must_use]
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Display name shown on provider-selection pages.
    #[must_use]
    pub fn linktext(&self) -> Option<&str> {
        self.linktext.as_deref()
    }

    /// Whether TLS certificate validation is skipped when fetching
    /// metadata.
    #[must_use]
    pub const fn skip_ssl_validation(&self) -> bool {
        self.skip_ssl_validation
    }

    /// Whether fetched metadata must carry a valid signature.
    #[must_use]
    pub const fn metadata_trust_check(&self) -> bool {
        self.metadata_trust_check
    }

    /// Keys used to verify this provider's signatures, in order.
    #[must_use]
    pub fn verification_keys(&self) -> &[KeyData] {
        &self.verification_keys
    }

    /// NameID format URI requested from this provider.
    #[must_use]
    pub fn name_id(&self) -> Option<&str> {
        self.name_id.as_deref()
    }

    /// Index of the assertion consumer service endpoint to request.
    #[must_use]
    pub const fn assertion_consumer_service_index(&self) -> usize {
        self.assertion_consumer_service_index
    }

    /// Binding URI used when sending authentication requests.
    #[must_use]
    pub fn authentication_request_binding(&self) -> Option<&str> {
        self.authentication_request_binding.as_deref()
    }
}

/// Builder for [`ExternalIdentityProviderRegistration`].
#[derive(Debug, Clone)]
pub struct ExternalIdentityProviderRegistrationBuilder {
    inner: ExternalIdentityProviderRegistration,
}

impl Default for ExternalIdentityProviderRegistrationBuilder {
    fn default() -> Self {
        Self {
            inner: ExternalIdentityProviderRegistration {
                alias: String::new(),
                entity_id: None,
                metadata: None,
                linktext: None,
                skip_ssl_validation: false,
                metadata_trust_check: false,
                verification_keys: Vec::new(),
                name_id: None,
                assertion_consumer_service_index: 0,
                authentication_request_binding: None,
            },
        }
    }
}

impl ExternalIdentityProviderRegistrationBuilder {
    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.alias = alias.into();
        self
    }

    /// Sets the entity id.
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.inner.entity_id = Some(entity_id.into());
        self
    }

    /// Sets the metadata XML or URL.
    #[must_use]
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.inner.metadata = Some(metadata.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn linktext(mut self, linktext: impl Into<String>) -> Self {
        self.inner.linktext = Some(linktext.into());
        self
    }

    /// Sets whether TLS validation is skipped for metadata fetches.
    #[must_use]
    pub const fn skip_ssl_validation(mut self, skip: bool) -> Self {
        self.inner.skip_ssl_validation = skip;
        self
    }

    /// Sets whether fetched metadata must be signature-checked.
    #[must_use]
    pub const fn metadata_trust_check(mut self, check: bool) -> Self {
        self.inner.metadata_trust_check = check;
        self
    }

    /// Replaces the verification key list.
    #[must_use]
    pub fn verification_keys(mut self, keys: Vec<KeyData>) -> Self {
        self.inner.verification_keys = keys;
        self
    }

    /// Appends a single verification key.
    #[must_use]
    pub fn verification_key(mut self, key: KeyData) -> Self {
        self.inner.verification_keys.push(key);
        self
    }

    /// Sets the requested NameID format URI.
    #[must_use]
    pub fn name_id(mut self, name_id: impl Into<String>) -> Self {
        self.inner.name_id = Some(name_id.into());
        self
    }

    /// Sets the assertion consumer service index.
    #[must_use]
    pub const fn assertion_consumer_service_index(mut self, index: usize) -> Self {
        self.inner.assertion_consumer_service_index = index;
        self
    }

    /// Sets the authentication request binding URI.
    #[must_use]
    pub fn authentication_request_binding(mut self, binding: impl Into<String>) -> Self {
        self.inner.authentication_request_binding = Some(binding.into());
        self
    }

    /// Finalizes the registration.
    #[must_use]
    pub fn build(self) -> ExternalIdentityProviderRegistration {
        self.inner
    }
}

/// Immutable registration of a trusted external service provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalServiceProviderRegistration {
    alias: String,
    entity_id: Option<String>,
    metadata: Option<String>,
    linktext: Option<String>,
    skip_ssl_validation: bool,
    verification_keys: Vec<KeyData>,
}

impl ExternalServiceProviderRegistration {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ExternalServiceProviderRegistrationBuilder {
        ExternalServiceProviderRegistrationBuilder::default()
    }

    /// Creates a builder pre-populated from an existing registration.
    #[must_use]
    pub fn builder_from(registration: &Self) -> ExternalServiceProviderRegistrationBuilder {
        ExternalServiceProviderRegistrationBuilder {
            inner: registration.clone(),
        }
    }

    /// Short alias identifying this provider.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Entity id of the service provider, when known.
    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Metadata XML or metadata URL for the provider.
    #[must_use]
    pub fn metadata(&self) -> Option<&str> {
        self.metadata.as_deref()
    }

    /// Display name.
    #[must_use]
    pub fn linktext(&self) -> Option<&str> {
        self.linktext.as_deref()
    }

    /// Whether TLS certificate validation is skipped when fetching
    /// metadata.
    #[must_use]
    pub const fn skip_ssl_validation(&self) -> bool {
        self.skip_ssl_validation
    }

    /// Keys used to verify this provider's signatures, in order.
    #[must_use]
    pub fn verification_keys(&self) -> &[KeyData] {
        &self.verification_keys
    }
}

/// Builder for [`ExternalServiceProviderRegistration`].
#[derive(Debug, Clone)]
pub struct ExternalServiceProviderRegistrationBuilder {
    inner: ExternalServiceProviderRegistration,
}

impl Default for ExternalServiceProviderRegistrationBuilder {
    fn default() -> Self {
        Self {
            inner: ExternalServiceProviderRegistration {
                alias: String::new(),
                entity_id: None,
                metadata: None,
                linktext: None,
                skip_ssl_validation: false,
                verification_keys: Vec::new(),
            },
        }
    }
}

impl ExternalServiceProviderRegistrationBuilder {
    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.inner.alias = alias.into();
        self
    }

    /// Sets the entity id.
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.inner.entity_id = Some(entity_id.into());
        self
    }

    /// Sets the metadata XML or URL.
    #[must_use]
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.inner.metadata = Some(metadata.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn linktext(mut self, linktext: impl Into<String>) -> Self {
        self.inner.linktext = Some(linktext.into());
        self
    }

    /// Sets whether TLS validation is skipped for metadata fetches.
    #[must_use]
    pub const fn skip_ssl_validation(mut self, skip: bool) -> Self {
        self.inner.skip_ssl_validation = skip;
        self
    }

    /// Replaces the verification key list.
    #[must_use]
    pub fn verification_keys(mut self, keys: Vec<KeyData>) -> Self {
        self.inner.verification_keys = keys;
        self
    }

    /// Appends a single verification key.
    #[must_use]
    pub fn verification_key(mut self, key: KeyData) -> Self {
        self.inner.verification_keys.push(key);
        self
    }

    /// Finalizes the registration.
    #[must_use]
    pub fn build(self) -> ExternalServiceProviderRegistration {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{KeyData, KeyType};

    #[test]
    fn idp_registration_defaults() {
        let idp = ExternalIdentityProviderRegistration::builder()
            .alias("simplesaml")
            .build();

        assert_eq!(idp.alias(), "simplesaml");
        assert!(!idp.skip_ssl_validation());
        assert!(!idp.metadata_trust_check());
        assert_eq!(idp.assertion_consumer_service_index(), 0);
        assert!(idp.verification_keys().is_empty());
        assert!(idp.name_id().is_none());
    }

    #[test]
    fn idp_registration_fields() {
        let idp = ExternalIdentityProviderRegistration::builder()
            .alias("okta")
            .entity_id("https://idp.okta.example.com")
            .linktext("Corporate Okta")
            .metadata("https://idp.okta.example.com/metadata")
            .metadata_trust_check(true)
            .verification_key(KeyData::verification("okta-cert", "MIIC..."))
            .name_id("urn:oasis:names:tc:SAML:2.0:nameid-format:persistent")
            .assertion_consumer_service_index(1)
            .build();

        assert_eq!(idp.entity_id(), Some("https://idp.okta.example.com"));
        assert_eq!(idp.linktext(), Some("Corporate Okta"));
        assert!(idp.metadata_trust_check());
        assert_eq!(idp.verification_keys().len(), 1);
        assert_eq!(idp.verification_keys()[0].key_type, KeyType::Verification);
        assert_eq!(idp.assertion_consumer_service_index(), 1);
    }

    #[test]
    fn idp_builder_from_copies_every_field() {
        let existing = ExternalIdentityProviderRegistration::builder()
            .alias("okta")
            .entity_id("https://idp.okta.example.com")
            .skip_ssl_validation(true)
            .authentication_request_binding("urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST")
            .build();

        let copy = ExternalIdentityProviderRegistration::builder_from(&existing).build();
        assert_eq!(copy, existing);
    }

    #[test]
    fn sp_builder_from_copies_every_field() {
        let existing = ExternalServiceProviderRegistration::builder()
            .alias("billing-app")
            .entity_id("https://billing.example.com")
            .linktext("Billing")
            .verification_key(KeyData::verification("billing-cert", "MIIC..."))
            .build();

        let copy = ExternalServiceProviderRegistration::builder_from(&existing).build();
        assert_eq!(copy, existing);
    }
}
