//! Hosted provider registrations.
//!
//! The two hosted variants share their common trust parameters through
//! a composed value struct rather than an inheritance hierarchy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithm::{NameIdFormat, digest_algorithms, signature_algorithms};
use crate::key::KeyData;

use super::ProviderRegistration;
use super::external::{ExternalIdentityProviderRegistration, ExternalServiceProviderRegistration};

/// Path prefix a hosted service provider's endpoints default to.
pub const DEFAULT_SP_PATH_PREFIX: &str = "/saml/sp";

/// Path prefix a hosted identity provider's endpoints default to.
pub const DEFAULT_IDP_PATH_PREFIX: &str = "/saml/idp";

/// Default NameID formats advertised when none are configured.
fn default_name_ids() -> Vec<String> {
    vec![
        NameIdFormat::Persistent.uri().to_string(),
        NameIdFormat::Email.uri().to_string(),
    ]
}

/// Trust parameters common to both hosted provider variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct HostedCommon {
    path_prefix: String,
    base_path: Option<String>,
    alias: Option<String>,
    entity_id: Option<String>,
    sign_metadata: bool,
    metadata: Option<String>,
    keys: Vec<KeyData>,
    default_signing_algorithm: String,
    default_digest: String,
    name_ids: Vec<String>,
    single_logout_enabled: bool,
}

macro_rules! delegate_provider_registration {
    ($ty:ty) => {
        impl ProviderRegistration for $ty {
            fn path_prefix(&self) -> &str {
                &self.common.path_prefix
            }

            fn base_path(&self) -> Option<&str> {
                self.common.base_path.as_deref()
            }

            fn alias(&self) -> Option<&str> {
                self.common.alias.as_deref()
            }

            fn entity_id(&self) -> Option<&str> {
                self.common.entity_id.as_deref()
            }

            fn sign_metadata(&self) -> bool {
                self.common.sign_metadata
            }

            fn metadata(&self) -> Option<&str> {
                self.common.metadata.as_deref()
            }

            fn keys(&self) -> &[KeyData] {
                &self.common.keys
            }

            fn default_signing_algorithm(&self) -> &str {
                &self.common.default_signing_algorithm
            }

            fn default_digest(&self) -> &str {
                &self.common.default_digest
            }

            fn name_ids(&self) -> &[String] {
                &self.common.name_ids
            }

            fn single_logout_enabled(&self) -> bool {
                self.common.single_logout_enabled
            }
        }
    };
}

/// Immutable registration of the service provider hosted by this
/// deployment.
///
/// Thread safe by construction discipline: built once, never mutated.
/// Any change produces a new instance via [`Self::builder_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedServiceProviderRegistration {
    #[serde(flatten)]
    common: HostedCommon,
    sign_requests: bool,
    want_assertions_signed: bool,
    providers: Vec<ExternalIdentityProviderRegistration>,
}

delegate_provider_registration!(HostedServiceProviderRegistration);

impl HostedServiceProviderRegistration {
    /// Creates a builder with all defaults applied.
    #[must_use]
    pub fn builder() -> HostedServiceProviderRegistrationBuilder {
        HostedServiceProviderRegistrationBuilder::new()
    }

    /// Creates a builder pre-populated with every field of an existing
    /// registration, for copy-with-changes workflows.
    #[must_use]
    pub fn builder_from(registration: &Self) -> HostedServiceProviderRegistrationBuilder {
        HostedServiceProviderRegistrationBuilder {
            common: registration.common.clone(),
            sign_requests: registration.sign_requests,
            want_assertions_signed: registration.want_assertions_signed,
            providers: registration.providers.clone(),
        }
    }

    /// Whether outbound authentication requests are signed.
    #[must_use]
    pub const fn sign_requests(&self) -> bool {
        self.sign_requests
    }

    /// Whether inbound assertions are required to be signed.
    #[must_use]
    pub const fn want_assertions_signed(&self) -> bool {
        self.want_assertions_signed
    }

    /// The external identity providers this service provider trusts.
    #[must_use]
    pub fn providers(&self) -> &[ExternalIdentityProviderRegistration] {
        &self.providers
    }

    /// Finds a trusted identity provider by its alias or entity id.
    #[must_use]
    pub fn provider(&self, alias_or_entity_id: &str) -> Option<&ExternalIdentityProviderRegistration> {
        self.providers.iter().find(|p| {
            p.alias() == alias_or_entity_id || p.entity_id() == Some(alias_or_entity_id)
        })
    }
}

/// Builder for [`HostedServiceProviderRegistration`].
///
/// Defaults are set at creation, so a field keeps its default exactly
/// when the corresponding method is never called. `build` performs no
/// validation; a registration missing its entity id fails when used.
#[derive(Debug, Clone)]
pub struct HostedServiceProviderRegistrationBuilder {
    common: HostedCommon,
    sign_requests: bool,
    want_assertions_signed: bool,
    providers: Vec<ExternalIdentityProviderRegistration>,
}

impl Default for HostedServiceProviderRegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HostedServiceProviderRegistrationBuilder {
    /// Creates a builder with the service-provider defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: HostedCommon {
                path_prefix: DEFAULT_SP_PATH_PREFIX.to_string(),
                base_path: None,
                alias: None,
                entity_id: None,
                sign_metadata: true,
                metadata: None,
                keys: Vec::new(),
                default_signing_algorithm: signature_algorithms::RSA_SHA256.to_string(),
                default_digest: digest_algorithms::SHA256.to_string(),
                name_ids: default_name_ids(),
                single_logout_enabled: true,
            },
            sign_requests: true,
            want_assertions_signed: true,
            providers: Vec::new(),
        }
    }

    /// Sets the endpoint path prefix.
    #[must_use]
    pub fn path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.common.path_prefix = path_prefix.into();
        self
    }

    /// Sets the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.common.base_path = Some(base_path.into());
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.common.alias = Some(alias.into());
        self
    }

    /// Sets the entity id.
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.common.entity_id = Some(entity_id.into());
        self
    }

    /// Sets whether published metadata is signed.
    #[must_use]
    pub const fn sign_metadata(mut self, sign_metadata: bool) -> Self {
        self.common.sign_metadata = sign_metadata;
        self
    }

    /// Sets pre-supplied metadata XML.
    #[must_use]
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.common.metadata = Some(metadata.into());
        self
    }

    /// Replaces the key list.
    #[must_use]
    pub fn keys(mut self, keys: Vec<KeyData>) -> Self {
        self.common.keys = keys;
        self
    }

    /// Appends a single key.
    #[must_use]
    pub fn key(mut self, key: KeyData) -> Self {
        self.common.keys.push(key);
        self
    }

    /// Sets the default signature algorithm URI.
    #[must_use]
    pub fn default_signing_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.common.default_signing_algorithm = algorithm.into();
        self
    }

    /// Sets the default digest algorithm URI.
    #[must_use]
    pub fn default_digest(mut self, digest: impl Into<String>) -> Self {
        self.common.default_digest = digest.into();
        self
    }

    /// Replaces the advertised NameID format list.
    #[must_use]
    pub fn name_ids(mut self, name_ids: Vec<String>) -> Self {
        self.common.name_ids = name_ids;
        self
    }

    /// Sets whether single logout is enabled.
    #[must_use]
    pub const fn single_logout_enabled(mut self, enabled: bool) -> Self {
        self.common.single_logout_enabled = enabled;
        self
    }

    /// Sets whether outbound authentication requests are signed.
    #[must_use]
    pub const fn sign_requests(mut self, sign_requests: bool) -> Self {
        self.sign_requests = sign_requests;
        self
    }

    /// Sets whether inbound assertions must be signed.
    #[must_use]
    pub const fn want_assertions_signed(mut self, want_assertions_signed: bool) -> Self {
        self.want_assertions_signed = want_assertions_signed;
        self
    }

    /// Replaces the trusted identity-provider list.
    #[must_use]
    pub fn providers(mut self, providers: Vec<ExternalIdentityProviderRegistration>) -> Self {
        self.providers = providers;
        self
    }

    /// Appends a single trusted identity provider.
    #[must_use]
    pub fn provider(mut self, provider: ExternalIdentityProviderRegistration) -> Self {
        self.providers.push(provider);
        self
    }

    /// Finalizes the registration.
    #[must_use]
    pub fn build(self) -> HostedServiceProviderRegistration {
        HostedServiceProviderRegistration {
            common: self.common,
            sign_requests: self.sign_requests,
            want_assertions_signed: self.want_assertions_signed,
            providers: self.providers,
        }
    }
}

/// Immutable registration of an identity provider hosted by this
/// deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedIdentityProviderRegistration {
    #[serde(flatten)]
    common: HostedCommon,
    want_requests_signed: bool,
    sign_assertions: bool,
    encrypt_assertions: bool,
    #[serde(with = "duration_secs")]
    not_on_or_after: Duration,
    #[serde(with = "duration_secs")]
    not_before: Duration,
    #[serde(with = "duration_secs")]
    session_not_on_or_after: Duration,
    providers: Vec<ExternalServiceProviderRegistration>,
}

delegate_provider_registration!(HostedIdentityProviderRegistration);

impl HostedIdentityProviderRegistration {
    /// Creates a builder with all defaults applied.
    #[must_use]
    pub fn builder() -> HostedIdentityProviderRegistrationBuilder {
        HostedIdentityProviderRegistrationBuilder::new()
    }

    /// Creates a builder pre-populated with every field of an existing
    /// registration.
    #[must_use]
    pub fn builder_from(registration: &Self) -> HostedIdentityProviderRegistrationBuilder {
        HostedIdentityProviderRegistrationBuilder {
            common: registration.common.clone(),
            want_requests_signed: registration.want_requests_signed,
            sign_assertions: registration.sign_assertions,
            encrypt_assertions: registration.encrypt_assertions,
            not_on_or_after: registration.not_on_or_after,
            not_before: registration.not_before,
            session_not_on_or_after: registration.session_not_on_or_after,
            providers: registration.providers.clone(),
        }
    }

    /// Whether inbound authentication requests must be signed.
    #[must_use]
    pub const fn want_requests_signed(&self) -> bool {
        self.want_requests_signed
    }

    /// Whether issued assertions are signed.
    #[must_use]
    pub const fn sign_assertions(&self) -> bool {
        self.sign_assertions
    }

    /// Whether issued assertions are encrypted.
    #[must_use]
    pub const fn encrypt_assertions(&self) -> bool {
        self.encrypt_assertions
    }

    /// Validity window end for issued assertions.
    #[must_use]
    pub const fn not_on_or_after(&self) -> Duration {
        self.not_on_or_after
    }

    /// Validity window start offset for issued assertions.
    #[must_use]
    pub const fn not_before(&self) -> Duration {
        self.not_before
    }

    /// Maximum session length stamped into issued assertions.
    #[must_use]
    pub const fn session_not_on_or_after(&self) -> Duration {
        self.session_not_on_or_after
    }

    /// The external service providers this identity provider trusts.
    #[must_use]
    pub fn providers(&self) -> &[ExternalServiceProviderRegistration] {
        &self.providers
    }
}

/// Builder for [`HostedIdentityProviderRegistration`].
#[derive(Debug, Clone)]
pub struct HostedIdentityProviderRegistrationBuilder {
    common: HostedCommon,
    want_requests_signed: bool,
    sign_assertions: bool,
    encrypt_assertions: bool,
    not_on_or_after: Duration,
    not_before: Duration,
    session_not_on_or_after: Duration,
    providers: Vec<ExternalServiceProviderRegistration>,
}

impl Default for HostedIdentityProviderRegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HostedIdentityProviderRegistrationBuilder {
    /// Creates a builder with the identity-provider defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: HostedCommon {
                path_prefix: DEFAULT_IDP_PATH_PREFIX.to_string(),
                base_path: None,
                alias: None,
                entity_id: None,
                sign_metadata: true,
                metadata: None,
                keys: Vec::new(),
                default_signing_algorithm: signature_algorithms::RSA_SHA256.to_string(),
                default_digest: digest_algorithms::SHA256.to_string(),
                name_ids: default_name_ids(),
                single_logout_enabled: true,
            },
            want_requests_signed: true,
            sign_assertions: true,
            encrypt_assertions: false,
            not_on_or_after: Duration::from_secs(120),
            not_before: Duration::ZERO,
            session_not_on_or_after: Duration::from_secs(30 * 60),
            providers: Vec::new(),
        }
    }

    /// Sets the endpoint path prefix.
    #[must_use]
    pub fn path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.common.path_prefix = path_prefix.into();
        self
    }

    /// Sets the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.common.base_path = Some(base_path.into());
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.common.alias = Some(alias.into());
        self
    }

    /// Sets the entity id.
    #[must_use]
    pub fn entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.common.entity_id = Some(entity_id.into());
        self
    }

    /// Sets whether published metadata is signed.
    #[must_use]
    pub const fn sign_metadata(mut self, sign_metadata: bool) -> Self {
        self.common.sign_metadata = sign_metadata;
        self
    }

    /// Sets pre-supplied metadata XML.
    #[must_use]
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.common.metadata = Some(metadata.into());
        self
    }

    /// Replaces the key list.
    #[must_use]
    pub fn keys(mut self, keys: Vec<KeyData>) -> Self {
        self.common.keys = keys;
        self
    }

    /// Appends a single key.
    #[must_use]
    pub fn key(mut self, key: KeyData) -> Self {
        self.common.keys.push(key);
        self
    }

    /// Sets the default signature algorithm URI.
    #[must_use]
    pub fn default_signing_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.common.default_signing_algorithm = algorithm.into();
        self
    }

    /// Sets the default digest algorithm URI.
    #[must_use]
    pub fn default_digest(mut self, digest: impl Into<String>) -> Self {
        self.common.default_digest = digest.into();
        self
    }

    /// Replaces the advertised NameID format list.
    #[must_use]
    pub fn name_ids(mut self, name_ids: Vec<String>) -> Self {
        self.common.name_ids = name_ids;
        self
    }

    /// Sets whether single logout is enabled.
    #[must_use]
    pub const fn single_logout_enabled(mut self, enabled: bool) -> Self {
        self.common.single_logout_enabled = enabled;
        self
    }

    /// Sets whether inbound authentication requests must be signed.
    #[must_use]
    pub const fn want_requests_signed(mut self, want_requests_signed: bool) -> Self {
        self.want_requests_signed = want_requests_signed;
        self
    }

    /// Sets whether issued assertions are signed.
    #[must_use]
    pub const fn sign_assertions(mut self, sign_assertions: bool) -> Self {
        self.sign_assertions = sign_assertions;
        self
    }

    /// Sets whether issued assertions are encrypted.
    #[must_use]
    pub const fn encrypt_assertions(mut self, encrypt_assertions: bool) -> Self {
        self.encrypt_assertions = encrypt_assertions;
        self
    }

    /// Sets the assertion validity window end.
    #[must_use]
    pub const fn not_on_or_after(mut self, duration: Duration) -> Self {
        self.not_on_or_after = duration;
        self
    }

    /// Sets the assertion validity window start offset.
    #[must_use]
    pub const fn not_before(mut self, duration: Duration) -> Self {
        self.not_before = duration;
        self
    }

    /// Sets the maximum session length.
    #[must_use]
    pub const fn session_not_on_or_after(mut self, duration: Duration) -> Self {
        self.session_not_on_or_after = duration;
        self
    }

    /// Replaces the trusted service-provider list.
    #[must_use]
    pub fn providers(mut self, providers: Vec<ExternalServiceProviderRegistration>) -> Self {
        self.providers = providers;
        self
    }

    /// Appends a single trusted service provider.
    #[must_use]
    pub fn provider(mut self, provider: ExternalServiceProviderRegistration) -> Self {
        self.providers.push(provider);
        self
    }

    /// Finalizes the registration.
    #[must_use]
    pub fn build(self) -> HostedIdentityProviderRegistration {
        HostedIdentityProviderRegistration {
            common: self.common,
            want_requests_signed: self.want_requests_signed,
            sign_assertions: self.sign_assertions,
            encrypt_assertions: self.encrypt_assertions,
            not_on_or_after: self.not_on_or_after,
            not_before: self.not_before,
            session_not_on_or_after: self.session_not_on_or_after,
            providers: self.providers,
        }
    }
}

/// Serde support for Duration as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::NameIdFormat;
    use crate::key::KeyType;

    #[test]
    fn sp_builder_defaults() {
        let sp = HostedServiceProviderRegistration::builder().build();

        assert_eq!(sp.path_prefix(), "/saml/sp");
        assert!(sp.sign_requests());
        assert!(sp.want_assertions_signed());
        assert!(sp.sign_metadata());
        assert!(sp.single_logout_enabled());
        assert_eq!(
            sp.name_ids(),
            [
                "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
                "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            ]
        );
        assert_eq!(
            sp.default_signing_algorithm(),
            "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256"
        );
        assert_eq!(sp.default_digest(), "http://www.w3.org/2001/04/xmlenc#sha256");
        assert!(sp.entity_id().is_none());
        assert!(sp.keys().is_empty());
    }

    #[test]
    fn sp_builder_sets_fields() {
        let idp = ExternalIdentityProviderRegistration::builder()
            .alias("simplesaml")
            .build();
        let sp = HostedServiceProviderRegistration::builder()
            .entity_id("https://sp.example.com")
            .alias("sample-sp")
            .base_path("https://sp.example.com/app")
            .sign_requests(false)
            .key(KeyData::signing("active-key", "priv", "cert"))
            .provider(idp)
            .build();

        assert_eq!(sp.entity_id(), Some("https://sp.example.com"));
        assert_eq!(sp.alias(), Some("sample-sp"));
        assert!(!sp.sign_requests());
        assert_eq!(sp.keys().len(), 1);
        assert_eq!(sp.keys()[0].key_type, KeyType::Signing);
        assert!(sp.provider("simplesaml").is_some());
        assert!(sp.provider("unknown").is_none());
    }

    #[test]
    fn sp_builder_from_copies_every_field() {
        let existing = HostedServiceProviderRegistration::builder()
            .entity_id("https://sp.example.com")
            .alias("sample-sp")
            .path_prefix("/sso/sp")
            .base_path("https://sp.example.com")
            .sign_metadata(false)
            .metadata("<EntityDescriptor/>")
            .keys(vec![KeyData::signing("k1", "priv", "cert")])
            .default_signing_algorithm("http://www.w3.org/2001/04/xmldsig-more#rsa-sha512")
            .default_digest("http://www.w3.org/2001/04/xmlenc#sha512")
            .name_ids(vec![NameIdFormat::Transient.uri().to_string()])
            .single_logout_enabled(false)
            .sign_requests(false)
            .want_assertions_signed(false)
            .providers(vec![
                ExternalIdentityProviderRegistration::builder()
                    .alias("okta")
                    .build(),
            ])
            .build();

        let copy = HostedServiceProviderRegistration::builder_from(&existing).build();
        assert_eq!(copy, existing);

        let changed = HostedServiceProviderRegistration::builder_from(&existing)
            .alias("renamed")
            .build();
        assert_ne!(changed, existing);
        assert_eq!(changed.entity_id(), existing.entity_id());
    }

    #[test]
    fn idp_builder_defaults() {
        let idp = HostedIdentityProviderRegistration::builder().build();

        assert_eq!(idp.path_prefix(), "/saml/idp");
        assert!(idp.want_requests_signed());
        assert!(idp.sign_assertions());
        assert!(!idp.encrypt_assertions());
        assert_eq!(idp.not_on_or_after(), Duration::from_secs(120));
        assert_eq!(idp.not_before(), Duration::ZERO);
        assert_eq!(idp.session_not_on_or_after(), Duration::from_secs(1800));
    }

    #[test]
    fn idp_builder_from_copies_every_field() {
        let existing = HostedIdentityProviderRegistration::builder()
            .entity_id("https://idp.example.com")
            .encrypt_assertions(true)
            .not_before(Duration::from_secs(5))
            .provider(
                ExternalServiceProviderRegistration::builder()
                    .alias("billing-app")
                    .build(),
            )
            .build();

        let copy = HostedIdentityProviderRegistration::builder_from(&existing).build();
        assert_eq!(copy, existing);
    }

    #[test]
    fn registrations_serialize() {
        let sp = HostedServiceProviderRegistration::builder()
            .entity_id("https://sp.example.com")
            .build();

        let json = serde_json::to_value(&sp).unwrap();
        assert_eq!(json["entity_id"], "https://sp.example.com");
        assert_eq!(json["path_prefix"], "/saml/sp");
        assert_eq!(json["sign_requests"], true);
    }
}
