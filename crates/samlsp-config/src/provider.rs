//! Provider configuration holders.
//!
//! These are the mutable structs an external binder populates from
//! flat configuration. Each exposes a one-way conversion into the
//! immutable registration model; configuration instances are discarded
//! after binding and never shared with the registrations they produce.

use serde::{Deserialize, Serialize};
use tracing::debug;

use samlsp_core::registration::{
    ExternalIdentityProviderRegistration, HostedServiceProviderRegistration,
};
use samlsp_core::{KeyData, KeyType};

use crate::id::{KeyIdGenerator, UuidKeyIdGenerator};
use crate::keys::RotatingKeys;

/// Prefix for the generated names of configuration-derived keys.
pub const CONFIG_KEY_PREFIX: &str = "from-config-";

/// Fields common to every remote provider configuration.
///
/// Composed into the concrete remote configurations rather than
/// inherited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RemoteProviderConfiguration {
    /// Short alias for the provider.
    pub alias: Option<String>,

    /// Display name shown on provider-selection pages.
    pub linktext: Option<String>,

    /// Whether TLS certificate validation is skipped when fetching the
    /// provider's metadata.
    pub skip_ssl_validation: bool,

    /// Raw verification key strings (PEM certificates), in order.
    pub verification_keys: Vec<String>,
}

impl RemoteProviderConfiguration {
    /// Converts the raw verification key strings into typed key
    /// material, one signing-typed key per entry, input order
    /// preserved.
    ///
    /// Identifiers are generated independently on every call, so two
    /// conversions of the same configuration yield semantically equal
    /// but identity-distinct key lists. An absent list yields an empty
    /// result, never an error.
    #[must_use]
    pub fn verification_key_data(&self) -> Vec<KeyData> {
        self.verification_key_data_with(&UuidKeyIdGenerator)
    }

    /// Converts verification keys using the supplied identifier
    /// generator.
    #[must_use]
    pub fn verification_key_data_with(&self, ids: &dyn KeyIdGenerator) -> Vec<KeyData> {
        self.verification_keys
            .iter()
            .map(|raw| {
                KeyData::new(
                    format!("{CONFIG_KEY_PREFIX}{}", ids.generate()),
                    None,
                    Some(raw.clone()),
                    None,
                    KeyType::Signing,
                )
            })
            .collect()
    }
}

/// Configuration for a remote identity provider trusted by the hosted
/// service provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RemoteIdentityProviderConfiguration {
    /// Common remote-provider fields.
    #[serde(flatten)]
    pub provider: RemoteProviderConfiguration,

    /// Metadata XML or metadata URL for the provider.
    pub metadata: Option<String>,

    /// NameID format URI to request from this provider.
    pub name_id: Option<String>,

    /// Index of the assertion consumer service endpoint to request.
    pub assertion_consumer_service_index: usize,

    /// Whether fetched metadata must carry a valid signature.
    pub metadata_trust_check: bool,

    /// Binding URI used when sending authentication requests.
    pub authentication_request_binding: Option<String>,
}

impl RemoteIdentityProviderConfiguration {
    /// Converts into an immutable external registration.
    #[must_use]
    pub fn to_registration(&self) -> ExternalIdentityProviderRegistration {
        self.to_registration_with(&UuidKeyIdGenerator)
    }

    /// Converts into an immutable external registration using the
    /// supplied identifier generator for the verification keys.
    #[must_use]
    pub fn to_registration_with(
        &self,
        ids: &dyn KeyIdGenerator,
    ) -> ExternalIdentityProviderRegistration {
        let verification_keys = self.provider.verification_key_data_with(ids);
        debug!(
            alias = self.provider.alias.as_deref().unwrap_or_default(),
            keys = verification_keys.len(),
            "converting remote identity provider configuration"
        );

        let mut builder = ExternalIdentityProviderRegistration::builder()
            .alias(self.provider.alias.clone().unwrap_or_default())
            .skip_ssl_validation(self.provider.skip_ssl_validation)
            .metadata_trust_check(self.metadata_trust_check)
            .assertion_consumer_service_index(self.assertion_consumer_service_index)
            .verification_keys(verification_keys);
        if let Some(linktext) = &self.provider.linktext {
            builder = builder.linktext(linktext.clone());
        }
        if let Some(metadata) = &self.metadata {
            builder = builder.metadata(metadata.clone());
        }
        if let Some(name_id) = &self.name_id {
            builder = builder.name_id(name_id.clone());
        }
        if let Some(binding) = &self.authentication_request_binding {
            builder = builder.authentication_request_binding(binding.clone());
        }
        builder.build()
    }
}

/// Configuration for the service provider hosted by this deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LocalServiceProviderConfiguration {
    /// The hosted provider's entity id.
    pub entity_id: Option<String>,

    /// Short alias used in endpoint paths.
    pub alias: Option<String>,

    /// Base path the provider is reachable under.
    pub base_path: Option<String>,

    /// Path prefix namespacing the provider's endpoints.
    pub path_prefix: String,

    /// Whether published metadata is signed.
    pub sign_metadata: bool,

    /// Whether outbound authentication requests are signed.
    pub sign_requests: bool,

    /// Whether inbound assertions must be signed.
    pub want_assertions_signed: bool,

    /// Whether single logout is enabled.
    pub single_logout_enabled: bool,

    /// NameID format URIs to advertise; empty keeps the model default.
    pub name_ids: Vec<String>,

    /// Default signature algorithm URI; absent keeps the model default.
    pub default_signing_algorithm: Option<String>,

    /// Default digest algorithm URI; absent keeps the model default.
    pub default_digest: Option<String>,

    /// The signing-key rotation set.
    pub keys: RotatingKeys,

    /// Remote identity providers to trust.
    pub providers: Vec<RemoteIdentityProviderConfiguration>,
}

impl Default for LocalServiceProviderConfiguration {
    fn default() -> Self {
        Self {
            entity_id: None,
            alias: None,
            base_path: None,
            path_prefix: "/saml/sp".to_string(),
            sign_metadata: true,
            sign_requests: true,
            want_assertions_signed: true,
            single_logout_enabled: true,
            name_ids: Vec::new(),
            default_signing_algorithm: None,
            default_digest: None,
            keys: RotatingKeys::default(),
            providers: Vec::new(),
        }
    }
}

impl LocalServiceProviderConfiguration {
    /// Converts into an immutable hosted registration, flattening the
    /// rotation set and converting every trusted provider.
    #[must_use]
    pub fn to_registration(&self) -> HostedServiceProviderRegistration {
        self.to_registration_with(&UuidKeyIdGenerator)
    }

    /// Converts into an immutable hosted registration using the
    /// supplied identifier generator.
    #[must_use]
    pub fn to_registration_with(
        &self,
        ids: &dyn KeyIdGenerator,
    ) -> HostedServiceProviderRegistration {
        debug!(
            entity_id = self.entity_id.as_deref().unwrap_or_default(),
            providers = self.providers.len(),
            "converting local service provider configuration"
        );

        let mut builder = HostedServiceProviderRegistration::builder()
            .path_prefix(self.path_prefix.clone())
            .sign_metadata(self.sign_metadata)
            .sign_requests(self.sign_requests)
            .want_assertions_signed(self.want_assertions_signed)
            .single_logout_enabled(self.single_logout_enabled)
            .keys(self.keys.to_list())
            .providers(
                self.providers
                    .iter()
                    .map(|p| p.to_registration_with(ids))
                    .collect(),
            );
        if let Some(entity_id) = &self.entity_id {
            builder = builder.entity_id(entity_id.clone());
        }
        if let Some(alias) = &self.alias {
            builder = builder.alias(alias.clone());
        }
        if let Some(base_path) = &self.base_path {
            builder = builder.base_path(base_path.clone());
        }
        if !self.name_ids.is_empty() {
            builder = builder.name_ids(self.name_ids.clone());
        }
        if let Some(algorithm) = &self.default_signing_algorithm {
            builder = builder.default_signing_algorithm(algorithm.clone());
        }
        if let Some(digest) = &self.default_digest {
            builder = builder.default_digest(digest.clone());
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::keys::KeyRepresentation;
    use samlsp_core::registration::ProviderRegistration;

    /// Deterministic generator for tests: "id-0", "id-1", ...
    struct CountingIdGenerator(AtomicUsize);

    impl KeyIdGenerator for CountingIdGenerator {
        fn generate(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::Relaxed))
        }
    }

    #[test]
    fn verification_keys_convert_one_to_one_in_order() {
        let config = RemoteProviderConfiguration {
            verification_keys: vec!["cert-a".to_string(), "cert-b".to_string(), "cert-c".to_string()],
            ..Default::default()
        };

        let keys = config.verification_key_data();
        assert_eq!(keys.len(), 3);
        let certs: Vec<&str> = keys.iter().filter_map(|k| k.certificate.as_deref()).collect();
        assert_eq!(certs, ["cert-a", "cert-b", "cert-c"]);
        for key in &keys {
            assert_eq!(key.key_type, KeyType::Signing);
            assert!(key.name.starts_with("from-config-"));
            assert!(key.private_key.is_none());
        }
    }

    #[test]
    fn generated_identifiers_are_distinct() {
        let config = RemoteProviderConfiguration {
            verification_keys: vec!["same".to_string(), "same".to_string()],
            ..Default::default()
        };

        let keys = config.verification_key_data();
        assert_ne!(keys[0].name, keys[1].name);
    }

    #[test]
    fn conversion_is_not_cached_across_calls() {
        let config = RemoteProviderConfiguration {
            verification_keys: vec!["cert".to_string()],
            ..Default::default()
        };

        let first = config.verification_key_data();
        let second = config.verification_key_data();
        assert_eq!(first[0].certificate, second[0].certificate);
        assert_ne!(first[0].name, second[0].name);
    }

    #[test]
    fn empty_verification_keys_yield_empty_list() {
        let config = RemoteProviderConfiguration::default();
        assert!(config.verification_key_data().is_empty());
    }

    #[test]
    fn injected_generator_yields_reproducible_ids() {
        let config = RemoteProviderConfiguration {
            verification_keys: vec!["cert-a".to_string(), "cert-b".to_string()],
            ..Default::default()
        };

        let keys = config.verification_key_data_with(&CountingIdGenerator(AtomicUsize::new(0)));
        assert_eq!(keys[0].name, "from-config-id-0");
        assert_eq!(keys[1].name, "from-config-id-1");
    }

    #[test]
    fn remote_idp_converts_to_registration() {
        let config = RemoteIdentityProviderConfiguration {
            provider: RemoteProviderConfiguration {
                alias: Some("okta".to_string()),
                linktext: Some("Corporate Okta".to_string()),
                skip_ssl_validation: true,
                verification_keys: vec!["cert".to_string()],
            },
            metadata: Some("https://idp.okta.example.com/metadata".to_string()),
            name_id: Some("urn:oasis:names:tc:SAML:2.0:nameid-format:persistent".to_string()),
            assertion_consumer_service_index: 2,
            metadata_trust_check: true,
            authentication_request_binding: None,
        };

        let registration = config.to_registration();
        assert_eq!(registration.alias(), "okta");
        assert_eq!(registration.linktext(), Some("Corporate Okta"));
        assert!(registration.skip_ssl_validation());
        assert!(registration.metadata_trust_check());
        assert_eq!(registration.assertion_consumer_service_index(), 2);
        assert_eq!(registration.verification_keys().len(), 1);
        assert!(registration.authentication_request_binding().is_none());
    }

    #[test]
    fn local_sp_converts_with_keys_and_providers() {
        let mut keys = RotatingKeys::default();
        keys.set_active(KeyRepresentation {
            name: String::new(),
            private_key: Some("priv".to_string()),
            certificate: Some("cert".to_string()),
            passphrase: None,
        });

        let config = LocalServiceProviderConfiguration {
            entity_id: Some("https://sp.example.com".to_string()),
            alias: Some("sample-sp".to_string()),
            keys,
            providers: vec![RemoteIdentityProviderConfiguration {
                provider: RemoteProviderConfiguration {
                    alias: Some("okta".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        };

        let registration = config.to_registration();
        assert_eq!(registration.entity_id(), Some("https://sp.example.com"));
        assert_eq!(registration.alias(), Some("sample-sp"));
        // Rotation flattening carries through: active pair first.
        let names: Vec<&str> = registration.keys().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, ["active-key", "active-key-encrypt"]);
        assert_eq!(registration.providers().len(), 1);
        assert_eq!(registration.providers()[0].alias(), "okta");
    }

    #[test]
    fn local_sp_defaults_survive_conversion() {
        let registration = LocalServiceProviderConfiguration::default().to_registration();

        assert_eq!(registration.path_prefix(), "/saml/sp");
        assert!(registration.sign_requests());
        assert!(registration.want_assertions_signed());
        assert_eq!(registration.name_ids().len(), 2);
        assert!(registration.keys().is_empty());
    }

    #[test]
    fn kebab_case_binding() {
        let config: LocalServiceProviderConfiguration = serde_json::from_str(
            r#"{
                "entity-id": "https://sp.example.com",
                "sign-requests": false,
                "providers": [
                    {"alias": "okta", "verification-keys": ["cert"], "metadata-trust-check": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.entity_id.as_deref(), Some("https://sp.example.com"));
        assert!(!config.sign_requests);
        assert!(config.want_assertions_signed);
        assert_eq!(config.providers[0].provider.alias.as_deref(), Some("okta"));
        assert!(config.providers[0].metadata_trust_check);
    }
}
