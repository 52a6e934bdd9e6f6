//! Hosted registration resolution.
//!
//! The SAML processing pipeline resolves the hosted service provider
//! serving an inbound request, then reads trust parameters off the
//! returned snapshot. Resolution is synchronous; anything requiring
//! network I/O (remote metadata fetches) happens in external
//! collaborators before the snapshot is built.

use std::sync::Arc;

use tracing::debug;

use samlsp_core::registration::{HostedServiceProviderRegistration, ProviderRegistration};
use samlsp_core::{Saml2Error, Saml2Result};

/// Resolves the hosted service provider registration for a request.
pub trait ServiceProviderResolver: Send + Sync {
    /// Resolves a registration by its alias or entity id.
    fn resolve(&self, selector: &str) -> Saml2Result<Arc<HostedServiceProviderRegistration>>;
}

/// Resolver backed by the immutable registration snapshots produced at
/// binding time.
///
/// Registrations are shared, never copied per request; immutability
/// makes the shared snapshots safe across request-handling threads.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredServiceProviderResolver {
    registrations: Vec<Arc<HostedServiceProviderRegistration>>,
}

impl ConfiguredServiceProviderResolver {
    /// Creates a resolver over a single hosted registration.
    #[must_use]
    pub fn new(registration: HostedServiceProviderRegistration) -> Self {
        Self {
            registrations: vec![Arc::new(registration)],
        }
    }

    /// Creates a resolver over multiple hosted registrations.
    #[must_use]
    pub fn with_registrations(registrations: Vec<HostedServiceProviderRegistration>) -> Self {
        Self {
            registrations: registrations.into_iter().map(Arc::new).collect(),
        }
    }

    /// The registrations this resolver serves.
    #[must_use]
    pub fn registrations(&self) -> &[Arc<HostedServiceProviderRegistration>] {
        &self.registrations
    }
}

impl ServiceProviderResolver for ConfiguredServiceProviderResolver {
    fn resolve(&self, selector: &str) -> Saml2Result<Arc<HostedServiceProviderRegistration>> {
        let found = self.registrations.iter().find(|r| {
            r.alias() == Some(selector) || r.entity_id() == Some(selector)
        });
        match found {
            Some(registration) => {
                debug!(selector, "resolved hosted service provider");
                Ok(Arc::clone(registration))
            }
            None => Err(Saml2Error::UnknownProvider(selector.to_string())),
        }
    }
}

/// Returns the registration's entity id, or the use-time error for a
/// registration that was built without one.
pub fn require_entity_id<R: ProviderRegistration>(registration: &R) -> Saml2Result<&str> {
    registration.entity_id().ok_or_else(|| {
        Saml2Error::MissingEntityId(registration.alias().unwrap_or("<no alias>").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(alias: &str, entity_id: &str) -> HostedServiceProviderRegistration {
        HostedServiceProviderRegistration::builder()
            .alias(alias)
            .entity_id(entity_id)
            .build()
    }

    #[test]
    fn resolves_by_alias_and_entity_id() {
        let resolver = ConfiguredServiceProviderResolver::with_registrations(vec![
            registration("sample-sp", "https://sp.example.com"),
            registration("other-sp", "https://other.example.com"),
        ]);

        let by_alias = resolver.resolve("sample-sp").unwrap();
        assert_eq!(by_alias.entity_id(), Some("https://sp.example.com"));

        let by_entity_id = resolver.resolve("https://other.example.com").unwrap();
        assert_eq!(by_entity_id.alias(), Some("other-sp"));
    }

    #[test]
    fn unknown_selector_is_a_lookup_miss() {
        let resolver = ConfiguredServiceProviderResolver::new(registration(
            "sample-sp",
            "https://sp.example.com",
        ));

        let err = resolver.resolve("missing").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn resolved_registrations_are_shared_not_copied() {
        let resolver = ConfiguredServiceProviderResolver::new(registration(
            "sample-sp",
            "https://sp.example.com",
        ));

        let a = resolver.resolve("sample-sp").unwrap();
        let b = resolver.resolve("sample-sp").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_entity_id_surfaces_at_use_time() {
        let registration = HostedServiceProviderRegistration::builder()
            .alias("incomplete")
            .build();

        let err = require_entity_id(&registration).unwrap_err();
        assert_eq!(err.to_string(), "registration has no entity id: incomplete");

        let complete = HostedServiceProviderRegistration::builder()
            .entity_id("https://sp.example.com")
            .build();
        assert_eq!(require_entity_id(&complete).unwrap(), "https://sp.example.com");
    }

    #[test]
    fn binding_to_resolution_round_trip() {
        let config: samlsp_config::LocalServiceProviderConfiguration = serde_json::from_str(
            r#"{
                "entity-id": "https://sp.example.com",
                "alias": "sample-sp",
                "providers": [{"alias": "okta", "verification-keys": ["cert"]}]
            }"#,
        )
        .unwrap();

        let resolver = ConfiguredServiceProviderResolver::new(config.to_registration());
        let sp = resolver.resolve("sample-sp").unwrap();

        assert_eq!(require_entity_id(sp.as_ref()).unwrap(), "https://sp.example.com");
        assert!(sp.provider("okta").is_some());
    }
}
