//! Provider registration model.
//!
//! A hosted provider registration is the immutable description of a
//! SAML 2.0 provider this deployment operates: its entity id, endpoint
//! namespace, key material, algorithm defaults, and the external peer
//! providers it trusts. Registrations are built once via a builder and
//! shared freely afterwards; deriving a changed copy goes through
//! `builder_from`.

mod external;
mod hosted;

pub use external::{
    ExternalIdentityProviderRegistration, ExternalIdentityProviderRegistrationBuilder,
    ExternalServiceProviderRegistration, ExternalServiceProviderRegistrationBuilder,
};
pub use hosted::{
    HostedIdentityProviderRegistration, HostedIdentityProviderRegistrationBuilder,
    HostedServiceProviderRegistration, HostedServiceProviderRegistrationBuilder,
};

use crate::key::KeyData;

/// Capability set shared by every hosted provider registration.
///
/// Both the hosted service-provider and hosted identity-provider
/// variants expose these trust parameters; each variant adds its own
/// role-specific fields on top.
pub trait ProviderRegistration {
    /// Path prefix namespacing this provider's endpoints.
    fn path_prefix(&self) -> &str;

    /// Base path (scheme, host and context path) the provider is
    /// reachable under.
    fn base_path(&self) -> Option<&str>;

    /// Short alias used in endpoint paths and lookups.
    fn alias(&self) -> Option<&str>;

    /// The provider's entity id. Required for the registration to be
    /// usable; absence surfaces at use time, not at construction.
    fn entity_id(&self) -> Option<&str>;

    /// Whether published metadata is signed.
    fn sign_metadata(&self) -> bool;

    /// Pre-supplied metadata XML, if any.
    fn metadata(&self) -> Option<&str>;

    /// Ordered key material for signing, decryption and verification.
    fn keys(&self) -> &[KeyData];

    /// Default signature algorithm URI for outbound signing.
    fn default_signing_algorithm(&self) -> &str;

    /// Default digest algorithm URI.
    fn default_digest(&self) -> &str;

    /// NameID format URIs this provider advertises, in preference
    /// order.
    fn name_ids(&self) -> &[String];

    /// Whether single logout endpoints are enabled.
    fn single_logout_enabled(&self) -> bool;
}
