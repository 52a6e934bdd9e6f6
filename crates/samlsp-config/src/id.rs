//! Identifier generation for configuration-derived keys.
//!
//! Keys converted from raw configuration strings need unique names in
//! the provider's keystore namespace. Generation is a pluggable
//! capability so tests can supply deterministic ids.

use uuid::Uuid;

/// Produces unique identifiers for configuration-derived keys.
pub trait KeyIdGenerator: Send + Sync {
    /// Returns a fresh identifier. Successive calls must not collide.
    fn generate(&self) -> String;
}

/// Default generator backed by random UUIDs.
///
/// Collision probability is negligible, so repeated bindings of the
/// same raw key never collide in the keystore namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidKeyIdGenerator;

impl KeyIdGenerator for UuidKeyIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_generator_is_unique_per_call() {
        let generator = UuidKeyIdGenerator;
        let a = generator.generate();
        let b = generator.generate();

        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
