//! # Configuration
//!
//! Runtime configuration for the registry service. All fields default to the
//! canonical deployment values; a JSON document can override them.

use serde::Deserialize;

/// Runtime configuration for the registry service.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Schema version written into the aggregates at initialization.
    pub schema_version: String,

    /// Audit the per-entity invariants after every committed call and log
    /// violations at error level.
    pub strict_invariant_audit: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::SCHEMA_VERSION.to_string(),
            strict_invariant_audit: true,
        }
    }
}

impl RegistryConfig {
    /// Parses a configuration document from JSON. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error for malformed JSON.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }
}

// =============================================================================
// TESTS
// =============================================================================
