//! Server and request identifiers.
//!
//! The server identifier is generated once during startup, before the
//! listener is bound, and shared read-only with every request. Request
//! identifiers are minted per request by the HTTP layer.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

/// Generate a random identifier in hyphenated UUID v4 form.
pub fn generate_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Generate a random identifier with the separators stripped (32 hex chars).
pub fn compact_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Identity of this process, fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ServerId(Arc<str>);

impl ServerId {
    /// Mint a fresh identity. Call once per process.
    pub fn generate() -> Self {
        Self(Arc::from(generate_id()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert_eq!(id.matches('-').count(), 4);
        assert_ne!(id, generate_id());
    }

    #[test]
    fn test_compact_id_has_no_separators() {
        let id = compact_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_server_id_clones_share_value() {
        let id = ServerId::generate();
        let other = id.clone();
        assert_eq!(id.as_str(), other.as_str());
        assert_eq!(id.to_string(), other.to_string());
    }

    #[test]
    fn test_server_id_serializes_as_string() {
        let id = ServerId::generate();
        let value = serde_json::to_value(&id).unwrap();
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
