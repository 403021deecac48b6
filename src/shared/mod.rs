//! Identifier newtype and display helpers shared by the domain slices.

pub mod fmt;

use serde::{Deserialize, Serialize};

/// Upstream coin id (e.g. `"green-satoshi-token"`), serialized as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_bare_id() {
        let id = AssetId::from("green-satoshi-token");
        assert_eq!(serde_json::to_value(&id).unwrap(), "green-satoshi-token");
        let back: AssetId = serde_json::from_str("\"green-satoshi-token\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_path_segment() {
        let id = AssetId::from("stepn");
        assert_eq!(format!("coins/{id}"), "coins/stepn");
        assert_eq!(id.as_str(), "stepn");
    }
}
