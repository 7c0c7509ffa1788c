//! JSON Web Key (RFC 7517) representation of generated keys.

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// A JSON Web Key.
///
/// Covers the two key types produced here: `EC` keys carry `crv`, `x`, `y`
/// and optionally `d`; `oct` keys carry `k`. Absent members are omitted
/// when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, `EC` or `oct`.
    pub kty: String,
    /// Curve name for EC keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// Base64url x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Base64url y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Base64url private scalar; present only on private EC keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// Base64url symmetric key value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// Intended use, always `sig` here.
    #[serde(rename = "use")]
    pub key_use: String,
    /// Algorithm the key is meant for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Key identifier.
    pub kid: String,
}

impl Jwk {
    /// Returns true if the key carries private material.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.d.is_some() || self.k.is_some()
    }

    /// Returns a copy with private members removed.
    #[must_use]
    pub fn to_public(&self) -> Self {
        Self {
            d: None,
            k: None,
            ..self.clone()
        }
    }

    /// Serializes the key as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Export` if serialization fails.
    pub fn to_json(&self) -> Result<String, KeyError> {
        serde_json::to_string_pretty(self).map_err(|e| KeyError::Export {
            format: "JWK",
            reason: e.to_string(),
        })
    }
}

/// Returns a fresh random key identifier.
#[must_use]
pub fn random_kid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ec_key() -> Jwk {
        Jwk {
            kty: "EC".into(),
            crv: Some("P-256".into()),
            x: Some("xx".into()),
            y: Some("yy".into()),
            d: Some("dd".into()),
            k: None,
            key_use: "sig".into(),
            alg: Some("ES256".into()),
            kid: "test-key".into(),
        }
    }

    #[test]
    fn omits_absent_members() {
        let json = ec_key().to_public().to_json().unwrap();

        assert!(json.contains("\"use\": \"sig\""));
        assert!(json.contains("\"crv\": \"P-256\""));
        assert!(!json.contains("\"d\""));
        assert!(!json.contains("\"k\""));
    }

    #[test]
    fn to_public_strips_private_members() {
        let key = ec_key();
        assert!(key.is_private());

        let public = key.to_public();
        assert!(!public.is_private());
        assert_eq!(public.x, key.x);
    }

    #[test]
    fn parses_back_from_json() {
        let key = ec_key();
        let json = key.to_json().unwrap();
        let parsed: Jwk = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn random_kids_differ() {
        let a = random_kid();
        let b = random_kid();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
