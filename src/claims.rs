//! CWT claims (RFC 8392) and their builder.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::constants::{
    CLAIM_AUD, CLAIM_CTI, CLAIM_EXP, CLAIM_IAT, CLAIM_ISS, CLAIM_NBF, CLAIM_SUB,
};
use crate::encoder::{Encoder, Profile};
use crate::error::EncodeError;
use crate::item::Item;

/// Claims carried in the payload of a CWT.
///
/// Registered claims are encoded first in key order (iss=1 through cti=7),
/// followed by custom claims in the order they were added. Every key
/// appears once: a custom claim whose key is already present replaces that
/// value in its existing position.
///
/// # Example
///
/// ```
/// use cwt_fixture::{CwtClaims, Item, Profile};
///
/// let claims = CwtClaims::builder()
///     .issuer("coap://as.example.com")
///     .subject("erikw")
///     .custom(100, Item::text("debug"))
///     .build();
///
/// let bytes = claims.to_bytes(Profile::Full)?;
/// assert_eq!(bytes[0], 0xa3);
/// # Ok::<(), cwt_fixture::EncodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CwtClaims {
    /// Issuer (key 1)
    pub iss: Option<String>,
    /// Subject (key 2)
    pub sub: Option<String>,
    /// Audience (key 3)
    pub aud: Option<String>,
    /// Expiration time as seconds since the epoch (key 4)
    pub exp: Option<i64>,
    /// Not-before time as seconds since the epoch (key 5)
    pub nbf: Option<i64>,
    /// Issued-at time as seconds since the epoch (key 6)
    pub iat: Option<i64>,
    /// CWT ID (key 7)
    pub cti: Option<Vec<u8>>,
    /// Claims outside the registered range, in insertion order
    pub custom: Vec<(i64, Item)>,
}

impl CwtClaims {
    /// Creates a new builder for CWT claims.
    #[must_use]
    pub fn builder() -> CwtClaimsBuilder {
        CwtClaimsBuilder::new()
    }

    /// Returns the number of claims that will be encoded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if no claim is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the claim keys in encoding order.
    #[must_use]
    pub fn keys(&self) -> Vec<i64> {
        self.entries().into_iter().map(|(k, _)| k).collect()
    }

    /// Returns the expiration time, if set and representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns the issued-at time, if set and representable.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Converts the claims into a CBOR map item.
    #[must_use]
    pub fn to_item(&self) -> Item {
        Item::map(
            self.entries()
                .into_iter()
                .map(|(key, value)| (Item::int(key), value)),
        )
    }

    /// Encodes the claims map into `enc`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if a claim value is not encodable under the
    /// encoder's profile.
    pub fn encode(&self, enc: &mut Encoder) -> Result<(), EncodeError> {
        enc.item(&self.to_item())?;
        Ok(())
    }

    /// Encodes the claims map on its own.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if a claim value is not encodable under
    /// `profile`.
    pub fn to_bytes(&self, profile: Profile) -> Result<Vec<u8>, EncodeError> {
        let mut enc = Encoder::with_profile(profile);
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }

    fn entries(&self) -> Vec<(i64, Item)> {
        let mut entries = Vec::with_capacity(7 + self.custom.len());
        if let Some(iss) = &self.iss {
            entries.push((CLAIM_ISS, Item::text(iss.as_str())));
        }
        if let Some(sub) = &self.sub {
            entries.push((CLAIM_SUB, Item::text(sub.as_str())));
        }
        if let Some(aud) = &self.aud {
            entries.push((CLAIM_AUD, Item::text(aud.as_str())));
        }
        if let Some(exp) = self.exp {
            entries.push((CLAIM_EXP, Item::int(exp)));
        }
        if let Some(nbf) = self.nbf {
            entries.push((CLAIM_NBF, Item::int(nbf)));
        }
        if let Some(iat) = self.iat {
            entries.push((CLAIM_IAT, Item::int(iat)));
        }
        if let Some(cti) = &self.cti {
            entries.push((CLAIM_CTI, Item::bytes(cti.as_slice())));
        }
        // A custom claim under a key already present takes that key's slot.
        for (key, value) in &self.custom {
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.clone(),
                None => entries.push((*key, value.clone())),
            }
        }
        entries
    }
}

/// Builder for constructing [`CwtClaims`].
///
/// The order of setter calls does not affect the encoding: registered
/// claims always come first, in key order, then custom claims in the
/// order their keys were first added.
///
/// # Example
///
/// ```
/// use cwt_fixture::{CwtClaimsBuilder, Item};
/// use std::time::Duration;
///
/// let claims = CwtClaimsBuilder::new()
///     .issuer("coap://as.example.com")
///     .audience("coap://light.example.com")
///     .issued_now(Duration::from_secs(3600))
///     .custom(101, Item::array([Item::text("read"), Item::text("write")]))
///     .build();
///
/// assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 3600);
/// assert_eq!(claims.keys(), vec![1, 3, 4, 5, 6, 101]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CwtClaimsBuilder {
    claims: CwtClaims,
}

impl CwtClaimsBuilder {
    /// Creates a builder with no claims set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issuer.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.claims.iss = Some(iss.into());
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.claims.sub = Some(sub.into());
        self
    }

    /// Sets the audience.
    #[must_use]
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.claims.aud = Some(aud.into());
        self
    }

    /// Sets the expiration time in seconds since the epoch.
    #[must_use]
    pub fn expiration(mut self, exp: i64) -> Self {
        self.claims.exp = Some(exp);
        self
    }

    /// Sets the not-before time in seconds since the epoch.
    #[must_use]
    pub fn not_before(mut self, nbf: i64) -> Self {
        self.claims.nbf = Some(nbf);
        self
    }

    /// Sets the issued-at time in seconds since the epoch.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.claims.iat = Some(iat);
        self
    }

    /// Sets `iat` and `nbf` to the current time and `exp` to `ttl` later.
    #[must_use]
    pub fn issued_now(self, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.issued_at(now)
            .not_before(now)
            .expiration(now.saturating_add(ttl_secs))
    }

    /// Sets the CWT ID.
    #[must_use]
    pub fn cti(mut self, cti: impl Into<Vec<u8>>) -> Self {
        self.claims.cti = Some(cti.into());
        self
    }

    /// Adds a claim under an arbitrary integer key.
    ///
    /// Adding a key twice replaces the earlier value in place. A registered
    /// key (1 to 7) overrides the typed claim's value when encoded.
    #[must_use]
    pub fn custom(mut self, key: i64, value: Item) -> Self {
        if let Some(slot) = self.claims.custom.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.claims.custom.push((key, value));
        }
        self
    }

    /// Builds the claims.
    #[must_use]
    pub fn build(self) -> CwtClaims {
        self.claims
    }
}
