//! # Structural Summary
//!
//! Human-readable and JSON descriptions of an assembled envelope: which
//! headers it carries, which claims, and how many bytes each slot takes.

use std::fmt;

use serde::Serialize;

use cwt_fixture::{
    Algorithm, CoseSign1, EncodedOutput, HEADER_KID, Item, Profile, Sign1Layout,
};

/// Summary of one COSE_Sign1 envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Sign1Summary {
    /// Encoder profile the envelope was built with.
    pub profile: Profile,
    /// Protected `alg`, if present and registered.
    pub algorithm: Option<Algorithm>,
    /// Unprotected `kid`, rendered as text or hex.
    pub kid: Option<String>,
    /// Claim keys in encoded order; empty for raw payloads.
    pub claim_keys: Vec<i64>,
    /// Encoded size of each slot.
    pub layout: Sign1Layout,
    /// Text encodings of the whole envelope.
    pub encodings: EncodedOutput,
    /// CBOR diagnostic notation.
    pub diagnostic: String,
}

impl Sign1Summary {
    /// Summarizes `token`.
    #[must_use]
    pub fn new(token: &CoseSign1) -> Self {
        let kid = token
            .unprotected_headers()
            .get(HEADER_KID)
            .and_then(render_kid);

        Self {
            profile: token.profile(),
            algorithm: token.protected_headers().algorithm(),
            kid,
            claim_keys: token.claims().map(|c| c.keys()).unwrap_or_default(),
            layout: token.layout(),
            encodings: EncodedOutput::new(token.as_bytes()),
            diagnostic: token.to_string(),
        }
    }
}

fn render_kid(item: &Item) -> Option<String> {
    item.as_text()
        .map(str::to_string)
        .or_else(|| item.as_bytes().map(|b| format!("h'{}'", cwt_fixture::to_hex(b))))
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "byte" } else { "bytes" }
}

impl fmt::Display for Sign1Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = &self.layout;

        writeln!(f, "COSE_Sign1 ({} profile)", self.profile)?;
        match self.algorithm {
            Some(alg) => writeln!(f, "  alg          {alg}")?,
            None => writeln!(f, "  alg          (none)")?,
        }
        writeln!(f, "  kid          {}", self.kid.as_deref().unwrap_or("(none)"))?;
        if !self.claim_keys.is_empty() {
            let keys: Vec<String> = self.claim_keys.iter().map(i64::to_string).collect();
            writeln!(f, "  claims       {}", keys.join(", "))?;
        }

        writeln!(f, "  layout")?;
        for (name, len) in [
            ("array head", layout.array_head),
            ("protected", layout.protected),
            ("unprotected", layout.unprotected),
            ("payload", layout.payload),
            ("signature", layout.signature),
        ] {
            writeln!(f, "    {name:<12} {len:>5} {}", plural(len))?;
        }
        let total = layout.total();
        writeln!(f, "    {:<12} {total:>5} {}", "total", plural(total))?;

        writeln!(f, "  diagnostic   {}", self.diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwt_fixture::fixture::{FixtureConfig, sample_envelope};
    use cwt_fixture::{CoseSign1, HeaderMap};

    #[test]
    fn summarizes_sample_token() {
        let token = sample_envelope(&FixtureConfig::default()).unwrap();
        let summary = Sign1Summary::new(&token);

        assert_eq!(summary.algorithm, Some(Algorithm::Es256));
        assert_eq!(summary.kid.as_deref(), Some("test-key"));
        assert_eq!(summary.claim_keys, vec![1, 2, 3, 4, 5, 6, 7, 100, 101]);
        assert_eq!(summary.layout.total(), token.as_bytes().len());
        assert_eq!(summary.encodings.len, token.as_bytes().len());
    }

    #[test]
    fn display_lists_every_slot() {
        let token = sample_envelope(&FixtureConfig::default()).unwrap();
        let text = Sign1Summary::new(&token).to_string();

        assert!(text.starts_with("COSE_Sign1 (full profile)\n"));
        assert!(text.contains("alg          ES256 (-7)"));
        assert!(text.contains("kid          test-key"));
        assert!(text.contains("claims       1, 2, 3, 4, 5, 6, 7, 100, 101"));
        assert!(text.contains("    array head       1 byte\n"));
        assert!(text.contains("    signature       66 bytes\n"));
        assert!(text.contains("diagnostic   [<< {1: -7} >>"));
    }

    #[test]
    fn byte_kid_renders_as_hex() {
        let token = CoseSign1::builder()
            .unprotected(HeaderMap::new().kid_bytes(vec![0x0b, 0x71]))
            .payload(b"x".to_vec())
            .build()
            .unwrap();
        let summary = Sign1Summary::new(&token);

        assert_eq!(summary.kid.as_deref(), Some("h'0b71'"));
        assert_eq!(summary.algorithm, None);
        assert!(summary.claim_keys.is_empty());
    }

    #[test]
    fn serializes_to_json() {
        let token = sample_envelope(&FixtureConfig::default()).unwrap();
        let json = serde_json::to_value(Sign1Summary::new(&token)).unwrap();

        assert_eq!(json["profile"], "full");
        assert_eq!(json["layout"]["signature"], 66);
        assert_eq!(json["kid"], "test-key");
    }
}
