//! The contract with an external nanopublication signing engine.
//!
//! Signing a nanopub computes a trusty URI over its normalized content and
//! embeds an RSA signature in the pubinfo graph. That machinery lives
//! outside this crate behind [`Signer`]: it takes unsigned TriG and hands
//! back signed TriG in which every temporary identifier has been replaced by
//! the permanent one. [`Nanopub::sign`](crate::Nanopub::sign) feeds the
//! result through rehydration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by a [`Signer`] or by the signing transition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    #[error("nanopub is already signed")]
    AlreadySigned,

    #[error("the profile's private key is missing or unusable")]
    InvalidKey,

    #[error("the signer refused the document: {0}")]
    Rejected(String),

    #[error("signing engine failed: {0}")]
    Engine(String),
}

/// The identity a nanopub is signed as.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The author's identifier, usually an ORCID URI.
    pub author_id: String,
    pub name: String,
    /// Base64 encoded private key.
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Profile {
    pub fn new(
        author_id: impl Into<String>,
        name: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            name: name.into(),
            private_key: private_key.into(),
            email: None,
        }
    }
}

// The private key never reaches logs.
impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("author_id", &self.author_id)
            .field("name", &self.name)
            .field("private_key", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

/// A freshly generated key pair, both halves base64 encoded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// What a [`Signer`] returns for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedNanopub {
    /// The signed document as TriG.
    pub rdf: String,
    /// The permanent (trusty) URI the signer assigned.
    pub uri: String,
    /// The embedded signature value.
    pub signature: String,
}

/// An external nanopublication signing engine.
pub trait Signer: Send + Sync {
    /// Sign an unsigned TriG document as `profile`.
    fn sign(&self, unsigned_rdf: &str, profile: &Profile) -> Result<SignedNanopub, SigningError>;

    /// Check the embedded signature of a signed TriG document.
    fn verify(&self, rdf: &str) -> Result<bool, SigningError>;

    fn generate_key_pair(&self) -> Result<KeyPair, SigningError>;
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::vocab::DEFAULT_TEMP_BASE_URI;

    pub(crate) const SIGNED_BASE: &str =
        "https://w3id.org/np/RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk";
    pub(crate) const FAKE_SIGNATURE: &str = "ZmFrZS1zaWduYXR1cmU=";

    /// Stands in for a real engine: moves every identifier under the
    /// temporary base onto a fixed trusty URI and appends a signature
    /// statement to the pubinfo graph.
    #[derive(Debug, Default)]
    pub(crate) struct FakeSigner {
        pub(crate) fail: bool,
    }

    impl Signer for FakeSigner {
        fn sign(&self, unsigned_rdf: &str, profile: &Profile) -> Result<SignedNanopub, SigningError> {
            if self.fail {
                return Err(SigningError::Engine("engine offline".into()));
            }
            if profile.private_key.is_empty() {
                return Err(SigningError::InvalidKey);
            }
            let rdf = format!(
                "{}\n<{SIGNED_BASE}/pubinfo> {{ <{SIGNED_BASE}/sig> <http://purl.org/nanopub/x/hasSignature> \"{FAKE_SIGNATURE}\" . }}\n",
                unsigned_rdf.replace(DEFAULT_TEMP_BASE_URI, &format!("{SIGNED_BASE}/"))
            );
            Ok(SignedNanopub {
                rdf,
                uri: format!("{SIGNED_BASE}/"),
                signature: FAKE_SIGNATURE.to_string(),
            })
        }

        fn verify(&self, rdf: &str) -> Result<bool, SigningError> {
            if self.fail {
                return Err(SigningError::Engine("engine offline".into()));
            }
            Ok(rdf.contains(FAKE_SIGNATURE))
        }

        fn generate_key_pair(&self) -> Result<KeyPair, SigningError> {
            Ok(KeyPair {
                public_key: "cHVibGlj".into(),
                private_key: "cHJpdmF0ZQ==".into(),
            })
        }
    }

    pub(crate) fn profile() -> Profile {
        Profile::new("https://orcid.org/0000-0000-0000-0000", "Test Author", "a2V5")
    }

    #[test]
    fn debug_redacts_private_key() {
        let rendered = format!("{:?}", profile());
        assert!(rendered.contains("Test Author"));
        assert!(!rendered.contains("a2V5"));
        let pair = FakeSigner::default().generate_key_pair().unwrap();
        assert!(!format!("{pair:?}").contains("cHJpdmF0ZQ=="));
    }

    #[test]
    fn profile_serializes_without_absent_email() {
        let json = serde_json::to_value(profile()).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["author_id"], "https://orcid.org/0000-0000-0000-0000");
    }

    #[test]
    fn fake_signer_rejects_empty_key() {
        let mut p = profile();
        p.private_key.clear();
        assert_eq!(
            FakeSigner::default().sign("", &p),
            Err(SigningError::InvalidKey)
        );
    }
}
