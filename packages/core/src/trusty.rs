//! Trusty URIs: identifiers that end in a hash of the content they name.
//!
//! A signed nanopub's URI carries an artifact code, `RA` followed by 43
//! base64url characters, after its last non-code character.

use std::sync::LazyLock;

use regex::Regex;

/// `RA` plus 43 code characters, preceded and followed by a non-code character or the end.
static TRUSTY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*[^A-Za-z0-9_\-](RA[A-Za-z0-9_\-]{43})(?:[^A-Za-z0-9_\-]|$)")
        .expect("invalid trusty URI regex")
});

/// Length of the abbreviated artifact code used in listings.
pub const SHORT_CODE_LEN: usize = 10;

/// Whether `uri` contains an `RA` artifact code.
pub fn is_trusty_uri(uri: &str) -> bool {
    TRUSTY_RE.is_match(uri)
}

/// The artifact code of a trusty URI, e.g. `RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk`.
pub fn artifact_code(uri: &str) -> Option<&str> {
    TRUSTY_RE
        .captures(uri)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The first [`SHORT_CODE_LEN`] characters of the artifact code.
pub fn short_code(uri: &str) -> Option<&str> {
    artifact_code(uri).map(|code| &code[..SHORT_CODE_LEN])
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "RAnv0ogXZ5NPTxHsJsOAlyELbKnhm5wuCtO-0Z13Vx7kk";

    #[test]
    fn recognises_trusty_uris() {
        assert!(is_trusty_uri(&format!("https://w3id.org/np/{CODE}")));
        assert!(is_trusty_uri(&format!("http://purl.org/np/{CODE}/assertion")));
        assert!(!is_trusty_uri("http://purl.org/nanopub/temp/np/"));
        assert!(!is_trusty_uri(CODE));
    }

    #[test]
    fn extracts_artifact_code() {
        let uri = format!("https://w3id.org/np/{CODE}");
        assert_eq!(artifact_code(&uri), Some(CODE));
        assert_eq!(artifact_code(&format!("{uri}/pubinfo")), Some(CODE));
        assert_eq!(artifact_code("https://example.org/RAshort"), None);
    }

    #[test]
    fn overlong_code_is_not_trusty() {
        let uri = format!("https://w3id.org/np/{CODE}x");
        assert!(!is_trusty_uri(&uri));
        assert_eq!(artifact_code(&uri), None);
        assert_eq!(short_code(&uri), None);
        assert_eq!(artifact_code(&format!("https://w3id.org/np/{CODE}#sig")), Some(CODE));
    }

    #[test]
    fn short_code_is_ten_characters() {
        let uri = format!("https://w3id.org/np/{CODE}");
        assert_eq!(short_code(&uri), Some("RAnv0ogXZ5"));
    }
}
