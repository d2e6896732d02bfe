//! SHA-256 digest rendering.

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of a rendered SHA-256 digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// A SHA-256 digest rendered as lowercase hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexDigest(String);

impl HexDigest {
    /// Borrow the hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HexDigest> for String {
    fn from(digest: HexDigest) -> Self {
        digest.0
    }
}

/// Compute the SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> HexDigest {
    HexDigest(hex::encode(Sha256::digest(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_vectors() {
        assert_eq!(
            sha256_hex(b"abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            sha256_hex(b"").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"hello world").as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_lowercase_hex_of_fixed_length() {
        let inputs: [&[u8]; 3] = [b"a", b"The quick brown fox", &[0xff; 1000]];
        for input in inputs {
            let digest = sha256_hex(input);
            assert_eq!(digest.as_str().len(), DIGEST_HEX_LEN);
            assert!(digest
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_deterministic() {
        let first = sha256_hex(b"repeat me");
        let second = sha256_hex(b"repeat me");
        assert_eq!(first, second);
        assert_eq!(first.to_string(), String::from(second));
    }
}
