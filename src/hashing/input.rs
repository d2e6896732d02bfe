//! Hash request input validation.

use thiserror::Error;

use crate::hashing::digest::{sha256_hex, HexDigest};

/// Whitespace removed from both ends of the body.
///
/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
pub fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Errors raised while validating a hash request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body was empty or whitespace only.
    #[error("No input provided")]
    EmptyInput,
}

/// A validated, whitespace-trimmed hash input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashInput {
    text: String,
}

impl HashInput {
    /// Validate a raw request body.
    ///
    /// The body is decoded as UTF-8 (invalid sequences become U+FFFD) and
    /// surrounding whitespace is removed. An empty result is rejected.
    pub fn parse(body: &[u8]) -> Result<Self, ValidationError> {
        let decoded = String::from_utf8_lossy(body);
        let trimmed = decoded.trim_matches(is_strippable);

        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        Ok(Self {
            text: trimmed.to_owned(),
        })
    }

    /// Byte length of the trimmed UTF-8 input.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false; empty inputs never validate.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// SHA-256 of the trimmed UTF-8 bytes.
    pub fn digest(&self) -> HexDigest {
        sha256_hex(self.text.as_bytes())
    }
}
