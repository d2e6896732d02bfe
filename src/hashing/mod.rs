//! Digest computation subsystem.
//!
//! # Data Flow
//! ```text
//! raw request body (bytes)
//!     → input.rs (lossy UTF-8 decode, trim, reject empty)
//!     → digest.rs (SHA-256 over the trimmed UTF-8 bytes)
//!     → HexDigest (64 lowercase hex characters)
//! ```
//!
//! # Design Decisions
//! - Pure and synchronous: no I/O, no shared state
//! - The only failure is an empty input after trimming
//! - Invalid UTF-8 is replaced with U+FFFD before hashing, so the digest
//!   is always taken over valid UTF-8 text

pub mod digest;
pub mod input;

pub use digest::{sha256_hex, HexDigest, DIGEST_HEX_LEN};
pub use input::{HashInput, ValidationError};
