//! SHA-256 hashing service library.

pub mod config;
pub mod hashing;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use hashing::{HashInput, HexDigest};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Telemetry;
