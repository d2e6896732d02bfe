//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, route table)
//!     → request.rs (request ID assigned and echoed back)
//!     → handlers.rs (POST /hash, GET /health)
//!     → response.rs (error and health payloads)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody, HealthStatus};
pub use server::{AppState, HttpServer};
