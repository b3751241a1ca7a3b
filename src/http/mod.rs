//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → middleware/language.rs (RequestView → NegotiationEngine)
//!         → 406 / 307 answered directly
//!         → otherwise NegotiationResult in request extensions
//!     → handler
//!     → Content-Language / Vary applied to the response
//! ```

pub mod middleware;
pub mod server;

pub use middleware::negotiate_language;
pub use server::HttpServer;
