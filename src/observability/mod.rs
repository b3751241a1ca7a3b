//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! NegotiationEngine / header negotiator
//!     → observer.rs (structured NegotiationEvent)
//!     → TracingObserver: tracing events + metrics.rs counters
//!
//! Consumers:
//!     → Log subscriber installed by the binary (stdout)
//!     → Any metrics recorder installed by the host application
//! ```
//!
//! # Design Decisions
//! - The engine never logs directly; it reports events to an injected observer
//! - Non-matches are diagnostics (debug level), never errors
//! - Metrics go through the `metrics` facade and are no-ops without a recorder

pub mod metrics;
pub mod observer;

pub use observer::{NegotiationEvent, NegotiationObserver, NoopObserver, TracingObserver};
