//! Language negotiation subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path, host, Accept-Language)
//!     → matcher.rs (path prefix OR subdomain, exclusive)
//!     → header.rs (Accept-Language, if enabled and still unmatched)
//!     → engine.rs (fallback, options → ResponseInstructions)
//!     → Return: Negotiation { result, instructions, flow }
//! ```
//!
//! # Design Decisions
//! - Configuration validated and compiled before the engine exists
//! - Engine is immutable and shared across requests without locks
//! - Deterministic: same input always yields the same negotiation

pub mod engine;
pub mod header;
pub mod matcher;
pub mod types;

pub use engine::{NegotiationEngine, RequestView};
pub use matcher::{LanguageMatcher, PathPrefixMatcher, SubdomainMatcher};
pub use types::{
    Flow, Negotiation, NegotiationMethod, NegotiationResult, Redirect, ResponseInstructions,
};
