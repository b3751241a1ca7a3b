//! Request-time language negotiation.
//!
//! Selects a response language from the request path prefix or subdomain and
//! the `Accept-Language` header, and tells the caller which headers to set,
//! whether to redirect and whether to reject the request.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod negotiation;
pub mod observability;

pub use config::{
    AppConfig, ConfigError, LanguageConfig, Method, MethodSet, NegotiationOption, OptionSet,
};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use negotiation::{
    Flow, Negotiation, NegotiationEngine, NegotiationMethod, NegotiationResult, RequestView,
    ResponseInstructions,
};
