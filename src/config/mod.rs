//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs (AppConfig, serde defaults)
//!     → validation.rs (semantic checks on languages/methods/options)
//!     → language.rs (LanguageConfig, patterns compiled once)
//!     → shared via Arc with the negotiation engine
//! ```
//!
//! # Design Decisions
//! - LanguageConfig is immutable once built; there is no reload path
//! - All file sections have defaults to allow minimal configs
//! - Invalid combinations are rejected before an engine can exist

pub mod flags;
pub mod language;
pub mod loader;
pub mod schema;
pub mod validation;

pub use flags::{FlagSet, Method, MethodSet, NegotiationOption, OptionSet};
pub use language::LanguageConfig;
pub use loader::{load_config, LoadError};
pub use schema::{AppConfig, ListenerConfig, NegotiationConfig, ObservabilityConfig, TimeoutConfig};
pub use validation::ConfigError;
