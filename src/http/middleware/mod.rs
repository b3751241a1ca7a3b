//! HTTP middleware.

pub mod language;

pub use language::{accept_language, negotiate_language, request_view};
