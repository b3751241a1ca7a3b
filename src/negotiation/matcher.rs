//! URL-based language matching.
//!
//! # Responsibilities
//! - Path prefix: first path segment must be a configured code (exact)
//! - Subdomain: leading host label must be a configured code (case-insensitive)
//!
//! # Design Decisions
//! - Matchers re-validate candidates even if an external router already did
//! - Matchers return the configured spelling of the code
//! - No match is a normal outcome, not an error

use std::fmt::Debug;
use std::sync::Arc;

use crate::config::{LanguageConfig, Method};

/// Extracts a configured language code from a request candidate.
pub trait LanguageMatcher: Send + Sync + Debug {
    /// The method this matcher implements.
    fn method(&self) -> Method;

    /// Returns the matched language code, if any.
    fn matches(&self, candidate: &str) -> Option<&str>;
}

/// Matches the first path segment against the configured codes.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    config: Arc<LanguageConfig>,
}

impl PathPrefixMatcher {
    pub fn new(config: Arc<LanguageConfig>) -> Self {
        Self { config }
    }
}

impl LanguageMatcher for PathPrefixMatcher {
    fn method(&self) -> Method {
        Method::PathPrefix
    }

    fn matches(&self, candidate: &str) -> Option<&str> {
        self.config.find(candidate)
    }
}

/// Matches the leading label of the request host.
#[derive(Debug, Clone)]
pub struct SubdomainMatcher {
    config: Arc<LanguageConfig>,
}

impl SubdomainMatcher {
    pub fn new(config: Arc<LanguageConfig>) -> Self {
        Self { config }
    }
}

impl LanguageMatcher for SubdomainMatcher {
    fn method(&self) -> Method {
        Method::Subdomain
    }

    fn matches(&self, candidate: &str) -> Option<&str> {
        let caps = self.config.subdomain_pattern().captures(candidate)?;
        // Group 1 excludes the trailing '.'.
        self.config.find_ignore_case(caps.get(1)?.as_str())
    }
}

/// First segment of a request path, without slashes.
///
/// Only one leading `/` is stripped: in `//de/x` the first segment is empty.
pub fn first_path_segment(path: &str) -> Option<&str> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
