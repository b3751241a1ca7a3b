//! Configuration validation.
//!
//! # Responsibilities
//! - Reject empty language lists and empty or duplicate codes
//! - Reject empty method sets
//! - Detect mutually exclusive methods and options without a redirect target
//!
//! # Design Decisions
//! - Validation is a pure function over the proposed parts
//! - Checks run in a fixed order and the first failure is returned
//! - Runs before any pattern is compiled

use thiserror::Error;

use crate::config::flags::{Method, MethodSet, NegotiationOption, OptionSet};

/// Fatal configuration errors. An engine cannot be built from a
/// configuration that produces any of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one language must be configured")]
    NoLanguages,

    #[error("language code at position {0} is empty")]
    EmptyLanguageCode(usize),

    #[error("language {0:?} is configured more than once")]
    DuplicateLanguage(String),

    #[error("at least one negotiation method must be enabled")]
    NoMethods,

    #[error("path prefix and subdomain negotiation cannot both be enabled")]
    ConflictingPathMethods,

    #[error("redirect on header match requires path prefix or subdomain negotiation")]
    AmbiguousRedirectTarget,

    #[error("failed to compile language pattern: {0}")]
    InvalidPattern(String),
}

/// Validate a proposed language configuration.
pub fn validate(
    languages: &[String],
    methods: MethodSet,
    options: OptionSet,
) -> Result<(), ConfigError> {
    if languages.is_empty() {
        return Err(ConfigError::NoLanguages);
    }

    for (i, code) in languages.iter().enumerate() {
        if code.trim().is_empty() {
            return Err(ConfigError::EmptyLanguageCode(i));
        }
        // Header matching ignores ASCII case, so "en" and "EN" collide.
        if languages[..i].iter().any(|seen| seen.eq_ignore_ascii_case(code)) {
            return Err(ConfigError::DuplicateLanguage(code.clone()));
        }
    }

    if methods.is_empty() {
        return Err(ConfigError::NoMethods);
    }

    let path_prefix = methods.contains(Method::PathPrefix);
    let subdomain = methods.contains(Method::Subdomain);

    if path_prefix && subdomain {
        return Err(ConfigError::ConflictingPathMethods);
    }

    if options.contains(NegotiationOption::RedirectOnHeaderMatch) && !path_prefix && !subdomain {
        return Err(ConfigError::AmbiguousRedirectTarget);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn header_only() -> MethodSet {
        MethodSet::empty().with(Method::Header)
    }

    #[test]
    fn test_empty_languages() {
        let err = validate(&[], header_only(), OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::NoLanguages);
    }

    #[test]
    fn test_empty_methods() {
        let err = validate(&langs(&["en"]), MethodSet::empty(), OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::NoMethods);
    }

    #[test]
    fn test_no_languages_reported_before_no_methods() {
        let err = validate(&[], MethodSet::empty(), OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::NoLanguages);
    }

    #[test]
    fn test_conflicting_path_methods() {
        let methods = MethodSet::empty().with(Method::PathPrefix).with(Method::Subdomain);
        let err = validate(&langs(&["en"]), methods, OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::ConflictingPathMethods);
    }

    #[test]
    fn test_redirect_needs_target() {
        let options = OptionSet::empty().with(NegotiationOption::RedirectOnHeaderMatch);
        let err = validate(&langs(&["en", "ja"]), header_only(), options).unwrap_err();
        assert_eq!(err, ConfigError::AmbiguousRedirectTarget);

        let methods = header_only().with(Method::Subdomain);
        assert!(validate(&langs(&["en", "ja"]), methods, options).is_ok());
    }

    #[test]
    fn test_bad_codes() {
        let err = validate(&langs(&["en", " "]), header_only(), OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyLanguageCode(1));

        let err =
            validate(&langs(&["en", "ja", "EN"]), header_only(), OptionSet::empty()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateLanguage("EN".to_string()));
    }
}
