//! Validated, immutable language configuration.

use regex::Regex;

use crate::config::flags::{Method, MethodSet, NegotiationOption, OptionSet};
use crate::config::validation::{validate, ConfigError};

/// Languages, enabled methods and options for negotiation.
///
/// Built once through [`LanguageConfig::new`], which validates the parts and
/// compiles the host pattern. Never mutated afterwards, so it can be shared
/// by reference across any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    languages: Vec<String>,
    methods: MethodSet,
    options: OptionSet,
    subdomain_pattern: Regex,
    router_pattern: String,
}

impl LanguageConfig {
    /// Validate and build a configuration. The first language is the default.
    pub fn new<I, S>(
        languages: I,
        methods: MethodSet,
        options: OptionSet,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages
            .into_iter()
            .map(|code| code.into().trim().to_string())
            .collect();

        validate(&languages, methods, options)?;

        let alternation = languages
            .iter()
            .map(|code| regex::escape(code))
            .collect::<Vec<_>>()
            .join("|");
        let subdomain_pattern = Regex::new(&format!(r"(?i)^({alternation})\."))
            .map_err(|e| ConfigError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            router_pattern: languages.join("|"),
            languages,
            methods,
            options,
            subdomain_pattern,
        })
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// The fallback language (first configured).
    pub fn default_language(&self) -> &str {
        // Validation guarantees at least one language.
        &self.languages[0]
    }

    pub fn methods(&self) -> MethodSet {
        self.methods
    }

    pub fn options(&self) -> OptionSet {
        self.options
    }

    pub fn has_method(&self, method: Method) -> bool {
        self.methods.contains(method)
    }

    pub fn has_option(&self, option: NegotiationOption) -> bool {
        self.options.contains(option)
    }

    /// The URL-based method (path prefix or subdomain), if one is enabled.
    pub fn primary_method(&self) -> Option<Method> {
        if self.has_method(Method::PathPrefix) {
            Some(Method::PathPrefix)
        } else if self.has_method(Method::Subdomain) {
            Some(Method::Subdomain)
        } else {
            None
        }
    }

    /// Exact lookup returning the configured code.
    pub fn find(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|lang| lang.as_str() == code)
            .map(String::as_str)
    }

    /// Case-insensitive lookup returning the configured spelling.
    pub fn find_ignore_case(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|lang| lang.eq_ignore_ascii_case(code))
            .map(String::as_str)
    }

    /// Pattern matching `<lang>.` at the start of a host. Group 1 is the code.
    pub fn subdomain_pattern(&self) -> &Regex {
        &self.subdomain_pattern
    }

    /// Alternation of the configured codes (`en|ja|de`) for registering
    /// path-prefix routes with an external router.
    pub fn router_pattern(&self) -> &str {
        &self.router_pattern
    }
}
