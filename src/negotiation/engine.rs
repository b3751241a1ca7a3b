//! Per-request negotiation.
//!
//! # State Machine
//! ```text
//! Start → TryPrimaryMethod → [Matched]
//!                          → TryHeaderMethod (if enabled)
//!                               → [HeaderMatched + Redirect]
//!                               → [HeaderMatched]
//!                               → [NotAcceptable]
//!                               → [Default]
//! ```
//!
//! # Design Decisions
//! - The engine only decides; the caller applies instructions and runs handlers
//! - No state is kept between requests: same input, same output
//! - Malformed input degrades to Default (or NotAcceptable), never aborts

use std::sync::Arc;

use axum::http::StatusCode;
use url::Url;

use crate::config::{
    ConfigError, LanguageConfig, Method, MethodSet, NegotiationOption, OptionSet,
};
use crate::negotiation::header;
use crate::negotiation::matcher::{
    first_path_segment, LanguageMatcher, PathPrefixMatcher, SubdomainMatcher,
};
use crate::negotiation::types::{
    Flow, Negotiation, NegotiationResult, Redirect, ResponseInstructions,
};
use crate::observability::{NegotiationEvent, NegotiationObserver, TracingObserver};

/// The parts of a request negotiation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestView<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    /// Host, optionally with a port.
    pub host: Option<&'a str>,
    pub scheme: &'a str,
    pub accept_language: Option<&'a str>,
}

impl<'a> RequestView<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            query: None,
            host: None,
            scheme: "http",
            accept_language: None,
        }
    }

    pub fn with_query(mut self, query: &'a str) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_accept_language(mut self, value: &'a str) -> Self {
        self.accept_language = Some(value);
        self
    }
}

/// Negotiates the response language for requests.
///
/// Cheap to share: wrap in an `Arc` and call [`negotiate`](Self::negotiate)
/// from any number of tasks.
pub struct NegotiationEngine {
    config: Arc<LanguageConfig>,
    primary: Option<Box<dyn LanguageMatcher>>,
    observer: Arc<dyn NegotiationObserver>,
}

impl std::fmt::Debug for NegotiationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NegotiationEngine")
            .field("config", &self.config)
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}

impl NegotiationEngine {
    /// Create an engine that reports to [`TracingObserver`].
    pub fn new(config: LanguageConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: LanguageConfig, observer: Arc<dyn NegotiationObserver>) -> Self {
        let config = Arc::new(config);
        let primary: Option<Box<dyn LanguageMatcher>> = match config.primary_method() {
            Some(Method::PathPrefix) => Some(Box::new(PathPrefixMatcher::new(config.clone()))),
            Some(Method::Subdomain) => Some(Box::new(SubdomainMatcher::new(config.clone()))),
            _ => None,
        };

        Self {
            config,
            primary,
            observer,
        }
    }

    /// Validate the parts and build an engine in one step.
    pub fn build<I, S>(
        languages: I,
        methods: MethodSet,
        options: OptionSet,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(LanguageConfig::new(languages, methods, options)?))
    }

    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// Negotiate the language for one request.
    pub fn negotiate(&self, request: &RequestView<'_>) -> Negotiation {
        let config = &*self.config;
        let mut instructions = ResponseInstructions::default();
        let mut result = self.try_primary(request);

        if result.is_none() && config.has_method(Method::Header) {
            if !config.has_option(NegotiationOption::NoVary) {
                instructions.vary_accept_language = true;
            }

            let header_match = request.accept_language.and_then(|value| {
                header::negotiate_observed(value, config.languages(), &*self.observer)
            });

            match header_match {
                Some(found) => {
                    if config.has_option(NegotiationOption::RedirectOnHeaderMatch) {
                        instructions.redirect = self.redirect_for(request, &found.language);
                    }
                    result = Some(found);
                }
                None => {
                    self.observer.on_event(&NegotiationEvent::NoMatch {
                        method: Method::Header,
                        candidate: request.accept_language,
                    });

                    if config.has_option(NegotiationOption::NotAcceptableOnHeaderMatchFail) {
                        return self.not_acceptable(instructions);
                    }
                }
            }
        }

        let result =
            result.unwrap_or_else(|| NegotiationResult::fallback(config.default_language()));

        if !config.has_option(NegotiationOption::NoContentLanguage)
            && instructions.redirect.is_none()
        {
            instructions.content_language = Some(result.language.clone());
        }

        self.observer.on_event(&NegotiationEvent::Completed { result: &result });

        Negotiation {
            result,
            instructions,
            flow: Flow::Continue,
        }
    }

    fn try_primary(&self, request: &RequestView<'_>) -> Option<NegotiationResult> {
        let matcher = self.primary.as_ref()?;
        let method = matcher.method();
        let candidate = match method {
            Method::PathPrefix => first_path_segment(request.path),
            _ => request.host,
        };

        match candidate.and_then(|c| matcher.matches(c)) {
            Some(language) => Some(NegotiationResult::new(language, method.into(), 1.0)),
            None => {
                self.observer.on_event(&NegotiationEvent::NoMatch { method, candidate });
                None
            }
        }
    }

    fn not_acceptable(&self, mut instructions: ResponseInstructions) -> Negotiation {
        let status = StatusCode::NOT_ACCEPTABLE;
        instructions.terminal_status = Some(status);

        let result = NegotiationResult::failure();
        self.observer.on_event(&NegotiationEvent::NotAcceptable);
        self.observer.on_event(&NegotiationEvent::Completed { result: &result });

        Negotiation {
            result,
            instructions,
            flow: Flow::Halt(status),
        }
    }

    fn redirect_for(&self, request: &RequestView<'_>, language: &str) -> Option<Redirect> {
        let location = match self.config.primary_method()? {
            Method::PathPrefix => Some(path_prefix_location(request, language)),
            Method::Subdomain => subdomain_location(request, language),
            Method::Header => None,
        }?;

        self.observer.on_event(&NegotiationEvent::Redirect {
            language,
            location: &location,
        });

        Some(Redirect {
            location,
            status: StatusCode::TEMPORARY_REDIRECT,
        })
    }
}

/// `/<lang>` prepended to the path, query preserved.
fn path_prefix_location(request: &RequestView<'_>, language: &str) -> String {
    let path = if request.path.starts_with('/') {
        request.path.to_string()
    } else {
        format!("/{}", request.path)
    };

    match request.query.filter(|q| !q.is_empty()) {
        Some(query) => format!("/{language}{path}?{query}"),
        None => format!("/{language}{path}"),
    }
}

/// `<lang>.` prepended to the host. `None` when the host is missing or the
/// prefixed host is not a valid domain (e.g. an IP address).
///
/// The scheme is `https` only when the request says so; anything else,
/// including unknown schemes, yields `http`.
fn subdomain_location(request: &RequestView<'_>, language: &str) -> Option<String> {
    let host = request.host?;
    let scheme = web_scheme(request.scheme).unwrap_or("http");
    let mut url = Url::parse(&format!("{scheme}://{host}")).ok()?;
    let prefixed = format!("{}.{}", language, url.host_str()?);

    url.set_host(Some(&prefixed)).ok()?;
    url.set_path(request.path);
    url.set_query(request.query.filter(|q| !q.is_empty()));

    Some(url.into())
}

/// `http` or `https` from a scheme value such as `X-Forwarded-Proto`.
///
/// Proxies append their own hop, so only the first comma-separated element
/// counts. Comparison ignores ASCII case.
pub fn web_scheme(raw: &str) -> Option<&'static str> {
    let first = raw.split(',').next()?.trim();

    if first.eq_ignore_ascii_case("https") {
        Some("https")
    } else if first.eq_ignore_ascii_case("http") {
        Some("http")
    } else {
        None
    }
}
