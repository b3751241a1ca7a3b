//! Negotiation results and the instructions handed back to the caller.

use std::fmt;

use axum::http::header::{CONTENT_LANGUAGE, VARY};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use serde::Serialize;

use crate::config::Method;

/// The channel that produced the negotiated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationMethod {
    Subdomain,
    PathPrefix,
    Header,
    /// Nothing matched; the first configured language was used.
    Default,
    /// Nothing matched and the request was rejected as not acceptable.
    Failure,
}

impl NegotiationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            NegotiationMethod::Subdomain => "subdomain",
            NegotiationMethod::PathPrefix => "path_prefix",
            NegotiationMethod::Header => "header",
            NegotiationMethod::Default => "default",
            NegotiationMethod::Failure => "failure",
        }
    }
}

impl From<Method> for NegotiationMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::PathPrefix => NegotiationMethod::PathPrefix,
            Method::Subdomain => NegotiationMethod::Subdomain,
            Method::Header => NegotiationMethod::Header,
        }
    }
}

impl fmt::Display for NegotiationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of negotiating one request.
///
/// Attached to the request extensions so downstream handlers can read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegotiationResult {
    /// Selected language code. Empty only when `method` is `Failure`.
    pub language: String,
    pub method: NegotiationMethod,
    /// 1.0 for URL matches, the parsed `q` for header matches, 0.0 otherwise.
    pub quality: f32,
}

impl NegotiationResult {
    pub(crate) fn new(
        language: impl Into<String>,
        method: NegotiationMethod,
        quality: f32,
    ) -> Self {
        Self {
            language: language.into(),
            method,
            quality,
        }
    }

    pub(crate) fn fallback(language: &str) -> Self {
        Self::new(language, NegotiationMethod::Default, 0.0)
    }

    pub(crate) fn failure() -> Self {
        Self::new(String::new(), NegotiationMethod::Failure, 0.0)
    }

    pub fn is_failure(&self) -> bool {
        self.method == NegotiationMethod::Failure
    }
}

/// A redirect the caller should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub status: StatusCode,
}

/// Response-affecting decisions for the caller to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseInstructions {
    /// Value for `Content-Language`.
    pub content_language: Option<String>,
    /// Merge `Accept-Language` into `Vary`.
    pub vary_accept_language: bool,
    pub redirect: Option<Redirect>,
    /// Status that must end request processing.
    pub terminal_status: Option<StatusCode>,
}

impl ResponseInstructions {
    /// Apply the header instructions to a response header map.
    ///
    /// `Vary` is merged: `Accept-Language` is appended unless it, or `*`, is
    /// already listed.
    pub fn apply(&self, headers: &mut HeaderMap) {
        if self.vary_accept_language && !varies_on_accept_language(headers) {
            headers.append(VARY, HeaderValue::from_static("Accept-Language"));
        }

        if let Some(language) = &self.content_language {
            match HeaderValue::from_str(language) {
                Ok(value) => {
                    headers.insert(CONTENT_LANGUAGE, value);
                }
                Err(e) => {
                    tracing::warn!(
                        language = %language,
                        error = %e,
                        "Cannot encode Content-Language"
                    );
                }
            }
        }
    }
}

fn varies_on_accept_language(headers: &HeaderMap) -> bool {
    headers
        .get_all(VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|field| field == "*" || field.eq_ignore_ascii_case("accept-language"))
}

/// Whether downstream processing should continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt(StatusCode),
}

/// Everything the engine decided for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Negotiation {
    pub result: NegotiationResult,
    pub instructions: ResponseInstructions,
    pub flow: Flow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_headers() {
        let instructions = ResponseInstructions {
            content_language: Some("ja".to_string()),
            vary_accept_language: true,
            ..Default::default()
        };
        let mut headers = HeaderMap::new();
        instructions.apply(&mut headers);

        assert_eq!(headers.get(CONTENT_LANGUAGE).unwrap(), "ja");
        assert_eq!(headers.get(VARY).unwrap(), "Accept-Language");
    }

    #[test]
    fn test_vary_is_merged_not_overwritten() {
        let instructions = ResponseInstructions {
            vary_accept_language: true,
            ..Default::default()
        };

        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("Accept-Encoding"));
        instructions.apply(&mut headers);
        let values: Vec<_> = headers.get_all(VARY).iter().collect();
        assert_eq!(values, vec!["Accept-Encoding", "Accept-Language"]);

        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("Accept-Encoding, accept-language"));
        instructions.apply(&mut headers);
        assert_eq!(headers.get_all(VARY).iter().count(), 1);

        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("*"));
        instructions.apply(&mut headers);
        assert_eq!(headers.get(VARY).unwrap(), "*");
    }

    #[test]
    fn test_empty_instructions_touch_nothing() {
        let mut headers = HeaderMap::new();
        ResponseInstructions::default().apply(&mut headers);
        assert!(headers.is_empty());
    }
}
