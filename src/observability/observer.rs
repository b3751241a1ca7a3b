//! Structured negotiation events and the observers that receive them.

use crate::config::Method;
use crate::negotiation::header::TokenRejection;
use crate::negotiation::NegotiationResult;
use crate::observability::metrics;

/// Diagnostic event emitted while negotiating a request.
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiationEvent<'a> {
    /// A method was attempted and produced no candidate.
    NoMatch {
        method: Method,
        candidate: Option<&'a str>,
    },
    /// An `Accept-Language` token was ignored.
    TokenSkipped {
        token: &'a str,
        reason: TokenRejection,
    },
    /// A redirect to a language-specific URL was decided.
    Redirect { language: &'a str, location: &'a str },
    /// Header negotiation failed and the request is rejected.
    NotAcceptable,
    /// Negotiation finished with this result.
    Completed { result: &'a NegotiationResult },
}

/// Receiver for negotiation diagnostics.
pub trait NegotiationObserver: Send + Sync {
    fn on_event(&self, event: &NegotiationEvent<'_>);
}

/// Logs events through `tracing` and counts them through `metrics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl NegotiationObserver for TracingObserver {
    fn on_event(&self, event: &NegotiationEvent<'_>) {
        match event {
            NegotiationEvent::NoMatch { method, candidate } => {
                tracing::debug!(method = %method, candidate = ?candidate, "No language match");
            }
            NegotiationEvent::TokenSkipped { token, reason } => {
                tracing::trace!(
                    token = %token,
                    reason = reason.as_str(),
                    "Skipping Accept-Language token"
                );
                metrics::record_skipped_token(reason.as_str());
            }
            NegotiationEvent::Redirect { language, location } => {
                tracing::debug!(
                    language = %language,
                    location = %location,
                    "Redirecting to negotiated language"
                );
                metrics::record_redirect();
            }
            NegotiationEvent::NotAcceptable => {
                tracing::debug!("No acceptable language, rejecting request");
            }
            NegotiationEvent::Completed { result } => {
                tracing::debug!(
                    language = %result.language,
                    method = %result.method,
                    quality = result.quality,
                    "Language negotiated"
                );
                metrics::record_negotiation(result.method);
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl NegotiationObserver for NoopObserver {
    fn on_event(&self, _event: &NegotiationEvent<'_>) {}
}
