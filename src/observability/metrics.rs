//! Negotiation metrics.
//!
//! # Metrics
//! - `langneg_negotiations_total` (counter): completed negotiations by method
//! - `langneg_header_tokens_skipped_total` (counter): rejected `Accept-Language` tokens by reason
//! - `langneg_redirects_total` (counter): redirects issued after a header match

use crate::negotiation::NegotiationMethod;

/// Record a completed negotiation.
pub fn record_negotiation(method: NegotiationMethod) {
    ::metrics::counter!("langneg_negotiations_total", "method" => method.as_str()).increment(1);
}

/// Record an `Accept-Language` token that was skipped.
pub fn record_skipped_token(reason: &'static str) {
    ::metrics::counter!("langneg_header_tokens_skipped_total", "reason" => reason).increment(1);
}

pub fn record_redirect() {
    ::metrics::counter!("langneg_redirects_total").increment(1);
}
