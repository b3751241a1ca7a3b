//! `Accept-Language` negotiation.
//!
//! # Algorithm
//! ```text
//! header value
//!     → split on ','
//!     → parse each token: language range ('*' or code) + optional q
//!     → drop malformed tokens, bad or zero q, unsupported codes
//!     → keep the first candidate with the strictly highest q
//!     → stop early on q = 1.0
//! ```
//!
//! # Design Decisions
//! - Ties keep the earliest candidate (first listed wins)
//! - `*` stands for the default (first configured) language
//! - Codes compare ASCII case-insensitively; the configured spelling is returned
//! - A q outside [0, 1] is treated as unparseable

use std::sync::OnceLock;

use regex::Regex;

use crate::negotiation::types::{NegotiationMethod, NegotiationResult};
use crate::observability::{NegotiationEvent, NegotiationObserver, NoopObserver};

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"^\s*(\*|[A-Za-z][A-Za-z0-9-]*)\s*",
            r"(?:;\s*[qQ]\s*=\s*([^\s;]*))?",
            r"\s*(?:;.*)?$",
        ))
        .unwrap()
    })
}

/// Why a token did not produce a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Not a language range at all.
    Malformed,
    /// `q` present but not a number in [0, 1].
    InvalidQuality,
    /// `q=0`: explicitly not acceptable.
    ZeroQuality,
    /// Well-formed but not a configured language.
    Unsupported,
}

impl TokenRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenRejection::Malformed => "malformed",
            TokenRejection::InvalidQuality => "invalid_quality",
            TokenRejection::ZeroQuality => "zero_quality",
            TokenRejection::Unsupported => "unsupported",
        }
    }
}

/// The language part of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRange<'a> {
    Wildcard,
    Code(&'a str),
}

/// A parsed `Accept-Language` token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptToken<'a> {
    pub range: LanguageRange<'a>,
    pub quality: f32,
}

/// Parse one comma-separated token of an `Accept-Language` value.
pub fn parse_token(token: &str) -> Result<AcceptToken<'_>, TokenRejection> {
    let caps = token_regex().captures(token).ok_or(TokenRejection::Malformed)?;

    let range = match caps.get(1).map(|m| m.as_str()) {
        Some("*") => LanguageRange::Wildcard,
        Some(code) => LanguageRange::Code(code),
        None => return Err(TokenRejection::Malformed),
    };

    let quality = match caps.get(2) {
        Some(raw) => parse_quality(raw.as_str())?,
        None => 1.0,
    };

    if quality == 0.0 {
        return Err(TokenRejection::ZeroQuality);
    }

    Ok(AcceptToken { range, quality })
}

fn parse_quality(raw: &str) -> Result<f32, TokenRejection> {
    let quality: f32 = raw.parse().map_err(|_| TokenRejection::InvalidQuality)?;
    if (0.0..=1.0).contains(&quality) {
        Ok(quality)
    } else {
        Err(TokenRejection::InvalidQuality)
    }
}

/// Select the best supported language from an `Accept-Language` value.
pub fn negotiate(header: &str, languages: &[String]) -> Option<NegotiationResult> {
    negotiate_observed(header, languages, &NoopObserver)
}

/// Like [`negotiate`], reporting skipped tokens to `observer`.
pub fn negotiate_observed(
    header: &str,
    languages: &[String],
    observer: &dyn NegotiationObserver,
) -> Option<NegotiationResult> {
    let default = languages.first()?;
    let mut best: Option<(&str, f32)> = None;

    for token in header.split(',') {
        let parsed = match parse_token(token) {
            Ok(parsed) => parsed,
            Err(reason) => {
                observer.on_event(&NegotiationEvent::TokenSkipped { token, reason });
                continue;
            }
        };

        let language = match parsed.range {
            LanguageRange::Wildcard => default.as_str(),
            LanguageRange::Code(code) => {
                match languages.iter().find(|lang| lang.eq_ignore_ascii_case(code)) {
                    Some(lang) => lang.as_str(),
                    None => {
                        observer.on_event(&NegotiationEvent::TokenSkipped {
                            token,
                            reason: TokenRejection::Unsupported,
                        });
                        continue;
                    }
                }
            }
        };

        // Strictly greater: on equal q the earlier candidate stays.
        if best.map_or(true, |(_, quality)| parsed.quality > quality) {
            best = Some((language, parsed.quality));
        }

        if parsed.quality >= 1.0 {
            break;
        }
    }

    best.map(|(language, quality)| {
        NegotiationResult::new(language, NegotiationMethod::Header, quality)
    })
}
