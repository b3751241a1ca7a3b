//! Negotiation methods and options as small flag sets.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value that occupies one bit in a [`FlagSet`].
pub trait Flag: Copy + fmt::Debug + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn bit(self) -> u8;
}

/// Channel a language can be negotiated through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// First path segment, e.g. `/ja/about`.
    PathPrefix,
    /// Leading host label, e.g. `ja.example.org`.
    Subdomain,
    /// The `Accept-Language` request header.
    Header,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::PathPrefix => "path_prefix",
            Method::Subdomain => "subdomain",
            Method::Header => "header",
        }
    }
}

impl Flag for Method {
    const ALL: &'static [Self] = &[Method::PathPrefix, Method::Subdomain, Method::Header];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Behavior switches applied on top of the enabled methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationOption {
    /// Never emit `Content-Language`.
    NoContentLanguage,
    /// Never emit `Vary: Accept-Language`.
    NoVary,
    /// Redirect to the path-prefixed or subdomain URL after a header match.
    RedirectOnHeaderMatch,
    /// Answer 406 when header negotiation finds nothing acceptable.
    NotAcceptableOnHeaderMatchFail,
}

impl NegotiationOption {
    pub fn as_str(self) -> &'static str {
        match self {
            NegotiationOption::NoContentLanguage => "no_content_language",
            NegotiationOption::NoVary => "no_vary",
            NegotiationOption::RedirectOnHeaderMatch => "redirect_on_header_match",
            NegotiationOption::NotAcceptableOnHeaderMatchFail => {
                "not_acceptable_on_header_match_fail"
            }
        }
    }
}

impl Flag for NegotiationOption {
    const ALL: &'static [Self] = &[
        NegotiationOption::NoContentLanguage,
        NegotiationOption::NoVary,
        NegotiationOption::RedirectOnHeaderMatch,
        NegotiationOption::NotAcceptableOnHeaderMatchFail,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Error returned when a method or option name is not recognized.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseFlagError {
    kind: &'static str,
    value: String,
}

fn parse_flag<F: Flag>(
    s: &str,
    kind: &'static str,
    name: fn(F) -> &'static str,
) -> Result<F, ParseFlagError> {
    let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
    F::ALL
        .iter()
        .copied()
        .find(|flag| name(*flag) == normalized)
        .ok_or_else(|| ParseFlagError {
            kind,
            value: s.to_string(),
        })
}

impl FromStr for Method {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_flag(s, "method", Method::as_str)
    }
}

impl FromStr for NegotiationOption {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_flag(s, "option", NegotiationOption::as_str)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NegotiationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of flags backed by a single byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagSet<F> {
    bits: u8,
    _flag: PhantomData<F>,
}

pub type MethodSet = FlagSet<Method>;
pub type OptionSet = FlagSet<NegotiationOption>;

impl<F: Flag> FlagSet<F> {
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _flag: PhantomData,
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, flag: F) -> Self {
        self.insert(flag);
        self
    }

    pub fn insert(&mut self, flag: F) {
        self.bits |= flag.bit();
    }

    pub fn contains(&self, flag: F) -> bool {
        self.bits & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        F::ALL.iter().copied().filter(move |flag| self.contains(*flag))
    }
}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F: Flag> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Self::empty();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl<F: Flag> fmt::Debug for FlagSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_set_membership() {
        let methods = MethodSet::empty().with(Method::Header).with(Method::PathPrefix);

        assert!(methods.contains(Method::Header));
        assert!(methods.contains(Method::PathPrefix));
        assert!(!methods.contains(Method::Subdomain));
        assert_eq!(methods.iter().collect::<Vec<_>>(), vec![Method::PathPrefix, Method::Header]);
    }

    #[test]
    fn test_flag_set_duplicate_insert() {
        let options: OptionSet = [NegotiationOption::NoVary, NegotiationOption::NoVary]
            .into_iter()
            .collect();

        assert_eq!(options.iter().count(), 1);
        assert!(!OptionSet::empty().contains(NegotiationOption::NoVary));
        assert!(OptionSet::default().is_empty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("path-prefix".parse::<Method>(), Ok(Method::PathPrefix));
        assert_eq!("Header".parse::<Method>(), Ok(Method::Header));
        assert_eq!(
            "not_acceptable_on_header_match_fail".parse::<NegotiationOption>(),
            Ok(NegotiationOption::NotAcceptableOnHeaderMatchFail)
        );
        assert!("cookie".parse::<Method>().is_err());
    }
}
