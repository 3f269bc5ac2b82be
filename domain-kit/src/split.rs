//! Public-suffix-aware domain decomposition.
//!
//! Splits a domain into subdomain, second-level name and suffix using the
//! Public Suffix List compiled into the `psl` crate, so "forums.bbc.co.uk"
//! becomes ("forums", "bbc", "co.uk") rather than a naive last-label split.
//! Only the ICANN section of the list counts; private entries such as
//! `github.io` are treated as ordinary names.

use crate::error::DomainError;
use crate::normalize::with_domain;
use crate::types::DomainParts;
use psl::{List, Psl, Type};

/// Split an already-normalized host into its parts.
///
/// Suffixes the list does not know are reported as empty, leaving the last
/// label as the second-level name.
pub(crate) fn split_host(host: &str) -> DomainParts {
    let host = host.to_lowercase();

    let suffix_len = icann_suffix_len(&host);

    if suffix_len >= host.len() {
        // The whole host is a public suffix
        return DomainParts {
            subdomain: String::new(),
            second_level: String::new(),
            suffix: host,
        };
    }

    let (rest, suffix) = if suffix_len == 0 {
        (host.as_str(), "")
    } else {
        let split_at = host.len() - suffix_len;
        (&host[..split_at - 1], &host[split_at..])
    };

    let (subdomain, second_level) = match rest.rsplit_once('.') {
        Some((sub, name)) => (sub, name),
        None => ("", rest),
    };

    DomainParts {
        subdomain: subdomain.to_string(),
        second_level: second_level.to_string(),
        suffix: suffix.to_string(),
    }
}

/// Byte length of the ICANN public suffix of `host`, or 0 when unknown.
fn icann_suffix_len(host: &str) -> usize {
    let mut candidate = host;

    loop {
        let suffix = match List.suffix(candidate.as_bytes()) {
            Some(suffix) if suffix.is_known() => suffix,
            _ => return 0,
        };

        let len = suffix.as_bytes().len();
        if matches!(suffix.typ(), Some(Type::Icann)) {
            return len;
        }

        // Private entry: retry with its parent
        match candidate[candidate.len() - len..].split_once('.') {
            Some((_, parent)) => candidate = parent,
            None => return 0,
        }
    }
}

/// Decompose a domain (or URL) into subdomain, second-level name and suffix.
///
/// # Examples
///
/// ```rust
/// use domain_kit::domain_parts;
///
/// let parts = domain_parts("https://forums.news.cnn.com/thread").unwrap();
/// assert_eq!(parts.subdomain, "forums.news");
/// assert_eq!(parts.second_level, "cnn");
/// assert_eq!(parts.suffix, "com");
/// ```
pub fn domain_parts(domain: &str) -> Result<DomainParts, DomainError> {
    with_domain(domain, |d| Ok(split_host(d)))
}

/// Get the subdomains for the given domain name ("" when there are none).
pub fn domain_subdomains(domain: &str) -> Result<String, DomainError> {
    domain_parts(domain).map(|parts| parts.subdomain)
}

/// Get the second-level name (e.g. "google" from "https://google.co.uk").
pub fn domain_second_level_name(domain: &str) -> Result<String, DomainError> {
    domain_parts(domain).map(|parts| parts.second_level)
}

/// Get the public suffix / top-level domain (e.g. "co.uk").
pub fn domain_tld(domain: &str) -> Result<String, DomainError> {
    domain_parts(domain).map(|parts| parts.suffix)
}
