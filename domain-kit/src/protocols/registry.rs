//! IANA root zone TLD list.
//!
//! The list is fetched on every call; nothing is cached between calls.
//! Membership checks strip a leading dot and ignore case, so "com", ".com"
//! and "COM" are all the same TLD.

use crate::error::DomainError;
use crate::protocols::http::HttpGet;
use tracing::debug;

/// Parse the body of `tlds-alpha-by-domain.txt`.
///
/// Skips the `#` version header and blank lines and lower-cases every entry.
///
/// ```text
/// # Version 2024010100, Last Updated Mon Jan  1 07:07:01 2024 UTC
/// AAA
/// AARP
/// ...
/// ```
pub fn parse_tld_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Fetch the current list of top-level domains.
///
/// # Arguments
///
/// * `http` - Transport used for the request
/// * `url` - Location of the IANA list
///
/// # Errors
///
/// `DomainError::Network` when the list cannot be fetched.
pub fn fetch_tlds(http: &dyn HttpGet, url: &str) -> Result<Vec<String>, DomainError> {
    let body = http.get_text(url)?;
    let tlds = parse_tld_list(&body);
    debug!(url, count = tlds.len(), "fetched TLD list");
    Ok(tlds)
}

/// Whether `candidate` (leading dot and case ignored) is in `list`.
pub fn tld_in_list<S: AsRef<str>>(candidate: &str, list: &[S]) -> bool {
    let wanted = candidate.trim_start_matches('.').to_lowercase();
    !wanted.is_empty() && list.iter().any(|tld| tld.as_ref() == wanted)
}

/// Check a single TLD against a freshly fetched list.
pub fn check_tld(http: &dyn HttpGet, url: &str, candidate: &str) -> Result<bool, DomainError> {
    let list = fetch_tlds(http, url)?;
    Ok(tld_in_list(candidate, &list))
}

/// Check each candidate, fetching the list once for the whole batch.
///
/// Answers keep input order.
pub fn check_tlds<I, S>(http: &dyn HttpGet, url: &str, candidates: I) -> Result<Vec<bool>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let list = fetch_tlds(http, url)?;
    Ok(candidates
        .into_iter()
        .map(|candidate| tld_in_list(candidate.as_ref(), &list))
        .collect())
}
