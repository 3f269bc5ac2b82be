//! Finding domain names in free text.
//!
//! The finder scans text for dot-separated labels ending in something that
//! looks like a top-level domain: two or more letters, or a Punycode label
//! (`xn--...`). A candidate is kept only when its suffix is on the Public
//! Suffix List, so file names such as `index.html` are not reported.
//! Matches are returned in order of appearance and repeats are kept; callers
//! that want a set must de-duplicate themselves.

use crate::normalize::validate_domain;
use crate::types::FindOptions;
use lazy_static::lazy_static;
use psl::{List, Psl};
use regex::Regex;
use tracing::trace;

lazy_static! {
    /// Labels of any script; label and name lengths are checked after matching.
    static ref UNICODE_DOMAIN: Regex = Regex::new(
        r"(?i)\b(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?\.)+(?:xn--[a-z0-9-]+|\p{L}{2,})\b"
    )
    .expect("unicode domain pattern is valid");

    static ref ASCII_DOMAIN: Regex = Regex::new(
        r"(?i)\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?:xn--[a-z0-9-]+|[a-z]{2,})\b"
    )
    .expect("ascii domain pattern is valid");
}

/// Parse domain names out of `text`.
///
/// # Arguments
///
/// * `text` - Arbitrary text (prose, logs, HTML, ...)
/// * `options` - Which kinds of occurrences to keep
///
/// # Returns
///
/// Matches in order of appearance, duplicates included.
///
/// # Examples
///
/// ```rust
/// use domain_kit::{domains_find, FindOptions};
///
/// let found = domains_find("visit http://example.com and foo.org", FindOptions::default());
/// assert_eq!(found, vec!["example.com", "foo.org"]);
/// ```
pub fn domains_find(text: &str, options: FindOptions) -> Vec<String> {
    let pattern: &Regex = if options.allow_unicode {
        &UNICODE_DOMAIN
    } else {
        &ASCII_DOMAIN
    };

    pattern
        .find_iter(text)
        .filter(|m| {
            let before = &text[..m.start()];

            if !options.from_email_addresses && before.ends_with('@') {
                trace!(candidate = m.as_str(), "skipping email address domain");
                return false;
            }

            if !options.from_urls && is_inside_url(before) {
                trace!(candidate = m.as_str(), "skipping domain inside URL");
                return false;
            }

            if validate_domain(m.as_str()).is_err() {
                return false;
            }

            if !has_known_suffix(m.as_str()) {
                trace!(candidate = m.as_str(), "skipping candidate with unknown suffix");
                return false;
            }

            true
        })
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Parse domain names out of `text` with default options.
pub fn domains_find_default(text: &str) -> Vec<String> {
    domains_find(text, FindOptions::default())
}

/// Whether the whitespace-delimited token leading up to a match is a URL.
fn is_inside_url(before: &str) -> bool {
    let token = before.rsplit(char::is_whitespace).next().unwrap_or("");
    token.contains("://") || token.ends_with("//")
}

/// Whether the candidate ends in a suffix from the Public Suffix List.
///
/// Both the Unicode and the Punycode spelling are tried, so `пример.рф` and
/// `пример.xn--p1ai` are treated alike.
fn has_known_suffix(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    let (unicode, _) = idna::domain_to_unicode(&lower);
    let ascii = idna::domain_to_ascii(&lower).unwrap_or_default();

    [lower.as_str(), unicode.as_str(), ascii.as_str()]
        .iter()
        .filter(|form| !form.is_empty())
        .any(|form| {
            List.suffix(form.as_bytes())
                .map_or(false, |suffix| suffix.is_known())
        })
}

/// Check if the given string is a domain.
///
/// True only when finding domains in `candidate` yields exactly one match
/// and that match is `candidate` itself.
///
/// # Examples
///
/// ```rust
/// use domain_kit::is_domain;
///
/// assert!(is_domain("example.com"));
/// assert!(!is_domain("https://example.com"));
/// assert!(!is_domain("example"));
/// ```
pub fn is_domain(candidate: &str) -> bool {
    let found = domains_find(candidate, FindOptions::default());
    found.len() == 1 && found[0] == candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_order_of_appearance() {
        let found = domains_find_default("visit http://example.com and foo.org");
        assert_eq!(found, vec!["example.com", "foo.org"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let found = domains_find_default("foo.org, then bar.net, then foo.org again");
        assert_eq!(found, vec!["foo.org", "bar.net", "foo.org"]);
    }

    #[test]
    fn test_subdomains_and_multi_part_suffixes() {
        let found = domains_find_default("mirrors at www.example.co.uk and a.b.c.example.com.");
        assert_eq!(found, vec!["www.example.co.uk", "a.b.c.example.com"]);
    }

    #[test]
    fn test_non_domains_are_ignored() {
        assert!(domains_find_default("version 1.2.3 released").is_empty());
        assert!(domains_find_default("connect to 10.0.0.1").is_empty());
        assert!(domains_find_default("e.g. nothing here").is_empty());
        assert!(domains_find_default("").is_empty());
    }

    #[test]
    fn test_file_names_are_not_domains() {
        let found = domains_find_default("see http://example.com/index.html and report.pdf");
        assert_eq!(found, vec!["example.com"]);

        assert!(domains_find_default("run setup.exe, then open notes.txt").is_empty());
        assert!(!is_domain("index.html"));
        assert!(!is_domain("setup.exe"));
        assert!(!is_domain("foo.notarealtld"));
    }

    #[test]
    fn test_email_option() {
        let text = "mail admin@corp.example.com or see docs.example.org";
        assert_eq!(
            domains_find(text, FindOptions::default()),
            vec!["corp.example.com", "docs.example.org"]
        );
        assert_eq!(
            domains_find(text, FindOptions::default().with_email_addresses(false)),
            vec!["docs.example.org"]
        );
    }

    #[test]
    fn test_url_option() {
        let text = "https://user:pw@api.example.com/v1 and plain.example.net";
        assert_eq!(
            domains_find(text, FindOptions::default()),
            vec!["api.example.com", "plain.example.net"]
        );
        assert_eq!(
            domains_find(text, FindOptions::default().with_urls(false)),
            vec!["plain.example.net"]
        );
    }

    #[test]
    fn test_unicode_option() {
        let text = "bücher.de und xn--bcher-kva.de";
        assert_eq!(
            domains_find(text, FindOptions::default()),
            vec!["bücher.de", "xn--bcher-kva.de"]
        );
        assert_eq!(
            domains_find(text, FindOptions::default().with_unicode(false)),
            vec!["xn--bcher-kva.de"]
        );
    }

    #[test]
    fn test_punycode_tld() {
        assert_eq!(domains_find_default("see пример.xn--p1ai"), vec!["пример.xn--p1ai"]);
    }

    #[test]
    fn test_overlong_label_is_dropped() {
        let text = format!("{}.com", "a".repeat(64));
        assert!(domains_find_default(&text).is_empty());
    }

    #[test]
    fn test_is_domain() {
        assert!(is_domain("example.com"));
        assert!(is_domain("sub.example.co.uk"));
        assert!(is_domain("bücher.de"));
        assert!(is_domain("xn--bcher-kva.de"));

        assert!(!is_domain("example"));
        assert!(!is_domain(""));
        assert!(!is_domain("https://example.com"));
        assert!(!is_domain("example.com foo.org"));
        assert!(!is_domain(" example.com"));
        assert!(!is_domain("example.com."));
        assert!(!is_domain("1.2.3.4"));
    }
}
