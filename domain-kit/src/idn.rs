//! IDNA conversion between Unicode and Punycode (ASCII-compatible) forms.

use crate::error::DomainError;
use crate::normalize::with_domain;
use tracing::trace;

/// Convert a domain to its Punycode (ASCII-compatible) form.
///
/// Uses UTS #46 processing, so the result is also case-folded.
///
/// # Errors
///
/// `DomainError::Encoding` when a label cannot be encoded.
///
/// # Examples
///
/// ```rust
/// use domain_kit::domain_as_punycode;
///
/// assert_eq!(domain_as_punycode("bücher.de").unwrap(), "xn--bcher-kva.de");
/// ```
pub fn domain_as_punycode(domain: &str) -> Result<String, DomainError> {
    with_domain(domain, |d| {
        let ascii = idna::domain_to_ascii(d)
            .map_err(|e| DomainError::encoding(d, format!("IDNA encoding failed: {:?}", e)))?;
        trace!(domain = d, ascii = %ascii, "encoded domain");
        Ok(ascii)
    })
}

/// Convert a Punycode domain back to Unicode.
///
/// # Examples
///
/// ```rust
/// use domain_kit::domain_as_unicode;
///
/// assert_eq!(domain_as_unicode("xn--bcher-kva.de").unwrap(), "bücher.de");
/// ```
pub fn domain_as_unicode(domain: &str) -> Result<String, DomainError> {
    with_domain(domain, |d| {
        let (unicode, result) = idna::domain_to_unicode(d);
        result.map_err(|e| DomainError::encoding(d, format!("IDNA decoding failed: {:?}", e)))?;
        trace!(domain = d, unicode = %unicode, "decoded domain");
        Ok(unicode)
    })
}
