//! WHOIS lookups through the system `whois` command.
//!
//! WHOIS responses are unstructured text that varies between registries.
//! The parser keeps every `Key: Value` line it finds and uses a set of
//! phrases to tell "no such record" and "unsupported TLD" answers apart
//! from real records.

use crate::error::DomainError;
use crate::types::WhoisRecord;
use std::process::Command;
use tracing::{debug, warn};

/// Phrases registries use when the TLD itself cannot be queried.
const INVALID_TLD_PATTERNS: &[&str] = &[
    "no whois server is known",
    "no whois server",
    "invalid tld",
    "unknown tld",
    "tld not found",
    "no such tld",
    "bad tld",
    "invalid domain extension",
];

/// Phrases registries use when no record exists for the domain.
const NO_RECORD_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "not registered",
    "no matching record",
    "no object found",
    "the queried object does not exist",
    "object does not exist",
    "no matching entry",
    "domain name not found",
    "this domain name has not been registered",
];

/// Status lines that mark a name as available whatever else the response holds.
const AVAILABLE_STATUS_PATTERNS: &[&str] = &["status: available", "status: free"];

/// Fields that only appear in responses describing an existing registration.
///
/// DENIC echoes `Domain:` even for free names, so that key is not evidence.
const REGISTRATION_FIELDS: &[&str] = &[
    "Domain Name",
    "Registry Domain ID",
    "Registrar",
    "Creation Date",
    "Created",
];

/// Runs WHOIS queries through an external program.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    /// Program invoked as `<command> <domain>`
    command: String,
}

impl WhoisClient {
    /// Create a client using the system `whois` program.
    pub fn new() -> Self {
        Self::with_command("whois")
    }

    /// Create a client using a specific program.
    pub fn with_command<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The program this client runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Query WHOIS for an already-normalized domain.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the registry reports that no record exists, otherwise
    /// the parsed record (possibly empty if nothing looked like a field).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Whois` if:
    /// - The WHOIS program cannot be started
    /// - The program fails without printing anything
    /// - The response says the TLD has no WHOIS service
    pub fn query(&self, domain: &str) -> Result<Option<WhoisRecord>, DomainError> {
        debug!(domain, command = %self.command, "running whois");

        let output = Command::new(&self.command).arg(domain).output().map_err(|e| {
            DomainError::whois(
                domain,
                format!(
                    "Failed to execute {} command: {}. Make sure it is installed.",
                    self.command, e
                ),
            )
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            if stdout.trim().is_empty() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(DomainError::whois(
                    domain,
                    format!("{} exited with {}: {}", self.command, output.status, stderr.trim()),
                ));
            }
            // Some clients exit non-zero for "no match" answers
            warn!(domain, status = %output.status, "whois exited with failure status");
        }

        parse_whois_response(domain, &stdout)
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a raw WHOIS response.
///
/// Comment lines (`%`, `#`, `>>>`) are skipped; every other `Key: Value`
/// line with a non-empty value becomes a field.
pub fn parse_whois_response(domain: &str, response: &str) -> Result<Option<WhoisRecord>, DomainError> {
    let lower = response.to_lowercase();

    if let Some(pattern) = INVALID_TLD_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(DomainError::whois(
            domain,
            format!("Invalid or unsupported TLD for WHOIS lookup ({})", pattern),
        ));
    }

    if AVAILABLE_STATUS_PATTERNS.iter().any(|p| lower.contains(p)) {
        debug!(domain, "whois reports the name as available");
        return Ok(None);
    }

    let record = parse_fields(response);

    let registered = REGISTRATION_FIELDS
        .iter()
        .any(|field| record.first(field).is_some());

    if !registered && NO_RECORD_PATTERNS.iter().any(|p| lower.contains(p)) {
        debug!(domain, "whois reports no record");
        return Ok(None);
    }

    Ok(Some(record))
}

fn parse_fields(response: &str) -> WhoisRecord {
    let mut record = WhoisRecord::new();

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim();
            if !key.is_empty() && !value.is_empty() {
                record.insert(key, value);
            }
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTERED: &str = "\
   Domain Name: GOOGLE.COM
   Registry Domain ID: 2138514_DOMAIN_COM-VRSN
   Registrar WHOIS Server: whois.markmonitor.com
   Registrar URL: http://www.markmonitor.com
   Creation Date: 1997-09-15T04:00:00Z
   Registry Expiry Date: 2028-09-14T04:00:00Z
   Registrar: MarkMonitor Inc.
   Domain Status: clientDeleteProhibited https://icann.org/epp#clientDeleteProhibited
   Name Server: NS1.GOOGLE.COM
   Name Server: NS2.GOOGLE.COM
>>> Last update of whois database: 2024-01-01T00:00:00Z <<<

NOTICE: The expiration date displayed in this record is the date the
registrar's sponsorship of the domain name registration in the registry is
currently set to expire. If no match is found the query returns nothing.
";

    #[test]
    fn test_parse_registered_domain() {
        let record = parse_whois_response("google.com", REGISTERED).unwrap().unwrap();

        assert_eq!(record.first("Domain Name"), Some("GOOGLE.COM"));
        assert_eq!(record.registrar(), Some("MarkMonitor Inc."));
        assert_eq!(record.creation_date(), Some("1997-09-15T04:00:00Z"));
        assert_eq!(record.expiration_date(), Some("2028-09-14T04:00:00Z"));
        assert_eq!(record.name_servers(), vec!["ns1.google.com", "ns2.google.com"]);
        assert_eq!(record.status(), vec!["clientDeleteProhibited"]);
        // URLs keep everything after the first colon
        assert_eq!(record.first("Registrar URL"), Some("http://www.markmonitor.com"));
        assert!(record.first("Last update of whois database").is_none());
    }

    #[test]
    fn test_parse_no_record() {
        let response = "No match for \"NOPE-XYZ123.COM\".\n>>> Last update of whois database: 2024-01-01T00:00:00Z <<<\n";
        assert_eq!(parse_whois_response("nope-xyz123.com", response).unwrap(), None);

        let response = "%% NOT FOUND\n";
        assert_eq!(parse_whois_response("nope.de", response).unwrap(), None);

        // DENIC answers free names with a Domain line and a status
        let response = "Domain: nonexistent-xyz.de\nStatus: free\n";
        assert_eq!(parse_whois_response("nonexistent-xyz.de", response).unwrap(), None);

        let response = "Domain Name: free-name.eu\nStatus: AVAILABLE\n";
        assert_eq!(parse_whois_response("free-name.eu", response).unwrap(), None);
    }

    #[test]
    fn test_denic_registered_domain() {
        let response = "Domain: google.de\nNserver: ns1.google.com\nStatus: connect\nChanged: 2018-03-12T21:44:25+01:00\n";
        let record = parse_whois_response("google.de", response).unwrap().unwrap();
        assert_eq!(record.first("Domain"), Some("google.de"));
        assert_eq!(record.first("Status"), Some("connect"));
    }

    #[test]
    fn test_parse_invalid_tld() {
        let err = parse_whois_response("example.zzzz", "No whois server is known for this kind of object.")
            .unwrap_err();
        assert!(matches!(err, DomainError::Whois { .. }));
    }

    #[test]
    fn test_unparseable_response_is_empty_record() {
        let record = parse_whois_response("example.com", "just some text\nwithout fields\n")
            .unwrap()
            .unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_missing_program_is_whois_error() {
        let client = WhoisClient::with_command("definitely-not-a-whois-binary-xyz");
        let err = client.query("example.com").unwrap_err();
        assert!(matches!(err, DomainError::Whois { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_query_runs_configured_program() {
        // `echo` prints the domain back, which contains no fields
        let client = WhoisClient::with_command("echo");
        assert_eq!(client.command(), "echo");
        let record = client.query("example.com").unwrap().unwrap();
        assert!(record.is_empty());
    }
}
