//! Core data types for the domain helpers.
//!
//! This module defines the values the operations hand back to callers
//! (domain decomposition, WHOIS records) and the knobs they accept
//! (finder options, kit configuration).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Public-suffix-aware decomposition of a domain.
///
/// Every part is lower-case. Joining the non-empty parts with `.`
/// reconstructs the lower-cased host the parts were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainParts {
    /// Labels left of the registrable name (e.g. "forums.news"), possibly empty
    pub subdomain: String,

    /// The registrable label directly left of the suffix (e.g. "cnn")
    pub second_level: String,

    /// The public suffix (e.g. "com", "co.uk"), empty when unknown
    pub suffix: String,
}

impl DomainParts {
    /// The registrable domain (second-level name plus suffix).
    ///
    /// Returns `None` when there is no second-level name.
    pub fn registrable(&self) -> Option<String> {
        if self.second_level.is_empty() {
            return None;
        }
        if self.suffix.is_empty() {
            Some(self.second_level.clone())
        } else {
            Some(format!("{}.{}", self.second_level, self.suffix))
        }
    }

    /// Whether a subdomain part is present.
    pub fn has_subdomain(&self) -> bool {
        !self.subdomain.is_empty()
    }
}

impl fmt::Display for DomainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [
            self.subdomain.as_str(),
            self.second_level.as_str(),
            self.suffix.as_str(),
        ]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Field mapping parsed from a WHOIS response.
///
/// Field names are kept as the registry wrote them (e.g. "Registrar",
/// "Name Server"); a field seen several times collects every value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhoisRecord {
    fields: BTreeMap<String, Vec<String>>,
}

impl WhoisRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a field.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.fields.entry(key.into()).or_default().push(value.into());
    }

    /// All values of a field, matching the name case-insensitively.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(field))
            .map(|(_, values)| values.as_slice())
    }

    /// First value of a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value found among several alternative field names.
    fn first_of(&self, fields: &[&str]) -> Option<&str> {
        fields.iter().find_map(|field| self.first(field))
    }

    pub fn registrar(&self) -> Option<&str> {
        self.first_of(&["Registrar", "Sponsoring Registrar", "registrar"])
    }

    pub fn creation_date(&self) -> Option<&str> {
        self.first_of(&["Creation Date", "Created", "Registered on", "created"])
    }

    pub fn expiration_date(&self) -> Option<&str> {
        self.first_of(&[
            "Registry Expiry Date",
            "Registrar Registration Expiration Date",
            "Expiry Date",
            "Expires On",
            "paid-till",
        ])
    }

    /// Name servers, lower-cased and de-duplicated in first-seen order.
    pub fn name_servers(&self) -> Vec<String> {
        let mut servers: Vec<String> = Vec::new();
        for field in ["Name Server", "nserver", "Name Servers"] {
            for value in self.get(field).unwrap_or_default() {
                let server = value.trim().trim_end_matches('.').to_lowercase();
                if !server.is_empty() && !servers.contains(&server) {
                    servers.push(server);
                }
            }
        }
        servers
    }

    /// Domain status codes without the trailing ICANN reference URL.
    pub fn status(&self) -> Vec<String> {
        ["Domain Status", "status"]
            .iter()
            .flat_map(|field| self.get(field).unwrap_or_default())
            .filter_map(|value| value.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    /// Number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Consume the record, returning the underlying mapping.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}

/// Options forwarded to the domain finder.
///
/// All switches default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOptions {
    /// Keep domains that appear as the host of a URL (`scheme://host`)
    pub from_urls: bool,

    /// Keep domains that appear right after `@` (email addresses, credentials)
    pub from_email_addresses: bool,

    /// Allow non-ASCII letters inside labels
    pub allow_unicode: bool,
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            from_urls: true,
            from_email_addresses: true,
            allow_unicode: true,
        }
    }
}

impl FindOptions {
    pub fn with_urls(mut self, enabled: bool) -> Self {
        self.from_urls = enabled;
        self
    }

    pub fn with_email_addresses(mut self, enabled: bool) -> Self {
        self.from_email_addresses = enabled;
        self
    }

    pub fn with_unicode(mut self, enabled: bool) -> Self {
        self.allow_unicode = enabled;
        self
    }
}

/// Default source of the IANA root zone TLD list.
pub const DEFAULT_TLD_LIST_URL: &str = "https://data.iana.org/TLD/tlds-alpha-by-domain.txt";

/// Default popularity ranking endpoint; `{domain}` is substituted per call.
pub const DEFAULT_RANK_URL_TEMPLATE: &str = "http://onemillion.hightower.space/onemillion/{domain}";

/// Placeholder replaced by the domain in the rank URL template.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// Runtime configuration shared by the network-backed helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitConfig {
    /// Where `tlds()` fetches the root zone TLD list from
    pub tld_list_url: String,

    /// Ranking service URL containing `{domain}`
    pub rank_url_template: String,

    /// Program invoked for WHOIS queries
    pub whois_command: String,

    /// Port used when collecting certificate peers
    pub tls_port: u16,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            tld_list_url: DEFAULT_TLD_LIST_URL.to_string(),
            rank_url_template: DEFAULT_RANK_URL_TEMPLATE.to_string(),
            whois_command: "whois".to_string(),
            tls_port: 443,
        }
    }
}

impl KitConfig {
    /// Set the TLD list source.
    pub fn with_tld_list_url<S: Into<String>>(mut self, url: S) -> Self {
        self.tld_list_url = url.into();
        self
    }

    /// Set the ranking URL template.
    pub fn with_rank_url_template<S: Into<String>>(mut self, template: S) -> Self {
        self.rank_url_template = template.into();
        self
    }

    /// Set the WHOIS program.
    pub fn with_whois_command<S: Into<String>>(mut self, command: S) -> Self {
        self.whois_command = command.into();
        self
    }

    /// Set the certificate port.
    pub fn with_tls_port(mut self, port: u16) -> Self {
        self.tls_port = port;
        self
    }

    /// Build the ranking URL for a domain.
    pub fn rank_url(&self, domain: &str) -> String {
        self.rank_url_template.replace(DOMAIN_PLACEHOLDER, domain)
    }
}
