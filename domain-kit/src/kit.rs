//! The `DomainKit` facade.
//!
//! `DomainKit` owns the configuration and the collaborator clients and
//! exposes every domain operation as a method. Each method normalizes its
//! domain argument, makes exactly one collaborator call and reshapes the
//! result; nothing is cached between calls.
//!
//! The free functions at the bottom of this module are shortcuts that run
//! the same operations with default settings.

use crate::config::{validate_kit_config, ConfigManager};
use crate::error::DomainError;
use crate::find;
use crate::generate;
use crate::idn;
use crate::normalize::with_domain;
use crate::protocols::http::{HttpClient, HttpGet};
use crate::protocols::{dns, rank, registry};
use crate::split;
use crate::types::{DomainParts, FindOptions, KitConfig};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "tls")]
use crate::protocols::tls;

#[cfg(feature = "whois")]
use crate::protocols::whois::WhoisClient;
#[cfg(feature = "whois")]
use crate::types::WhoisRecord;

/// Facade over all domain operations.
///
/// # Example
///
/// ```rust,no_run
/// use domain_kit::DomainKit;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let kit = DomainKit::new()?;
///     println!("{}", kit.domain_dns("https://example.com/")?);
///     println!("{:?}", kit.domain_parts("forums.bbc.co.uk")?);
///     println!("{}", kit.is_tld(".museum")?);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct DomainKit {
    /// Settings for the network-backed operations
    config: KitConfig,
    /// Transport for the TLD list and ranking service
    http: Arc<dyn HttpGet>,
    /// WHOIS program runner
    #[cfg(feature = "whois")]
    whois: WhoisClient,
}

impl DomainKit {
    /// Create a kit with default configuration.
    pub fn new() -> Result<Self, DomainError> {
        Self::with_config(KitConfig::default())
    }

    /// Create a kit with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_kit::{DomainKit, KitConfig};
    ///
    /// let config = KitConfig::default()
    ///     .with_tls_port(8443)
    ///     .with_whois_command("jwhois");
    ///
    /// let kit = DomainKit::with_config(config).unwrap();
    /// assert_eq!(kit.config().tls_port, 8443);
    /// ```
    ///
    /// # Errors
    ///
    /// `DomainError::Config` if the configuration is invalid.
    pub fn with_config(config: KitConfig) -> Result<Self, DomainError> {
        let http = HttpClient::new()?;
        Self::with_http(config, Arc::new(http))
    }

    /// Create a kit that fetches remote documents through `http`.
    pub fn with_http(config: KitConfig, http: Arc<dyn HttpGet>) -> Result<Self, DomainError> {
        validate_kit_config(&config)?;

        Ok(Self {
            #[cfg(feature = "whois")]
            whois: WhoisClient::with_command(config.whois_command.clone()),
            config,
            http,
        })
    }

    /// Create a kit from config files and `DK_*` environment variables.
    pub fn from_environment() -> Result<Self, DomainError> {
        let config = ConfigManager::new().load()?;
        Self::with_config(config)
    }

    /// The active configuration.
    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    /// Parse domain names out of `text`.
    pub fn domains_find(&self, text: &str, options: FindOptions) -> Vec<String> {
        find::domains_find(text, options)
    }

    /// Check if the given string is a domain.
    pub fn is_domain(&self, candidate: &str) -> bool {
        find::is_domain(candidate)
    }

    /// Generate `n` example domains.
    pub fn domain_examples(&self, n: usize) -> Vec<String> {
        generate::domain_examples(n)
    }

    /// Resolve a domain to its preferred IP address, as text.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidDomain` for unusable input,
    /// `DomainError::Resolution` when the lookup fails.
    pub fn domain_dns(&self, domain: &str) -> Result<String, DomainError> {
        with_domain(domain, |d| dns::resolve_address(d).map(|ip| ip.to_string()))
    }

    /// DNS names the domain's TLS certificate is valid for.
    ///
    /// Connects to the configured port (443 unless changed).
    #[cfg(feature = "tls")]
    pub fn domain_certificate_peers(&self, domain: &str) -> Result<Vec<String>, DomainError> {
        with_domain(domain, |d| tls::certificate_peers(d, self.config.tls_port))
    }

    /// WHOIS record for the domain, or `None` if the registry has none.
    #[cfg(feature = "whois")]
    pub fn domain_whois(&self, domain: &str) -> Result<Option<WhoisRecord>, DomainError> {
        with_domain(domain, |d| self.whois.query(d))
    }

    /// Subdomain, second-level name and ICANN suffix of the domain.
    pub fn domain_parts(&self, domain: &str) -> Result<DomainParts, DomainError> {
        split::domain_parts(domain)
    }

    /// Subdomain labels ("" when there are none).
    pub fn domain_subdomains(&self, domain: &str) -> Result<String, DomainError> {
        split::domain_subdomains(domain)
    }

    /// Second-level name, e.g. "google" for "www.google.co.uk".
    pub fn domain_second_level_name(&self, domain: &str) -> Result<String, DomainError> {
        split::domain_second_level_name(domain)
    }

    /// Public suffix of the domain, e.g. "co.uk".
    pub fn domain_tld(&self, domain: &str) -> Result<String, DomainError> {
        split::domain_tld(domain)
    }

    /// Popularity rank of the domain from the configured ranking service.
    ///
    /// # Errors
    ///
    /// `DomainError::Network` when the service is unreachable,
    /// `DomainError::Parse` when it does not answer with an integer.
    pub fn domain_rank(&self, domain: &str) -> Result<u64, DomainError> {
        with_domain(domain, |d| {
            rank::fetch_rank(self.http.as_ref(), &self.config.rank_url(d))
        })
    }

    /// Punycode (ASCII-compatible) form of the domain.
    pub fn domain_as_punycode(&self, domain: &str) -> Result<String, DomainError> {
        idn::domain_as_punycode(domain)
    }

    /// Unicode form of a Punycode domain.
    pub fn domain_as_unicode(&self, domain: &str) -> Result<String, DomainError> {
        idn::domain_as_unicode(domain)
    }

    /// Fetch the current IANA list of top-level domains, lower-cased.
    pub fn tlds(&self) -> Result<Vec<String>, DomainError> {
        registry::fetch_tlds(self.http.as_ref(), &self.config.tld_list_url)
    }

    /// Whether `candidate` is a current top-level domain.
    ///
    /// A leading dot and letter case are ignored. The list is fetched for
    /// every call.
    pub fn is_tld(&self, candidate: &str) -> Result<bool, DomainError> {
        registry::check_tld(self.http.as_ref(), &self.config.tld_list_url, candidate)
    }

    /// Check several candidates against one fetch of the TLD list.
    pub fn is_tld_each<I, S>(&self, candidates: I) -> Result<Vec<bool>, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        registry::check_tlds(self.http.as_ref(), &self.config.tld_list_url, candidates)
    }
}

impl fmt::Debug for DomainKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainKit")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// Shortcuts using default settings

/// Resolve a domain to its preferred IP address, as text.
pub fn domain_dns(domain: &str) -> Result<String, DomainError> {
    with_domain(domain, |d| dns::resolve_address(d).map(|ip| ip.to_string()))
}

/// DNS names the domain's certificate on port 443 is valid for.
#[cfg(feature = "tls")]
pub fn domain_certificate_peers(domain: &str) -> Result<Vec<String>, DomainError> {
    with_domain(domain, |d| tls::certificate_peers(d, KitConfig::default().tls_port))
}

/// WHOIS record for the domain using the system `whois` program.
#[cfg(feature = "whois")]
pub fn domain_whois(domain: &str) -> Result<Option<WhoisRecord>, DomainError> {
    with_domain(domain, |d| WhoisClient::new().query(d))
}

/// Popularity rank of the domain from the default ranking service.
pub fn domain_rank(domain: &str) -> Result<u64, DomainError> {
    DomainKit::new()?.domain_rank(domain)
}

/// Fetch the current IANA list of top-level domains.
pub fn tlds() -> Result<Vec<String>, DomainError> {
    DomainKit::new()?.tlds()
}

/// Whether `candidate` is a current top-level domain.
pub fn is_tld(candidate: &str) -> Result<bool, DomainError> {
    DomainKit::new()?.is_tld(candidate)
}

/// Check several candidates against one fetch of the TLD list.
pub fn is_tld_each<I, S>(candidates: I) -> Result<Vec<bool>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DomainKit::new()?.is_tld_each(candidates)
}
