//! # Domain Kit
//!
//! Small, independent helpers for working with internet domain names.
//!
//! Every operation accepts either a bare domain ("google.com") or something
//! that contains one ("https://user@google.com:8443/path"); the input is
//! normalized first and then handed to exactly one collaborator: a regex
//! finder, the system resolver, a TLS handshake, the `whois` program, the
//! Public Suffix List, an HTTP service or the IDNA codec.
//!
//! ## Quick Start
//!
//! ```rust
//! use domain_kit::{domain_parts, domain_as_punycode, domains_find_default, is_domain};
//!
//! let found = domains_find_default("visit http://example.com and foo.org");
//! assert_eq!(found, vec!["example.com", "foo.org"]);
//! assert!(is_domain("example.com"));
//!
//! let parts = domain_parts("https://forums.bbc.co.uk/threads").unwrap();
//! assert_eq!(parts.second_level, "bbc");
//! assert_eq!(parts.suffix, "co.uk");
//!
//! assert_eq!(domain_as_punycode("bücher.de").unwrap(), "xn--bcher-kva.de");
//! ```
//!
//! Network-backed operations live on [`DomainKit`], which carries the
//! configuration, and are also available as free functions with defaults:
//!
//! ```rust,no_run
//! use domain_kit::{domain_dns, is_tld, DomainKit};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     println!("{}", domain_dns("example.com")?);
//!     println!("{}", is_tld(".com")?);
//!
//!     let kit = DomainKit::from_environment()?;
//!     println!("{}", kit.domain_rank("google.com")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **whois** (default): WHOIS lookups through the system `whois` command
//! - **tls** (default): certificate peer lookups over TLS
//!
//! The library logs through `tracing` and never installs a subscriber.

// Re-export main public API types and functions
pub use config::{
    load_env_config, ConfigManager, EndpointsConfig, EnvConfig, FileConfig, TlsConfig, WhoisConfig,
};
pub use error::DomainError;
pub use find::{domains_find, domains_find_default, is_domain};
pub use generate::{builtin_tlds, domain_examples, domain_examples_with_rng};
pub use idn::{domain_as_punycode, domain_as_unicode};
pub use kit::{domain_dns, domain_rank, is_tld, is_tld_each, tlds, DomainKit};
pub use normalize::{map_domains, normalize_domain, with_domain, DomainInput, DomainOutput};
pub use protocols::registry::tld_in_list;
pub use protocols::{HttpClient, HttpGet};
pub use split::{domain_parts, domain_second_level_name, domain_subdomains, domain_tld};
pub use types::{DomainParts, FindOptions, KitConfig, WhoisRecord};

#[cfg(feature = "tls")]
pub use kit::domain_certificate_peers;

#[cfg(feature = "whois")]
pub use kit::domain_whois;

// Public modules
pub mod protocols;

// Internal modules
mod config;
mod error;
mod find;
mod generate;
mod idn;
mod kit;
mod normalize;
mod split;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

/// Get library information for debugging or display purposes.
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        author: AUTHOR,
        features: get_enabled_features(),
    }
}

/// Information about the library build and features
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub version: &'static str,
    pub author: &'static str,
    pub features: Vec<&'static str>,
}

/// Get list of enabled features at compile time
#[allow(clippy::vec_init_then_push)]
fn get_enabled_features() -> Vec<&'static str> {
    let mut features = Vec::new();

    #[cfg(feature = "whois")]
    features.push("whois");

    #[cfg(feature = "tls")]
    features.push("tls");

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_reports_default_features() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert!(!info.version.is_empty());
        #[cfg(feature = "whois")]
        assert!(info.features.contains(&"whois"));
        #[cfg(feature = "tls")]
        assert!(info.features.contains(&"tls"));
    }
}
