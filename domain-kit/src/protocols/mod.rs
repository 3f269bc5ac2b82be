//! Collaborator implementations for the network-backed operations.
//!
//! Each submodule wraps one external facility: HTTP, the system resolver,
//! TLS, the `whois` program, the IANA TLD list and the ranking service.

/// HTTP transport seam
pub mod http;

/// DNS resolution
pub mod dns;

/// IANA TLD list
pub mod registry;

/// Popularity ranking service
pub mod rank;

/// Certificate peers over TLS
#[cfg(feature = "tls")]
pub mod tls;

/// WHOIS through the system command
#[cfg(feature = "whois")]
pub mod whois;

pub use http::{HttpClient, HttpGet};
pub use registry::{parse_tld_list, tld_in_list};
pub use rank::parse_rank;

#[cfg(feature = "whois")]
pub use whois::{parse_whois_response, WhoisClient};
