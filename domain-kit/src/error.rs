//! Error handling for domain helper operations.
//!
//! Every operation propagates the failure of the collaborator it delegates to
//! (resolver, TLS stack, whois program, HTTP client, IDNA codec). This module
//! gives each of those failures one variant carrying the collaborator's message.

use std::fmt;

/// Main error type for domain helper operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be normalized into a syntactically valid domain
    InvalidDomain { domain: String, reason: String },

    /// DNS resolution failed or returned no address
    Resolution { domain: String, message: String },

    /// TCP connection to the remote host failed
    Connection { target: String, message: String },

    /// TLS handshake or certificate parsing failed
    Tls { domain: String, message: String },

    /// A required field was absent from a remote record (e.g. certificate SAN)
    MissingField { field: String, context: String },

    /// WHOIS program failed or the TLD has no WHOIS server
    Whois { domain: String, message: String },

    /// HTTP request failed (connection, status code, body)
    Network {
        message: String,
        source: Option<String>,
    },

    /// IDNA / Punycode conversion failed
    Encoding { input: String, message: String },

    /// A remote payload could not be interpreted
    Parse {
        message: String,
        content: Option<String>,
    },

    /// Configuration errors (invalid settings, bad TOML)
    Config { message: String },

    /// File I/O errors when reading configuration
    File { path: String, message: String },
}

impl DomainError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new resolution error.
    pub fn resolution<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Resolution {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new connection error.
    pub fn connection<T: Into<String>, M: Into<String>>(target: T, message: M) -> Self {
        Self::Connection {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a new TLS error.
    pub fn tls<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Tls {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new missing field error.
    pub fn missing_field<F: Into<String>, C: Into<String>>(field: F, context: C) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a new WHOIS error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::Whois {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new encoding error.
    pub fn encoding<I: Into<String>, M: Into<String>>(input: I, message: M) -> Self {
        Self::Encoding {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error keeping the offending payload.
    pub fn parse<M: Into<String>, C: Into<String>>(message: M, content: C) -> Self {
        Self::Parse {
            message: message.into(),
            content: Some(content.into()),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the failure happened on the network path (DNS, TCP, TLS, HTTP).
    pub fn is_network_related(&self) -> bool {
        matches!(
            self,
            Self::Resolution { .. } | Self::Connection { .. } | Self::Tls { .. } | Self::Network { .. }
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::Resolution { domain, message } => {
                write!(f, "Failed to resolve '{}': {}", domain, message)
            }
            Self::Connection { target, message } => {
                write!(f, "Connection to {} failed: {}", target, message)
            }
            Self::Tls { domain, message } => {
                write!(f, "TLS error for '{}': {}", domain, message)
            }
            Self::MissingField { field, context } => {
                write!(f, "Missing field '{}' in {}", field, context)
            }
            Self::Whois { domain, message } => {
                write!(f, "WHOIS error for '{}': {}", domain, message)
            }
            Self::Network { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::Encoding { input, message } => {
                write!(f, "Encoding error for '{}': {}", input, message)
            }
            Self::Parse { message, content: _ } => {
                write!(f, "Parse error: {}", message)
            }
            Self::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::File { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for DomainError {}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else if let Some(status) = err.status() {
            Self::network_with_source(format!("HTTP {}", status), err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}
