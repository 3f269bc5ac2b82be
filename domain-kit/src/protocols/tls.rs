//! Certificate peer discovery over TLS.
//!
//! Connects to `domain:port`, completes a handshake verified against the
//! Mozilla root set and reads the DNS names out of the leaf certificate's
//! Subject Alternative Name extension.

use crate::error::DomainError;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore};
use std::net::TcpStream;
use std::sync::Arc;
use tracing::debug;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};

fn client_config() -> Arc<ClientConfig> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth(),
    )
}

/// Fetch the DNS names the server's certificate is valid for.
///
/// # Arguments
///
/// * `domain` - Host to connect to; also used for SNI and verification
/// * `port` - TCP port, normally 443
///
/// # Returns
///
/// DNS-type SAN entries of the leaf certificate, in certificate order.
///
/// # Errors
///
/// - `DomainError::Connection` if the TCP connection cannot be opened
/// - `DomainError::Tls` if the handshake or certificate parsing fails
/// - `DomainError::MissingField` if the certificate has no SAN extension
pub fn certificate_peers(domain: &str, port: u16) -> Result<Vec<String>, DomainError> {
    let target = format!("{}:{}", domain, port);

    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| DomainError::tls(domain, format!("Invalid server name: {}", e)))?;

    debug!(target = %target, "opening TLS connection");
    let mut sock = TcpStream::connect((domain, port))
        .map_err(|e| DomainError::connection(&target, e.to_string()))?;

    let mut conn = ClientConnection::new(client_config(), server_name)
        .map_err(|e| DomainError::tls(domain, e.to_string()))?;

    while conn.is_handshaking() {
        conn.complete_io(&mut sock)
            .map_err(|e| DomainError::tls(domain, format!("Handshake failed: {}", e)))?;
    }

    let leaf = conn
        .peer_certificates()
        .and_then(|certs| certs.first())
        .ok_or_else(|| DomainError::tls(domain, "Server presented no certificate"))?;

    let (_, cert) = x509_parser::parse_x509_certificate(leaf.as_ref())
        .map_err(|e| DomainError::tls(domain, format!("Certificate parsing failed: {}", e)))?;

    let peers = san_dns_names(&cert).ok_or_else(|| {
        DomainError::missing_field("subjectAltName", format!("certificate for {}", target))
    })?;

    debug!(target = %target, peers = peers.len(), "read certificate peers");
    Ok(peers)
}

/// DNS names from the SAN extension, or `None` when the extension is absent.
fn san_dns_names(cert: &X509Certificate<'_>) -> Option<Vec<String>> {
    let mut found = false;
    let mut names = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            found = true;
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    names.push(dns_name.to_string());
                }
            }
        }
    }

    found.then_some(names)
}
