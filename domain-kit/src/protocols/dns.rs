//! DNS resolution through the system resolver configuration.

use crate::error::DomainError;
use hickory_resolver::Resolver;
use std::net::IpAddr;
use tracing::debug;

/// Resolve `domain` and return its preferred address.
///
/// The first IPv4 address wins; when the name only has IPv6 records the
/// first of those is returned instead.
///
/// # Errors
///
/// `DomainError::Resolution` when the resolver cannot be built from the
/// system configuration, the lookup fails, or no address comes back.
pub fn resolve_address(domain: &str) -> Result<IpAddr, DomainError> {
    let resolver = Resolver::from_system_conf().map_err(|e| {
        DomainError::resolution(domain, format!("Failed to load resolver configuration: {}", e))
    })?;

    debug!(domain, "DNS lookup");

    let lookup = resolver
        .lookup_ip(domain)
        .map_err(|e| DomainError::resolution(domain, e.to_string()))?;

    let addresses: Vec<IpAddr> = lookup.iter().collect();
    let address = pick_address(&addresses)
        .ok_or_else(|| DomainError::resolution(domain, "No addresses returned"))?;

    debug!(domain, %address, total = addresses.len(), "DNS lookup finished");
    Ok(address)
}

/// First IPv4 address, else the first address of any family.
fn pick_address(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .copied()
}
