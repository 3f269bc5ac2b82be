// domain-kit/tests/integration.rs

//! Integration tests for domain-kit exports and end-to-end behavior

use domain_kit::{
    domain_as_punycode, domain_as_unicode, domain_dns, domain_examples, domain_parts,
    domain_second_level_name, domain_subdomains, domain_tld, domains_find, domains_find_default,
    is_domain, map_domains, normalize_domain, tld_in_list, DomainError, DomainInput, DomainKit,
    DomainOutput, FindOptions, HttpGet, KitConfig,
};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

/// Route library logs to the test output; `RUST_LOG=domain_kit=trace` shows them.
fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

const IANA_SAMPLE: &str = "\
# Version 2024010100, Last Updated Mon Jan  1 07:07:01 2024 UTC
AAA
COM
MUSEUM
NET
ORG
UK
XN--P1AI
";

/// In-memory stand-in for the IANA list and the ranking service.
struct FakeInternet;

impl HttpGet for FakeInternet {
    fn get_text(&self, url: &str) -> Result<String, DomainError> {
        if url.ends_with("tlds-alpha-by-domain.txt") {
            return Ok(IANA_SAMPLE.to_string());
        }
        match url.rsplit('/').next() {
            Some("google.com") => Ok("1".to_string()),
            Some("example.org") => Ok("\"4321\"".to_string()),
            Some("broken.net") => Ok("<html>rate limited</html>".to_string()),
            _ => Err(DomainError::network_with_source("HTTP 404 Not Found", url)),
        }
    }
}

fn offline_kit() -> DomainKit {
    DomainKit::with_http(KitConfig::default(), Arc::new(FakeInternet)).unwrap()
}

#[test]
fn test_find_then_inspect() {
    init_tracing();

    let text = "Mirrors: https://downloads.example.co.uk/iso, ftp.example.org and mail admin@corp.example.com";
    let found = domains_find_default(text);
    assert_eq!(
        found,
        vec!["downloads.example.co.uk", "ftp.example.org", "corp.example.com"]
    );

    let seconds = map_domains(&found, |d| domain_second_level_name(d)).unwrap();
    assert_eq!(seconds, vec!["example", "example", "example"]);

    let only_bare = domains_find(
        text,
        FindOptions::default()
            .with_urls(false)
            .with_email_addresses(false),
    );
    assert_eq!(only_bare, vec!["ftp.example.org"]);
}

#[test]
fn test_split_properties() {
    init_tracing();

    for input in [
        "forums.news.cnn.com",
        "https://www.google.co.uk/search?q=x",
        "Example.COM",
        "a.b.c.d.example.com.au",
    ] {
        let parts = domain_parts(input).unwrap();
        let host = normalize_domain(input).unwrap().to_lowercase();
        assert_eq!(parts.to_string(), host, "reconstruction failed for {}", input);
    }

    assert_eq!(domain_subdomains("forums.news.cnn.com").unwrap(), "forums.news");
    assert_eq!(domain_tld("https://google.co.uk").unwrap(), "co.uk");
}

#[test]
fn test_punycode_round_trip() {
    for domain in ["bücher.de", "пример.рф", "example.com", "münchen.example.org"] {
        let ascii = domain_as_punycode(domain).unwrap();
        assert!(ascii.is_ascii());
        assert_eq!(domain_as_unicode(&ascii).unwrap(), domain);
    }
}

#[test]
fn test_examples_are_domains() {
    let examples = domain_examples(5);
    assert_eq!(examples.len(), 5);
    for example in &examples {
        assert!(is_domain(example), "{} is not a domain", example);
    }
}

#[test]
fn test_tld_checks_offline() {
    init_tracing();
    let kit = offline_kit();

    let tlds = kit.tlds().unwrap();
    assert_eq!(tlds.len(), 7);
    assert!(tlds.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));

    assert!(kit.is_tld("com").unwrap());
    assert!(kit.is_tld(".com").unwrap());
    assert!(kit.is_tld("COM").unwrap());
    assert!(!kit.is_tld("co.uk").unwrap());
    assert_eq!(
        kit.is_tld_each(["museum", ".xn--p1ai", "notatld"]).unwrap(),
        vec![true, true, false]
    );
    assert!(tld_in_list(".Org", &tlds));
}

#[test]
fn test_rank_offline() {
    init_tracing();
    let kit = offline_kit();

    assert_eq!(kit.domain_rank("https://google.com/").unwrap(), 1);
    assert_eq!(kit.domain_rank("example.org").unwrap(), 4321);
    assert!(matches!(
        kit.domain_rank("broken.net"),
        Err(DomainError::Parse { .. })
    ));
    assert!(matches!(
        kit.domain_rank("unknown.io"),
        Err(DomainError::Network { .. })
    ));
}

#[test]
fn test_domain_input_dispatch() {
    let kit = offline_kit();

    let one = DomainInput::from("https://google.com");
    assert_eq!(
        one.apply(|d| kit.domain_rank(d)).unwrap(),
        DomainOutput::One(1)
    );

    let many = DomainInput::from(&["google.com", "example.org"][..]);
    assert_eq!(
        many.apply(|d| kit.domain_rank(d)).unwrap().into_vec(),
        vec![1, 4321]
    );
}

#[test]
fn test_unresolvable_domain() {
    init_tracing();
    let err = domain_dns("nonexistent-domain-xyz123.invalid").unwrap_err();
    assert!(matches!(err, DomainError::Resolution { .. }));
}

#[test]
fn test_invalid_input_errors() {
    assert!(matches!(
        domain_dns("not a domain"),
        Err(DomainError::InvalidDomain { .. })
    ));
    assert!(matches!(
        domain_parts(""),
        Err(DomainError::InvalidDomain { .. })
    ));
}

// Tests below talk to real services and are skipped by default

#[test]
#[ignore]
fn test_live_dns() {
    let address = domain_dns("example.com").unwrap();
    assert!(address.parse::<std::net::IpAddr>().is_ok());
}

#[test]
#[ignore]
fn test_live_tlds() {
    let tlds = domain_kit::tlds().unwrap();
    assert!(tlds.len() > 1000);
    assert!(domain_kit::is_tld(".com").unwrap());
    assert!(domain_kit::is_tld("COM").unwrap());
}

#[cfg(feature = "tls")]
#[test]
#[ignore]
fn test_live_certificate_peers() {
    let peers = domain_kit::domain_certificate_peers("https://www.google.com/").unwrap();
    assert!(!peers.is_empty());
}

#[cfg(feature = "whois")]
#[test]
#[ignore]
fn test_live_whois() {
    let record = domain_kit::domain_whois("google.com").unwrap().unwrap();
    assert!(record.registrar().is_some());

    let missing = domain_kit::domain_whois("nonexistent-domain-xyz123abc.com").unwrap();
    assert!(missing.is_none());
}
