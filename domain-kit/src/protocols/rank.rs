//! Popularity rank lookups against a "one million domains" style service.

use crate::error::DomainError;
use crate::protocols::http::HttpGet;
use serde_json::Value;
use tracing::debug;

/// Interpret a ranking service response body.
///
/// Accepts a bare integer ("42"), a JSON number (`42`) or a JSON string
/// holding an integer (`"42"`).
///
/// # Errors
///
/// `DomainError::Parse` for anything else, keeping the body for inspection.
pub fn parse_rank(body: &str) -> Result<u64, DomainError> {
    let trimmed = body.trim();

    if let Ok(rank) = trimmed.parse::<u64>() {
        return Ok(rank);
    }

    let not_a_rank = || DomainError::parse("Ranking response is not an integer", trimmed);

    match serde_json::from_str::<Value>(trimmed).map_err(|_| not_a_rank())? {
        Value::Number(n) => n.as_u64().ok_or_else(not_a_rank),
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| not_a_rank()),
        _ => Err(not_a_rank()),
    }
}

/// Fetch the popularity rank of an already-normalized domain.
pub fn fetch_rank(http: &dyn HttpGet, url: &str) -> Result<u64, DomainError> {
    let body = http.get_text(url)?;
    let rank = parse_rank(&body)?;
    debug!(url, rank, "fetched domain rank");
    Ok(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHttp(&'static str);

    impl HttpGet for FixedHttp {
        fn get_text(&self, _url: &str) -> Result<String, DomainError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_parse_rank_formats() {
        assert_eq!(parse_rank("1").unwrap(), 1);
        assert_eq!(parse_rank(" 1234\n").unwrap(), 1234);
        assert_eq!(parse_rank("\"57\"").unwrap(), 57);
        assert_eq!(parse_rank("989").unwrap(), 989);
    }

    #[test]
    fn test_parse_rank_rejects_non_integers() {
        for body in ["", "null", "-3", "1.5", "\"abc\"", "{\"rank\": 1}", "<html>"] {
            let result = parse_rank(body);
            assert!(
                matches!(result, Err(DomainError::Parse { .. })),
                "expected Parse error for {:?}, got {:?}",
                body,
                result
            );
        }
    }

    #[test]
    fn test_fetch_rank() {
        assert_eq!(fetch_rank(&FixedHttp("3"), "http://rank.test/google.com").unwrap(), 3);
        assert!(fetch_rank(&FixedHttp("nope"), "http://rank.test/x.com").is_err());
    }
}
