//! Rate limit headers sent by the API.
//!
//! They are informational only: the governor keeps its own count and does
//! not adjust to them. Logging them helps to spot drift between the local
//! window and the server's.

use http::HeaderMap;

/// Rate limit state as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerRateLimit {
    /// Requests allowed per window
    pub limit: usize,
    /// Requests left in the current window
    pub remaining: usize,
}

/// Parse the common "X-RateLimit" header fields.
/// Returns `None` unless both the limit and the remaining budget are present.
#[must_use]
pub fn parse_rate_limit_headers(headers: &HeaderMap) -> Option<ServerRateLimit> {
    let remaining = parse_header_value(
        headers,
        &[
            "x-ratelimit-remaining",
            "x-rate-limit-remaining",
            "ratelimit-remaining",
        ],
    )?;

    let limit = parse_header_value(
        headers,
        &["x-ratelimit-limit", "x-rate-limit-limit", "ratelimit-limit"],
    )?;

    Some(ServerRateLimit { limit, remaining })
}

/// Helper method to parse numeric header values from common rate limit headers
fn parse_header_value(headers: &HeaderMap, header_names: &[&str]) -> Option<usize> {
    for header_name in header_names {
        if let Some(value) = headers.get(*header_name)
            && let Ok(value_str) = value.to_str()
            && let Ok(number) = value_str.trim().parse::<usize>()
        {
            return Some(number);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_parse_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Ratelimit-Limit", HeaderValue::from_static("10"));
        headers.insert("X-Ratelimit-Remaining", HeaderValue::from_static("7"));
        headers.insert("X-Ratelimit-Reset", HeaderValue::from_static("1700000000"));

        assert_eq!(
            parse_rate_limit_headers(&headers),
            Some(ServerRateLimit {
                limit: 10,
                remaining: 7
            })
        );
    }

    #[test]
    fn test_incomplete_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_rate_limit_headers(&headers), None);

        headers.insert("ratelimit-remaining", HeaderValue::from_static("3"));
        assert_eq!(parse_rate_limit_headers(&headers), None);

        headers.insert("ratelimit-limit", HeaderValue::from_static("ten"));
        assert_eq!(parse_rate_limit_headers(&headers), None);
    }
}
