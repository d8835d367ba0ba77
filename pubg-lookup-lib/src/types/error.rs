use http::StatusCode;
use serde::{Serialize, Serializer};
use std::hash::Hash;
use thiserror::Error;
use url::Url;

/// Possible errors when looking up players with `pubg_lookup_lib`
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The reqwest client could not be built
    #[error("Error creating request client: {0}")]
    BuildRequestClient(#[source] reqwest::Error),

    /// No API key was configured
    #[error("No API key given. Use the `--api-key` flag or the `PUBG_API_KEY` env var.")]
    MissingApiKey,

    /// The API key cannot be used as an `Authorization` header value
    #[error("API key contains characters which are not allowed in an HTTP header")]
    InvalidApiKey(#[source] http::header::InvalidHeaderValue),

    /// The API base URL cannot be parsed or cannot carry a path
    #[error("Invalid API URL `{0}`")]
    InvalidApiUrl(String),

    /// Generic network failure after the request was handed to the transport
    #[error("Network error: {0}")]
    NetworkRequest(#[source] reqwest::Error),

    /// The connection to the API could not be established
    #[error("Cannot connect to {url}: {reason}")]
    Connect {
        /// The URL that was requested
        url: Url,
        /// Description of the underlying failure
        reason: String,
    },

    /// No response arrived within the configured network timeout
    #[error("Request to {0} timed out")]
    Timeout(Url),

    /// The response body could not be read
    #[error("Error reading response body: {0}")]
    ReadResponseBody(#[source] reqwest::Error),

    /// The response body is not the JSON document we expected
    #[error("Malformed API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The API answered with a status code we do not handle
    #[error("API returned status code {0}")]
    RejectedStatusCode(StatusCode),

    /// The API reported that we are sending too many requests
    #[error("Throttled by the API (429 Too Many Requests)")]
    Throttled,

    /// A lookup was requested for an empty token
    #[error("Empty input token")]
    EmptyInput,

    /// The rate governor settings are inconsistent
    #[error("Invalid rate limit configuration: {0}")]
    InvalidGovernorConfig(String),

    /// The batch was cancelled by the operator
    #[error("Interrupted")]
    Interrupted,
}

impl ErrorKind {
    /// Whether the request that failed is known to have left the process.
    ///
    /// Only requests that reached the wire consume local rate limit budget.
    #[must_use]
    pub const fn was_sent(&self) -> bool {
        !matches!(
            self,
            Self::BuildRequestClient(_)
                | Self::MissingApiKey
                | Self::InvalidApiKey(_)
                | Self::InvalidApiUrl(_)
                | Self::Connect { .. }
                | Self::EmptyInput
                | Self::InvalidGovernorConfig(_)
                | Self::Interrupted
        )
    }

    /// Returns `true` if this error was caused by server side throttling
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled)
    }

    /// Return the underlying reqwest error (if any)
    #[must_use]
    pub const fn reqwest_error(&self) -> Option<&reqwest::Error> {
        match self {
            Self::NetworkRequest(e) | Self::ReadResponseBody(e) | Self::BuildRequestClient(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NetworkRequest(e1), Self::NetworkRequest(e2))
            | (Self::ReadResponseBody(e1), Self::ReadResponseBody(e2))
            | (Self::BuildRequestClient(e1), Self::BuildRequestClient(e2)) => {
                e1.to_string() == e2.to_string()
            }
            (Self::MalformedResponse(e1), Self::MalformedResponse(e2)) => {
                e1.to_string() == e2.to_string()
            }
            (Self::Connect { url: u1, .. }, Self::Connect { url: u2, .. })
            | (Self::Timeout(u1), Self::Timeout(u2)) => u1 == u2,
            (Self::RejectedStatusCode(c1), Self::RejectedStatusCode(c2)) => c1 == c2,
            (Self::InvalidApiUrl(s1), Self::InvalidApiUrl(s2))
            | (Self::InvalidGovernorConfig(s1), Self::InvalidGovernorConfig(s2)) => s1 == s2,
            (Self::InvalidApiKey(_), Self::InvalidApiKey(_))
            | (Self::MissingApiKey, Self::MissingApiKey)
            | (Self::Throttled, Self::Throttled)
            | (Self::EmptyInput, Self::EmptyInput)
            | (Self::Interrupted, Self::Interrupted) => true,
            _ => false,
        }
    }
}

impl Eq for ErrorKind {}

impl Hash for ErrorKind {
    fn hash<H>(&self, state: &mut H)
    where
        H: std::hash::Hasher,
    {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::NetworkRequest(e) | Self::ReadResponseBody(e) | Self::BuildRequestClient(e) => {
                e.to_string().hash(state);
            }
            Self::MalformedResponse(e) => e.to_string().hash(state),
            Self::Connect { url, .. } | Self::Timeout(url) => url.hash(state),
            Self::RejectedStatusCode(code) => code.hash(state),
            Self::InvalidApiUrl(s) | Self::InvalidGovernorConfig(s) => s.hash(state),
            Self::InvalidApiKey(_)
            | Self::MissingApiKey
            | Self::Throttled
            | Self::EmptyInput
            | Self::Interrupted => {}
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<reqwest::Error> for ErrorKind {
    fn from(e: reqwest::Error) -> Self {
        Self::NetworkRequest(e)
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;
    use http::StatusCode;
    use url::Url;

    #[test]
    fn test_was_sent() {
        let url = Url::parse("https://api.pubg.com/shards/steam/players").unwrap();
        assert!(ErrorKind::Timeout(url.clone()).was_sent());
        assert!(ErrorKind::RejectedStatusCode(StatusCode::BAD_GATEWAY).was_sent());
        assert!(
            !ErrorKind::Connect {
                url,
                reason: "connection refused".into()
            }
            .was_sent()
        );
        assert!(!ErrorKind::EmptyInput.was_sent());
    }

    #[test]
    fn test_serializes_as_display_string() {
        let json = serde_json::to_string(&ErrorKind::Throttled).unwrap();
        assert_eq!(json, "\"Throttled by the API (429 Too Many Requests)\"");
    }
}
