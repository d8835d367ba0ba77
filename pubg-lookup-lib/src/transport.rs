//! The seam between the lookup logic and the network.
//!
//! [`Client`](crate::Client) only needs to issue `GET` requests and look at
//! the status, headers and body of the answer. [`HttpTransport`] does that
//! with reqwest; tests substitute their own [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use http::header::{self, HeaderMap, HeaderValue};
use http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{ErrorKind, Result};

/// Media type required by the API for all requests
pub const ACCEPT_JSON_API: &str = "application/vnd.api+json";

/// A timeout for only the connect phase of a request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully received API answer, regardless of its status code
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl ApiResponse {
    /// Create a response without headers
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends one `GET` request and waits for the complete answer.
///
/// Implementations return `Err` only if no complete answer arrived;
/// error status codes are returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`
    async fn get(&self, url: &Url) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &Url) -> Result<ApiResponse> {
        (**self).get(url).await
    }
}

/// [`Transport`] backed by a reqwest client carrying the API credentials
#[derive(Debug, Clone)]
pub struct HttpTransport {
    reqwest_client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport which authenticates every request with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - The API key or user agent cannot be used as a header value.
    /// - The request client cannot be created.
    ///   See [here](https://docs.rs/reqwest/latest/reqwest/struct.ClientBuilder.html#errors).
    pub fn new(api_key: &SecretString, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(ErrorKind::InvalidApiKey)?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_JSON_API));

        let builder = reqwest::ClientBuilder::new()
            .gzip(true)
            .default_headers(headers)
            .user_agent(user_agent)
            .connect_timeout(CONNECT_TIMEOUT);

        let reqwest_client = (match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        })
        .build()
        .map_err(ErrorKind::BuildRequestClient)?;

        Ok(Self { reqwest_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<ApiResponse> {
        let response = self
            .reqwest_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ErrorKind::Timeout(url.clone())
            } else {
                ErrorKind::ReadResponseBody(e)
            }
        })?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// The stage at which a request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// Building the request failed, nothing was sent
    Build,
    /// No connection was established, nothing was sent
    Connect,
    /// The request went out but no answer arrived in time
    Timeout,
    /// The request went out and the exchange broke
    Network,
}

impl Failure {
    /// A timeout while connecting is a connect failure, the request never left
    const fn of(is_builder: bool, is_connect: bool, is_timeout: bool) -> Self {
        if is_builder {
            Self::Build
        } else if is_connect {
            Self::Connect
        } else if is_timeout {
            Self::Timeout
        } else {
            Self::Network
        }
    }
}

/// Map a reqwest error to the error taxonomy of this crate
fn classify_error(url: &Url, e: reqwest::Error) -> ErrorKind {
    match Failure::of(e.is_builder(), e.is_connect(), e.is_timeout()) {
        Failure::Build => ErrorKind::BuildRequestClient(e),
        Failure::Connect => ErrorKind::Connect {
            url: url.clone(),
            reason: e.to_string(),
        },
        Failure::Timeout => ErrorKind::Timeout(url.clone()),
        Failure::Network => ErrorKind::NetworkRequest(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_key() -> SecretString {
        SecretString::from("secret-key".to_string())
    }

    #[tokio::test]
    async fn test_sends_credentials_and_media_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/shards/steam/players/account.1"))
            .and(header("authorization", "Bearer secret-key"))
            .and(header("accept", ACCEPT_JSON_API))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = HttpTransport::new(&api_key(), "test-agent", None).unwrap();
        let url = Url::parse(&format!("{}/shards/steam/players/account.1", mock_server.uri())).unwrap();
        let response = transport.get(&url).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let mock_server = test_utils::mock_server!(StatusCode::TOO_MANY_REQUESTS);
        let transport = HttpTransport::new(&api_key(), "test-agent", None).unwrap();
        let url = Url::parse(&mock_server.uri()).unwrap();

        let response = transport.get(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_delay = Duration::from_millis(200);
        let transport_timeout = Duration::from_millis(20);
        assert!(mock_delay > transport_timeout);

        let mock_server = test_utils::mock_server!(StatusCode::OK, set_delay(mock_delay));
        let transport = HttpTransport::new(&api_key(), "test-agent", Some(transport_timeout)).unwrap();
        let url = Url::parse(&mock_server.uri()).unwrap();

        let error = transport.get(&url).await.unwrap_err();
        assert!(matches!(error, ErrorKind::Timeout(_)));
        assert!(error.was_sent());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on port 9 of the loopback interface on test machines
        let url = Url::parse("http://127.0.0.1:9/players").unwrap();
        let transport = HttpTransport::new(&api_key(), "test-agent", Some(Duration::from_secs(2))).unwrap();

        let error = transport.get(&url).await.unwrap_err();
        assert!(matches!(error, ErrorKind::Connect { .. }));
        assert!(!error.was_sent());
    }

    #[test]
    fn test_connect_timeout_is_a_connect_failure() {
        assert_eq!(Failure::of(false, true, true), Failure::Connect);
        assert_eq!(Failure::of(false, true, false), Failure::Connect);
        assert_eq!(Failure::of(false, false, true), Failure::Timeout);
        assert_eq!(Failure::of(false, false, false), Failure::Network);
        assert_eq!(Failure::of(true, false, false), Failure::Build);
    }

    #[test]
    fn test_invalid_api_key() {
        let key = SecretString::from("line\nbreak".to_string());
        let error = HttpTransport::new(&key, "test-agent", None).unwrap_err();
        assert!(matches!(error, ErrorKind::InvalidApiKey(_)));
    }
}
