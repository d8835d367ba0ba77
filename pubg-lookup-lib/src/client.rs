//! Player lookups against the PUBG API.
//!
//! This module defines two structs, [`Client`] and [`ClientBuilder`].
//! `Client` resolves [`LookupRequest`]s one at a time, always asking the
//! shared [`RateGovernor`] for admission before a request is sent.
//! `ClientBuilder` exposes the settings of a `Client`.
#![allow(clippy::module_name_repetitions)]

use std::time::Duration;

use http::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use typed_builder::TypedBuilder;
use url::Url;

use crate::{
    ErrorKind, LookupRequest, LookupResult, Platform, Result,
    ratelimit::{RateGovernor, parse_rate_limit_headers},
    transport::{ApiResponse, HttpTransport, Transport},
    types::{DEFAULT_API_URL, first_player},
};

/// Default timeout before a request is deemed as failed, 20 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
/// Default user agent, `pubg-lookup/<PKG_VERSION>`.
pub const DEFAULT_USER_AGENT: &str = concat!("pubg-lookup/", env!("CARGO_PKG_VERSION"));

/// Query parameter of the name search endpoint
const PLAYER_NAMES_FILTER: &str = "filter[playerNames]";

/// Builder for [`Client`].
#[derive(TypedBuilder, Debug, Clone)]
#[builder(field_defaults(default, setter(into)))]
#[builder(builder_method(doc = "
Create a builder for building `ClientBuilder`.

On the builder call, call methods with same name as its fields to set their values.

Finally, call `.build()` to create the instance of `ClientBuilder`.
"))]
pub struct ClientBuilder {
    /// API key sent as bearer token with every request.
    ///
    /// Keys are issued on the developer portal and carry a budget of
    /// requests per minute, see
    /// [`GovernorConfig`](crate::ratelimit::GovernorConfig).
    api_key: Option<SecretString>,
    /// Shard to query.
    platform: Platform,
    /// Root of the API, below which the shards live.
    ///
    /// Tests point this at a mock server.
    #[builder(default_code = "String::from(DEFAULT_API_URL)")]
    api_url: String,
    /// User agent of every request.
    #[builder(default_code = "String::from(DEFAULT_USER_AGENT)")]
    user_agent: String,
    /// Time to wait for a complete answer to one request.
    ///
    /// `None` waits forever.
    #[builder(default = Some(DEFAULT_TIMEOUT))]
    timeout: Option<Duration>,
    /// Repeat a request once after the server throttled it.
    ///
    /// When `false` a throttled lookup is reported as an error after
    /// the governor's throttle recovery finished.
    retry_throttled: bool,
}

impl Default for ClientBuilder {
    #[inline]
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientBuilder {
    /// Instantiates a [`Client`] which talks to the API over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - No API key is set, or it is empty.
    /// - The API key cannot be used as a header value.
    /// - The API URL is invalid.
    /// - The request client cannot be created.
    ///   See [here](https://docs.rs/reqwest/latest/reqwest/struct.ClientBuilder.html#errors).
    pub fn client(self) -> Result<Client> {
        let api_key = match self.api_key.as_ref() {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ => return Err(ErrorKind::MissingApiKey),
        };
        let transport = HttpTransport::new(api_key, &self.user_agent, self.timeout)?;
        self.client_with(transport)
    }

    /// Instantiates a [`Client`] sending its requests through `transport`.
    ///
    /// The transport is responsible for authentication, so no API key
    /// is required here.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the API URL is invalid.
    pub fn client_with<T: Transport>(self, transport: T) -> Result<Client<T>> {
        let api_url = Url::parse(self.api_url.trim())
            .map_err(|_| ErrorKind::InvalidApiUrl(self.api_url.clone()))?;
        let base_url = self.platform.base_url(&api_url)?;

        Ok(Client {
            transport,
            base_url,
            platform: self.platform,
            retry_throttled: self.retry_throttled,
        })
    }
}

/// Handles lookups and returns their results.
///
/// The client itself holds no rate limit state. All callers pass the same
/// [`RateGovernor`], so lookups made through several clients still share
/// one budget.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
    /// Shard URL, e.g. `https://api.pubg.com/shards/steam`
    base_url: Url,
    platform: Platform,
    retry_throttled: bool,
}

impl<T: Transport> Client<T> {
    /// Look up a single player.
    ///
    /// This never fails: every problem is reported as
    /// [`LookupResult::Errored`] so that a batch can continue.
    /// The governor is consulted before each request and charged for each
    /// request that reached the API, except for throttled ones.
    pub async fn lookup(
        &self,
        governor: &mut RateGovernor,
        request: &LookupRequest,
    ) -> LookupResult {
        let url = match self.endpoint(request) {
            Ok(url) => url,
            Err(e) => return errored(request, e),
        };

        let mut retried = false;
        loop {
            governor.admit().await;
            log::debug!("Looking up `{request}` at {url}");

            match self.transport.get(&url).await {
                Ok(response) if response.status == StatusCode::TOO_MANY_REQUESTS => {
                    governor.on_throttled().await;
                    if self.retry_throttled && !retried {
                        retried = true;
                        log::info!("Retrying `{request}` after throttling");
                        continue;
                    }
                    return errored(request, ErrorKind::Throttled);
                }
                Ok(response) => {
                    governor.record();
                    log_server_rate_limit(&response);
                    return classify_response(request, &response);
                }
                Err(e) => {
                    if e.was_sent() {
                        governor.record();
                    }
                    log::debug!("Lookup of `{request}` failed: {e}");
                    return errored(request, e);
                }
            }
        }
    }

    /// Classify `token` and look it up.
    ///
    /// An empty token is reported as [`ErrorKind::EmptyInput`]
    /// without sending a request.
    pub async fn lookup_token(&self, governor: &mut RateGovernor, token: &str) -> LookupResult {
        match LookupRequest::classify(token) {
            Ok(request) => self.lookup(governor, &request).await,
            Err(e) => LookupResult::Errored {
                input: token.to_string(),
                reason: e,
            },
        }
    }

    /// The URL a request is sent to.
    ///
    /// Names go to the search endpoint
    /// `{base}/players?filter[playerNames]={name}`, account IDs to
    /// `{base}/players/{id}`. Both are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path.
    pub fn endpoint(&self, request: &LookupRequest) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ErrorKind::InvalidApiUrl(self.base_url.to_string()))?;
            segments.push("players");
            if let LookupRequest::ById(id) = request {
                segments.push(id);
            }
        }
        if let LookupRequest::ByName(name) = request {
            url.query_pairs_mut().append_pair(PLAYER_NAMES_FILTER, name);
        }
        Ok(url)
    }

    /// The shard this client queries
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// The shard URL all endpoints are built from
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn errored(request: &LookupRequest, reason: ErrorKind) -> LookupResult {
    LookupResult::Errored {
        input: request.input().to_string(),
        reason,
    }
}

/// Map a complete, non-throttled answer to the outcome of a lookup
fn classify_response(request: &LookupRequest, response: &ApiResponse) -> LookupResult {
    let input = request.input().to_string();
    match response.status {
        StatusCode::NOT_FOUND => LookupResult::NotFound { input },
        status if status.is_success() => match first_player(&response.body) {
            Ok(Some(player)) => LookupResult::Resolved {
                input,
                canonical_id: player.id,
                canonical_name: player.attributes.name,
            },
            Ok(None) => LookupResult::NotFound { input },
            Err(e) => LookupResult::Errored { input, reason: e },
        },
        status => LookupResult::Errored {
            input,
            reason: ErrorKind::RejectedStatusCode(status),
        },
    }
}

fn log_server_rate_limit(response: &ApiResponse) {
    if let Some(limit) = parse_rate_limit_headers(&response.headers) {
        log::debug!(
            "Server reports {}/{} requests remaining",
            limit.remaining,
            limit.limit
        );
    }
}
