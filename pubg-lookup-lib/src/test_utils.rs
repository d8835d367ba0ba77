use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use tokio::time::Instant;
use url::Url;

use crate::{
    ClientBuilder, Result,
    client::Client,
    transport::{ApiResponse, Transport},
};

type Responder = Box<dyn Fn(usize, &Url) -> Result<ApiResponse> + Send + Sync>;

/// In-memory [`Transport`] answering from a closure.
///
/// The closure receives the zero-based index of the call and the URL.
/// Every call is logged with the (possibly paused) tokio time it was made at.
pub(crate) struct MockTransport {
    responder: Responder,
    calls: Mutex<Vec<(Url, Instant)>>,
}

impl MockTransport {
    pub(crate) fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(usize, &Url) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Answer every request with the same status and body
    pub(crate) fn always(status: StatusCode, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_, _| Ok(ApiResponse::new(status, body.clone())))
    }

    /// Answer every name lookup with a player whose name is the searched one
    pub(crate) fn echo_players() -> Arc<Self> {
        Self::new(|_, url| {
            let name = url
                .query_pairs()
                .find(|(key, _)| key == "filter[playerNames]")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();
            let body = test_utils::players_json!(format!("account.{name}"), name);
            Ok(ApiResponse::new(StatusCode::OK, body))
        })
    }

    pub(crate) fn calls(&self) -> Vec<(Url, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<ApiResponse> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((url.clone(), Instant::now()));
            calls.len() - 1
        };
        (self.responder)(index, url)
    }
}

/// A client on the default platform talking to `transport`
pub(crate) fn mock_client(transport: &Arc<MockTransport>) -> Client<Arc<MockTransport>> {
    ClientBuilder::default()
        .client_with(Arc::clone(transport))
        .unwrap()
}
