//! Sequential batch driver.
//!
//! [`run_batch`] looks up a list of requests in order through one
//! [`Client`] and one [`RateGovernor`], reporting each result to a
//! [`BatchObserver`] as soon as it is known.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::{
    BatchSummary, ErrorKind, LookupRequest, LookupResult, Result, client::Client,
    ratelimit::RateGovernor, transport::Transport,
};

/// Default pause between two lookups while budget remains, 500ms.
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

/// Settings of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Pause after a lookup if more follow and the current window still
    /// has budget. Once the budget is spent, [`RateGovernor::admit`] waits
    /// instead.
    pub pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            pause: DEFAULT_PAUSE,
        }
    }
}

/// Gets notified about the progress of a batch
pub trait BatchObserver {
    /// A lookup is about to start
    fn lookup_started(&mut self, _index: usize, _request: &LookupRequest) {}

    /// A lookup finished
    fn lookup_finished(&mut self, _index: usize, _result: &LookupResult) {}
}

impl BatchObserver for () {}

/// Look up `requests` one after another.
///
/// Results keep the order of `requests`; duplicates are looked up again.
/// A failing lookup does not stop the batch.
///
/// # Errors
///
/// Returns [`ErrorKind::Interrupted`] if `cancel` fires, including while
/// waiting for the rate limit. Results reported so far stay reported.
pub async fn run_batch<T, O>(
    client: &Client<T>,
    governor: &mut RateGovernor,
    requests: &[LookupRequest],
    options: &BatchOptions,
    cancel: &CancellationToken,
    observer: &mut O,
) -> Result<BatchSummary>
where
    T: Transport,
    O: BatchObserver + ?Sized,
{
    let mut results = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        observer.lookup_started(index, request);

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(interrupted(index, requests.len())),
            result = client.lookup(governor, request) => result,
        };

        observer.lookup_finished(index, &result);
        results.push(result);

        let more_follow = index + 1 < requests.len();
        if more_follow && !options.pause.is_zero() && governor.has_budget() {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(interrupted(index + 1, requests.len())),
                () = tokio::time::sleep(options.pause) => {}
            }
        }
    }

    Ok(BatchSummary {
        results,
        usage: governor.usage(),
    })
}

fn interrupted(done: usize, total: usize) -> ErrorKind {
    log::warn!("Batch interrupted after {done} of {total} lookups");
    ErrorKind::Interrupted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    use super::*;
    use crate::{
        ResultKind,
        ratelimit::GovernorConfig,
        test_utils::{MockTransport, mock_client},
        transport::ApiResponse,
        types::parse_batch,
    };

    #[derive(Default)]
    struct Recorder {
        started: Vec<String>,
        finished: Vec<ResultKind>,
    }

    impl BatchObserver for Recorder {
        fn lookup_started(&mut self, _index: usize, request: &LookupRequest) {
            self.started.push(request.input().to_string());
        }

        fn lookup_finished(&mut self, _index: usize, result: &LookupResult) {
            self.finished.push(result.kind());
        }
    }

    /// Knows `Alice` and `account.999`, nobody else
    fn directory() -> Arc<MockTransport> {
        MockTransport::new(|_, url| {
            let known_name = url
                .query_pairs()
                .any(|(_, value)| value == "Alice");
            if known_name {
                Ok(ApiResponse::new(
                    StatusCode::OK,
                    test_utils::players_json!("account.1", "Alice"),
                ))
            } else if url.path().ends_with("/account.999") {
                Ok(ApiResponse::new(
                    StatusCode::OK,
                    test_utils::player_json!("account.999", "Carol"),
                ))
            } else {
                Ok(ApiResponse::new(StatusCode::OK, r#"{"data": []}"#))
            }
        })
    }

    fn requests(tokens: &[&str]) -> Vec<LookupRequest> {
        tokens
            .iter()
            .map(|token| LookupRequest::classify(token).unwrap())
            .collect()
    }

    fn kinds(summary: &BatchSummary) -> Vec<ResultKind> {
        summary.results.iter().map(LookupResult::kind).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_input_order() {
        let transport = directory();
        let client = mock_client(&transport);
        let mut governor = RateGovernor::default();
        let mut recorder = Recorder::default();

        let summary = run_batch(
            &client,
            &mut governor,
            &requests(&["Alice", "account.999", "Bob"]),
            &BatchOptions::default(),
            &CancellationToken::new(),
            &mut recorder,
        )
        .await
        .unwrap();

        let inputs: Vec<&str> = summary.results.iter().map(LookupResult::input).collect();
        assert_eq!(inputs, vec!["Alice", "account.999", "Bob"]);
        assert_eq!(
            kinds(&summary),
            vec![ResultKind::Resolved, ResultKind::Resolved, ResultKind::NotFound]
        );
        assert_eq!(recorder.started, vec!["Alice", "account.999", "Bob"]);
        assert_eq!(recorder.finished, kinds(&summary));
        assert_eq!(summary.usage.request_count, 3);
        assert_eq!(summary.unresolved(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rerun_yields_same_classifications() {
        let transport = directory();
        let client = mock_client(&transport);
        let mut governor = RateGovernor::default();
        let batch = requests(&["Bob", "Alice", "Alice", "account.999", "account.404"]);

        let mut runs = Vec::new();
        for _ in 0..2 {
            let summary = run_batch(
                &client,
                &mut governor,
                &batch,
                &BatchOptions::default(),
                &CancellationToken::new(),
                &mut (),
            )
            .await
            .unwrap();
            runs.push(summary.results);
        }

        assert_eq!(runs[0], runs[1]);
        assert_eq!(runs[0].len(), 5);
        // The duplicate is looked up twice per run
        assert_eq!(transport.call_count(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trailing_delimiter_issues_two_lookups() {
        let transport = MockTransport::echo_players();
        let client = mock_client(&transport);
        let mut governor = RateGovernor::default();

        let batch = parse_batch("PlayerOne|account.12345|");
        run_batch(
            &client,
            &mut governor,
            &batch,
            &BatchOptions::default(),
            &CancellationToken::new(),
            &mut (),
        )
        .await
        .unwrap();

        let urls: Vec<String> = transport
            .calls()
            .into_iter()
            .map(|(url, _)| url.to_string())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://api.pubg.com/shards/steam/players?filter%5BplayerNames%5D=PlayerOne",
                "https://api.pubg.com/shards/steam/players/account.12345",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_only_while_budget_remains() {
        let transport = MockTransport::echo_players();
        let client = mock_client(&transport);
        let config = GovernorConfig {
            limit: 2,
            ..GovernorConfig::default()
        };
        let mut governor = RateGovernor::new(config);

        let start = Instant::now();
        run_batch(
            &client,
            &mut governor,
            &requests(&["A", "B", "C"]),
            &BatchOptions::default(),
            &CancellationToken::new(),
            &mut (),
        )
        .await
        .unwrap();

        let calls = transport.calls();
        assert_eq!(calls[1].1 - calls[0].1, DEFAULT_PAUSE);
        // Budget spent after the second lookup, so the cool-down replaces the pause
        assert_eq!(calls[2].1 - calls[1].1, config.cooldown);
        // No pause after the last lookup
        assert_eq!(start.elapsed(), DEFAULT_PAUSE + config.cooldown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start() {
        let transport = MockTransport::echo_players();
        let client = mock_client(&transport);
        let mut governor = RateGovernor::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let error = run_batch(
            &client,
            &mut governor,
            &requests(&["A"]),
            &BatchOptions::default(),
            &cancel,
            &mut (),
        )
        .await
        .unwrap_err();

        assert_eq!(error, ErrorKind::Interrupted);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_cooldown() {
        let transport = MockTransport::echo_players();
        let client = mock_client(&transport);
        let config = GovernorConfig {
            limit: 1,
            ..GovernorConfig::default()
        };
        let mut governor = RateGovernor::new(config);
        let mut recorder = Recorder::default();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let error = run_batch(
            &client,
            &mut governor,
            &requests(&["A", "B"]),
            &BatchOptions::default(),
            &cancel,
            &mut recorder,
        )
        .await
        .unwrap_err();

        assert_eq!(error, ErrorKind::Interrupted);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert_eq!(transport.call_count(), 1);
        assert_eq!(recorder.finished, vec![ResultKind::Resolved]);
        assert_eq!(governor.request_count(), 1);
    }
}
