use serde::Serialize;
use std::time::Duration;
use tokio::time::{Instant, sleep};

use super::{GovernorConfig, MAX_DURATION};

/// Client side request budget for a fixed window.
///
/// The governor is an optimistic local estimate of the server's budget.
/// It allows up to `limit` requests per window and suspends the caller
/// for the cool-down once the budget is spent. A throttling response from
/// the server is authoritative and answered with the longer throttle
/// recovery, without touching the local window.
///
/// One governor serves one sequential caller. Every request goes through
/// [`RateGovernor::admit`] before it is sent and through
/// [`RateGovernor::record`] after it was sent, unless the server throttled it.
#[derive(Debug)]
pub struct RateGovernor {
    config: GovernorConfig,
    /// Requests recorded in the current window
    request_count: u32,
    /// End of the current window
    window_reset_at: Instant,
}

/// Snapshot of the governor's budget, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateUsage {
    /// Requests recorded in the current window
    pub request_count: u32,
    /// Maximum number of requests per window
    pub limit: u32,
    /// Time until the current window ends
    #[serde(with = "humantime_serde")]
    pub resets_in: Duration,
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new(GovernorConfig::default())
    }
}

impl RateGovernor {
    /// Create a governor whose first window starts now
    #[must_use]
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            config,
            request_count: 0,
            window_reset_at: window_end(Instant::now(), &config),
        }
    }

    /// Wait until one more request may be sent immediately.
    ///
    /// An expired window is reset before admission is evaluated, so a check
    /// exactly at the window boundary sees a fresh budget. If the budget is
    /// spent, this suspends for the cool-down and then starts a new window.
    pub async fn admit(&mut self) {
        let now = Instant::now();
        if now >= self.window_reset_at {
            log::debug!(
                "Rate window elapsed after {} requests, starting a new one",
                self.request_count
            );
            self.start_window(now);
        }

        if self.request_count >= self.config.limit {
            log::warn!(
                "Reached the API limit of {} requests per {}s, waiting {}s",
                self.config.limit,
                self.config.window.as_secs(),
                self.config.cooldown.as_secs()
            );
            sleep(self.config.cooldown.min(MAX_DURATION)).await;
            self.start_window(Instant::now());
            log::info!("Cool-down finished, continuing");
        }
    }

    /// Count one request that was sent.
    ///
    /// Do not call this for throttled responses.
    pub fn record(&mut self) {
        self.request_count = self.request_count.saturating_add(1);
        log::debug!(
            "API usage: {}/{}",
            self.request_count,
            self.config.limit
        );
    }

    /// Back off after the server reported throttling.
    ///
    /// Suspends for the throttle recovery. The local window is left alone;
    /// the next [`RateGovernor::admit`] evaluates it as usual.
    pub async fn on_throttled(&self) {
        log::warn!(
            "API is throttling requests, waiting {}s before continuing",
            self.config.throttle_recovery.as_secs()
        );
        sleep(self.config.throttle_recovery.min(MAX_DURATION)).await;
    }

    /// Discard the recorded requests and start a fresh window now
    pub fn reset(&mut self) {
        self.start_window(Instant::now());
    }

    /// Returns `true` if a request could currently be admitted without waiting
    #[must_use]
    pub fn has_budget(&self) -> bool {
        Instant::now() >= self.window_reset_at || self.request_count < self.config.limit
    }

    /// Requests recorded in the current window
    #[must_use]
    pub const fn request_count(&self) -> u32 {
        self.request_count
    }

    /// The settings this governor enforces
    #[must_use]
    pub const fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Current budget usage and time until the window ends
    #[must_use]
    pub fn usage(&self) -> RateUsage {
        RateUsage {
            request_count: self.request_count,
            limit: self.config.limit,
            resets_in: self.window_reset_at.saturating_duration_since(Instant::now()),
        }
    }

    fn start_window(&mut self, now: Instant) {
        self.request_count = 0;
        self.window_reset_at = window_end(now, &self.config);
    }
}

/// End of a window starting at `now`, capped at [`MAX_DURATION`]
fn window_end(now: Instant, config: &GovernorConfig) -> Instant {
    now + config.window.min(MAX_DURATION)
}
